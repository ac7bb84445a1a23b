//! # tweetvec
//!
//! Feature derivation and vectorization for short-text classification.
//!
//! A tabular batch of tweets is augmented with derived feature columns
//! (lexical statistics, punctuation and keyword counts, period of day,
//! weekday, VADER sentiment and NRC emotion scores) and then turned into a
//! numeric feature matrix that a classifier can consume.
//!
//! ## Modules
//!
//! - [`analysis`] - Tokenizers, token filters and analyzers
//! - [`document`] - Records, batches and CSV loading
//! - [`features`] - Feature extractors and the feature composer
//! - [`vectorize`] - Feature matrices and the caching vectorizer
//! - [`ml`] - Train/test splitting, scaling and a baseline classifier
//! - [`config`] - Vocabularies, column names and lexicon paths
//! - [`cli`] - The `tweetvec` command line interface

pub mod analysis;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod features;
pub mod ml;
pub mod vectorize;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
