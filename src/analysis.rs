//! Token analysis for tweet text.
//!
//! This module provides the tokenization and normalization pipeline used by
//! the lexicon-backed features: a [`tokenizer::Tokenizer`] splits text into
//! tokens, [`token_filter::Filter`]s transform them (lowercasing, stemming),
//! and an [`analyzer::Analyzer`] chains both.
//!
//! ```text
//! Raw Text → Tokenizer → Lowercase → Stem → Tokens
//! ```

pub mod analyzer;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::Analyzer;
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::Tokenizer;
