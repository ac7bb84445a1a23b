//! Feature derivation for tweets.
//!
//! Each analyzer maps one source value (tweet text or creation timestamp)
//! to a [`FeatureOutput`]: either a single scalar or a small record of named
//! scalars. The [`composer::FeatureComposer`] applies an ordered list of
//! analyzers to a [`crate::document::Batch`] and appends their outputs as new
//! columns.
//!
//! - [`lexical`] - Pure functions over the tweet text
//! - [`temporal`] - Period of day and weekday of the timestamp
//! - [`sentiment`] - VADER-style polarity scores
//! - [`emotion`] - NRC word-emotion association sums
//! - [`entity`] - Optional named-entity masking
//! - [`extractor`] - The [`extractor::FeatureExtractor`] trait and its implementations
//!
//! # Examples
//!
//! ```
//! use tweetvec::features::lexical;
//!
//! assert_eq!(lexical::avg_sentence_length("Hello world."), 2.0);
//! assert_eq!(lexical::is_mention("@user hi"), 1.0);
//! ```

pub mod composer;
pub mod emotion;
pub mod entity;
pub mod extractor;
pub mod lexical;
pub mod output;
pub mod sentiment;
pub mod temporal;

pub use composer::{FeatureComposer, FeatureStep, FeatureTarget};
pub use extractor::FeatureExtractor;
pub use output::{FeatureOutput, FeatureRecord};
