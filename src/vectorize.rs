//! Vectorization of augmented batches.
//!
//! The [`Vectorizer`] drives a [`crate::features::FeatureComposer`] over one
//! source batch, drops the raw text, timestamp, label and identifier
//! columns, and coerces every remaining cell into a finite `f64`. The result
//! is a [`FeatureMatrix`] whose rows line up with the source rows and whose
//! columns are in sorted name order.

pub mod matrix;
pub mod vectorizer;

pub use matrix::FeatureMatrix;
pub use vectorizer::{Extraction, Label, Vectorizer};
