//! Records and batches.
//!
//! This module provides the in-memory data model of the pipeline:
//!
//! - [`document::Document`] - One input row (tweet) as named field values
//! - [`field_value::FieldValue`] - Typed cell values with numeric coercion
//! - [`batch::Batch`] - Ordered rows sharing an extensible column set
//! - [`converter`] - Loading batches from delimited files
//!
//! # Examples
//!
//! ```
//! use tweetvec::document::{Batch, Document};
//!
//! let mut batch = Batch::new(vec!["text".to_string(), "created".to_string()]);
//! batch.push_row(
//!     Document::builder()
//!         .add_text("text", "Make America Great Again!")
//!         .add_text("created", "2016-10-26 20:02:23")
//!         .build(),
//! );
//!
//! assert_eq!(batch.len(), 1);
//! assert_eq!(batch.columns().len(), 2);
//! ```

pub mod batch;
pub mod converter;
#[allow(clippy::module_inception)]
pub mod document;
pub mod field_value;

pub use batch::Batch;
pub use document::{Document, DocumentBuilder};
pub use field_value::FieldValue;
