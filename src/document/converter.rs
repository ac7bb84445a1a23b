//! Batch converters for loading datasets from files.
//!
//! # Example
//!
//! ```no_run
//! use tweetvec::document::converter::BatchConverter;
//! use tweetvec::document::converter::csv::CsvBatchConverter;
//!
//! let converter = CsvBatchConverter::new();
//! let batch = converter.convert("datasets/train.csv").unwrap();
//! println!("loaded {} tweets", batch.len());
//! ```

use std::io::Read;
use std::path::Path;

use crate::document::batch::Batch;
use crate::error::Result;

pub mod csv;

/// A trait for converting tabular files into a [`Batch`].
pub trait BatchConverter {
    /// Read a whole batch from any reader.
    fn convert_reader<R: Read>(&self, reader: R) -> Result<Batch>;

    /// Read a whole batch from a file.
    fn convert<P: AsRef<Path>>(&self, path: P) -> Result<Batch> {
        let file = std::fs::File::open(path)?;
        self.convert_reader(file)
    }
}
