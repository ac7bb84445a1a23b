//! Error types for the tweetvec library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`TweetvecError`] enum. Helper constructors keep call sites short.
//!
//! # Examples
//!
//! ```
//! use tweetvec::error::{Result, TweetvecError};
//!
//! fn lookup_column(name: &str) -> Result<()> {
//!     Err(TweetvecError::field(format!("column '{name}' not found")))
//! }
//!
//! assert!(lookup_column("text").is_err());
//! ```

use std::io;

use thiserror::Error;

/// The main error type for tweetvec operations.
#[derive(Error, Debug)]
pub enum TweetvecError {
    /// I/O errors (reading datasets, lexicons, configuration)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Timestamp or value parse errors
    #[error("Parse error: {0}")]
    Parse(String),

    /// Column/field errors (missing source column, duplicate target column)
    #[error("Field error: {0}")]
    Field(String),

    /// Analysis errors (extractor output shape, tokenization)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Lexicon resource errors. These are fatal for a run.
    #[error("Lexicon error: {0}")]
    Lexicon(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Classifier errors (predicting before fitting, shape mismatch)
    #[error("Model error: {0}")]
    Model(String),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),

    /// Generic anyhow error
    #[error("Anyhow error: {0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Result type alias for operations that may fail with [`TweetvecError`].
pub type Result<T> = std::result::Result<T, TweetvecError>;

impl TweetvecError {
    /// Create a new parse error.
    pub fn parse<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Parse(msg.into())
    }

    /// Create a new field error.
    pub fn field<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Field(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Analysis(msg.into())
    }

    /// Create a new lexicon error.
    pub fn lexicon<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Lexicon(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Config(msg.into())
    }

    /// Create a new model error.
    pub fn model<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Model(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Other(msg.into())
    }

    /// Create a new invalid argument error.
    pub fn invalid_argument<S: Into<String>>(msg: S) -> Self {
        TweetvecError::Other(format!("Invalid argument: {}", msg.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = TweetvecError::field("column 'text' not found");
        assert_eq!(error.to_string(), "Field error: column 'text' not found");

        let error = TweetvecError::parse("bad timestamp");
        assert_eq!(error.to_string(), "Parse error: bad timestamp");

        let error = TweetvecError::invalid_argument("test_size must be in (0, 1)");
        assert_eq!(
            error.to_string(),
            "Error: Invalid argument: test_size must be in (0, 1)"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = TweetvecError::from(io_error);

        match error {
            TweetvecError::Io(_) => {}
            _ => panic!("Expected IO error variant"),
        }
    }
}
