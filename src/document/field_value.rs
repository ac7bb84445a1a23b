//! Field value types for records.
//!
//! [`FieldValue`] represents one cell of a batch. Raw CSV cells are inferred
//! into booleans, integers, floats or text; derived feature columns are
//! always floats.
//!
//! # Numeric Coercion
//!
//! Vectorization needs every cell as a finite `f64`. [`FieldValue::to_f64`]
//! never fails: anything that is not a number becomes `0.0`.
//!
//! ```
//! use tweetvec::document::FieldValue;
//!
//! assert_eq!(FieldValue::Integer(42).to_f64(), 42.0);
//! assert_eq!(FieldValue::Boolean(true).to_f64(), 1.0);
//! assert_eq!(FieldValue::Text("3.5".to_string()).to_f64(), 3.5);
//! assert_eq!(FieldValue::Text("iPhone".to_string()).to_f64(), 0.0);
//! assert_eq!(FieldValue::Null.to_f64(), 0.0);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Represents a value for a field in a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    /// Text value
    Text(String),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Boolean value
    Boolean(bool),
    /// Missing value
    Null,
}

impl FieldValue {
    /// Infer the field value type from a raw string.
    ///
    /// Empty strings become [`FieldValue::Null`].
    pub fn infer(value: &str) -> FieldValue {
        if value.is_empty() {
            return FieldValue::Null;
        }

        if value.eq_ignore_ascii_case("true") {
            return FieldValue::Boolean(true);
        }
        if value.eq_ignore_ascii_case("false") {
            return FieldValue::Boolean(false);
        }

        if let Ok(int_val) = value.parse::<i64>() {
            return FieldValue::Integer(int_val);
        }

        if let Ok(float_val) = value.parse::<f64>() {
            return FieldValue::Float(float_val);
        }

        FieldValue::Text(value.to_string())
    }

    /// Convert to text if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Check whether this is a missing value.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Coerce to a finite number; anything else is `0.0`.
    pub fn to_f64(&self) -> f64 {
        let value = match self {
            FieldValue::Integer(i) => *i as f64,
            FieldValue::Float(f) => *f,
            FieldValue::Boolean(b) => {
                if *b {
                    1.0
                } else {
                    0.0
                }
            }
            FieldValue::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            FieldValue::Null => 0.0,
        };

        if value.is_finite() { value } else { 0.0 }
    }

    /// Render the value as the string an analyzer reads.
    ///
    /// Missing values read as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Float(v) => write!(f, "{v}"),
            FieldValue::Boolean(b) => write!(f, "{b}"),
            FieldValue::Null => Ok(()),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}
