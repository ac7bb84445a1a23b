//! CSV format batch converter.
//!
//! Converts a delimited table whose first row holds the column names:
//! ```csv
//! ,text,favorited,created,retweetCount,label
//! 0,"Thank you Ohio! #MAGA",False,2016-10-26 20:02:23,8922,1
//! ```
//!
//! By default the first column is an unnamed row index and is dropped.

use std::collections::HashSet;
use std::io::Read;

use csv::ReaderBuilder;
use log::debug;

use crate::document::batch::Batch;
use crate::document::converter::BatchConverter;
use crate::document::document::Document;
use crate::document::field_value::FieldValue;
use crate::error::{Result, TweetvecError};

/// A batch converter for CSV files.
///
/// Supports:
/// - Text fields
/// - Integer fields (auto-detected)
/// - Float fields (auto-detected)
/// - Boolean fields (true/false, auto-detected)
/// - Missing values (empty cells become `Null`)
#[derive(Debug, Clone)]
pub struct CsvBatchConverter {
    /// CSV delimiter character (default: ',')
    delimiter: u8,
    /// Whether to trim whitespace from fields
    trim: bool,
    /// Whether the first column is a row index to drop
    index_column: bool,
    /// Columns kept verbatim as text, without type inference
    text_columns: HashSet<String>,
}

impl Default for CsvBatchConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvBatchConverter {
    /// Create a new CSV converter with comma delimiter.
    pub fn new() -> Self {
        CsvBatchConverter {
            delimiter: b',',
            trim: false,
            index_column: true,
            text_columns: ["text", "created"].iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Set a custom delimiter character.
    ///
    /// The delimiter must be a single ASCII character.
    pub fn with_delimiter(mut self, delimiter: char) -> Result<Self> {
        if !delimiter.is_ascii() {
            return Err(TweetvecError::invalid_argument(format!(
                "CSV delimiter must be an ASCII character, got '{delimiter}'"
            )));
        }
        self.delimiter = delimiter as u8;
        Ok(self)
    }

    /// Set whether to trim whitespace from fields.
    pub fn with_trim(mut self, trim: bool) -> Self {
        self.trim = trim;
        self
    }

    /// Set whether the first column is an index column to drop.
    pub fn with_index_column(mut self, index_column: bool) -> Self {
        self.index_column = index_column;
        self
    }

    /// Set the columns that are never type-inferred.
    pub fn with_text_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.text_columns = columns.into_iter().map(Into::into).collect();
        self
    }

    fn field_value(&self, column: &str, raw: &str) -> FieldValue {
        if self.text_columns.contains(column) {
            FieldValue::Text(raw.to_string())
        } else {
            FieldValue::infer(raw)
        }
    }
}

impl BatchConverter for CsvBatchConverter {
    fn convert_reader<R: Read>(&self, reader: R) -> Result<Batch> {
        let trim = if self.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        };
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(trim)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| TweetvecError::parse(format!("Failed to read CSV headers: {e}")))?
            .clone();

        let skip = usize::from(self.index_column);
        if headers.len() <= skip {
            return Err(TweetvecError::parse("CSV header has no data columns"));
        }

        let columns: Vec<String> = headers.iter().skip(skip).map(|h| h.to_string()).collect();
        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.as_str()) {
                return Err(TweetvecError::parse(format!(
                    "CSV header repeats column '{column}'"
                )));
            }
        }

        let mut batch = Batch::new(columns.clone());
        for (line, record) in reader.records().enumerate() {
            let record = record.map_err(|e| {
                TweetvecError::parse(format!("Failed to read CSV record {}: {e}", line + 1))
            })?;

            let mut doc = Document::new();
            for (column, raw) in columns.iter().zip(record.iter().skip(skip)) {
                doc.add_field(column.clone(), self.field_value(column, raw));
            }
            batch.push_row(doc);
        }

        debug!(
            "read {} rows with {} columns from CSV",
            batch.len(),
            batch.columns().len()
        );

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = ",text,favorited,created,retweetCount,longitude,label\n\
        0,\"Thank you, Ohio!\",False,2016-10-26 20:02:23,8922,,1\n\
        1,123,TRUE,2016-10-27 08:14:00,17,-73.9,-1\n";

    #[test]
    fn test_csv_drops_index_column() {
        let batch = CsvBatchConverter::new()
            .convert_reader(SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(
            batch.columns(),
            &["text", "favorited", "created", "retweetCount", "longitude", "label"]
        );
        assert_eq!(batch.len(), 2);
    }

    #[test]
    fn test_csv_type_inference() {
        let batch = CsvBatchConverter::new()
            .convert_reader(SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(
            batch.value(0, "text"),
            Some(&FieldValue::Text("Thank you, Ohio!".to_string()))
        );
        assert_eq!(batch.value(0, "favorited"), Some(&FieldValue::Boolean(false)));
        assert_eq!(batch.value(0, "retweetCount"), Some(&FieldValue::Integer(8922)));
        assert_eq!(batch.value(0, "longitude"), Some(&FieldValue::Null));
        assert_eq!(batch.value(1, "longitude"), Some(&FieldValue::Float(-73.9)));
        assert_eq!(batch.value(1, "label"), Some(&FieldValue::Integer(-1)));
    }

    #[test]
    fn test_csv_text_columns_not_inferred() {
        let batch = CsvBatchConverter::new()
            .convert_reader(SAMPLE.as_bytes())
            .unwrap();

        assert_eq!(
            batch.value(1, "text"),
            Some(&FieldValue::Text("123".to_string()))
        );
    }

    #[test]
    fn test_csv_without_index_column() {
        let csv = "text\tlabel\nhello\t1";
        let batch = CsvBatchConverter::new()
            .with_index_column(false)
            .with_delimiter('\t')
            .unwrap()
            .convert_reader(csv.as_bytes())
            .unwrap();

        assert_eq!(batch.columns(), &["text", "label"]);
        assert_eq!(batch.value(0, "label"), Some(&FieldValue::Integer(1)));
    }

    #[test]
    fn test_csv_non_ascii_delimiter_rejected() {
        let err = CsvBatchConverter::new().with_delimiter('é').unwrap_err();
        assert!(err.to_string().contains("ASCII"));

        assert!(CsvBatchConverter::new().with_delimiter(';').is_ok());
    }

    #[test]
    fn test_csv_empty_input() {
        let result = CsvBatchConverter::new().convert_reader("".as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_field_count_mismatch() {
        let csv = ",text,label\n0,hello\n";
        let result = CsvBatchConverter::new().convert_reader(csv.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_csv_duplicate_header() {
        let csv = ",text,text\n0,a,b\n";
        let result = CsvBatchConverter::new().convert_reader(csv.as_bytes());
        assert!(result.is_err());
    }
}
