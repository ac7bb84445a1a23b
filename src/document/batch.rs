//! In-memory batch of records.
//!
//! A [`Batch`] is an ordered collection of [`Document`]s sharing an ordered
//! set of column names. Augmentation only ever appends columns; the row
//! count never changes.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::document::document::Document;
use crate::document::field_value::FieldValue;
use crate::error::{Result, TweetvecError};

static NULL: FieldValue = FieldValue::Null;

/// Ordered rows sharing an extensible set of named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    columns: Vec<String>,
    rows: Vec<Document>,
}

impl Batch {
    /// Create an empty batch with the given columns.
    pub fn new(columns: Vec<String>) -> Self {
        Batch {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a batch from columns and rows.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Document>) -> Self {
        Batch { columns, rows }
    }

    /// Append a row. Fields outside the column set are kept but not listed.
    pub fn push_row(&mut self, row: Document) {
        self.rows.push(row);
    }

    /// Column names in insertion order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Check whether the batch has a column.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// All rows.
    pub fn rows(&self) -> &[Document] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if the batch has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Get a cell. Rows lacking the field read as [`FieldValue::Null`].
    pub fn value(&self, row: usize, column: &str) -> Option<&FieldValue> {
        self.rows
            .get(row)
            .map(|doc| doc.get_field(column).unwrap_or(&NULL))
    }

    /// Get every value of a column in row order.
    pub fn column_values(&self, column: &str) -> Result<Vec<&FieldValue>> {
        if !self.has_column(column) {
            return Err(TweetvecError::field(format!(
                "column '{column}' not found in batch"
            )));
        }

        Ok(self
            .rows
            .iter()
            .map(|doc| doc.get_field(column).unwrap_or(&NULL))
            .collect())
    }

    /// Return a new batch with one more column.
    ///
    /// The column must not exist yet and `values` must have one entry per row.
    pub fn with_column<S: Into<String>>(mut self, name: S, values: Vec<FieldValue>) -> Result<Self> {
        let name = name.into();
        if self.has_column(&name) {
            return Err(TweetvecError::field(format!(
                "column '{name}' already exists in batch"
            )));
        }
        if values.len() != self.rows.len() {
            return Err(TweetvecError::field(format!(
                "column '{name}' has {} values for {} rows",
                values.len(),
                self.rows.len()
            )));
        }

        for (row, value) in self.rows.iter_mut().zip(values) {
            row.add_field(name.clone(), value);
        }
        self.columns.push(name);

        Ok(self)
    }

    /// Return a new batch with several columns appended at once.
    ///
    /// All names are checked before any column is added.
    pub fn with_columns(self, columns: Vec<(String, Vec<FieldValue>)>) -> Result<Self> {
        let mut seen = HashSet::new();
        for (name, _) in &columns {
            if self.has_column(name) || !seen.insert(name.as_str()) {
                return Err(TweetvecError::field(format!(
                    "column '{name}' already exists in batch"
                )));
            }
        }

        columns
            .into_iter()
            .try_fold(self, |batch, (name, values)| batch.with_column(name, values))
    }

    /// Return a new batch holding the given rows, in the given order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Self> {
        let rows = indices
            .iter()
            .map(|&i| {
                self.rows.get(i).cloned().ok_or_else(|| {
                    TweetvecError::invalid_argument(format!(
                        "row {i} out of range for batch of {} rows",
                        self.rows.len()
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Batch {
            columns: self.columns.clone(),
            rows,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_batch() -> Batch {
        let mut batch = Batch::new(vec!["text".to_string(), "label".to_string()]);
        batch.push_row(
            Document::builder()
                .add_text("text", "first")
                .add_integer("label", 1)
                .build(),
        );
        batch.push_row(Document::builder().add_text("text", "second").build());
        batch
    }

    #[test]
    fn test_missing_values_read_as_null() {
        let batch = sample_batch();
        assert_eq!(batch.value(1, "label"), Some(&FieldValue::Null));
        assert_eq!(batch.value(5, "label"), None);

        let labels = batch.column_values("label").unwrap();
        assert_eq!(labels, vec![&FieldValue::Integer(1), &FieldValue::Null]);
    }

    #[test]
    fn test_column_values_unknown_column() {
        let batch = sample_batch();
        assert!(matches!(
            batch.column_values("created"),
            Err(TweetvecError::Field(_))
        ));
    }

    #[test]
    fn test_with_column_appends() {
        let batch = sample_batch();
        let augmented = batch
            .clone()
            .with_column("length", vec![5.0.into(), 6.0.into()])
            .unwrap();

        assert_eq!(augmented.columns(), &["text", "label", "length"]);
        assert_eq!(augmented.len(), batch.len());
        assert_eq!(augmented.value(1, "length"), Some(&FieldValue::Float(6.0)));
        assert!(!batch.has_column("length"));
    }

    #[test]
    fn test_with_column_rejects_duplicates_and_bad_length() {
        let batch = sample_batch();
        assert!(batch.clone().with_column("text", vec![0.0.into(), 0.0.into()]).is_err());
        assert!(batch.with_column("length", vec![0.0.into()]).is_err());
    }

    #[test]
    fn test_with_columns_checks_all_names_first() {
        let batch = sample_batch();
        let result = batch.with_columns(vec![
            ("a".to_string(), vec![0.0.into(), 0.0.into()]),
            ("a".to_string(), vec![1.0.into(), 1.0.into()]),
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_select_rows() {
        let batch = sample_batch();
        let selected = batch.select_rows(&[1, 0]).unwrap();
        assert_eq!(selected.value(0, "text").unwrap().as_text(), Some("second"));
        assert_eq!(selected.columns(), batch.columns());
        assert!(batch.select_rows(&[2]).is_err());
    }
}
