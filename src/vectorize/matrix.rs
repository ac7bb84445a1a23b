//! Dense row-major feature matrix.

use std::io::Write;

use serde::Serialize;

use crate::error::{Result, TweetvecError};

/// A dense, row-major matrix of finite features with named columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeatureMatrix {
    columns: Vec<String>,
    data: Vec<f64>,
    n_rows: usize,
}

impl FeatureMatrix {
    /// Build a matrix from rows; every row must have one value per column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_cols = columns.len();
        let n_rows = rows.len();
        let mut data = Vec::with_capacity(n_rows * n_cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(TweetvecError::invalid_argument(format!(
                    "row {i} has {} values, expected {n_cols}",
                    row.len()
                )));
            }
            data.extend(row);
        }

        Ok(FeatureMatrix {
            columns,
            data,
            n_rows,
        })
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows, self.columns.len())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_rows == 0
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// One row as a slice.
    pub fn row(&self, i: usize) -> Option<&[f64]> {
        let n_cols = self.n_cols();
        (i < self.n_rows).then(|| &self.data[i * n_cols..(i + 1) * n_cols])
    }

    /// Iterate over rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.n_rows).map(move |i| {
            let n_cols = self.n_cols();
            &self.data[i * n_cols..(i + 1) * n_cols]
        })
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if col >= self.n_cols() {
            return None;
        }
        self.row(row).map(|r| r[col])
    }

    /// Every value of one column, in row order.
    pub fn column(&self, col: usize) -> Option<Vec<f64>> {
        (col < self.n_cols()).then(|| self.rows().map(|r| r[col]).collect())
    }

    /// Raw row-major values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Write the matrix as CSV with a header row.
    ///
    /// When labels are given they are written as a trailing `label` column.
    pub fn write_csv<W: Write>(&self, writer: W, labels: Option<&[String]>) -> Result<()> {
        if let Some(labels) = labels
            && labels.len() != self.n_rows
        {
            return Err(TweetvecError::invalid_argument(format!(
                "{} labels for {} rows",
                labels.len(),
                self.n_rows
            )));
        }

        let mut csv_writer = csv::Writer::from_writer(writer);

        let mut header: Vec<&str> = self.columns.iter().map(String::as_str).collect();
        if labels.is_some() {
            header.push("label");
        }
        csv_writer.write_record(&header)?;

        for (i, row) in self.rows().enumerate() {
            let mut record: Vec<String> = row.iter().map(|v| v.to_string()).collect();
            if let Some(labels) = labels {
                record.push(labels[i].clone());
            }
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
