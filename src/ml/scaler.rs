//! Per-column standardization.

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetvecError};
use crate::vectorize::FeatureMatrix;

/// Scales each column to zero mean and unit variance.
///
/// Columns with zero variance are only centered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    means: Vec<f64>,
    scales: Vec<f64>,
}

impl StandardScaler {
    /// Learn column means and standard deviations.
    pub fn fit(features: &FeatureMatrix) -> Result<Self> {
        let (n_rows, n_cols) = features.shape();
        if n_rows == 0 {
            return Err(TweetvecError::model("cannot fit a scaler on zero rows"));
        }

        let n = n_rows as f64;
        let mut means = vec![0.0; n_cols];
        for row in features.rows() {
            for (mean, value) in means.iter_mut().zip(row) {
                *mean += value / n;
            }
        }

        let mut variances = vec![0.0; n_cols];
        for row in features.rows() {
            for ((variance, value), mean) in variances.iter_mut().zip(row).zip(&means) {
                *variance += (value - mean).powi(2) / n;
            }
        }

        let scales = variances
            .into_iter()
            .map(|v| {
                let std = v.sqrt();
                if std > f64::EPSILON { std } else { 1.0 }
            })
            .collect();

        Ok(StandardScaler { means, scales })
    }

    pub fn n_features(&self) -> usize {
        self.means.len()
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn scales(&self) -> &[f64] {
        &self.scales
    }

    /// Standardize one row.
    pub fn transform_row(&self, row: &[f64]) -> Result<Vec<f64>> {
        if row.len() != self.n_features() {
            return Err(TweetvecError::model(format!(
                "scaler expects {} features, got {}",
                self.n_features(),
                row.len()
            )));
        }

        Ok(row
            .iter()
            .zip(&self.means)
            .zip(&self.scales)
            .map(|((value, mean), scale)| (value - mean) / scale)
            .collect())
    }

    /// Standardize every row of a matrix.
    pub fn transform(&self, features: &FeatureMatrix) -> Result<FeatureMatrix> {
        let rows = features
            .rows()
            .map(|row| self.transform_row(row))
            .collect::<Result<Vec<_>>>()?;
        FeatureMatrix::new(features.columns().to_vec(), rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_transform() {
        let matrix = FeatureMatrix::new(
            vec!["x".to_string(), "constant".to_string()],
            vec![vec![1.0, 5.0], vec![3.0, 5.0]],
        )
        .unwrap();

        let scaler = StandardScaler::fit(&matrix).unwrap();
        assert_eq!(scaler.means(), &[2.0, 5.0]);
        assert_eq!(scaler.scales(), &[1.0, 1.0]);

        let scaled = scaler.transform(&matrix).unwrap();
        assert_eq!(scaled.row(0), Some(&[-1.0, 0.0][..]));
        assert_eq!(scaled.row(1), Some(&[1.0, 0.0][..]));
    }

    #[test]
    fn test_dimension_mismatch() {
        let matrix = FeatureMatrix::new(vec!["x".to_string()], vec![vec![1.0]]).unwrap();
        let scaler = StandardScaler::fit(&matrix).unwrap();
        assert!(matches!(
            scaler.transform_row(&[1.0, 2.0]),
            Err(TweetvecError::Model(_))
        ));
    }

    #[test]
    fn test_fit_empty() {
        let matrix = FeatureMatrix::new(vec!["x".to_string()], Vec::new()).unwrap();
        assert!(StandardScaler::fit(&matrix).is_err());
    }
}
