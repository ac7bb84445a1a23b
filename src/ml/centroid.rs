//! Nearest-centroid classifier.

use std::collections::BTreeMap;

use log::debug;

use crate::error::{Result, TweetvecError};
use crate::ml::classifier::Classifier;
use crate::ml::scaler::StandardScaler;
use crate::vectorize::{FeatureMatrix, Label};

#[derive(Debug, Clone)]
struct FittedModel {
    scaler: StandardScaler,
    centroids: Vec<(Label, Vec<f64>)>,
}

/// Assigns each row the label whose mean (in standardized feature space)
/// is closest by Euclidean distance.
///
/// Ties go to the label that sorts first.
#[derive(Debug, Clone, Default)]
pub struct NearestCentroidClassifier {
    model: Option<FittedModel>,
}

impl NearestCentroidClassifier {
    pub fn new() -> Self {
        NearestCentroidClassifier::default()
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    /// Labels seen during training, sorted.
    pub fn classes(&self) -> Vec<&str> {
        self.model
            .iter()
            .flat_map(|m| m.centroids.iter().map(|(label, _)| label.as_str()))
            .collect()
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

impl Classifier for NearestCentroidClassifier {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[Label]) -> Result<()> {
        if features.n_rows() != labels.len() {
            return Err(TweetvecError::model(format!(
                "{} rows but {} labels",
                features.n_rows(),
                labels.len()
            )));
        }

        let scaler = StandardScaler::fit(features)?;
        let n_cols = features.n_cols();

        let mut sums: BTreeMap<&str, (Vec<f64>, usize)> = BTreeMap::new();
        for (row, label) in features.rows().zip(labels) {
            let scaled = scaler.transform_row(row)?;
            let (sum, count) = sums
                .entry(label.as_str())
                .or_insert_with(|| (vec![0.0; n_cols], 0));
            for (total, value) in sum.iter_mut().zip(scaled) {
                *total += value;
            }
            *count += 1;
        }

        let centroids = sums
            .into_iter()
            .map(|(label, (sum, count))| {
                let centroid = sum.into_iter().map(|v| v / count as f64).collect();
                (label.to_string(), centroid)
            })
            .collect::<Vec<_>>();

        debug!(
            "Fitted {} centroids over {} features",
            centroids.len(),
            n_cols
        );
        self.model = Some(FittedModel { scaler, centroids });
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>> {
        let model = self
            .model
            .as_ref()
            .ok_or_else(|| TweetvecError::model("classifier has not been fitted"))?;
        if features.n_cols() != model.scaler.n_features() {
            return Err(TweetvecError::model(format!(
                "classifier was fitted on {} features, got {}",
                model.scaler.n_features(),
                features.n_cols()
            )));
        }

        features
            .rows()
            .map(|row| {
                let scaled = model.scaler.transform_row(row)?;
                let mut best: Option<(&Label, f64)> = None;
                for (label, centroid) in &model.centroids {
                    let distance = squared_distance(&scaled, centroid);
                    if best.is_none_or(|(_, d)| distance < d) {
                        best = Some((label, distance));
                    }
                }
                best.map(|(label, _)| label.clone())
                    .ok_or_else(|| TweetvecError::model("classifier has no classes"))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "nearest_centroid"
    }
}
