//! Classifier trait definition.

use crate::error::Result;
use crate::ml::metrics::accuracy;
use crate::vectorize::{FeatureMatrix, Label};

/// A supervised classifier over feature matrices.
pub trait Classifier: Send + Sync {
    /// Train on one label per matrix row.
    fn fit(&mut self, features: &FeatureMatrix, labels: &[Label]) -> Result<()>;

    /// Predict one label per matrix row.
    ///
    /// Fails before [`fit`](Self::fit) or when the column count differs
    /// from training.
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<Label>>;

    /// Mean accuracy of the predictions against `labels`.
    fn score(&self, features: &FeatureMatrix, labels: &[Label]) -> Result<f64> {
        let predicted = self.predict(features)?;
        accuracy(&predicted, labels)
    }

    /// Get the name of this classifier for debugging and logging.
    fn name(&self) -> &'static str;
}
