//! Vectorization of an augmented batch into a numeric feature matrix.

use log::{debug, info};

use crate::config::FeatureConfig;
use crate::document::Batch;
use crate::error::{Result, TweetvecError};
use crate::features::FeatureComposer;
use crate::vectorize::matrix::FeatureMatrix;

/// A categorical class label.
pub type Label = String;

/// The output of [`Vectorizer::extract`].
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub matrix: FeatureMatrix,
    /// Present only when labels were requested.
    pub labels: Option<Vec<Label>>,
}

/// Turns one source batch into a numeric feature matrix.
///
/// The augmented batch is computed on the first [`extract`](Self::extract)
/// and reused until [`set_source`](Self::set_source) installs a new batch.
#[derive(Debug, Clone)]
pub struct Vectorizer {
    composer: FeatureComposer,
    config: FeatureConfig,
    source: Batch,
    augmented: Option<Batch>,
    dirty: bool,
    augmentations: usize,
}

impl Vectorizer {
    pub fn new(source: Batch, composer: FeatureComposer) -> Self {
        Self::with_config(source, composer, FeatureConfig::default())
    }

    /// Use the excluded columns and label column of `config`.
    pub fn with_config(source: Batch, composer: FeatureComposer, config: FeatureConfig) -> Self {
        Vectorizer {
            composer,
            config,
            source,
            augmented: None,
            dirty: true,
            augmentations: 0,
        }
    }

    /// Install a new source batch; the next extraction re-augments.
    pub fn set_source(&mut self, source: Batch) {
        self.source = source;
        self.dirty = true;
    }

    pub fn source(&self) -> &Batch {
        &self.source
    }

    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// How many times the source has been augmented.
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }

    /// The augmented source batch, computing it if needed.
    pub fn augmented(&mut self) -> Result<&Batch> {
        if self.dirty || self.augmented.is_none() {
            let augmented = self.composer.augment(&self.source)?;
            self.augmentations += 1;
            self.dirty = false;
            self.augmented = Some(augmented);
        } else {
            debug!("Reusing cached augmented batch");
        }

        self.augmented
            .as_ref()
            .ok_or_else(|| TweetvecError::other("augmented batch missing after augmentation"))
    }

    /// Build the feature matrix, plus the labels when `keep_labels` is set.
    pub fn extract(&mut self, keep_labels: bool) -> Result<Extraction> {
        let labels = if keep_labels {
            Some(self.labels()?)
        } else {
            None
        };

        let config = self.config.clone();
        let augmented = self.augmented()?;

        let mut columns: Vec<String> = augmented
            .columns()
            .iter()
            .filter(|c| !config.is_excluded(c))
            .cloned()
            .collect();
        columns.sort();

        let rows: Vec<Vec<f64>> = augmented
            .rows()
            .iter()
            .map(|doc| {
                columns
                    .iter()
                    .map(|c| doc.get_field(c).map_or(0.0, |v| v.to_f64()))
                    .collect()
            })
            .collect();

        let matrix = FeatureMatrix::new(columns, rows)?;
        info!(
            "Vectorized {} rows into {} features",
            matrix.n_rows(),
            matrix.n_cols()
        );

        Ok(Extraction { matrix, labels })
    }

    fn labels(&self) -> Result<Vec<Label>> {
        Ok(self
            .source
            .column_values(&self.config.label_column)?
            .into_iter()
            .map(|v| v.to_string())
            .collect())
    }
}
