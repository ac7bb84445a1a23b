//! Model collaborators for the feature matrix.
//!
//! The pipeline only needs the [`classifier::Classifier`] contract; this
//! module also ships a reference nearest-centroid classifier, feature
//! standardization, a label-stratified train/test split and error metrics
//! so the whole flow can run end to end.

pub mod centroid;
pub mod classifier;
pub mod metrics;
pub mod scaler;
pub mod split;

pub use centroid::NearestCentroidClassifier;
pub use classifier::Classifier;
pub use metrics::{accuracy, error_rate};
pub use scaler::StandardScaler;
pub use split::{DEFAULT_TEST_FRACTION, train_test_split};
