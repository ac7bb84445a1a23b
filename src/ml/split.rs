//! Label-stratified train/test splitting.

use std::collections::BTreeMap;

use log::debug;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::document::Batch;
use crate::error::{Result, TweetvecError};

/// Fraction of rows held out for validation by default.
pub const DEFAULT_TEST_FRACTION: f64 = 0.2;

/// Split a batch into `(train, test)` batches, stratified by label.
///
/// Within each label the rows are shuffled with a [`StdRng`] seeded from
/// `seed`, and `round(n * test_fraction)` of them go to the test batch,
/// keeping at least one row of every label with two or more rows on each
/// side. Both batches keep the original row order.
pub fn train_test_split(
    batch: &Batch,
    label_column: &str,
    test_fraction: f64,
    seed: u64,
) -> Result<(Batch, Batch)> {
    if !(test_fraction > 0.0 && test_fraction < 1.0) {
        return Err(TweetvecError::invalid_argument(format!(
            "test fraction must be in (0, 1), got {test_fraction}"
        )));
    }

    let mut groups: BTreeMap<String, Vec<usize>> = BTreeMap::new();
    for (row, label) in batch.column_values(label_column)?.into_iter().enumerate() {
        groups.entry(label.to_string()).or_default().push(row);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut train = Vec::with_capacity(batch.len());
    let mut test = Vec::new();

    for (label, mut rows) in groups {
        rows.shuffle(&mut rng);
        let n = rows.len();
        let mut n_test = (n as f64 * test_fraction).round() as usize;
        if n >= 2 {
            n_test = n_test.clamp(1, n - 1);
        } else {
            n_test = 0;
        }
        debug!("Label '{label}': {} train, {n_test} test rows", n - n_test);

        test.extend_from_slice(&rows[..n_test]);
        train.extend_from_slice(&rows[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    Ok((batch.select_rows(&train)?, batch.select_rows(&test)?))
}
