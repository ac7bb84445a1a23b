//! Classification metrics.

use crate::error::{Result, TweetvecError};
use crate::vectorize::Label;

/// Fraction of predictions that differ from the actual labels.
///
/// Empty inputs have an error rate of 0.
pub fn error_rate(predicted: &[Label], actual: &[Label]) -> Result<f64> {
    if predicted.len() != actual.len() {
        return Err(TweetvecError::invalid_argument(format!(
            "{} predictions for {} labels",
            predicted.len(),
            actual.len()
        )));
    }
    if actual.is_empty() {
        return Ok(0.0);
    }

    let mismatches = predicted
        .iter()
        .zip(actual)
        .filter(|(p, a)| p != a)
        .count();
    Ok(mismatches as f64 / actual.len() as f64)
}

/// Fraction of predictions equal to the actual labels.
pub fn accuracy(predicted: &[Label], actual: &[Label]) -> Result<f64> {
    Ok(1.0 - error_rate(predicted, actual)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(values: &[&str]) -> Vec<Label> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_error_rate() {
        let predicted = labels(&["1", "0", "1", "1"]);
        let actual = labels(&["1", "1", "1", "0"]);
        assert_eq!(error_rate(&predicted, &actual).unwrap(), 0.5);
        assert_eq!(accuracy(&predicted, &actual).unwrap(), 0.5);
        assert_eq!(error_rate(&[], &[]).unwrap(), 0.0);
    }

    #[test]
    fn test_length_mismatch() {
        assert!(error_rate(&labels(&["1"]), &labels(&["1", "0"])).is_err());
    }
}
