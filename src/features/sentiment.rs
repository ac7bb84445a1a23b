//! Sentiment scoring.
//!
//! A [`SentimentScorer`] turns a text into [`PolarityScores`]. The pipeline
//! only depends on the trait; [`vader::VaderScorer`] is the bundled
//! lexicon-based implementation.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::features::output::FeatureRecord;

pub mod vader;

pub use vader::VaderScorer;

/// Record keys of [`PolarityScores::to_record`], in order.
pub const POLARITY_KEYS: [&str; 4] = ["neg", "neu", "pos", "compound"];

/// Negative, neutral and positive proportions plus a normalized compound
/// score in `[-1, 1]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub neg: f64,
    pub neu: f64,
    pub pos: f64,
    pub compound: f64,
}

impl PolarityScores {
    /// Feature record with the compound score shifted into `[0, 2]`.
    pub fn to_record(&self) -> FeatureRecord {
        let [neg, neu, pos, compound] = POLARITY_KEYS;
        FeatureRecord::with_capacity(POLARITY_KEYS.len())
            .with(neg, self.neg)
            .with(neu, self.neu)
            .with(pos, self.pos)
            .with(compound, self.compound + 1.0)
    }
}

/// Trait for sentiment backends.
pub trait SentimentScorer: Send + Sync {
    /// Score the polarity of a text.
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores>;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// The `{neg, neu, pos, compound + 1}` record of a text.
pub fn vader_scores(scorer: &dyn SentimentScorer, text: &str) -> Result<FeatureRecord> {
    Ok(scorer.polarity_scores(text)?.to_record())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedScorer;

    impl SentimentScorer for FixedScorer {
        fn polarity_scores(&self, _text: &str) -> Result<PolarityScores> {
            Ok(PolarityScores {
                neg: 0.1,
                neu: 0.6,
                pos: 0.3,
                compound: -0.25,
            })
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[test]
    fn test_vader_scores_shifts_compound() {
        let record = vader_scores(&FixedScorer, "anything").unwrap();

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(keys, vec!["neg", "neu", "pos", "compound"]);
        assert_eq!(record.get("compound"), Some(0.75));
        assert_eq!(record.get("neu"), Some(0.6));
    }
}
