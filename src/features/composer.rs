//! Feature composition over a batch.
//!
//! A [`FeatureComposer`] holds an ordered list of [`FeatureStep`]s. Each step
//! reads one source column, applies its extractor to every row, and appends
//! the output either as one named column ([`FeatureTarget::Column`]) or as
//! one column per record key ([`FeatureTarget::Expand`]).
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use tweetvec::document::{Batch, Document};
//! use tweetvec::features::extractor::ScalarFnExtractor;
//! use tweetvec::features::lexical;
//! use tweetvec::features::{FeatureComposer, FeatureStep};
//!
//! let mut batch = Batch::new(vec!["text".to_string()]);
//! batch.push_row(Document::builder().add_text("text", "@user hi").build());
//!
//! let composer = FeatureComposer::new().add_step(FeatureStep::column(
//!     Arc::new(ScalarFnExtractor::new("is_mention", lexical::is_mention)),
//!     "text",
//!     "is_mention",
//! ));
//!
//! let augmented = composer.augment(&batch).unwrap();
//! assert_eq!(augmented.columns(), &["text", "is_mention"]);
//! assert_eq!(augmented.len(), 1);
//! ```

use std::fmt;
use std::sync::Arc;

use log::{debug, info};
use rayon::prelude::*;

use crate::config::FeatureConfig;
use crate::document::{Batch, FieldValue};
use crate::error::{Result, TweetvecError};
use crate::features::emotion::{EmotionScorer, NrcLexicon};
use crate::features::extractor::{
    EmotionExtractor, FeatureExtractor, KeywordExtractor, PeriodOfDayExtractor,
    PunctuationExtractor, ScalarFnExtractor, SentimentExtractor, WeekdayExtractor,
    lexical_extractors,
};
use crate::features::lexical;
use crate::features::output::FeatureOutput;
use crate::features::sentiment::{SentimentScorer, VaderScorer};

/// Where the output of a step goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureTarget {
    /// A scalar output stored under this column name.
    Column(String),
    /// A record output, one column per key.
    Expand,
}

/// One extractor applied to one source column.
#[derive(Clone)]
pub struct FeatureStep {
    extractor: Arc<dyn FeatureExtractor>,
    source: String,
    target: FeatureTarget,
}

impl FeatureStep {
    pub fn new<S: Into<String>>(
        extractor: Arc<dyn FeatureExtractor>,
        source: S,
        target: FeatureTarget,
    ) -> Self {
        FeatureStep {
            extractor,
            source: source.into(),
            target,
        }
    }

    /// A scalar step writing into `target`.
    pub fn column<S: Into<String>, T: Into<String>>(
        extractor: Arc<dyn FeatureExtractor>,
        source: S,
        target: T,
    ) -> Self {
        Self::new(extractor, source, FeatureTarget::Column(target.into()))
    }

    /// A record step expanded into one column per key.
    pub fn expand<S: Into<String>>(extractor: Arc<dyn FeatureExtractor>, source: S) -> Self {
        Self::new(extractor, source, FeatureTarget::Expand)
    }

    pub fn extractor(&self) -> &Arc<dyn FeatureExtractor> {
        &self.extractor
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn target(&self) -> &FeatureTarget {
        &self.target
    }
}

impl fmt::Debug for FeatureStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FeatureStep")
            .field("extractor", &self.extractor.name())
            .field("source", &self.source)
            .field("target", &self.target)
            .finish()
    }
}

/// Applies an ordered list of feature steps to a batch.
#[derive(Debug, Clone)]
pub struct FeatureComposer {
    steps: Vec<FeatureStep>,
    parallel: bool,
}

impl Default for FeatureComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureComposer {
    /// Create a composer with no steps.
    pub fn new() -> Self {
        FeatureComposer {
            steps: Vec::new(),
            parallel: true,
        }
    }

    /// Append a step.
    pub fn add_step(mut self, step: FeatureStep) -> Self {
        self.steps.push(step);
        self
    }

    /// Evaluate the rows of each step on the rayon thread pool.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn steps(&self) -> &[FeatureStep] {
        &self.steps
    }

    /// The standard tweet pipeline.
    ///
    /// Lexical features, punctuation counts, period of day, weekday,
    /// `starts_with_I`, keyword counts, VADER scores and NRC emotions, in
    /// that order.
    pub fn standard(
        config: &FeatureConfig,
        sentiment: Arc<dyn SentimentScorer>,
        emotion: EmotionScorer,
    ) -> Self {
        let text = config.text_column.as_str();
        let created = config.created_column.as_str();

        let mut composer = FeatureComposer::new().with_parallel(config.parallel);
        for (column, extractor) in lexical_extractors() {
            composer = composer.add_step(FeatureStep::column(Arc::new(extractor), text, column));
        }

        composer
            .add_step(FeatureStep::expand(
                Arc::new(PunctuationExtractor::new(config.punctuation.clone())),
                text,
            ))
            .add_step(FeatureStep::column(
                Arc::new(PeriodOfDayExtractor::new(config.datetime_format.as_str())),
                created,
                "period_of_day",
            ))
            .add_step(FeatureStep::column(
                Arc::new(WeekdayExtractor::new(config.datetime_format.as_str())),
                created,
                "weekday",
            ))
            .add_step(FeatureStep::column(
                Arc::new(ScalarFnExtractor::new(
                    "starts_with_I",
                    lexical::starts_with_i,
                )),
                text,
                "starts_with_I",
            ))
            .add_step(FeatureStep::expand(
                Arc::new(KeywordExtractor::new(config.keywords.clone())),
                text,
            ))
            .add_step(FeatureStep::expand(
                Arc::new(SentimentExtractor::new(sentiment)),
                text,
            ))
            .add_step(FeatureStep::expand(
                Arc::new(EmotionExtractor::new(emotion)),
                text,
            ))
    }

    /// The standard pipeline with both lexicons loaded from the paths in
    /// `config`.
    pub fn from_config(config: &FeatureConfig) -> Result<Self> {
        let sentiment_path = config
            .sentiment_lexicon
            .as_ref()
            .ok_or_else(|| TweetvecError::lexicon("no sentiment lexicon configured"))?;
        let emotion_path = config
            .emotion_lexicon
            .as_ref()
            .ok_or_else(|| TweetvecError::lexicon("no emotion lexicon configured"))?;

        let sentiment = Arc::new(VaderScorer::load(sentiment_path)?);
        let emotion = EmotionScorer::new(Arc::new(NrcLexicon::load(emotion_path)?));

        Ok(Self::standard(config, sentiment, emotion))
    }

    /// Apply every step to a copy of `batch`.
    ///
    /// The returned batch has the same rows and all original columns, with
    /// the derived columns appended in step order.
    pub fn augment(&self, batch: &Batch) -> Result<Batch> {
        info!(
            "Augmenting {} rows with {} feature steps",
            batch.len(),
            self.steps.len()
        );

        let augmented = self
            .steps
            .iter()
            .try_fold(batch.clone(), |current, step| self.apply_step(current, step))?;

        info!(
            "Augmented batch has {} columns ({} derived)",
            augmented.columns().len(),
            augmented.columns().len() - batch.columns().len()
        );
        Ok(augmented)
    }

    /// Apply one step and append its columns.
    pub fn apply_step(&self, batch: Batch, step: &FeatureStep) -> Result<Batch> {
        debug!(
            "Deriving features using {}, source '{}', target {:?}",
            step.extractor.name(),
            step.source,
            step.target
        );

        let sources: Vec<String> = batch
            .column_values(&step.source)?
            .into_iter()
            .map(FieldValue::to_text)
            .collect();
        let outputs = self.evaluate(step.extractor.as_ref(), &sources)?;

        let batch = match &step.target {
            FeatureTarget::Column(name) => {
                let values = outputs
                    .iter()
                    .map(|output| {
                        output.as_scalar().map(FieldValue::Float).ok_or_else(|| {
                            shape_error(step, output, "a scalar")
                        })
                    })
                    .collect::<Result<Vec<_>>>()?;
                batch.with_column(name.as_str(), values)?
            }
            FeatureTarget::Expand => batch.with_columns(expand_records(step, &outputs)?)?,
        };

        debug!(
            "Done {}: batch now has {} columns",
            step.extractor.name(),
            batch.columns().len()
        );
        Ok(batch)
    }

    fn evaluate(
        &self,
        extractor: &dyn FeatureExtractor,
        sources: &[String],
    ) -> Result<Vec<FeatureOutput>> {
        if self.parallel {
            sources
                .par_iter()
                .map(|value| extractor.extract(value))
                .collect()
        } else {
            sources
                .iter()
                .map(|value| extractor.extract(value))
                .collect()
        }
    }
}

fn shape_error(step: &FeatureStep, output: &FeatureOutput, expected: &str) -> TweetvecError {
    TweetvecError::analysis(format!(
        "{} produced a {} but its target {:?} expects {expected}",
        step.extractor.name(),
        output.kind(),
        step.target
    ))
}

/// Turn per-row records into columns.
///
/// Keys declared by the extractor come first, in declared order, so they
/// exist even for an empty batch. Other keys follow in first-seen order.
/// Rows whose record lacks a key get [`FieldValue::Null`].
fn expand_records(
    step: &FeatureStep,
    outputs: &[FeatureOutput],
) -> Result<Vec<(String, Vec<FieldValue>)>> {
    let mut columns: Vec<(String, Vec<FieldValue>)> = step
        .extractor
        .keys()
        .unwrap_or_default()
        .into_iter()
        .map(|key| (key, vec![FieldValue::Null; outputs.len()]))
        .collect();

    for (row, output) in outputs.iter().enumerate() {
        let record = output
            .as_record()
            .ok_or_else(|| shape_error(step, output, "a record"))?;

        for (key, value) in record.iter() {
            let position = match columns.iter().position(|(name, _)| name == key) {
                Some(position) => position,
                None => {
                    columns.push((key.to_string(), vec![FieldValue::Null; outputs.len()]));
                    columns.len() - 1
                }
            };
            columns[position].1[row] = FieldValue::Float(value);
        }
    }

    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Document;
    use crate::features::output::FeatureRecord;

    struct RecordExtractor;

    impl FeatureExtractor for RecordExtractor {
        fn extract(&self, value: &str) -> Result<FeatureOutput> {
            let mut record = FeatureRecord::new().with("len", value.len() as f64);
            if value.contains('!') {
                record.insert("excited", 1.0);
            }
            Ok(record.into())
        }

        fn name(&self) -> &'static str {
            "record"
        }
    }

    fn tweets() -> Batch {
        let mut batch = Batch::new(vec!["text".to_string(), "created".to_string()]);
        for (text, created) in [
            ("@user hi", "2016-11-08 02:00:00"),
            ("Great day!", "2016-11-09 13:00:00"),
            ("", "2016-11-10 23:00:00"),
        ] {
            batch.push_row(
                Document::builder()
                    .add_text("text", text)
                    .add_text("created", created)
                    .build(),
            );
        }
        batch
    }

    fn mention_step() -> FeatureStep {
        FeatureStep::column(
            Arc::new(ScalarFnExtractor::new("is_mention", lexical::is_mention)),
            "text",
            "is_mention",
        )
    }

    #[test]
    fn test_scalar_step() {
        let batch = tweets();
        let augmented = FeatureComposer::new()
            .add_step(mention_step())
            .augment(&batch)
            .unwrap();

        assert_eq!(augmented.len(), batch.len());
        assert_eq!(augmented.columns(), &["text", "created", "is_mention"]);
        assert_eq!(augmented.value(0, "is_mention"), Some(&FieldValue::Float(1.0)));
        assert_eq!(augmented.value(1, "is_mention"), Some(&FieldValue::Float(0.0)));
        // The input batch is left untouched.
        assert_eq!(batch.columns().len(), 2);
    }

    #[test]
    fn test_expand_step_fills_missing_keys() {
        let augmented = FeatureComposer::new()
            .with_parallel(false)
            .add_step(FeatureStep::expand(Arc::new(RecordExtractor), "text"))
            .augment(&tweets())
            .unwrap();

        assert_eq!(augmented.columns(), &["text", "created", "len", "excited"]);
        assert_eq!(augmented.value(1, "len"), Some(&FieldValue::Float(10.0)));
        assert_eq!(augmented.value(1, "excited"), Some(&FieldValue::Float(1.0)));
        assert_eq!(augmented.value(0, "excited"), Some(&FieldValue::Null));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let step = FeatureStep::column(
            Arc::new(PeriodOfDayExtractor::new("%Y-%m-%d %H:%M:%S")),
            "created",
            "period_of_day",
        );
        let sequential = FeatureComposer::new()
            .with_parallel(false)
            .add_step(step.clone())
            .augment(&tweets())
            .unwrap();
        let parallel = FeatureComposer::new()
            .add_step(step)
            .augment(&tweets())
            .unwrap();

        assert_eq!(sequential, parallel);
        let periods: Vec<f64> = parallel
            .column_values("period_of_day")
            .unwrap()
            .iter()
            .map(|v| v.to_f64())
            .collect();
        assert_eq!(periods, vec![6.0, 2.0, 5.0]);
    }

    #[test]
    fn test_missing_source_column() {
        let step = FeatureStep::column(
            Arc::new(ScalarFnExtractor::new("is_mention", lexical::is_mention)),
            "body",
            "is_mention",
        );
        let err = FeatureComposer::new()
            .add_step(step)
            .augment(&tweets())
            .unwrap_err();
        assert!(matches!(err, TweetvecError::Field(_)));
    }

    #[test]
    fn test_target_mismatch() {
        let err = FeatureComposer::new()
            .add_step(FeatureStep::column(Arc::new(RecordExtractor), "text", "len"))
            .augment(&tweets())
            .unwrap_err();
        assert!(matches!(err, TweetvecError::Analysis(_)));

        let err = FeatureComposer::new()
            .add_step(FeatureStep::expand(
                Arc::new(ScalarFnExtractor::new("is_mention", lexical::is_mention)),
                "text",
            ))
            .augment(&tweets())
            .unwrap_err();
        assert!(matches!(err, TweetvecError::Analysis(_)));
    }

    #[test]
    fn test_duplicate_column() {
        let err = FeatureComposer::new()
            .add_step(mention_step())
            .add_step(mention_step())
            .augment(&tweets())
            .unwrap_err();
        assert!(matches!(err, TweetvecError::Field(_)));
    }

    #[test]
    fn test_malformed_timestamp_propagates() {
        let mut batch = tweets();
        batch.push_row(
            Document::builder()
                .add_text("text", "late")
                .add_text("created", "sometime")
                .build(),
        );
        let err = FeatureComposer::new()
            .add_step(FeatureStep::column(
                Arc::new(WeekdayExtractor::new("%Y-%m-%d %H:%M:%S")),
                "created",
                "weekday",
            ))
            .augment(&batch)
            .unwrap_err();
        assert!(matches!(err, TweetvecError::Parse(_)));
    }

    #[test]
    fn test_standard_step_order() {
        let config = FeatureConfig::default();
        let composer = FeatureComposer::standard(
            &config,
            Arc::new(VaderScorer::default()),
            EmotionScorer::new(Arc::new(NrcLexicon::default())),
        );

        let names: Vec<&str> = composer
            .steps()
            .iter()
            .map(|s| s.extractor().name())
            .collect();
        assert_eq!(
            names,
            vec![
                "avg_sentence_length",
                "avg_word_length",
                "character_count",
                "is_quoted_retweet",
                "number_all_caps",
                "random_caps",
                "is_mention",
                "ends_with_link",
                "ends_with_hashtag",
                "punctuation",
                "period_of_day",
                "weekday",
                "starts_with_I",
                "keywords",
                "vader",
                "emotion",
            ]
        );
        assert_eq!(composer.steps()[10].source(), "created");
    }

    #[test]
    fn test_empty_batch_gets_every_column() {
        let config = FeatureConfig::default();
        let composer = FeatureComposer::standard(
            &config,
            Arc::new(VaderScorer::default()),
            EmotionScorer::new(Arc::new(NrcLexicon::default())),
        );

        let empty = Batch::new(vec!["text".to_string(), "created".to_string()]);
        let mut one_row = empty.clone();
        one_row.push_row(
            Document::builder()
                .add_text("text", "Sad!")
                .add_text("created", "2016-11-08 13:00:00")
                .build(),
        );

        let empty = composer.augment(&empty).unwrap();
        let one_row = composer.augment(&one_row).unwrap();

        assert!(empty.is_empty());
        assert_eq!(empty.columns(), one_row.columns());
        assert_eq!(empty.columns().len(), 2 + 50);
        assert!(empty.has_column("compound"));
        assert!(empty.has_column("trust"));
        assert!(empty.has_column("question"));
    }

    #[test]
    fn test_from_config_requires_lexicons() {
        let err = FeatureComposer::from_config(&FeatureConfig::default()).unwrap_err();
        assert!(matches!(err, TweetvecError::Lexicon(_)));
    }
}
