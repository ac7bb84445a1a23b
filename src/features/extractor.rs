//! The [`FeatureExtractor`] trait and the extractors wrapping each analyzer.

use std::fmt;
use std::sync::Arc;

use crate::config::VocabularyEntry;
use crate::error::Result;
use crate::features::emotion::{EMOTIONS, EmotionScorer};
use crate::features::lexical;
use crate::features::output::FeatureOutput;
use crate::features::sentiment::{self, POLARITY_KEYS, SentimentScorer};
use crate::features::temporal;

/// Trait for analyzers applied to one source value.
///
/// Extractors are shared across rayon workers, hence `Send + Sync`.
pub trait FeatureExtractor: Send + Sync {
    /// Derive the feature(s) of one value.
    fn extract(&self, value: &str) -> Result<FeatureOutput>;

    /// Get the name of this extractor (for logging).
    fn name(&self) -> &'static str;

    /// Keys of every record this extractor returns, in order.
    ///
    /// Expanding steps create these columns even when the batch has no
    /// rows. `None` for scalar extractors.
    fn keys(&self) -> Option<Vec<String>> {
        None
    }
}

/// A total scalar function of the text.
#[derive(Clone, Copy)]
pub struct ScalarFnExtractor {
    name: &'static str,
    func: fn(&str) -> f64,
}

impl ScalarFnExtractor {
    pub fn new(name: &'static str, func: fn(&str) -> f64) -> Self {
        ScalarFnExtractor { name, func }
    }
}

impl fmt::Debug for ScalarFnExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarFnExtractor")
            .field("name", &self.name)
            .finish()
    }
}

impl FeatureExtractor for ScalarFnExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        Ok(FeatureOutput::Scalar((self.func)(value)))
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

/// The scalar lexical analyzers with their column names, in pipeline order.
pub fn lexical_extractors() -> Vec<(&'static str, ScalarFnExtractor)> {
    let table: [(&'static str, fn(&str) -> f64); 9] = [
        ("avg_sentence_length", lexical::avg_sentence_length),
        ("avg_word_length", lexical::avg_word_length),
        ("character_count", lexical::character_count),
        ("is_quoted_retweet", lexical::is_quoted_retweet),
        ("number_all_caps", lexical::count_all_caps),
        ("random_caps", lexical::count_random_caps),
        ("is_mention", lexical::is_mention),
        ("ends_with_link", lexical::ends_with_link),
        ("ends_with_hashtag", lexical::ends_with_hashtag),
    ];
    table
        .into_iter()
        .map(|(column, func)| (column, ScalarFnExtractor::new(column, func)))
        .collect()
}

/// Counts of each configured punctuation mark.
#[derive(Debug, Clone)]
pub struct PunctuationExtractor {
    marks: Vec<VocabularyEntry>,
}

impl PunctuationExtractor {
    pub fn new(marks: Vec<VocabularyEntry>) -> Self {
        PunctuationExtractor { marks }
    }
}

impl FeatureExtractor for PunctuationExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        Ok(lexical::count_punctuation(value, &self.marks).into())
    }

    fn name(&self) -> &'static str {
        "punctuation"
    }

    fn keys(&self) -> Option<Vec<String>> {
        Some(self.marks.iter().map(|mark| mark.id.clone()).collect())
    }
}

/// Case-insensitive counts of each configured keyword.
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    keywords: Vec<VocabularyEntry>,
}

impl KeywordExtractor {
    pub fn new(keywords: Vec<VocabularyEntry>) -> Self {
        KeywordExtractor { keywords }
    }
}

impl FeatureExtractor for KeywordExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        Ok(lexical::count_keywords(value, &self.keywords).into())
    }

    fn name(&self) -> &'static str {
        "keywords"
    }

    fn keys(&self) -> Option<Vec<String>> {
        Some(self.keywords.iter().map(|keyword| keyword.id.clone()).collect())
    }
}

/// Period-of-day bucket of a timestamp.
#[derive(Debug, Clone)]
pub struct PeriodOfDayExtractor {
    format: String,
}

impl PeriodOfDayExtractor {
    pub fn new<S: Into<String>>(format: S) -> Self {
        PeriodOfDayExtractor {
            format: format.into(),
        }
    }
}

impl FeatureExtractor for PeriodOfDayExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        temporal::period_of_day(value, &self.format).map(FeatureOutput::Scalar)
    }

    fn name(&self) -> &'static str {
        "period_of_day"
    }
}

/// Weekday index of a timestamp.
#[derive(Debug, Clone)]
pub struct WeekdayExtractor {
    format: String,
}

impl WeekdayExtractor {
    pub fn new<S: Into<String>>(format: S) -> Self {
        WeekdayExtractor {
            format: format.into(),
        }
    }
}

impl FeatureExtractor for WeekdayExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        temporal::day_of_week(value, &self.format).map(FeatureOutput::Scalar)
    }

    fn name(&self) -> &'static str {
        "weekday"
    }
}

/// Polarity scores from a [`SentimentScorer`].
#[derive(Clone)]
pub struct SentimentExtractor {
    scorer: Arc<dyn SentimentScorer>,
}

impl SentimentExtractor {
    pub fn new(scorer: Arc<dyn SentimentScorer>) -> Self {
        SentimentExtractor { scorer }
    }
}

impl fmt::Debug for SentimentExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SentimentExtractor")
            .field("scorer", &self.scorer.name())
            .finish()
    }
}

impl FeatureExtractor for SentimentExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        sentiment::vader_scores(self.scorer.as_ref(), value).map(FeatureOutput::Record)
    }

    fn name(&self) -> &'static str {
        "vader"
    }

    fn keys(&self) -> Option<Vec<String>> {
        Some(POLARITY_KEYS.iter().map(|key| key.to_string()).collect())
    }
}

/// NRC emotion association sums.
#[derive(Debug, Clone)]
pub struct EmotionExtractor {
    scorer: EmotionScorer,
}

impl EmotionExtractor {
    pub fn new(scorer: EmotionScorer) -> Self {
        EmotionExtractor { scorer }
    }
}

impl FeatureExtractor for EmotionExtractor {
    fn extract(&self, value: &str) -> Result<FeatureOutput> {
        self.scorer.text_emotion(value).map(FeatureOutput::Record)
    }

    fn name(&self) -> &'static str {
        "emotion"
    }

    fn keys(&self) -> Option<Vec<String>> {
        Some(EMOTIONS.iter().map(|emotion| emotion.as_str().to_string()).collect())
    }
}
