//! Process-wide feature configuration.
//!
//! [`FeatureConfig`] holds everything the feature pipeline treats as a
//! constant: the keyword and punctuation vocabularies, the timestamp format,
//! the column names of the input dataset and the columns excluded from the
//! feature matrix. It is loaded once (from JSON or from defaults) and passed
//! explicitly to the composer and the vectorizer.
//!
//! # Examples
//!
//! ```
//! use tweetvec::config::FeatureConfig;
//!
//! let config = FeatureConfig::default();
//! assert_eq!(config.text_column, "text");
//! assert_eq!(config.punctuation.len(), 8);
//! assert!(config.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TweetvecError};

/// Default timestamp format of the `created` column.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One `{identifier: pattern}` pair of a counting vocabulary.
///
/// The identifier becomes the column name; the pattern is matched as a
/// literal substring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    /// Column name for the count.
    pub id: String,
    /// Literal text to count.
    pub pattern: String,
}

impl VocabularyEntry {
    /// Create a new entry.
    pub fn new<S: Into<String>, P: Into<String>>(id: S, pattern: P) -> Self {
        VocabularyEntry {
            id: id.into(),
            pattern: pattern.into(),
        }
    }

    /// Create an entry whose identifier is the pattern itself.
    pub fn literal<S: Into<String>>(pattern: S) -> Self {
        let pattern = pattern.into();
        VocabularyEntry {
            id: pattern.clone(),
            pattern,
        }
    }
}

/// Configuration for feature derivation and vectorization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// `strftime`-style format of the timestamp column.
    pub datetime_format: String,
    /// Name of the free-text column.
    pub text_column: String,
    /// Name of the creation timestamp column.
    pub created_column: String,
    /// Name of the label column.
    pub label_column: String,
    /// Columns dropped before vectorization.
    pub excluded_columns: Vec<String>,
    /// Punctuation marks counted by `count_punctuation`.
    pub punctuation: Vec<VocabularyEntry>,
    /// Keywords counted by `count_keywords`.
    pub keywords: Vec<VocabularyEntry>,
    /// Path to the VADER-format sentiment lexicon.
    pub sentiment_lexicon: Option<PathBuf>,
    /// Path to the NRC word-emotion association lexicon.
    pub emotion_lexicon: Option<PathBuf>,
    /// Evaluate rows of each feature step on the rayon thread pool.
    pub parallel: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        FeatureConfig {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            text_column: "text".to_string(),
            created_column: "created".to_string(),
            label_column: "label".to_string(),
            excluded_columns: default_excluded_columns(),
            punctuation: default_punctuation(),
            keywords: default_keywords(),
            sentiment_lexicon: None,
            emotion_lexicon: None,
            parallel: true,
        }
    }
}

impl FeatureConfig {
    /// Load a configuration from a JSON file.
    ///
    /// Fields missing from the file take their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            TweetvecError::config(format!("failed to read {}: {e}", path.display()))
        })?;
        let config: FeatureConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the vocabularies and column names for consistency.
    pub fn validate(&self) -> Result<()> {
        if self.datetime_format.trim().is_empty() {
            return Err(TweetvecError::config("datetime_format must not be empty"));
        }

        for (name, column) in [
            ("text_column", &self.text_column),
            ("created_column", &self.created_column),
            ("label_column", &self.label_column),
        ] {
            if column.is_empty() {
                return Err(TweetvecError::config(format!("{name} must not be empty")));
            }
        }

        validate_vocabulary("punctuation", &self.punctuation)?;
        validate_vocabulary("keywords", &self.keywords)?;

        Ok(())
    }

    /// Set the sentiment lexicon path.
    pub fn with_sentiment_lexicon<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.sentiment_lexicon = Some(path.into());
        self
    }

    /// Set the emotion lexicon path.
    pub fn with_emotion_lexicon<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.emotion_lexicon = Some(path.into());
        self
    }

    /// Enable or disable parallel row evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check whether a column is dropped before vectorization.
    pub fn is_excluded(&self, column: &str) -> bool {
        self.excluded_columns.iter().any(|c| c == column)
    }
}

fn validate_vocabulary(name: &str, entries: &[VocabularyEntry]) -> Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if entry.id.is_empty() {
            return Err(TweetvecError::config(format!(
                "{name}: vocabulary identifiers must not be empty"
            )));
        }
        if entry.pattern.is_empty() {
            return Err(TweetvecError::config(format!(
                "{name}: pattern for '{}' must not be empty",
                entry.id
            )));
        }
        if !seen.insert(entry.id.as_str()) {
            return Err(TweetvecError::config(format!(
                "{name}: duplicate identifier '{}'",
                entry.id
            )));
        }
    }
    Ok(())
}

fn default_excluded_columns() -> Vec<String> {
    [
        "text",
        "replyToSN",
        "created",
        "id.1",
        "replyToUID",
        "statusSource",
        "screenName",
        "label",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_punctuation() -> Vec<VocabularyEntry> {
    vec![
        VocabularyEntry::new("comma", ","),
        VocabularyEntry::new("lparen", "("),
        VocabularyEntry::new("rparen", ")"),
        VocabularyEntry::new("exclamation", "!"),
        VocabularyEntry::new("period", "."),
        VocabularyEntry::new("semicolon", ";"),
        VocabularyEntry::new("colon", ":"),
        VocabularyEntry::new("question", "?"),
    ]
}

fn default_keywords() -> Vec<VocabularyEntry> {
    [
        "crooked",
        "hillary",
        "fake news",
        "failing",
        "lyin",
        "little marco",
        "low energy",
        "sad!",
        "maga",
        "make america great again",
        "#trump2016",
        "thank you",
        "join me",
        "@foxandfriends",
        "@cnn",
        "rigged",
    ]
    .iter()
    .map(|k| VocabularyEntry::literal(*k))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_default_config_is_valid() {
        let config = FeatureConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.is_excluded("screenName"));
        assert!(config.is_excluded("label"));
        assert!(!config.is_excluded("retweetCount"));
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut config = FeatureConfig::default();
        config.punctuation.push(VocabularyEntry::new("comma", ";"));

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate identifier 'comma'"));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let mut config = FeatureConfig::default();
        config.keywords = vec![VocabularyEntry::new("nothing", "")];

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"datetime_format": "%m/%d/%Y %H:%M", "keywords": [{{"id": "wall", "pattern": "wall"}}]}}"#
        )
        .unwrap();

        let config = FeatureConfig::from_file(file.path()).unwrap();
        assert_eq!(config.datetime_format, "%m/%d/%Y %H:%M");
        assert_eq!(config.keywords, vec![VocabularyEntry::literal("wall")]);
        assert_eq!(config.text_column, "text");
        assert_eq!(config.punctuation.len(), 8);
    }

    #[test]
    fn test_from_missing_file() {
        let result = FeatureConfig::from_file("/nonexistent/tweetvec.json");
        assert!(matches!(result, Err(TweetvecError::Config(_))));
    }
}
