//! NRC word-emotion association scoring.
//!
//! The lexicon file has one `word<TAB>emotion<TAB>association` line per
//! (word, emotion) pair. Text is run through an [`Analyzer`] (by default the
//! lowercasing, stemming [`EnglishAnalyzer`]) and each resulting token is
//! looked up verbatim; the association values of every matching token are
//! summed per emotion.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use ahash::AHashMap;
use log::{debug, warn};

use crate::analysis::analyzer::{Analyzer, EnglishAnalyzer};
use crate::error::{Result, TweetvecError};
use crate::features::output::FeatureRecord;

/// The ten NRC emotion categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmotionCategory {
    Anger,
    Anticipation,
    Disgust,
    Fear,
    Joy,
    Negative,
    Positive,
    Sadness,
    Surprise,
    Trust,
}

/// All categories, in column order.
pub const EMOTIONS: [EmotionCategory; 10] = [
    EmotionCategory::Anger,
    EmotionCategory::Anticipation,
    EmotionCategory::Disgust,
    EmotionCategory::Fear,
    EmotionCategory::Joy,
    EmotionCategory::Negative,
    EmotionCategory::Positive,
    EmotionCategory::Sadness,
    EmotionCategory::Surprise,
    EmotionCategory::Trust,
];

impl EmotionCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionCategory::Anger => "anger",
            EmotionCategory::Anticipation => "anticipation",
            EmotionCategory::Disgust => "disgust",
            EmotionCategory::Fear => "fear",
            EmotionCategory::Joy => "joy",
            EmotionCategory::Negative => "negative",
            EmotionCategory::Positive => "positive",
            EmotionCategory::Sadness => "sadness",
            EmotionCategory::Surprise => "surprise",
            EmotionCategory::Trust => "trust",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for EmotionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EmotionCategory {
    type Err = TweetvecError;

    fn from_str(s: &str) -> Result<Self> {
        EMOTIONS
            .iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| TweetvecError::lexicon(format!("unknown emotion category '{s}'")))
    }
}

/// Association scores of one word, indexed by [`EmotionCategory`].
pub type EmotionScores = [f64; 10];

/// In-memory NRC word-emotion lexicon.
#[derive(Debug, Clone, Default)]
pub struct NrcLexicon {
    words: AHashMap<String, EmotionScores>,
}

impl NrcLexicon {
    /// Load the lexicon from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TweetvecError::lexicon(format!(
                "failed to open emotion lexicon {}: {e}",
                path.display()
            ))
        })?;
        let lexicon = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} emotion lexicon words from {}",
            lexicon.len(),
            path.display()
        );
        Ok(lexicon)
    }

    /// Read `word<TAB>emotion<TAB>association` lines.
    ///
    /// A repeated (word, emotion) pair keeps the last value. Lines with an
    /// unknown emotion or a non-numeric association are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = NrcLexicon::default();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').collect();
            let &[word, emotion, association] = fields.as_slice() else {
                warn!(
                    "Skipping emotion lexicon line {}: expected 3 fields, got {}",
                    line_no + 1,
                    fields.len()
                );
                continue;
            };

            let emotion = match emotion.parse::<EmotionCategory>() {
                Ok(emotion) => emotion,
                Err(e) => {
                    warn!("Skipping emotion lexicon line {}: {e}", line_no + 1);
                    continue;
                }
            };
            let Ok(value) = association.trim().parse::<f64>() else {
                warn!(
                    "Skipping emotion lexicon line {}: invalid association '{association}'",
                    line_no + 1
                );
                continue;
            };

            lexicon.insert(word.trim(), emotion, value);
        }
        Ok(lexicon)
    }

    /// Set the association of a word with one emotion.
    pub fn insert(&mut self, word: &str, emotion: EmotionCategory, value: f64) {
        let scores = self
            .words
            .entry(word.to_lowercase())
            .or_insert([0.0; 10]);
        scores[emotion.index()] = value;
    }

    pub fn get(&self, word: &str) -> Option<&EmotionScores> {
        self.words.get(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Sums NRC emotion associations over the tokens of a text.
#[derive(Clone)]
pub struct EmotionScorer {
    lexicon: Arc<NrcLexicon>,
    analyzer: Arc<dyn Analyzer>,
}

impl fmt::Debug for EmotionScorer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmotionScorer")
            .field("words", &self.lexicon.len())
            .field("analyzer", &self.analyzer.name())
            .finish()
    }
}

impl EmotionScorer {
    /// Create a scorer using the English (lowercase + Snowball stem) analyzer.
    pub fn new(lexicon: Arc<NrcLexicon>) -> Self {
        EmotionScorer {
            lexicon,
            analyzer: Arc::new(EnglishAnalyzer::new()),
        }
    }

    /// Replace the token analyzer.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.analyzer = analyzer;
        self
    }

    pub fn lexicon(&self) -> &NrcLexicon {
        &self.lexicon
    }

    /// Summed association scores of every category over the text's tokens.
    pub fn scores(&self, text: &str) -> Result<EmotionScores> {
        let mut totals = [0.0; 10];
        for token in self.analyzer.analyze(text)? {
            if let Some(scores) = self.lexicon.get(&token.text) {
                for (total, score) in totals.iter_mut().zip(scores) {
                    *total += score;
                }
            }
        }
        Ok(totals)
    }

    /// All ten categories as a feature record.
    pub fn text_emotion(&self, text: &str) -> Result<FeatureRecord> {
        let totals = self.scores(text)?;
        Ok(EMOTIONS
            .iter()
            .zip(totals)
            .map(|(emotion, total)| (emotion.as_str().to_string(), total))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    const LEXICON: &str = "\
abandon\tfear\t1
abandon\tnegative\t1
abandon\tsadness\t1
crook\tanger\t1
crook\tnegative\t1
win\tjoy\t1
win\tpositive\t1
win\tanticipation\t1
win\tpositive\t1
";

    fn scorer() -> EmotionScorer {
        let lexicon = NrcLexicon::from_reader(Cursor::new(LEXICON)).unwrap();
        EmotionScorer::new(Arc::new(lexicon))
    }

    #[test]
    fn test_lexicon_loading() {
        let lexicon = NrcLexicon::from_reader(Cursor::new(LEXICON)).unwrap();
        assert_eq!(lexicon.len(), 3);

        let win = lexicon.get("win").unwrap();
        assert_eq!(win[EmotionCategory::Positive.index()], 1.0);
        assert_eq!(win[EmotionCategory::Anger.index()], 0.0);
    }

    #[test]
    fn test_text_emotion_sums_matching_tokens() {
        let record = scorer()
            .text_emotion("Crooked people abandoned us, crooked!")
            .unwrap();

        let keys: Vec<&str> = record.keys().collect();
        assert_eq!(
            keys,
            vec![
                "anger",
                "anticipation",
                "disgust",
                "fear",
                "joy",
                "negative",
                "positive",
                "sadness",
                "surprise",
                "trust"
            ]
        );
        assert_eq!(record.get("anger"), Some(2.0));
        assert_eq!(record.get("negative"), Some(3.0));
        assert_eq!(record.get("fear"), Some(1.0));
        assert_eq!(record.get("joy"), Some(0.0));
    }

    #[test]
    fn test_text_emotion_empty_text() {
        let record = scorer().text_emotion("").unwrap();
        assert_eq!(record.len(), 10);
        assert!(record.iter().all(|(_, v)| v == 0.0));
    }

    #[test]
    fn test_repeated_pair_keeps_last_value() {
        let data = "win\tjoy\t1\nwin\tjoy\t0\n";
        let lexicon = NrcLexicon::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(lexicon.get("win").unwrap()[EmotionCategory::Joy.index()], 0.0);
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let data = "win\tjoy\t1\nwin\tglee\t1\nlose\tsadness\n\nlose\tsadness\tx\n";
        let lexicon = NrcLexicon::from_reader(Cursor::new(data)).unwrap();
        assert_eq!(lexicon.len(), 1);
    }

    #[test]
    fn test_missing_lexicon_file() {
        let err = NrcLexicon::load("/nonexistent/NRC-emotion-lexicon.txt").unwrap_err();
        assert!(matches!(err, TweetvecError::Lexicon(_)));
    }

    #[test]
    fn test_emotion_category_parsing() {
        assert_eq!(
            "Anticipation".parse::<EmotionCategory>().unwrap(),
            EmotionCategory::Anticipation
        );
        assert!("glee".parse::<EmotionCategory>().is_err());
        assert_eq!(EmotionCategory::Trust.to_string(), "trust");
    }
}
