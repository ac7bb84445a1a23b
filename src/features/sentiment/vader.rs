//! Lexicon and rule based sentiment scoring in the style of VADER.
//!
//! Each word found in the lexicon contributes its mean valence, adjusted for
//! preceding booster words, negations, all-caps emphasis, "least", a few
//! idioms and the position relative to "but". The sum, amplified by
//! exclamation and question marks, is normalized into the compound score.
//!
//! The lexicon is read from a `vader_lexicon.txt`-format file: one
//! `token<TAB>mean<TAB>...` entry per line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::sync::LazyLock;

use ahash::{AHashMap, AHashSet};
use log::{debug, warn};

use crate::error::{Result, TweetvecError};
use crate::features::sentiment::{PolarityScores, SentimentScorer};

const B_INCR: f64 = 0.293;
const B_DECR: f64 = -0.293;
const C_INCR: f64 = 0.733;
const N_SCALAR: f64 = -0.74;
const NORMALIZE_ALPHA: f64 = 15.0;

const NEGATIONS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "darent", "didnt", "doesnt", "ain't", "aren't",
    "can't", "couldn't", "daren't", "didn't", "doesn't", "dont", "hadnt", "hasnt", "havent",
    "isnt", "mightnt", "mustnt", "neither", "don't", "hadn't", "hasn't", "haven't", "isn't",
    "mightn't", "mustn't", "neednt", "needn't", "never", "none", "nope", "nor", "not", "nothing",
    "nowhere", "oughtnt", "shant", "shouldnt", "uhuh", "wasnt", "werent", "oughtn't", "shan't",
    "shouldn't", "uh-uh", "wasn't", "weren't", "without", "wont", "wouldnt", "won't", "wouldn't",
    "rarely", "seldom", "despite",
];

const INCREMENTS: &[&str] = &[
    "absolutely", "amazingly", "awfully", "completely", "considerable", "considerably",
    "decidedly", "deeply", "effing", "enormous", "enormously", "entirely", "especially",
    "exceptional", "exceptionally", "extreme", "extremely", "fabulously", "flipping", "flippin",
    "frackin", "fracking", "fricking", "frickin", "frigging", "friggin", "fully", "fuckin",
    "fucking", "fuggin", "fugging", "greatly", "hella", "highly", "hugely", "incredible",
    "incredibly", "intensely", "major", "majorly", "more", "most", "particularly", "purely",
    "quite", "really", "remarkably", "so", "substantially", "thoroughly", "total", "totally",
    "tremendous", "tremendously", "uber", "unbelievably", "unusually", "utter", "utterly", "very",
];

const DECREMENTS: &[&str] = &[
    "almost", "barely", "hardly", "just enough", "kind of", "kinda", "kindof", "kind-of", "less",
    "little", "marginal", "marginally", "occasional", "occasionally", "partly", "scarce",
    "scarcely", "slight", "slightly", "somewhat", "sort of", "sorta", "sortof", "sort-of",
];

const IDIOMS: &[(&str, f64)] = &[
    ("the shit", 3.0),
    ("the bomb", 3.0),
    ("bad ass", 1.5),
    ("badass", 1.5),
    ("bus stop", 0.0),
    ("yeah right", -2.0),
    ("kiss of death", -1.5),
    ("to die for", 3.0),
    ("beating heart", 3.1),
    ("broken heart", -2.9),
    ("cut the mustard", 2.0),
    ("hand to mouth", -2.0),
    ("back handed", -2.0),
    ("blow smoke", -2.0),
    ("blowing smoke", -2.0),
    ("upper hand", 1.0),
    ("break a leg", 2.0),
    ("cooking with gas", 2.0),
    ("in the black", 2.0),
    ("in the red", -2.0),
    ("on the ball", 2.0),
    ("under the weather", -2.0),
];

static BOOSTERS: LazyLock<AHashMap<&'static str, f64>> = LazyLock::new(|| {
    INCREMENTS
        .iter()
        .map(|w| (*w, B_INCR))
        .chain(DECREMENTS.iter().map(|w| (*w, B_DECR)))
        .collect()
});

static NEGATION_SET: LazyLock<AHashSet<&'static str>> =
    LazyLock::new(|| NEGATIONS.iter().copied().collect());

static IDIOM_MAP: LazyLock<AHashMap<&'static str, f64>> =
    LazyLock::new(|| IDIOMS.iter().copied().collect());

fn booster(word: &str) -> Option<f64> {
    BOOSTERS.get(word).copied()
}

fn is_negation(word: &str) -> bool {
    NEGATION_SET.contains(word) || word.contains("n't")
}

/// At least one cased character and no lowercase ones.
fn is_upper(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

fn normalize(score: f64) -> f64 {
    (score / (score * score + NORMALIZE_ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Words of a text with surrounding punctuation stripped, unless stripping
/// leaves two characters or fewer (emoticons like `:)` survive).
fn words_of(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|token| {
            let stripped = token.trim_matches(|c: char| c.is_ascii_punctuation());
            if stripped.chars().count() <= 2 {
                token.to_string()
            } else {
                stripped.to_string()
            }
        })
        .collect()
}

/// Whether some, but not all, words are in all caps.
fn cap_differential(words: &[String]) -> bool {
    let all_caps = words.iter().filter(|w| is_upper(w)).count();
    all_caps > 0 && all_caps < words.len()
}

fn exclamation_amplifier(text: &str) -> f64 {
    text.matches('!').count().min(4) as f64 * 0.292
}

fn question_amplifier(text: &str) -> f64 {
    match text.matches('?').count() {
        0 | 1 => 0.0,
        n @ 2..=3 => n as f64 * 0.18,
        _ => 0.96,
    }
}

/// The tokenized sentence a valence is computed against.
struct SentiText {
    words: Vec<String>,
    lower: Vec<String>,
    is_cap_diff: bool,
}

impl SentiText {
    fn new(text: &str) -> Self {
        let words = words_of(text);
        let lower = words.iter().map(|w| w.to_lowercase()).collect();
        let is_cap_diff = cap_differential(&words);
        SentiText {
            words,
            lower,
            is_cap_diff,
        }
    }

    fn len(&self) -> usize {
        self.words.len()
    }
}

/// VADER-style sentiment scorer backed by an in-memory lexicon.
#[derive(Debug, Clone, Default)]
pub struct VaderScorer {
    lexicon: AHashMap<String, f64>,
}

impl VaderScorer {
    /// Load the lexicon from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            TweetvecError::lexicon(format!(
                "failed to open sentiment lexicon {}: {e}",
                path.display()
            ))
        })?;
        let scorer = Self::from_reader(BufReader::new(file))?;
        debug!(
            "Loaded {} sentiment lexicon entries from {}",
            scorer.len(),
            path.display()
        );
        Ok(scorer)
    }

    /// Read `token<TAB>mean<TAB>...` lines; malformed lines are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lexicon = AHashMap::new();
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let mut fields = line.split('\t');
            let (Some(token), Some(mean)) = (fields.next(), fields.next()) else {
                warn!("Skipping sentiment lexicon line {}: missing valence", line_no + 1);
                continue;
            };
            match mean.trim().parse::<f64>() {
                Ok(valence) if valence.is_finite() => {
                    lexicon.insert(token.trim().to_lowercase(), valence);
                }
                _ => warn!(
                    "Skipping sentiment lexicon line {}: invalid valence '{mean}'",
                    line_no + 1
                ),
            }
        }
        Ok(VaderScorer { lexicon })
    }

    /// Build a scorer from `(token, valence)` pairs.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let lexicon = entries
            .into_iter()
            .map(|(token, valence)| (token.into().to_lowercase(), valence))
            .collect();
        VaderScorer { lexicon }
    }

    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    fn in_lexicon(&self, word: &str) -> bool {
        self.lexicon.contains_key(word)
    }

    fn scalar_inc_dec(word: &str, lower: &str, valence: f64, is_cap_diff: bool) -> f64 {
        let Some(mut scalar) = booster(lower) else {
            return 0.0;
        };
        if valence < 0.0 {
            scalar = -scalar;
        }
        if is_upper(word) && is_cap_diff {
            if valence > 0.0 {
                scalar += C_INCR;
            } else {
                scalar -= C_INCR;
            }
        }
        scalar
    }

    fn sentiment_valence(&self, text: &SentiText, i: usize) -> f64 {
        let lower = &text.lower;
        let Some(&base) = self.lexicon.get(&lower[i]) else {
            return 0.0;
        };

        let mut valence = base;
        // "no" directly before another lexicon word negates it instead of scoring.
        if lower[i] == "no" && i + 1 < text.len() && self.in_lexicon(&lower[i + 1]) {
            valence = 0.0;
        }
        if (i > 0 && lower[i - 1] == "no")
            || (i > 1 && lower[i - 2] == "no")
            || (i > 2 && lower[i - 3] == "no" && matches!(lower[i - 1].as_str(), "or" | "nor"))
        {
            valence = base * N_SCALAR;
        }

        if is_upper(&text.words[i]) && text.is_cap_diff {
            if valence > 0.0 {
                valence += C_INCR;
            } else {
                valence -= C_INCR;
            }
        }

        for start_i in 0..3 {
            let j = start_i + 1;
            if i < j || self.in_lexicon(&lower[i - j]) {
                continue;
            }
            let mut scalar =
                Self::scalar_inc_dec(&text.words[i - j], &lower[i - j], valence, text.is_cap_diff);
            match start_i {
                1 => scalar *= 0.95,
                2 => scalar *= 0.9,
                _ => {}
            }
            valence += scalar;
            valence = Self::negation_check(valence, lower, start_i, i);
            if start_i == 2 {
                valence = Self::idioms_check(valence, lower, i);
            }
        }

        self.least_check(valence, lower, i)
    }

    fn negation_check(valence: f64, lower: &[String], start_i: usize, i: usize) -> f64 {
        let back = |k: usize| lower[i - k].as_str();
        let so_or_this = |w: &str| w == "so" || w == "this";

        match start_i {
            0 if is_negation(back(1)) => valence * N_SCALAR,
            1 if back(2) == "never" && so_or_this(back(1)) => valence * 1.25,
            1 if back(2) == "without" && back(1) == "doubt" => valence,
            1 if is_negation(back(2)) => valence * N_SCALAR,
            2 if (back(3) == "never" && so_or_this(back(2))) || so_or_this(back(1)) => {
                valence * 1.25
            }
            2 if back(3) == "without" && (back(2) == "doubt" || back(1) == "doubt") => valence,
            2 if is_negation(back(3)) => valence * N_SCALAR,
            _ => valence,
        }
    }

    fn idioms_check(mut valence: f64, lower: &[String], i: usize) -> f64 {
        let join = |range: std::ops::RangeInclusive<usize>| lower[range].join(" ");

        let mut preceding = vec![join(i - 1..=i), join(i - 2..=i), join(i - 2..=i - 1)];
        if i >= 3 {
            preceding.push(join(i - 3..=i - 1));
            preceding.push(join(i - 3..=i - 2));
        }
        if let Some(&idiom) = preceding.iter().find_map(|seq| IDIOM_MAP.get(seq.as_str())) {
            valence = idiom;
        }

        for end in [i + 1, i + 2] {
            if end < lower.len()
                && let Some(&idiom) = IDIOM_MAP.get(join(i..=end).as_str())
            {
                valence = idiom;
            }
        }

        let mut boosters = vec![join(i - 2..=i - 1)];
        if i >= 3 {
            boosters.push(join(i - 3..=i - 1));
            boosters.push(join(i - 3..=i - 2));
        }
        for n_gram in boosters {
            if let Some(scalar) = booster(&n_gram) {
                valence += scalar;
            }
        }

        valence
    }

    fn least_check(&self, valence: f64, lower: &[String], i: usize) -> f64 {
        if i == 0 || lower[i - 1] != "least" || self.in_lexicon("least") {
            return valence;
        }
        if i > 1 && (lower[i - 2] == "at" || lower[i - 2] == "very") {
            valence
        } else {
            valence * N_SCALAR
        }
    }

    fn but_check(lower: &[String], sentiments: &mut [f64]) {
        let Some(bi) = lower.iter().position(|w| w == "but") else {
            return;
        };
        for (si, sentiment) in sentiments.iter_mut().enumerate() {
            if si < bi {
                *sentiment *= 0.5;
            } else if si > bi {
                *sentiment *= 1.5;
            }
        }
    }

    fn score_valence(sentiments: &[f64], text: &str) -> PolarityScores {
        if sentiments.is_empty() {
            return PolarityScores::default();
        }

        let amplifier = exclamation_amplifier(text) + question_amplifier(text);
        let mut sum: f64 = sentiments.iter().sum();
        if sum > 0.0 {
            sum += amplifier;
        } else if sum < 0.0 {
            sum -= amplifier;
        }
        let compound = normalize(sum);

        let mut pos_sum = 0.0;
        let mut neg_sum = 0.0;
        let mut neu_count = 0.0;
        for &s in sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1.0;
            }
        }

        if pos_sum > neg_sum.abs() {
            pos_sum += amplifier;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= amplifier;
        }

        let total = pos_sum + neg_sum.abs() + neu_count;
        PolarityScores {
            neg: round_to((neg_sum / total).abs(), 3),
            neu: round_to((neu_count / total).abs(), 3),
            pos: round_to((pos_sum / total).abs(), 3),
            compound: round_to(compound, 4),
        }
    }
}

impl SentimentScorer for VaderScorer {
    fn polarity_scores(&self, text: &str) -> Result<PolarityScores> {
        let senti = SentiText::new(text);
        let mut sentiments = Vec::with_capacity(senti.len());

        for i in 0..senti.len() {
            let word = senti.lower[i].as_str();
            let kind_of = word == "kind" && senti.lower.get(i + 1).is_some_and(|w| w == "of");
            if booster(word).is_some() || kind_of {
                sentiments.push(0.0);
            } else {
                sentiments.push(self.sentiment_valence(&senti, i));
            }
        }

        Self::but_check(&senti.lower, &mut sentiments);
        Ok(Self::score_valence(&sentiments, text))
    }

    fn name(&self) -> &'static str {
        "vader"
    }
}
