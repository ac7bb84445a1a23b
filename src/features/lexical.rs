//! Lexical analyzers over the tweet text.
//!
//! Every function is total: empty or whitespace-only text yields 0 rather
//! than an error. Indicator features return `1.0` or `0.0`.

use crate::config::VocabularyEntry;
use crate::features::output::FeatureRecord;

const SENTENCE_TERMINATORS: [char; 3] = ['.', '?', '!'];

fn indicator(value: bool) -> f64 {
    if value { 1.0 } else { 0.0 }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Mean number of whitespace-delimited words per sentence.
///
/// Sentences are the non-empty trimmed segments between `.`, `?` and `!`.
pub fn avg_sentence_length(text: &str) -> f64 {
    let (sentences, words) = text
        .split(SENTENCE_TERMINATORS)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .fold((0usize, 0usize), |(n, w), s| {
            (n + 1, w + s.split_whitespace().count())
        });

    if sentences == 0 {
        0.0
    } else {
        words as f64 / sentences as f64
    }
}

/// Mean character length of the words, ignoring sentence terminators.
pub fn avg_word_length(text: &str) -> f64 {
    let stripped: String = text
        .chars()
        .filter(|c| !SENTENCE_TERMINATORS.contains(c))
        .collect();

    let (words, chars) = stripped
        .split_whitespace()
        .fold((0usize, 0usize), |(n, c), w| (n + 1, c + w.chars().count()));

    if words == 0 {
        0.0
    } else {
        chars as f64 / words as f64
    }
}

/// Number of characters after dropping one leading ASCII word character.
pub fn character_count(text: &str) -> f64 {
    let mut chars = text.chars();
    let count = match chars.next() {
        Some(c) if c.is_ascii_alphanumeric() || c == '_' => chars.count(),
        Some(_) => text.chars().count(),
        None => 0,
    };
    count as f64
}

/// Whether the text opens with a quoted retweet (`"@`).
pub fn is_quoted_retweet(text: &str) -> f64 {
    indicator(text.starts_with("\"@"))
}

/// Number of whitespace-preceded runs of two or more uppercase ASCII letters.
pub fn count_all_caps(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    let count = chars
        .windows(3)
        .filter(|w| {
            w[0].is_whitespace() && w[1].is_ascii_uppercase() && w[2].is_ascii_uppercase()
        })
        .count();
    count as f64
}

/// Number of capitalized words that do not start a sentence.
///
/// A match is an uppercase letter at a word boundary followed by any
/// lowercase letters, one character other than `'`, one character other
/// than `I`, and a word boundary. Matches directly after `.`, `!` or `?`
/// plus one whitespace character are skipped. Matching is left to right
/// and non-overlapping.
pub fn count_random_caps(text: &str) -> f64 {
    let chars: Vec<char> = text.chars().collect();
    let n = chars.len();
    let word_at = |i: usize| i < n && is_word_char(chars[i]);
    let boundary_at = |i: usize| {
        let before = i > 0 && is_word_char(chars[i - 1]);
        before != word_at(i)
    };

    let mut count = 0;
    let mut p = 0;
    while p < n {
        match match_random_cap(&chars, p, &boundary_at) {
            Some(end) => {
                count += 1;
                p = end;
            }
            None => p += 1,
        }
    }
    count as f64
}

fn match_random_cap(
    chars: &[char],
    p: usize,
    boundary_at: &impl Fn(usize) -> bool,
) -> Option<usize> {
    if !chars[p].is_ascii_uppercase() || !boundary_at(p) {
        return None;
    }
    if p >= 2 && matches!(chars[p - 2], '.' | '!' | '?') && chars[p - 1].is_whitespace() {
        return None;
    }

    let lower_run = chars[p + 1..]
        .iter()
        .take_while(|c| c.is_ascii_lowercase())
        .count();

    (0..=lower_run).rev().find_map(|j| {
        let not_quote = p + 1 + j;
        let not_i = p + 2 + j;
        let end = p + 3 + j;
        let ok = not_i < chars.len()
            && chars[not_quote] != '\''
            && chars[not_i] != 'I'
            && boundary_at(end);
        ok.then_some(end)
    })
}

/// Whether the text starts with `@`.
pub fn is_mention(text: &str) -> f64 {
    indicator(text.starts_with('@'))
}

fn last_word(text: &str) -> Option<&str> {
    text.split_whitespace().last()
}

/// Whether the last word is a link.
pub fn ends_with_link(text: &str) -> f64 {
    indicator(last_word(text).is_some_and(|w| w.starts_with("http")))
}

/// Whether the last word is a hashtag.
pub fn ends_with_hashtag(text: &str) -> f64 {
    indicator(last_word(text).is_some_and(|w| w.starts_with('#')))
}

/// Whether the first run of ASCII letters is the word `I`.
pub fn starts_with_i(text: &str) -> f64 {
    let word: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_alphabetic())
        .take_while(|c| c.is_ascii_alphabetic())
        .collect();
    indicator(word.eq_ignore_ascii_case("i"))
}

/// Occurrence counts of each configured punctuation mark.
pub fn count_punctuation(text: &str, marks: &[VocabularyEntry]) -> FeatureRecord {
    let mut record = FeatureRecord::with_capacity(marks.len());
    for mark in marks {
        record.insert(mark.id.as_str(), text.matches(mark.pattern.as_str()).count() as f64);
    }
    record
}

/// Case-insensitive, non-overlapping occurrence counts of each keyword.
pub fn count_keywords(text: &str, keywords: &[VocabularyEntry]) -> FeatureRecord {
    let lowered = text.to_lowercase();
    let mut record = FeatureRecord::with_capacity(keywords.len());
    for keyword in keywords {
        let pattern = keyword.pattern.to_lowercase();
        record.insert(keyword.id.as_str(), lowered.matches(pattern.as_str()).count() as f64);
    }
    record
}
