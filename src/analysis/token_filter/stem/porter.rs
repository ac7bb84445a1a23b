//! Porter stemming algorithm.
//!
//! Reduces English words to their stems, e.g. `running` → `run`,
//! `sensational` → `sensat`. Words containing non-ASCII characters are only
//! lowercased.

use super::Stemmer;

/// Porter stemming algorithm implementation.
#[derive(Debug, Clone, Default)]
pub struct PorterStemmer;

const STEP2_SUFFIXES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3_SUFFIXES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

// Longest suffix first wherever two entries overlap.
const STEP4_SUFFIXES: &[&str] = &[
    "ement", "ance", "ence", "able", "ible", "ment", "ant", "ent", "ism", "ate", "iti", "ous",
    "ive", "ize", "ion", "al", "er", "ic", "ou",
];

impl PorterStemmer {
    /// Create a new Porter stemmer.
    pub fn new() -> Self {
        PorterStemmer
    }

    fn is_consonant(word: &[u8], i: usize) -> bool {
        match word[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !Self::is_consonant(word, i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `word`.
    fn measure(word: &[u8]) -> usize {
        let n = word.len();
        let mut i = 0;
        let mut m = 0;

        while i < n && Self::is_consonant(word, i) {
            i += 1;
        }

        while i < n {
            while i < n && !Self::is_consonant(word, i) {
                i += 1;
            }
            if i >= n {
                break;
            }
            m += 1;
            while i < n && Self::is_consonant(word, i) {
                i += 1;
            }
        }

        m
    }

    fn contains_vowel(word: &[u8]) -> bool {
        (0..word.len()).any(|i| !Self::is_consonant(word, i))
    }

    fn ends_with_double_consonant(word: &[u8]) -> bool {
        let n = word.len();
        n >= 2 && word[n - 1] == word[n - 2] && Self::is_consonant(word, n - 1)
    }

    /// Consonant-vowel-consonant ending where the last letter is not w, x or y.
    fn ends_cvc(word: &[u8]) -> bool {
        let n = word.len();
        n >= 3
            && Self::is_consonant(word, n - 3)
            && !Self::is_consonant(word, n - 2)
            && Self::is_consonant(word, n - 1)
            && !matches!(word[n - 1], b'w' | b'x' | b'y')
    }

    fn stem_of<'a>(word: &'a [u8], suffix: &str) -> Option<&'a [u8]> {
        word.strip_suffix(suffix.as_bytes())
    }

    fn replace(word: &mut Vec<u8>, suffix_len: usize, replacement: &str) {
        word.truncate(word.len() - suffix_len);
        word.extend_from_slice(replacement.as_bytes());
    }

    fn step1a(word: &mut Vec<u8>) {
        if word.ends_with(b"sses") || word.ends_with(b"ies") {
            word.truncate(word.len() - 2);
        } else if word.ends_with(b"s") && !word.ends_with(b"ss") {
            word.truncate(word.len() - 1);
        }
    }

    fn step1b(word: &mut Vec<u8>) {
        if let Some(stem) = Self::stem_of(word, "eed") {
            if Self::measure(stem) > 0 {
                word.truncate(word.len() - 1);
            }
            return;
        }

        let suffix_len = ["ed", "ing"].iter().find_map(|suffix| {
            Self::stem_of(word, suffix)
                .filter(|stem| Self::contains_vowel(stem))
                .map(|_| suffix.len())
        });

        let Some(suffix_len) = suffix_len else {
            return;
        };
        word.truncate(word.len() - suffix_len);

        if word.ends_with(b"at") || word.ends_with(b"bl") || word.ends_with(b"iz") {
            word.push(b'e');
        } else if Self::ends_with_double_consonant(word)
            && !matches!(word.last(), Some(b'l' | b's' | b'z'))
        {
            word.pop();
        } else if Self::measure(word) == 1 && Self::ends_cvc(word) {
            word.push(b'e');
        }
    }

    fn step1c(word: &mut [u8]) {
        let n = word.len();
        if n > 1 && word[n - 1] == b'y' && Self::contains_vowel(&word[..n - 1]) {
            word[n - 1] = b'i';
        }
    }

    fn replace_with_measure(word: &mut Vec<u8>, table: &[(&str, &str)]) {
        for (suffix, replacement) in table {
            if let Some(stem) = Self::stem_of(word, suffix) {
                if Self::measure(stem) > 0 {
                    Self::replace(word, suffix.len(), replacement);
                }
                return;
            }
        }
    }

    fn step4(word: &mut Vec<u8>) {
        for suffix in STEP4_SUFFIXES {
            if let Some(stem) = Self::stem_of(word, suffix) {
                let removable = Self::measure(stem) > 1
                    && (*suffix != "ion" || matches!(stem.last(), Some(b's' | b't')));
                if removable {
                    word.truncate(stem.len());
                }
                return;
            }
        }
    }

    fn step5(word: &mut Vec<u8>) {
        if let Some(stem) = Self::stem_of(word, "e") {
            let m = Self::measure(stem);
            if m > 1 || (m == 1 && !Self::ends_cvc(stem)) {
                word.pop();
            }
        }

        if word.ends_with(b"ll") && Self::measure(word) > 1 {
            word.pop();
        }
    }
}

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.len() <= 2 || !lower.bytes().all(|b| b.is_ascii_lowercase()) {
            return lower;
        }

        let mut bytes = lower.clone().into_bytes();
        Self::step1a(&mut bytes);
        Self::step1b(&mut bytes);
        Self::step1c(&mut bytes);
        Self::replace_with_measure(&mut bytes, STEP2_SUFFIXES);
        Self::replace_with_measure(&mut bytes, STEP3_SUFFIXES);
        Self::step4(&mut bytes);
        Self::step5(&mut bytes);

        String::from_utf8(bytes).unwrap_or(lower)
    }

    fn name(&self) -> &'static str {
        "porter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_porter_stemmer() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("flies"), "fli");
        assert_eq!(stemmer.stem("died"), "di");
        assert_eq!(stemmer.stem("agreed"), "agre");
        assert_eq!(stemmer.stem("disabled"), "disabl");
        assert_eq!(stemmer.stem("measuring"), "measur");
        assert_eq!(stemmer.stem("itemization"), "item");
        assert_eq!(stemmer.stem("sensational"), "sensat");
        assert_eq!(stemmer.stem("traditional"), "tradit");
        assert_eq!(stemmer.stem("happy"), "happi");
        assert_eq!(stemmer.stem("caresses"), "caress");
        assert_eq!(stemmer.stem("hopping"), "hop");
    }

    #[test]
    fn test_porter_keeps_unstemmable_words() {
        let stemmer = PorterStemmer::new();

        assert_eq!(stemmer.stem("Is"), "is");
        assert_eq!(stemmer.stem("café"), "café");
        assert_eq!(stemmer.stem("2016"), "2016");
        assert_eq!(stemmer.stem("sad"), "sad");
    }

    #[test]
    fn test_porter_measure() {
        assert_eq!(PorterStemmer::measure(b"tree"), 0);
        assert_eq!(PorterStemmer::measure(b"trees"), 1);
        assert_eq!(PorterStemmer::measure(b"trouble"), 1);
        assert_eq!(PorterStemmer::measure(b"troubles"), 2);
    }

    #[test]
    fn test_porter_consonant_detection() {
        let word = b"toy";
        assert!(PorterStemmer::is_consonant(word, 0));
        assert!(!PorterStemmer::is_consonant(word, 1));
        assert!(PorterStemmer::is_consonant(word, 2));
        assert!(PorterStemmer::is_consonant(b"yes", 0));
    }
}
