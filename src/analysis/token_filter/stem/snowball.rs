//! Snowball English (Porter2) stemmer.
//!
//! Wraps the `rust-stemmers` implementation so it plugs into [`StemFilter`].
//!
//! [`StemFilter`]: super::StemFilter

use rust_stemmers::{Algorithm, Stemmer as SnowballAlgorithm};

use super::Stemmer;

/// Snowball English stemmer, e.g. `generously` → `generous`.
pub struct SnowballStemmer {
    algorithm: SnowballAlgorithm,
}

impl std::fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &"english")
            .finish()
    }
}

impl SnowballStemmer {
    /// Create a new English Snowball stemmer.
    pub fn new() -> Self {
        SnowballStemmer {
            algorithm: SnowballAlgorithm::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        self.algorithm.stem(&lower).into_owned()
    }

    fn name(&self) -> &'static str {
        "snowball"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snowball_stemmer() {
        let stemmer = SnowballStemmer::new();

        assert_eq!(stemmer.stem("fairly"), "fair");
        assert_eq!(stemmer.stem("generously"), "generous");
        assert_eq!(stemmer.stem("dying"), "die");
        assert_eq!(stemmer.stem("running"), "run");
        assert_eq!(stemmer.stem("Crooked"), "crook");
        assert_eq!(stemmer.stem("abandoned"), "abandon");
    }

    #[test]
    fn test_snowball_differs_from_porter() {
        use crate::analysis::token_filter::stem::PorterStemmer;

        let porter = PorterStemmer::new();
        let snowball = SnowballStemmer::new();
        assert_eq!(porter.stem("generously"), "gener");
        assert_eq!(snowball.stem("generously"), "generous");
    }

    #[test]
    fn test_stemmer_name() {
        assert_eq!(SnowballStemmer::new().name(), "snowball");
    }
}
