//! Tokenizer implementations for text analysis.
//!
//! - [`regex::RegexTokenizer`] - Regex-driven tokens; the default pattern keeps
//!   punctuation marks as their own tokens
//! - [`unicode_word::UnicodeWordTokenizer`] - Unicode word boundaries, words only
//!
//! # Examples
//!
//! ```
//! use tweetvec::analysis::tokenizer::Tokenizer;
//! use tweetvec::analysis::tokenizer::unicode_word::UnicodeWordTokenizer;
//!
//! let tokenizer = UnicodeWordTokenizer::new();
//! let tokens: Vec<_> = tokenizer.tokenize("Hello, world!").unwrap().collect();
//! assert_eq!(tokens.len(), 2);
//! ```

use crate::analysis::token::TokenStream;
use crate::error::Result;

/// Trait for tokenizers that convert text into tokens.
///
/// The trait requires `Send + Sync` so tokenizers can be shared by the
/// parallel feature composer.
pub trait Tokenizer: Send + Sync {
    /// Tokenize the given text into a stream of tokens.
    fn tokenize(&self, text: &str) -> Result<TokenStream>;

    /// Get the name of this tokenizer (for debugging and configuration).
    fn name(&self) -> &'static str;
}

pub mod regex;
pub mod unicode_word;

pub use self::regex::RegexTokenizer;
pub use unicode_word::UnicodeWordTokenizer;
