//! Named-entity masking.
//!
//! [`mask_entities`] rewrites a tweet so that every token tagged as a named
//! entity is replaced by its class (`PERSON`, `LOCATION`, ...). Handles and
//! angle-bracket tags are glued back together and every word that is not in
//! all caps is lowercased. The feature pipeline does not depend on this; it
//! is an optional text normalization strategy.

use ahash::AHashMap;

use crate::analysis::tokenizer::{RegexTokenizer, Tokenizer};
use crate::error::Result;

/// Tag assigned to tokens outside any entity.
pub const OUTSIDE: &str = "O";

/// Trait for named-entity taggers.
pub trait EntityTagger: Send + Sync {
    /// Return one class per token, [`OUTSIDE`] for tokens that are not part
    /// of an entity.
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>>;

    /// Get the name of this tagger.
    fn name(&self) -> &'static str;
}

/// Dictionary-backed tagger matching known phrases, longest first.
#[derive(Debug, Clone, Default)]
pub struct GazetteerTagger {
    phrases: AHashMap<String, String>,
    max_len: usize,
}

impl GazetteerTagger {
    pub fn new() -> Self {
        GazetteerTagger::default()
    }

    /// Register a phrase (matched case-insensitively, token by token).
    pub fn insert<P: AsRef<str>, C: Into<String>>(&mut self, phrase: P, class: C) {
        let words: Vec<String> = phrase
            .as_ref()
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        if words.is_empty() {
            return;
        }
        self.max_len = self.max_len.max(words.len());
        self.phrases.insert(words.join(" "), class.into());
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_entity<P: AsRef<str>, C: Into<String>>(mut self, phrase: P, class: C) -> Self {
        self.insert(phrase, class);
        self
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

impl EntityTagger for GazetteerTagger {
    fn tag(&self, tokens: &[String]) -> Result<Vec<String>> {
        let lower: Vec<String> = tokens.iter().map(|t| t.to_lowercase()).collect();
        let mut tags = vec![OUTSIDE.to_string(); tokens.len()];

        let mut i = 0;
        while i < lower.len() {
            let longest = self.max_len.min(lower.len() - i);
            let found = (1..=longest).rev().find_map(|len| {
                self.phrases
                    .get(&lower[i..i + len].join(" "))
                    .map(|class| (len, class))
            });

            match found {
                Some((len, class)) => {
                    for tag in &mut tags[i..i + len] {
                        tag.clone_from(class);
                    }
                    i += len;
                }
                None => i += 1,
            }
        }

        Ok(tags)
    }

    fn name(&self) -> &'static str {
        "gazetteer"
    }
}

/// At least one cased character and no lowercase ones.
fn is_all_caps(word: &str) -> bool {
    word.chars().any(char::is_uppercase) && !word.chars().any(char::is_lowercase)
}

/// Replace tagged entities with their class name.
pub fn mask_entities(text: &str, tagger: &dyn EntityTagger) -> Result<String> {
    let tokenizer = RegexTokenizer::new()?;
    mask_entities_with(text, tagger, &tokenizer)
}

/// [`mask_entities`] with an explicit tokenizer.
pub fn mask_entities_with(
    text: &str,
    tagger: &dyn EntityTagger,
    tokenizer: &dyn Tokenizer,
) -> Result<String> {
    let tokens: Vec<String> = tokenizer.tokenize(text)?.map(|t| t.text).collect();
    let tags = tagger.tag(&tokens)?;

    let mut glued = String::with_capacity(text.len());
    for (token, tag) in tokens.iter().zip(&tags) {
        if tag != OUTSIDE {
            glued.push_str(tag);
            glued.push(' ');
            continue;
        }
        match token.as_str() {
            "@" | "<" => glued.push_str(token),
            ">" => {
                glued.pop();
                glued.push_str("> ");
            }
            _ => {
                glued.push_str(token);
                glued.push(' ');
            }
        }
    }

    let words: Vec<String> = glued
        .split_whitespace()
        .map(|word| {
            if is_all_caps(word) {
                word.to_string()
            } else {
                word.to_lowercase()
            }
        })
        .collect();

    Ok(words.join(" "))
}
