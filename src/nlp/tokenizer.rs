//! Coarse whitespace tokenization
//!
//! Sentence boundaries don't matter for unigram statistics, so the tokenizer
//! only splits on whitespace and trims punctuation hanging off either end of
//! a token ("pipelines," -> "pipelines", "(sql)" -> "sql"). Inner punctuation
//! is kept so terms like "c++" and "scikit-learn" survive.

use crate::pipeline::traits::Tokenizer;

/// Lowercasing whitespace tokenizer
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer {
    keep_case: bool,
}

impl WhitespaceTokenizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep the original casing instead of lowercasing
    pub fn with_keep_case(mut self, keep_case: bool) -> Self {
        self.keep_case = keep_case;
        self
    }

    fn normalize(&self, raw: &str) -> Option<String> {
        let trimmed = raw.trim_matches(|c: char| !c.is_alphanumeric() && !is_kept_suffix(c));
        let trimmed = trimmed.trim_start_matches(|c: char| !c.is_alphanumeric());
        if trimmed.is_empty() {
            return None;
        }
        if self.keep_case {
            Some(trimmed.to_string())
        } else {
            Some(trimmed.to_lowercase())
        }
    }
}

/// Trailing symbols that are part of common tech terms (c++, c#)
fn is_kept_suffix(c: char) -> bool {
    c == '+' || c == '#'
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .filter_map(|raw| self.normalize(raw))
            .collect()
    }
}
