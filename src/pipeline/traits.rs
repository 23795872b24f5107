//! Collaborator trait definitions for the pipeline.
//!
//! Tokenization, term scoring and part-of-speech tagging are the three
//! points where the pipeline depends on an outside capability. Each one is a
//! single-method trait so a different backend can be swapped in without
//! touching corpus construction, noun filtering or ranking.
//!
//! Implementations are statically dispatched through the generic
//! [`TermScoringPipeline`](super::runner::TermScoringPipeline); trait objects
//! work as well.

use crate::corpus::Corpus;
use crate::error::Result;
use crate::scoring::TermScores;

// ============================================================================
// Tokenizer
// ============================================================================

/// Splits a document's text into an ordered sequence of tokens.
///
/// # Contract
///
/// - Pure: the same text always yields the same tokens.
/// - Tokens are non-empty. Sentence boundaries are not represented.
pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

// ============================================================================
// TermScorer
// ============================================================================

/// Computes a per-term discriminative score for one category.
///
/// # Contract
///
/// For a fixed corpus and category:
/// - Scores are finite; higher means more characteristic of `category`
///   relative to the rest of the corpus.
/// - A term that occurs only in `category` scores strictly higher than a
///   term that occurs only in other categories.
/// - A term with zero occurrences in `category` scores at or below every
///   term that occurs in it at least once.
///
/// Terms missing from the returned map have no defined score and are not
/// ranked. An unknown category is an error.
pub trait TermScorer {
    fn score(&self, corpus: &Corpus, category: &str) -> Result<TermScores>;
}

// ============================================================================
// PosTagger
// ============================================================================

/// Tags a single token with a part-of-speech code.
///
/// Only the noun check (code starting with `NN`) is relied upon. An empty or
/// unrecognized code means the token could not be classified; it is treated
/// as a non-noun, never as an error.
pub trait PosTagger {
    fn tag(&self, token: &str) -> String;
}

impl<T: Tokenizer + ?Sized> Tokenizer for &T {
    fn tokenize(&self, text: &str) -> Vec<String> {
        (**self).tokenize(text)
    }
}

impl<S: TermScorer + ?Sized> TermScorer for &S {
    fn score(&self, corpus: &Corpus, category: &str) -> Result<TermScores> {
        (**self).score(corpus, category)
    }
}

impl<P: PosTagger + ?Sized> PosTagger for &P {
    fn tag(&self, token: &str) -> String {
        (**self).tag(token)
    }
}

impl<P: PosTagger + ?Sized> PosTagger for Box<P> {
    fn tag(&self, token: &str) -> String {
        (**self).tag(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::tagger::LexiconTagger;
    use crate::nlp::tokenizer::WhitespaceTokenizer;

    /// Tags everything as a proper noun.
    struct ProperNounTagger;

    impl PosTagger for ProperNounTagger {
        fn tag(&self, _token: &str) -> String {
            "NNP".to_string()
        }
    }

    #[test]
    fn test_custom_tagger_via_reference() {
        let tagger = ProperNounTagger;
        let by_ref: &dyn PosTagger = &tagger;
        assert_eq!(by_ref.tag("anything"), "NNP");
        assert_eq!((&tagger).tag("x"), "NNP");
    }

    #[test]
    fn test_tagger_as_boxed_trait_object() {
        let tagger: Box<dyn PosTagger> = Box::new(LexiconTagger::new());
        assert_eq!(tagger.tag("the"), "DT");
    }

    #[test]
    fn test_tokenizer_as_trait_object() {
        let tokenizer: &dyn Tokenizer = &WhitespaceTokenizer::new();
        assert_eq!(tokenizer.tokenize("a b"), vec!["a", "b"]);
    }
}
