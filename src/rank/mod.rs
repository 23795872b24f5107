//! Noun filtering and top-N ranking
//!
//! `rank = top_n(filter_to_nouns(scores), n)`. The noun filter only removes
//! entries; ordering is decided once, by [`top_n`].

use rustc_hash::FxHashMap;

use crate::corpus::Corpus;
use crate::error::Result;
use crate::pipeline::traits::{PosTagger, TermScorer};
use crate::scoring::{compute_discriminative_scores, into_scored_terms};
use crate::types::{RankedTermList, ScoredTerm};

/// Penn Treebank noun codes all start with this prefix (NN, NNS, NNP, NNPS)
pub const NOUN_TAG_PREFIX: &str = "NN";

/// Whether a tag code denotes a noun. Empty or malformed tags do not.
pub fn is_noun_tag(tag: &str) -> bool {
    tag.starts_with(NOUN_TAG_PREFIX)
}

/// Keep only the terms the tagger classifies as nouns, preserving order.
pub fn filter_to_nouns<P: PosTagger>(terms: Vec<ScoredTerm>, tagger: &P) -> Vec<ScoredTerm> {
    terms
        .into_iter()
        .filter(|t| is_noun_tag(&tagger.tag(&t.term)))
        .collect()
}

/// Sort by score descending (ties by ascending term) and keep the first `n`.
pub fn top_n(category: &str, mut terms: Vec<ScoredTerm>, n: usize) -> RankedTermList {
    terms.sort_by(ScoredTerm::rank_cmp);
    terms.truncate(n);
    RankedTermList {
        category: category.to_string(),
        terms,
    }
}

/// Rank the top `n` discriminative nouns of `category`.
pub fn rank<S, P>(
    corpus: &Corpus,
    category: &str,
    n: usize,
    scorer: &S,
    tagger: &P,
) -> Result<RankedTermList>
where
    S: TermScorer,
    P: PosTagger,
{
    let scores = compute_discriminative_scores(corpus, category, scorer)?;
    let nouns = filter_to_nouns(into_scored_terms(scores), tagger);
    Ok(top_n(category, nouns, n))
}

/// Noun decisions for a whole vocabulary, computed once and shared by every
/// category's ranking.
#[derive(Debug, Clone, Default)]
pub struct NounLookup {
    is_noun: FxHashMap<String, bool>,
}

impl NounLookup {
    /// Tag every term of the corpus
    pub fn from_corpus<P: PosTagger>(corpus: &Corpus, tagger: &P) -> Self {
        let is_noun = corpus
            .terms()
            .map(|term| (term.to_string(), is_noun_tag(&tagger.tag(term))))
            .collect();
        Self { is_noun }
    }

    /// Number of tagged terms
    pub fn len(&self) -> usize {
        self.is_noun.len()
    }

    pub fn is_empty(&self) -> bool {
        self.is_noun.is_empty()
    }

    /// Number of terms classified as nouns
    pub fn num_nouns(&self) -> usize {
        self.is_noun.values().filter(|&&noun| noun).count()
    }

    /// Unknown terms are not nouns
    pub fn is_noun(&self, term: &str) -> bool {
        self.is_noun.get(term).copied().unwrap_or(false)
    }

    /// Same as [`filter_to_nouns`], without calling the tagger again
    pub fn filter(&self, terms: Vec<ScoredTerm>) -> Vec<ScoredTerm> {
        terms.into_iter().filter(|t| self.is_noun(&t.term)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;
    use crate::nlp::tagger::LexiconTagger;
    use crate::scoring::ScaledFScore;

    /// Returns fixed tags; anything else is unclassifiable.
    struct FixedTagger(Vec<(&'static str, &'static str)>);

    impl PosTagger for FixedTagger {
        fn tag(&self, token: &str) -> String {
            self.0
                .iter()
                .find(|(t, _)| *t == token)
                .map(|(_, tag)| tag.to_string())
                .unwrap_or_default()
        }
    }

    fn terms(pairs: &[(&str, f64)]) -> Vec<ScoredTerm> {
        pairs.iter().map(|&(t, s)| ScoredTerm::new(t, s)).collect()
    }

    #[test]
    fn test_is_noun_tag() {
        assert!(is_noun_tag("NN"));
        assert!(is_noun_tag("NNS"));
        assert!(is_noun_tag("NNP"));
        assert!(!is_noun_tag("VBZ"));
        assert!(!is_noun_tag("N"));
        assert!(!is_noun_tag(""));
        assert!(!is_noun_tag("nn"));
    }

    #[test]
    fn test_filter_preserves_order_and_drops_unclassified() {
        let tagger = FixedTagger(vec![
            ("zeta", "NN"),
            ("alpha", "NNS"),
            ("runs", "VBZ"),
            ("weird", "?"),
        ]);
        let input = terms(&[("zeta", 0.1), ("runs", 0.9), ("alpha", 0.5), ("weird", 0.7), ("unknown", 1.0)]);
        let out = filter_to_nouns(input, &tagger);
        let names: Vec<_> = out.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let tagger = LexiconTagger::new();
        let input = terms(&[("engineer", 0.3), ("builds", 0.2), ("the", 0.1), ("pipelines", 0.4)]);
        let once = filter_to_nouns(input, &tagger);
        let twice = filter_to_nouns(once.clone(), &tagger);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_top_n_sorts_and_truncates() {
        let input = terms(&[("b", 0.5), ("a", 0.5), ("c", 0.9), ("d", 0.1)]);
        let ranked = top_n("x", input, 3);
        assert_eq!(ranked.category, "x");
        assert_eq!(ranked.term_names(), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_top_n_larger_than_input() {
        let ranked = top_n("x", terms(&[("a", 1.0), ("b", 2.0)]), 10);
        assert_eq!(ranked.term_names(), vec!["b", "a"]);
    }

    #[test]
    fn test_top_zero_is_empty() {
        let ranked = top_n("x", terms(&[("a", 1.0)]), 0);
        assert!(ranked.is_empty());
    }

    #[test]
    fn test_noun_lookup_matches_filter() {
        let mut builder = CorpusBuilder::new();
        builder.add_document("x", ["engineer", "builds", "pipeline", "the"]);
        builder.add_document("y", ["scientist", "analyzes", "pipeline"]);
        let corpus = builder.build().unwrap();
        let tagger = LexiconTagger::new();

        let lookup = NounLookup::from_corpus(&corpus, &tagger);
        assert_eq!(lookup.len(), 6);
        assert_eq!(lookup.num_nouns(), 3);

        let scores = into_scored_terms(
            compute_discriminative_scores(&corpus, "x", &ScaledFScore::new()).unwrap(),
        );
        assert_eq!(lookup.filter(scores.clone()), filter_to_nouns(scores, &tagger));
    }

    #[test]
    fn test_rank_excludes_verbs() {
        let mut builder = CorpusBuilder::new();
        builder.add_document("x", ["engineer", "builds", "pipeline"]);
        builder.add_document("y", ["scientist", "analyzes", "pipeline"]);
        let corpus = builder.build().unwrap();

        let ranked = rank(&corpus, "x", 10, &ScaledFScore::new(), &LexiconTagger::new()).unwrap();
        assert!(!ranked.term_names().contains(&"builds"));
        assert_eq!(ranked.terms[0].term, "engineer");
    }
}
