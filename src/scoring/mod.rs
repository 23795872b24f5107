//! Discriminative term scoring
//!
//! The pipeline talks to scoring backends through
//! [`TermScorer`](crate::pipeline::traits::TermScorer). This module provides
//! the default backend ([`scaled_f::ScaledFScore`]) and the checks applied
//! to whatever a backend returns.

pub mod scaled_f;
pub mod scaler;

use rustc_hash::FxHashMap;

use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::pipeline::traits::TermScorer;
use crate::types::{ScoredTerm, TermStats, TermStatsTable};

pub use scaled_f::ScaledFScore;
pub use scaler::Scaler;

/// Term -> discriminative score for one category
pub type TermScores = FxHashMap<String, f64>;

/// Score every term for `category`, rejecting non-finite scores.
pub fn compute_discriminative_scores<S: TermScorer>(
    corpus: &Corpus,
    category: &str,
    scorer: &S,
) -> Result<TermScores> {
    if corpus.category_index(category).is_none() {
        return Err(Error::UnknownCategory(category.to_string()));
    }

    let scores = scorer.score(corpus, category)?;
    if let Some((term, &score)) = scores.iter().find(|(_, s)| !s.is_finite()) {
        return Err(Error::NonFiniteScore {
            category: category.to_string(),
            term: term.clone(),
            score,
        });
    }
    Ok(scores)
}

/// Flatten a score map into a list in ascending term order
pub fn into_scored_terms(scores: TermScores) -> Vec<ScoredTerm> {
    let mut terms: Vec<ScoredTerm> = scores
        .into_iter()
        .map(|(term, score)| ScoredTerm { term, score })
        .collect();
    terms.sort_by(|a, b| a.term.cmp(&b.term));
    terms
}

/// Score every category of `corpus`, in [`Corpus::categories`] order.
pub fn score_all<S: TermScorer>(corpus: &Corpus, scorer: &S) -> Result<Vec<TermScores>> {
    corpus
        .categories()
        .iter()
        .map(|category| compute_discriminative_scores(corpus, category, scorer))
        .collect()
}

/// Build the full statistics table: raw frequency and score of every term
/// in every category.
///
/// Terms without a defined score in some category get 0.0 there.
pub fn term_stats<S: TermScorer>(corpus: &Corpus, scorer: &S) -> Result<TermStatsTable> {
    Ok(stats_table(corpus, &score_all(corpus, scorer)?))
}

/// Assemble the statistics table from scores already computed by
/// [`score_all`].
pub fn stats_table(corpus: &Corpus, per_category: &[TermScores]) -> TermStatsTable {
    let rows = (0..corpus.num_terms())
        .map(|idx| {
            let term = corpus.term(idx);
            TermStats {
                term: term.to_string(),
                frequencies: corpus.frequencies(idx).to_vec(),
                scores: per_category
                    .iter()
                    .map(|scores| scores.get(term).copied().unwrap_or(0.0))
                    .collect(),
            }
        })
        .collect();

    TermStatsTable {
        categories: corpus.categories().to_vec(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;

    struct NanScorer;

    impl TermScorer for NanScorer {
        fn score(&self, corpus: &Corpus, _category: &str) -> Result<TermScores> {
            Ok(corpus.terms().map(|t| (t.to_string(), f64::NAN)).collect())
        }
    }

    fn corpus() -> Corpus {
        let mut builder = CorpusBuilder::new();
        builder.add_document("x", ["engineer", "builds", "pipeline"]);
        builder.add_document("y", ["scientist", "analyzes", "pipeline"]);
        builder.build().unwrap()
    }

    #[test]
    fn test_non_finite_score_is_rejected() {
        let result = compute_discriminative_scores(&corpus(), "x", &NanScorer);
        assert!(matches!(result, Err(Error::NonFiniteScore { .. })));
    }

    #[test]
    fn test_unknown_category_is_rejected_before_scoring() {
        let result = compute_discriminative_scores(&corpus(), "z", &ScaledFScore::new());
        assert!(matches!(result, Err(Error::UnknownCategory(_))));
    }

    #[test]
    fn test_into_scored_terms_is_lexical() {
        let mut scores = TermScores::default();
        scores.insert("b".into(), 1.0);
        scores.insert("a".into(), 0.0);
        let terms = into_scored_terms(scores);
        assert_eq!(terms[0].term, "a");
        assert_eq!(terms[1].term, "b");
    }

    #[test]
    fn test_term_stats_table() {
        let corpus = corpus();
        let table = term_stats(&corpus, &ScaledFScore::new()).unwrap();

        assert_eq!(table.categories, vec!["x", "y"]);
        assert_eq!(table.rows.len(), 5);

        let pipeline = table.row("pipeline").unwrap();
        assert_eq!(pipeline.frequencies, vec![1, 1]);

        assert_eq!(table.score("scientist", "x"), Some(0.0));
        assert!(table.score("engineer", "x").unwrap() > 0.0);
        assert!(table.score("engineer", "x") > table.score("pipeline", "x"));
    }
}
