//! Association-based vocabulary compaction
//!
//! Terms are ranked per category by a [`TermScorer`]; a term survives if it
//! ranks within the top `max_terms` of at least one category. This keeps the
//! vocabulary bounded while preserving the terms most characteristic of
//! every category.

use tracing::debug;

use super::Corpus;
use crate::error::Result;
use crate::pipeline::traits::TermScorer;
use crate::scoring::{compute_discriminative_scores, into_scored_terms};
use crate::types::ScoredTerm;

impl Corpus {
    /// Keep the terms whose best per-category rank is below `max_terms`.
    pub fn compact<S: TermScorer>(&self, scorer: &S, max_terms: usize) -> Result<Corpus> {
        if self.num_terms() <= max_terms {
            return Ok(self.clone());
        }

        let mut best_rank = vec![usize::MAX; self.num_terms()];
        for category in self.categories() {
            let scores = compute_discriminative_scores(self, category, scorer)?;
            let mut ranked = into_scored_terms(scores);
            ranked.sort_by(ScoredTerm::rank_cmp);

            for (rank, scored) in ranked.iter().enumerate().take(max_terms) {
                if let Some(idx) = self.term_index(&scored.term) {
                    best_rank[idx] = best_rank[idx].min(rank);
                }
            }
        }

        let compacted = self.retain_terms(|idx| best_rank[idx] < max_terms);
        debug!(
            max_terms,
            before = self.num_terms(),
            after = compacted.num_terms(),
            "compacted vocabulary"
        );
        Ok(compacted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;
    use crate::scoring::ScaledFScore;

    fn corpus() -> Corpus {
        let mut builder = CorpusBuilder::new();
        builder.add_document("a", ["spark", "spark", "spark", "sql", "hadoop"]);
        builder.add_document("b", ["statistics", "statistics", "statistics", "sql", "excel"]);
        builder.build().unwrap()
    }

    #[test]
    fn test_compact_keeps_top_terms_of_each_category() {
        let corpus = corpus();
        let compacted = corpus.compact(&ScaledFScore::new(), 1).unwrap();
        let terms: Vec<_> = compacted.terms().collect();
        assert_eq!(terms, vec!["spark", "statistics"]);
        assert_eq!(compacted.num_documents(), corpus.num_documents());
    }

    #[test]
    fn test_compact_noop_when_under_limit() {
        let corpus = corpus();
        let compacted = corpus.compact(&ScaledFScore::new(), 100).unwrap();
        assert_eq!(compacted, corpus);
    }

    #[test]
    fn test_compact_zero_removes_everything() {
        let corpus = corpus();
        let compacted = corpus.compact(&ScaledFScore::new(), 0).unwrap();
        assert_eq!(compacted.num_terms(), 0);
    }
}
