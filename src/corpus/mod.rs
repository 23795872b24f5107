//! Labeled term/document statistics
//!
//! A [`Corpus`] holds, for every distinct term, its raw frequency in each
//! category, and the number of documents per category. It is built once
//! from records and never mutated; compaction produces a new corpus.

pub mod builder;
pub mod compact;

use tracing::debug;

use crate::error::Result;
use crate::pipeline::traits::Tokenizer;
use crate::types::{Document, Record};

pub use builder::CorpusBuilder;

/// Per-category term frequencies over a labeled document set.
///
/// Categories and terms are stored in ascending order; term and category
/// indices are positions in those lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    categories: Vec<String>,
    doc_counts: Vec<usize>,
    terms: Vec<String>,
    /// Term index -> count per category index
    counts: Vec<Vec<u64>>,
}

impl Corpus {
    pub(crate) fn from_parts(
        categories: Vec<String>,
        doc_counts: Vec<usize>,
        terms: Vec<String>,
        counts: Vec<Vec<u64>>,
    ) -> Self {
        Self {
            categories,
            doc_counts,
            terms,
            counts,
        }
    }

    /// Category names, ascending
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Index of a category, if present
    pub fn category_index(&self, category: &str) -> Option<usize> {
        self.categories
            .binary_search_by(|c| c.as_str().cmp(category))
            .ok()
    }

    /// Number of distinct terms
    pub fn num_terms(&self) -> usize {
        self.terms.len()
    }

    /// Total number of documents
    pub fn num_documents(&self) -> usize {
        self.doc_counts.iter().sum()
    }

    /// Number of documents in a category
    pub fn document_count(&self, category: &str) -> Option<usize> {
        self.category_index(category).map(|idx| self.doc_counts[idx])
    }

    /// Terms, ascending
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.as_str())
    }

    /// Term at an index
    pub fn term(&self, term_idx: usize) -> &str {
        &self.terms[term_idx]
    }

    fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.binary_search_by(|t| t.as_str().cmp(term)).ok()
    }

    /// Raw frequency of `term` in `category`; 0 when either is unknown
    pub fn term_frequency(&self, term: &str, category: &str) -> u64 {
        match (self.term_index(term), self.category_index(category)) {
            (Some(t), Some(c)) => self.counts[t][c],
            _ => 0,
        }
    }

    /// Frequencies of the term at `term_idx`, one per category
    pub fn frequencies(&self, term_idx: usize) -> &[u64] {
        &self.counts[term_idx]
    }

    /// Total frequency of the term at `term_idx` across all categories
    pub fn total_frequency(&self, term_idx: usize) -> u64 {
        self.counts[term_idx].iter().sum()
    }

    /// Total number of tokens in a category
    pub fn total_tokens(&self, category_idx: usize) -> u64 {
        self.counts.iter().map(|row| row[category_idx]).sum()
    }

    /// Per-term counts in a category and in all other categories combined,
    /// both indexed by term index.
    pub fn category_and_rest_counts(&self, category_idx: usize) -> (Vec<u64>, Vec<u64>) {
        self.counts
            .iter()
            .map(|row| {
                let in_category = row[category_idx];
                let total: u64 = row.iter().sum();
                (in_category, total - in_category)
            })
            .unzip()
    }

    /// Keep only the terms for which `keep(term_idx)` returns true
    pub(crate) fn retain_terms(&self, mut keep: impl FnMut(usize) -> bool) -> Corpus {
        let mut terms = Vec::new();
        let mut counts = Vec::new();
        for idx in 0..self.terms.len() {
            if keep(idx) {
                terms.push(self.terms[idx].clone());
                counts.push(self.counts[idx].clone());
            }
        }
        Corpus::from_parts(self.categories.clone(), self.doc_counts.clone(), terms, counts)
    }

    /// Drop terms whose total frequency is below `min_frequency`.
    ///
    /// Document counts are unchanged.
    pub fn remove_infrequent(&self, min_frequency: u64) -> Corpus {
        let pruned = self.retain_terms(|idx| self.total_frequency(idx) >= min_frequency);
        debug!(
            min_frequency,
            before = self.num_terms(),
            after = pruned.num_terms(),
            "removed infrequent terms"
        );
        pruned
    }
}

/// Build a corpus from records.
///
/// Records with an absent or blank `text_field` or `category_field` are
/// skipped. Fails with `EmptyCorpus` when nothing remains and with
/// `SingleCategory` when fewer than two categories are left.
pub fn build_corpus<T: Tokenizer>(
    records: &[Record],
    text_field: &str,
    category_field: &str,
    tokenizer: &T,
) -> Result<Corpus> {
    let mut builder = CorpusBuilder::new();
    let mut skipped = 0usize;

    for record in records {
        match Document::from_record(record, text_field, category_field) {
            Some(doc) => builder.add_document(doc.category, tokenizer.tokenize(doc.text)),
            None => skipped += 1,
        }
    }

    debug!(
        documents = builder.num_documents(),
        skipped, text_field, category_field, "selected documents"
    );
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::nlp::tokenizer::WhitespaceTokenizer;

    fn record(title: &str, text: Option<&str>) -> Record {
        let record = Record::new().with("title", title);
        match text {
            Some(t) => record.with("requirements", t),
            None => record,
        }
    }

    #[test]
    fn test_build_corpus_skips_missing_text() {
        let records = vec![
            record("data scientist", Some("Python statistics")),
            record("data scientist", None),
            record("data engineer", Some("  ")),
            record("data engineer", Some("Spark python")),
        ];

        let corpus =
            build_corpus(&records, "requirements", "title", &WhitespaceTokenizer::new()).unwrap();
        assert_eq!(corpus.num_documents(), 2);
        assert_eq!(corpus.term_frequency("python", "data scientist"), 1);
        assert_eq!(corpus.term_frequency("python", "data engineer"), 1);
        assert_eq!(corpus.term_frequency("spark", "data scientist"), 0);
    }

    #[test]
    fn test_build_corpus_all_filtered_is_empty() {
        let records = vec![record("data scientist", None)];
        let result = build_corpus(&records, "requirements", "title", &WhitespaceTokenizer::new());
        assert!(matches!(result, Err(Error::EmptyCorpus)));
    }

    #[test]
    fn test_category_and_rest_counts() {
        let mut builder = CorpusBuilder::new();
        builder.add_document("a", ["x", "x", "y"]);
        builder.add_document("b", ["y", "z"]);
        builder.add_document("c", ["y"]);
        let corpus = builder.build().unwrap();

        let a = corpus.category_index("a").unwrap();
        let (cat, rest) = corpus.category_and_rest_counts(a);
        // terms: x, y, z
        assert_eq!(cat, vec![2, 1, 0]);
        assert_eq!(rest, vec![0, 2, 1]);
        assert_eq!(corpus.total_tokens(a), 3);
    }

    #[test]
    fn test_remove_infrequent_keeps_document_counts() {
        let mut builder = CorpusBuilder::new();
        builder.add_document("a", ["x", "x", "y"]);
        builder.add_document("b", ["x", "z"]);
        let corpus = builder.build().unwrap();

        let pruned = corpus.remove_infrequent(2);
        assert_eq!(pruned.terms().collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(pruned.num_documents(), 2);
        assert_eq!(pruned.term_frequency("x", "a"), 2);
    }
}
