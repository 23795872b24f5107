//! Incremental corpus construction
//!
//! Terms are interned to dense `u32` IDs through an `FxHashMap` so counting
//! a token is one hash lookup plus a vector increment.

use rustc_hash::FxHashMap;

use super::Corpus;
use crate::error::{Error, Result};

/// Accumulates per-category term counts one document at a time
#[derive(Debug, Default)]
pub struct CorpusBuilder {
    /// Maps term -> term ID
    term_to_id: FxHashMap<String, u32>,
    /// Term ID -> term
    terms: Vec<String>,
    /// Maps category -> category slot (insertion order)
    category_to_slot: FxHashMap<String, usize>,
    /// Category slot -> category name
    categories: Vec<String>,
    /// Category slot -> number of documents
    doc_counts: Vec<usize>,
    /// Term ID -> (category slot -> count), sparse while building
    counts: Vec<FxHashMap<usize, u64>>,
}

impl CorpusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the ID for a term
    fn get_or_create_term(&mut self, term: &str) -> u32 {
        if let Some(&id) = self.term_to_id.get(term) {
            return id;
        }

        let id = self.terms.len() as u32;
        self.term_to_id.insert(term.to_string(), id);
        self.terms.push(term.to_string());
        self.counts.push(FxHashMap::default());
        id
    }

    fn get_or_create_category(&mut self, category: &str) -> usize {
        if let Some(&slot) = self.category_to_slot.get(category) {
            return slot;
        }

        let slot = self.categories.len();
        self.category_to_slot.insert(category.to_string(), slot);
        self.categories.push(category.to_string());
        self.doc_counts.push(0);
        slot
    }

    /// Add one document's tokens under `category`
    pub fn add_document<I, S>(&mut self, category: &str, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let slot = self.get_or_create_category(category);
        self.doc_counts[slot] += 1;

        for token in tokens {
            let id = self.get_or_create_term(token.as_ref());
            *self.counts[id as usize].entry(slot).or_insert(0) += 1;
        }
    }

    /// Number of documents added so far
    pub fn num_documents(&self) -> usize {
        self.doc_counts.iter().sum()
    }

    /// Finish the corpus.
    ///
    /// Categories and terms are sorted ascending so that IDs, and everything
    /// derived from them, do not depend on document order.
    pub fn build(self) -> Result<Corpus> {
        if self.num_documents() == 0 {
            return Err(Error::EmptyCorpus);
        }
        if self.categories.len() < 2 {
            return Err(Error::SingleCategory {
                found: self.categories.len(),
            });
        }

        let mut category_order: Vec<usize> = (0..self.categories.len()).collect();
        category_order.sort_by(|&a, &b| self.categories[a].cmp(&self.categories[b]));
        let mut slot_to_index = vec![0usize; self.categories.len()];
        for (index, &slot) in category_order.iter().enumerate() {
            slot_to_index[slot] = index;
        }

        let categories: Vec<String> = category_order
            .iter()
            .map(|&slot| self.categories[slot].clone())
            .collect();
        let doc_counts: Vec<usize> = category_order
            .iter()
            .map(|&slot| self.doc_counts[slot])
            .collect();

        let mut term_order: Vec<usize> = (0..self.terms.len()).collect();
        term_order.sort_by(|&a, &b| self.terms[a].cmp(&self.terms[b]));

        let num_categories = categories.len();
        let mut terms = Vec::with_capacity(term_order.len());
        let mut counts = Vec::with_capacity(term_order.len());
        for id in term_order {
            let mut row = vec![0u64; num_categories];
            for (&slot, &count) in &self.counts[id] {
                row[slot_to_index[slot]] = count;
            }
            terms.push(self.terms[id].clone());
            counts.push(row);
        }

        let corpus = Corpus::from_parts(categories, doc_counts, terms, counts);
        if let Some(category) = corpus
            .categories()
            .iter()
            .enumerate()
            .find(|&(idx, _)| corpus.total_tokens(idx) == 0)
            .map(|(_, name)| name.clone())
        {
            return Err(Error::EmptyCategory(category));
        }

        Ok(corpus)
    }
}
