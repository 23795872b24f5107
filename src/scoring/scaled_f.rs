//! Scaled F-score
//!
//! For a category `c` and term `w`:
//!
//! - precision `P(c | w)` = count of `w` in `c` / count of `w` everywhere
//! - frequency `P(w | c)` = count of `w` in `c` / tokens in `c`
//!
//! Both are scaled over the terms that occur in `c` (see [`Scaler`]) and
//! combined with a weighted harmonic mean (F-beta, beta weighting the
//! frequency side). Scaling keeps very rare category-exclusive terms from
//! dominating the raw precision. Terms that do not occur in `c` score 0;
//! terms that do always score above 0.

use rustc_hash::FxHashMap;

use super::scaler::Scaler;
use super::TermScores;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::pipeline::traits::TermScorer;

/// Harmonic mean of scaled precision and scaled frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaledFScore {
    pub beta: f64,
    pub scaler: Scaler,
}

impl Default for ScaledFScore {
    fn default() -> Self {
        Self {
            beta: 1.0,
            scaler: Scaler::NormCdf,
        }
    }
}

impl ScaledFScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the F-beta weight
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Set the probability scaler
    pub fn with_scaler(mut self, scaler: Scaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// Positive inputs give a positive result, even when the product
    /// underflows.
    fn f_beta(&self, precision: f64, frequency: f64) -> f64 {
        let b2 = self.beta * self.beta;
        let denom = b2 * precision + frequency;
        if denom <= 0.0 {
            return 0.0;
        }
        ((1.0 + b2) * precision * frequency / denom).max(f64::MIN_POSITIVE)
    }
}

impl TermScorer for ScaledFScore {
    fn score(&self, corpus: &Corpus, category: &str) -> Result<TermScores> {
        let category_idx = corpus
            .category_index(category)
            .ok_or_else(|| Error::UnknownCategory(category.to_string()))?;

        let (in_category, rest) = corpus.category_and_rest_counts(category_idx);
        let category_tokens: u64 = in_category.iter().sum();

        let present: Vec<usize> = (0..in_category.len())
            .filter(|&idx| in_category[idx] > 0)
            .collect();

        let precision: Vec<f64> = present
            .iter()
            .map(|&idx| in_category[idx] as f64 / (in_category[idx] + rest[idx]) as f64)
            .collect();
        let frequency: Vec<f64> = present
            .iter()
            .map(|&idx| in_category[idx] as f64 / category_tokens as f64)
            .collect();

        let precision = self.scaler.scale(&precision);
        let frequency = self.scaler.scale(&frequency);

        let mut scores: TermScores =
            FxHashMap::with_capacity_and_hasher(corpus.num_terms(), Default::default());
        for idx in 0..corpus.num_terms() {
            scores.insert(corpus.term(idx).to_string(), 0.0);
        }
        for (slot, &idx) in present.iter().enumerate() {
            let score = self.f_beta(precision[slot], frequency[slot]);
            scores.insert(corpus.term(idx).to_string(), score);
        }

        Ok(scores)
    }
}
