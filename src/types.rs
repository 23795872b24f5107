//! Core data types shared across the crate
//!
//! Records come in from a document source, documents are the subset the
//! pipeline actually analyzes, and the ranked/statistics types are what the
//! presentation layer reads back.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::source::page_host;

/// One row of a dataset: field name to optional string value.
///
/// Missing fields and JSON `null` are both treated as absent. Numbers and
/// booleans are kept as their JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Option<String>>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Set a field, replacing any previous value
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(field.into(), Some(value.into()));
    }

    /// Get a field value; `None` when missing or null
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_deref())
    }

    /// Get a field value, treating whitespace-only strings as absent
    pub fn get_non_empty(&self, field: &str) -> Option<&str> {
        self.get(field).filter(|v| !v.trim().is_empty())
    }

}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let fields = raw
            .into_iter()
            .map(|(field, value)| {
                let value = match value {
                    Value::Null => None,
                    Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
                (field, value)
            })
            .collect();
        Ok(Self { fields })
    }
}

/// A labeled document selected for analysis.
///
/// Borrows its category and text from the [`Record`] it was selected from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    pub category: &'a str,
    pub text: &'a str,
    /// Host of the posting URL, when a URL field was requested and parses
    pub source_host: Option<String>,
}

impl<'a> Document<'a> {
    /// Select a document from a record, or `None` if the category or the
    /// analyzed text is absent or blank.
    pub fn from_record(record: &'a Record, text_field: &str, category_field: &str) -> Option<Self> {
        let category = record.get_non_empty(category_field)?;
        let text = record.get_non_empty(text_field)?;
        Some(Self {
            category,
            text,
            source_host: None,
        })
    }

    /// Derive `source_host` from the record's `url_field`
    pub fn with_source_host(mut self, record: &Record, url_field: &str) -> Self {
        self.source_host = record.get(url_field).and_then(page_host);
        self
    }
}

/// A term with its score for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTerm {
    pub term: String,
    pub score: f64,
}

impl ScoredTerm {
    pub fn new(term: impl Into<String>, score: f64) -> Self {
        Self {
            term: term.into(),
            score,
        }
    }

    /// Ranking order: score descending, then term ascending.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.term.cmp(&other.term))
    }
}

/// Top-N discriminative nouns for one category, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedTermList {
    pub category: String,
    pub terms: Vec<ScoredTerm>,
}

impl RankedTermList {
    /// Number of ranked terms
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Ranked term strings, best first
    pub fn term_names(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.term.as_str()).collect()
    }
}

/// One row of the term statistics table.
///
/// `frequencies` and `scores` are indexed like [`TermStatsTable::categories`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermStats {
    pub term: String,
    pub frequencies: Vec<u64>,
    pub scores: Vec<f64>,
}

/// Raw frequency and discriminative score of every term, per category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TermStatsTable {
    pub categories: Vec<String>,
    pub rows: Vec<TermStats>,
}

impl TermStatsTable {
    /// Look up the row for a term
    pub fn row(&self, term: &str) -> Option<&TermStats> {
        self.rows
            .binary_search_by(|r| r.term.as_str().cmp(term))
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Score of `term` for `category`, if both exist
    pub fn score(&self, term: &str, category: &str) -> Option<f64> {
        let idx = self.categories.iter().position(|c| c == category)?;
        self.row(term).map(|r| r.scores[idx])
    }
}

/// How many postings came from one host
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostCount {
    pub host: String,
    pub count: usize,
}

/// Occurrences of one cleaned word
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}
