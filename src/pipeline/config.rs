//! Pipeline configuration types.
//!
//! A [`PipelineConfig`] names the record fields to analyze, the ranking
//! size, vocabulary compaction and scoring settings. It is the input to the
//! [`super::validation::ValidationEngine`].
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "text_field": "requirements",
//!   "category_field": "title",
//!   "url_field": "pageUrl",
//!   "top_n": 30,
//!   "max_terms": 2000,
//!   "scoring": { "beta": 1.0, "scaler": "normcdf" },
//!   "strict": false
//! }
//! ```
//!
//! Every field except `v` is optional.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::scoring::{ScaledFScore, Scaler};

/// Top-level pipeline configuration (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Config version (currently `1`).
    pub v: u32,

    /// Field holding the free text to score.
    #[serde(default = "default_text_field")]
    pub text_field: String,

    /// Field holding the category label.
    #[serde(default = "default_category_field")]
    pub category_field: String,

    /// Field holding the posting URL; `null` disables host counting.
    #[serde(default = "default_url_field")]
    pub url_field: Option<String>,

    /// Field whose cleaned words are counted; `null` disables word counts.
    #[serde(default = "default_cloud_field")]
    pub cloud_field: Option<String>,

    /// Categories to rank. Empty means every category in the corpus.
    #[serde(default)]
    pub categories: Vec<String>,

    /// Number of nouns kept per category.
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Vocabulary compaction limit; `null` disables compaction.
    #[serde(default = "default_max_terms")]
    pub max_terms: Option<usize>,

    /// Terms with a lower total frequency are dropped before scoring.
    #[serde(default = "default_min_term_frequency")]
    pub min_term_frequency: u64,

    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Stopword language used by the text cleaner.
    #[serde(default = "default_stopword_language")]
    pub stopword_language: String,

    /// Number of hosts reported.
    #[serde(default = "default_top_hosts")]
    pub top_hosts: usize,

    /// Number of cleaned words reported.
    #[serde(default = "default_cloud_words")]
    pub cloud_words: usize,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Settings for the default scorer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default = "default_beta")]
    pub beta: f64,

    #[serde(default)]
    pub scaler: Scaler,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

fn default_text_field() -> String {
    "requirements".to_string()
}

fn default_category_field() -> String {
    "title".to_string()
}

fn default_url_field() -> Option<String> {
    Some("pageUrl".to_string())
}

fn default_cloud_field() -> Option<String> {
    Some("text".to_string())
}

fn default_top_n() -> usize {
    30
}

fn default_max_terms() -> Option<usize> {
    Some(2000)
}

fn default_min_term_frequency() -> u64 {
    1
}

fn default_beta() -> f64 {
    1.0
}

fn default_stopword_language() -> String {
    "en".to_string()
}

fn default_top_hosts() -> usize {
    20
}

fn default_cloud_words() -> usize {
    100
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            beta: default_beta(),
            scaler: Scaler::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

impl ScoringConfig {
    /// The scorer these settings describe
    pub fn scorer(&self) -> ScaledFScore {
        ScaledFScore::new()
            .with_beta(self.beta)
            .with_scaler(self.scaler)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            v: 1,
            text_field: default_text_field(),
            category_field: default_category_field(),
            url_field: default_url_field(),
            cloud_field: default_cloud_field(),
            categories: Vec::new(),
            top_n: default_top_n(),
            max_terms: default_max_terms(),
            min_term_frequency: default_min_term_frequency(),
            scoring: ScoringConfig::default(),
            stopword_language: default_stopword_language(),
            top_hosts: default_top_hosts(),
            cloud_words: default_cloud_words(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl PipelineConfig {
    /// Read a config from a JSON file. Validation is separate.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Set the number of ranked nouns per category
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// Set or disable vocabulary compaction
    pub fn with_max_terms(mut self, max_terms: Option<usize>) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Set the field names holding the text and the category
    pub fn with_fields(mut self, text_field: &str, category_field: &str) -> Self {
        self.text_field = text_field.to_string();
        self.category_field = category_field.to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_config() {
        let config: PipelineConfig = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(config.v, 1);
        assert_eq!(config.text_field, "requirements");
        assert_eq!(config.category_field, "title");
        assert_eq!(config.url_field.as_deref(), Some("pageUrl"));
        assert_eq!(config.top_n, 30);
        assert_eq!(config.max_terms, Some(2000));
        assert_eq!(config.scoring.scaler, Scaler::NormCdf);
        assert!(!config.strict);
    }

    #[test]
    fn test_deserialize_full_config() {
        let json = r#"{
            "v": 1,
            "text_field": "description",
            "category_field": "role",
            "url_field": null,
            "categories": ["data engineer"],
            "top_n": 10,
            "max_terms": null,
            "min_term_frequency": 5,
            "scoring": { "beta": 2.0, "scaler": "percentile" },
            "strict": true
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.text_field, "description");
        assert!(config.url_field.is_none());
        assert_eq!(config.categories, vec!["data engineer"]);
        assert_eq!(config.max_terms, None);
        assert_eq!(config.min_term_frequency, 5);
        assert_eq!(config.scoring.scorer(), ScaledFScore::new().with_beta(2.0).with_scaler(Scaler::Percentile));
        assert!(config.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "top_k": 5,
            "scoring": { "alpha": 0.1 }
        }"#;
        let config: PipelineConfig = serde_json::from_str(json).unwrap();
        assert!(config.unknown_fields.contains_key("top_k"));
        assert!(config.scoring.unknown_fields.contains_key("alpha"));
    }

    #[test]
    fn test_default_matches_minimal_json() {
        let from_json: PipelineConfig = serde_json::from_str(r#"{ "v": 1 }"#).unwrap();
        let default = PipelineConfig::default();
        assert_eq!(
            serde_json::to_value(&from_json).unwrap(),
            serde_json::to_value(&default).unwrap()
        );
    }
}
