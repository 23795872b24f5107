//! Validation engine for pipeline configurations.
//!
//! The engine runs all registered [`ValidationRule`]s against a
//! [`PipelineConfig`](super::config::PipelineConfig) and collects every
//! diagnostic into a [`ValidationReport`]. It never short-circuits on the
//! first error, so users see all problems at once.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use job_terms::pipeline::validation::ValidationEngine;
//!
//! let engine = ValidationEngine::with_defaults();
//! let report = engine.validate(&config);
//! if report.has_errors() {
//!     for err in report.errors() {
//!         eprintln!("{err}");
//!     }
//! }
//! ```

use std::collections::HashMap;

use rustc_hash::FxHashSet;
use serde::Serialize;

use super::config::*;
use super::error_code::ErrorCode;
use super::errors::ConfigError;
use crate::error::{Error, Result};
use crate::nlp::stopwords::resolve_language;

// ─── Severity ───────────────────────────────────────────────────────────────

/// Whether a diagnostic is a hard error or a soft warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

// ─── Diagnostic ─────────────────────────────────────────────────────────────

/// A single validation finding: an error or warning attached to a
/// [`ConfigError`] carrying the code, path, message, and hint.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationDiagnostic {
    pub severity: Severity,
    #[serde(flatten)]
    pub error: ConfigError,
}

impl ValidationDiagnostic {
    pub fn error(err: ConfigError) -> Self {
        Self {
            severity: Severity::Error,
            error: err,
        }
    }

    pub fn warning(err: ConfigError) -> Self {
        Self {
            severity: Severity::Warning,
            error: err,
        }
    }
}

// ─── Report ─────────────────────────────────────────────────────────────────

/// Collected diagnostics from running all validation rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<ValidationDiagnostic>,
}

impl ValidationReport {
    /// Iterate over error-severity diagnostics.
    pub fn errors(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.error)
    }

    /// Iterate over warning-severity diagnostics.
    pub fn warnings(&self) -> impl Iterator<Item = &ConfigError> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.error)
    }

    /// Returns `true` if any diagnostic is an error.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Error)
    }

    /// Returns `true` if there are no errors (warnings are acceptable).
    pub fn is_valid(&self) -> bool {
        !self.has_errors()
    }

    /// Total number of diagnostics (errors + warnings).
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns `true` if there are no diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Collapse the report into a crate error when it contains errors.
    pub fn into_result(self) -> Result<()> {
        if self.is_valid() {
            return Ok(());
        }
        let messages: Vec<String> = self.errors().map(|e| e.to_string()).collect();
        Err(Error::InvalidConfig(messages.join("; ")))
    }
}

// ─── Rule trait ─────────────────────────────────────────────────────────────

/// A single validation rule that inspects a [`PipelineConfig`] and returns
/// zero or more diagnostics.
pub trait ValidationRule: Send + Sync {
    /// Short, stable identifier for this rule (e.g., `"field_names"`).
    fn name(&self) -> &str;

    /// Inspect `config` and return any findings.
    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic>;
}

// ─── Engine ─────────────────────────────────────────────────────────────────

/// Runs a set of [`ValidationRule`]s against a [`PipelineConfig`] and
/// collects all diagnostics into a [`ValidationReport`].
pub struct ValidationEngine {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl ValidationEngine {
    /// Create an empty engine with no rules.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Create an engine pre-loaded with the default rule set.
    pub fn with_defaults() -> Self {
        let mut engine = Self::new();
        engine.add_rule(Box::new(VersionRule));
        engine.add_rule(Box::new(FieldNamesRule));
        engine.add_rule(Box::new(ScoringRule));
        engine.add_rule(Box::new(CompactionRule));
        engine.add_rule(Box::new(CategoriesRule));
        engine.add_rule(Box::new(LanguageRule));
        engine.add_rule(Box::new(UnknownFieldsRule));
        engine
    }

    /// Register an additional rule.
    pub fn add_rule(&mut self, rule: Box<dyn ValidationRule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in run order.
    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run all rules against `config` and return the collected report.
    pub fn validate(&self, config: &PipelineConfig) -> ValidationReport {
        let mut report = ValidationReport::default();
        for rule in &self.rules {
            report.diagnostics.extend(rule.validate(config));
        }
        report
    }
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Concrete rules
// ═══════════════════════════════════════════════════════════════════════════

// ─── 1. Only v1 configs are understood ──────────────────────────────────────

struct VersionRule;

impl ValidationRule for VersionRule {
    fn name(&self) -> &str {
        "version"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        if config.v == 1 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::UnsupportedVersion,
                "/v",
                format!("unsupported config version {}", config.v),
            )
            .with_hint("Set \"v\": 1"),
        )]
    }
}

// ─── 2. Field names must be set and distinct ────────────────────────────────

struct FieldNamesRule;

impl ValidationRule for FieldNamesRule {
    fn name(&self) -> &str {
        "field_names"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        let required: &[(&str, &str)] = &[
            ("text_field", config.text_field.as_str()),
            ("category_field", config.category_field.as_str()),
        ];
        for &(name, value) in required {
            if value.trim().is_empty() {
                out.push(ValidationDiagnostic::error(ConfigError::new(
                    ErrorCode::MissingField,
                    format!("/{name}"),
                    format!("{name} must not be empty"),
                )));
            }
        }

        let optional: &[(&str, &Option<String>)] = &[
            ("url_field", &config.url_field),
            ("cloud_field", &config.cloud_field),
        ];
        for &(name, value) in optional {
            if matches!(value.as_deref(), Some(v) if v.trim().is_empty()) {
                out.push(ValidationDiagnostic::error(
                    ConfigError::new(
                        ErrorCode::MissingField,
                        format!("/{name}"),
                        format!("{name} must not be empty"),
                    )
                    .with_hint(format!("Set {name} to null to disable it")),
                ));
            }
        }

        if !config.text_field.is_empty() && config.text_field == config.category_field {
            out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::InvalidCombo,
                    "/category_field",
                    "category_field and text_field name the same field",
                )
                .with_hint("Point category_field at the label column, e.g. \"title\""),
            ));
        }

        out
    }
}

// ─── 3. Scoring weight must be a positive number ────────────────────────────

struct ScoringRule;

impl ValidationRule for ScoringRule {
    fn name(&self) -> &str {
        "scoring"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let beta = config.scoring.beta;
        if beta.is_finite() && beta > 0.0 {
            return vec![];
        }
        vec![ValidationDiagnostic::error(
            ConfigError::new(
                ErrorCode::InvalidValue,
                "/scoring/beta",
                format!("beta must be a positive number, got {beta}"),
            )
            .with_hint("Use 1.0 for an unweighted harmonic mean"),
        )]
    }
}

// ─── 4. Compaction limits ───────────────────────────────────────────────────

struct CompactionRule;

impl ValidationRule for CompactionRule {
    fn name(&self) -> &str {
        "compaction"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();

        match config.max_terms {
            Some(0) => out.push(ValidationDiagnostic::error(
                ConfigError::new(
                    ErrorCode::InvalidValue,
                    "/max_terms",
                    "max_terms must be greater than 0",
                )
                .with_hint("Set max_terms to null to disable compaction"),
            )),
            Some(max) if max < config.top_n => out.push(ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::InvalidCombo,
                    "/max_terms",
                    format!("max_terms ({max}) is smaller than top_n ({})", config.top_n),
                )
                .with_hint("Rankings may come out shorter than top_n"),
            )),
            _ => {}
        }

        if config.min_term_frequency == 0 {
            out.push(ValidationDiagnostic::warning(
                ConfigError::new(
                    ErrorCode::InvalidValue,
                    "/min_term_frequency",
                    "min_term_frequency 0 keeps every term",
                )
                .with_hint("Use 1 to express \"no minimum\""),
            ));
        }

        out
    }
}

// ─── 5. Requested categories ────────────────────────────────────────────────

struct CategoriesRule;

impl ValidationRule for CategoriesRule {
    fn name(&self) -> &str {
        "categories"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        let mut seen = FxHashSet::default();

        for (idx, category) in config.categories.iter().enumerate() {
            if category.trim().is_empty() {
                out.push(ValidationDiagnostic::error(ConfigError::new(
                    ErrorCode::InvalidValue,
                    format!("/categories/{idx}"),
                    "category names must not be empty",
                )));
            } else if !seen.insert(category.as_str()) {
                out.push(ValidationDiagnostic::warning(ConfigError::new(
                    ErrorCode::InvalidValue,
                    format!("/categories/{idx}"),
                    format!("category \"{category}\" is listed more than once"),
                )));
            }
        }

        out
    }
}

// ─── 6. Stopword language ───────────────────────────────────────────────────

struct LanguageRule;

impl ValidationRule for LanguageRule {
    fn name(&self) -> &str {
        "stopword_language"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        if resolve_language(&config.stopword_language).is_some() {
            return vec![];
        }
        vec![ValidationDiagnostic::warning(
            ConfigError::new(
                ErrorCode::UnsupportedLanguage,
                "/stopword_language",
                format!(
                    "no stopword list for \"{}\", English is used instead",
                    config.stopword_language
                ),
            )
            .with_hint("Use an ISO 639-1 code such as \"en\" or \"de\""),
        )]
    }
}

// ─── 7. Unknown fields (strict → error, non-strict → warning) ──────────────

struct UnknownFieldsRule;

impl UnknownFieldsRule {
    /// Collect unknown-field diagnostics at the given JSON pointer `path`
    /// from a `HashMap` of extra fields captured by `#[serde(flatten)]`.
    fn check_unknowns(
        path: &str,
        unknowns: &HashMap<String, serde_json::Value>,
        strict: bool,
    ) -> Vec<ValidationDiagnostic> {
        let mut keys: Vec<&String> = unknowns.keys().collect();
        keys.sort();
        keys.into_iter()
            .map(|key| {
                let diag_fn = if strict {
                    ValidationDiagnostic::error
                } else {
                    ValidationDiagnostic::warning
                };
                diag_fn(
                    ConfigError::new(
                        ErrorCode::UnknownField,
                        format!("{path}/{key}"),
                        format!("unrecognized field \"{key}\""),
                    )
                    .with_hint("Check spelling or remove this field"),
                )
            })
            .collect()
    }
}

impl ValidationRule for UnknownFieldsRule {
    fn name(&self) -> &str {
        "unknown_fields"
    }

    fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
        let mut out = Vec::new();
        out.extend(Self::check_unknowns("", &config.unknown_fields, config.strict));
        out.extend(Self::check_unknowns(
            "/scoring",
            &config.scoring.unknown_fields,
            config.strict,
        ));
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper: build a PipelineConfig from JSON.
    fn config(json: &str) -> PipelineConfig {
        serde_json::from_str(json).unwrap()
    }

    fn engine() -> ValidationEngine {
        ValidationEngine::with_defaults()
    }

    fn codes(report: &ValidationReport) -> Vec<ErrorCode> {
        report.diagnostics.iter().map(|d| d.error.code).collect()
    }

    // ─── Valid configs ──────────────────────────────────────────────────

    #[test]
    fn test_minimal_config_is_valid() {
        let report = engine().validate(&config(r#"{ "v": 1 }"#));
        assert!(report.is_valid());
        assert!(report.is_empty());
    }

    #[test]
    fn test_default_config_is_valid() {
        let report = engine().validate(&PipelineConfig::default());
        assert!(report.is_empty());
        assert!(report.into_result().is_ok());
    }

    #[test]
    fn test_disabled_optional_fields_are_valid() {
        let report = engine().validate(&config(
            r#"{ "v": 1, "url_field": null, "cloud_field": null, "max_terms": null }"#,
        ));
        assert!(report.is_empty());
    }

    // ─── Rule: version ──────────────────────────────────────────────────

    #[test]
    fn test_unsupported_version_fails() {
        let report = engine().validate(&config(r#"{ "v": 2 }"#));
        assert!(report.has_errors());
        assert_eq!(codes(&report), vec![ErrorCode::UnsupportedVersion]);
    }

    // ─── Rule: field_names ──────────────────────────────────────────────

    #[test]
    fn test_empty_text_field_fails() {
        let report = engine().validate(&config(r#"{ "v": 1, "text_field": "" }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.code, ErrorCode::MissingField);
        assert_eq!(err.path, "/text_field");
    }

    #[test]
    fn test_empty_url_field_fails() {
        let report = engine().validate(&config(r#"{ "v": 1, "url_field": " " }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.path, "/url_field");
        assert!(err.hint.as_deref().unwrap().contains("null"));
    }

    #[test]
    fn test_same_text_and_category_field_fails() {
        let report = engine().validate(&config(
            r#"{ "v": 1, "text_field": "title", "category_field": "title" }"#,
        ));
        assert_eq!(codes(&report), vec![ErrorCode::InvalidCombo]);
    }

    // ─── Rule: scoring ──────────────────────────────────────────────────

    #[test]
    fn test_non_positive_beta_fails() {
        let report = engine().validate(&config(r#"{ "v": 1, "scoring": { "beta": 0.0 } }"#));
        let err = report.errors().next().unwrap();
        assert_eq!(err.path, "/scoring/beta");
    }

    // ─── Rule: compaction ───────────────────────────────────────────────

    #[test]
    fn test_zero_max_terms_fails() {
        let report = engine().validate(&config(r#"{ "v": 1, "max_terms": 0 }"#));
        assert!(report.has_errors());
        assert_eq!(report.errors().next().unwrap().path, "/max_terms");
    }

    #[test]
    fn test_max_terms_below_top_n_warns() {
        let report = engine().validate(&config(r#"{ "v": 1, "max_terms": 10, "top_n": 30 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn test_zero_min_frequency_warns() {
        let report = engine().validate(&config(r#"{ "v": 1, "min_term_frequency": 0 }"#));
        assert!(report.is_valid());
        assert_eq!(report.warnings().next().unwrap().path, "/min_term_frequency");
    }

    // ─── Rule: categories ───────────────────────────────────────────────

    #[test]
    fn test_blank_category_fails_and_duplicate_warns() {
        let report = engine().validate(&config(
            r#"{ "v": 1, "categories": ["a", "", "a"] }"#,
        ));
        assert_eq!(report.errors().next().unwrap().path, "/categories/1");
        assert_eq!(report.warnings().next().unwrap().path, "/categories/2");
    }

    // ─── Rule: stopword_language ────────────────────────────────────────

    #[test]
    fn test_unknown_language_warns() {
        let report = engine().validate(&config(r#"{ "v": 1, "stopword_language": "xx" }"#));
        assert!(report.is_valid());
        assert_eq!(codes(&report), vec![ErrorCode::UnsupportedLanguage]);
    }

    // ─── Rule: unknown_fields ───────────────────────────────────────────

    #[test]
    fn test_unknown_fields_warn_when_not_strict() {
        let report = engine().validate(&config(
            r#"{ "v": 1, "topn": 5, "scoring": { "alpha": 1 } }"#,
        ));
        assert!(report.is_valid());
        let paths: Vec<_> = report.warnings().map(|w| w.path.as_str()).collect();
        assert_eq!(paths, vec!["/topn", "/scoring/alpha"]);
    }

    #[test]
    fn test_unknown_fields_fail_when_strict() {
        let report = engine().validate(&config(r#"{ "v": 1, "strict": true, "topn": 5 }"#));
        assert!(report.has_errors());
        assert!(matches!(
            report.into_result(),
            Err(Error::InvalidConfig(msg)) if msg.contains("/topn")
        ));
    }

    // ─── Engine ─────────────────────────────────────────────────────────

    #[test]
    fn test_collects_all_errors() {
        let report = engine().validate(&config(
            r#"{ "v": 3, "text_field": "", "max_terms": 0, "scoring": { "beta": -1 } }"#,
        ));
        assert_eq!(report.errors().count(), 4);
    }

    #[test]
    fn test_custom_rule() {
        struct NoHugeRankings;

        impl ValidationRule for NoHugeRankings {
            fn name(&self) -> &str {
                "no_huge_rankings"
            }

            fn validate(&self, config: &PipelineConfig) -> Vec<ValidationDiagnostic> {
                if config.top_n > 1000 {
                    vec![ValidationDiagnostic::error(ConfigError::new(
                        ErrorCode::InvalidValue,
                        "/top_n",
                        "too many",
                    ))]
                } else {
                    vec![]
                }
            }
        }

        let mut engine = ValidationEngine::new();
        engine.add_rule(Box::new(NoHugeRankings));
        assert_eq!(engine.rule_names(), vec!["no_huge_rankings"]);
        assert!(engine.validate(&config(r#"{ "v": 1, "top_n": 5000 }"#)).has_errors());
    }
}
