//! Configuration diagnostics.

use std::fmt;

use serde::Serialize;

use super::error_code::ErrorCode;

/// One problem found in a [`PipelineConfig`](super::config::PipelineConfig):
/// a stable code, the JSON pointer of the offending field, a message and an
/// optional hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigError {
    pub code: ErrorCode,
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigError {
    pub fn new(code: ErrorCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " (hint: {hint})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_with_and_without_hint() {
        let err = ConfigError::new(ErrorCode::InvalidValue, "/top_n", "too small");
        assert_eq!(err.to_string(), "[invalid_value] /top_n: too small");

        let err = err.with_hint("use 30");
        assert_eq!(err.to_string(), "[invalid_value] /top_n: too small (hint: use 30)");
    }

    #[test]
    fn test_serialize_skips_missing_hint() {
        let err = ConfigError::new(ErrorCode::UnknownField, "/x", "unrecognized");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "unknown_field");
        assert!(json.get("hint").is_none());
    }
}
