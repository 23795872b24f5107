//! Stable error codes for configuration diagnostics.

use std::fmt;

use serde::Serialize;

/// Machine-readable category of a configuration problem.
///
/// The serialized names are stable; tooling may match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// `v` is not a supported version.
    UnsupportedVersion,
    /// A numeric setting is out of range.
    InvalidValue,
    /// A required field name is empty.
    MissingField,
    /// Two settings contradict each other.
    InvalidCombo,
    /// No stopword list exists for the requested language.
    UnsupportedLanguage,
    /// A field is not part of the schema.
    UnknownField,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedVersion => "unsupported_version",
            Self::InvalidValue => "invalid_value",
            Self::MissingField => "missing_field",
            Self::InvalidCombo => "invalid_combo",
            Self::UnsupportedLanguage => "unsupported_language",
            Self::UnknownField => "unknown_field",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_as_str() {
        for code in [
            ErrorCode::UnsupportedVersion,
            ErrorCode::InvalidValue,
            ErrorCode::MissingField,
            ErrorCode::InvalidCombo,
            ErrorCode::UnsupportedLanguage,
            ErrorCode::UnknownField,
        ] {
            let json = serde_json::to_value(code).unwrap();
            assert_eq!(json, code.as_str());
        }
    }
}
