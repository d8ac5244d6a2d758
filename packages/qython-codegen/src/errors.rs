//! Error types for qython-codegen
//!
//! Two failure classes exist:
//! - malformed trees (a node whose children violate its kind's shape), which
//!   fail the enclosing function;
//! - parser and configuration failures outside the lowering pass.
//!
//! Unsupported constructs are not errors: they lower to an inline
//! `// Unsupported: <kind>` placeholder.

use thiserror::Error;

use crate::config::ConfigError;

/// Main error type for qython-codegen operations
#[derive(Debug, Error)]
pub enum TranslateError {
    /// A node's children violate the arity/role invariant of its kind
    #[error("Malformed {kind} at {location}: {reason}")]
    MalformedNode {
        kind: String,
        location: String,
        reason: String,
    },

    /// The upstream parser rejected the source
    #[error("Parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl TranslateError {
    /// Create a malformed-shape error
    pub fn malformed(
        kind: impl ToString,
        location: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        TranslateError::MalformedNode {
            kind: kind.to_string(),
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create a parse error (1-based line, 0-based column)
    pub fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        TranslateError::Parse {
            line,
            column,
            message: message.into(),
        }
    }

    /// Whether this error came from a malformed tree
    pub fn is_malformed(&self) -> bool {
        matches!(self, TranslateError::MalformedNode { .. })
    }
}

/// Result type alias for translation operations
pub type Result<T> = std::result::Result<T, TranslateError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_formatting() {
        let err = TranslateError::malformed("CountedRepeat", "f > block[2]", "missing repetition count");
        let msg = err.to_string();
        assert!(msg.contains("CountedRepeat"));
        assert!(msg.contains("f > block[2]"));
        assert!(msg.contains("missing repetition count"));
        assert!(err.is_malformed());
    }

    #[test]
    fn test_parse_formatting() {
        let err = TranslateError::parse(3, 7, "unexpected ERROR node");
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 7: unexpected ERROR node"
        );
        assert!(!err.is_malformed());
    }
}
