//! Error types for dxf-semantics

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for semantic extraction
#[derive(Debug, Error)]
pub enum SemanticError {
    /// IO error occurred while reading input or writing output
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Malformed JSON document
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration file could not be parsed
    #[error("Invalid configuration {path:?}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Selection map references a key outside the fixed selection table
    #[error("Unknown selection key: {0:?}")]
    UnknownSelectionKey(String),

    /// Geometry constructed from too few points
    #[error("{shape} requires at least {required} points, got {actual}")]
    InsufficientPoints {
        shape: &'static str,
        required: usize,
        actual: usize,
    },

    /// Input document has the wrong shape
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for semantic extraction
pub type Result<T> = std::result::Result<T, SemanticError>;

impl From<String> for SemanticError {
    fn from(s: String) -> Self {
        SemanticError::InvalidInput(s)
    }
}

impl From<&str> for SemanticError {
    fn from(s: &str) -> Self {
        SemanticError::InvalidInput(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SemanticError::UnknownSelectionKey("struct-beam-layer".to_string());
        assert_eq!(err.to_string(), "Unknown selection key: \"struct-beam-layer\"");
    }

    #[test]
    fn test_insufficient_points_display() {
        let err = SemanticError::InsufficientPoints {
            shape: "POLYGON",
            required: 3,
            actual: 2,
        };
        assert_eq!(err.to_string(), "POLYGON requires at least 3 points, got 2");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: SemanticError = io_err.into();
        assert!(matches!(err, SemanticError::Io(_)));
    }
}
