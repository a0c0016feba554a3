//! Error types for descent_io crate.

use descent_core::DescentError;
use thiserror::Error;

/// Main error type for descent_io operations.
#[derive(Error, Debug)]
pub enum IoError {
    /// Malformed, truncated or otherwise unreadable persisted data
    #[error("Format error: {0}")]
    Format(String),

    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors raised by the engine while capturing a lineage
    #[error("Engine error: {0}")]
    Engine(#[from] DescentError),

    /// Generic error with context
    #[error("{context}: {source}")]
    Context {
        context: String,
        source: Box<IoError>,
    },
}

/// Result type alias for descent_io operations.
pub type Result<T> = std::result::Result<T, IoError>;

impl IoError {
    /// Creates a new format error.
    #[must_use]
    pub fn format<S: Into<String>>(msg: S) -> Self {
        Self::Format(msg.into())
    }

    /// Wraps an error with additional context.
    #[must_use]
    pub fn with_context<S: Into<String>>(self, context: S) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True for format errors, including ones wrapped in context.
    pub fn is_format(&self) -> bool {
        match self {
            Self::Format(_) => true,
            Self::Context { source, .. } => source.is_format(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IoError::format("missing header");
        assert_eq!(err.to_string(), "Format error: missing header");
    }

    #[test]
    fn test_error_context() {
        let err = IoError::format("truncated").with_context("loading lod-10.jsonl");
        assert!(err.to_string().contains("loading lod-10.jsonl"));
        assert!(err.is_format());
    }

    #[test]
    fn test_from_engine_error() {
        let err: IoError = DescentError::invalid_state("empty").into();
        assert!(matches!(err, IoError::Engine(_)));
        assert!(!err.is_format());
    }
}
