//! Custom error types for receipt-splitter
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for receipt-splitter operations
#[derive(Error, Debug)]
pub enum SplitterError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for settings and operator input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Checkpoint store errors (anything but "not found")
    #[error("Checkpoint error: {0}")]
    Checkpoint(String),

    /// Ledger client errors
    #[error("Ledger error: {0}")]
    Ledger(String),

    /// Vision bridge errors
    #[error("Vision error: {0}")]
    Vision(String),

    /// Messenger transport errors
    #[error("Messenger error: {0}")]
    Messenger(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl SplitterError {
    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for SplitterError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SplitterError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<reqwest::Error> for SplitterError {
    fn from(err: reqwest::Error) -> Self {
        Self::Io(format!("HTTP request failed: {}", err))
    }
}

/// Result type alias for receipt-splitter operations
pub type SplitterResult<T> = Result<T, SplitterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SplitterError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_validation_check() {
        assert!(SplitterError::Validation("bad".into()).is_validation());
        assert!(!SplitterError::Ledger("down".into()).is_validation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SplitterError = io_err.into();
        assert!(matches!(err, SplitterError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SplitterError = json_err.into();
        assert!(matches!(err, SplitterError::Json(_)));
    }
}
