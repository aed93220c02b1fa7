//! Error types for recce operations.
//!
//! This module defines [`RecceError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `RecceError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via [`RecceError::Other`]) for unexpected errors
//! - Check execution never surfaces errors: driver and filesystem failures
//!   are normalized into report entries by the suite

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for recce operations.
#[derive(Debug, Error)]
pub enum RecceError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration structure or values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// The database driver reported a failure.
    #[error("Database error: {message}")]
    Database { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RecceError {
    /// The raw driver message for [`RecceError::Database`], or the full
    /// rendered message for any other variant.
    ///
    /// Check details embed driver errors verbatim; the "Database error:"
    /// prefix is for CLI-level reporting only.
    pub fn driver_message(&self) -> String {
        match self {
            RecceError::Database { message } => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for recce operations.
pub type Result<T> = std::result::Result<T, RecceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_not_found_displays_path() {
        let err = RecceError::ConfigNotFound {
            path: PathBuf::from("/foo/recce.yml"),
        };
        assert!(err.to_string().contains("/foo/recce.yml"));
    }

    #[test]
    fn config_parse_error_displays_path_and_message() {
        let err = RecceError::ConfigParseError {
            path: PathBuf::from("/recce.yml"),
            message: "invalid syntax".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("/recce.yml"));
        assert!(msg.contains("invalid syntax"));
    }

    #[test]
    fn config_validation_error_displays_message() {
        let err = RecceError::ConfigValidationError {
            message: "missing database section".into(),
        };
        assert!(err.to_string().contains("missing database section"));
    }

    #[test]
    fn database_error_displays_prefixed_message() {
        let err = RecceError::Database {
            message: "Access denied for user 'app'".into(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Database error:"));
        assert!(msg.contains("Access denied for user 'app'"));
    }

    #[test]
    fn driver_message_strips_prefix_for_database_errors() {
        let err = RecceError::Database {
            message: "Connection refused".into(),
        };
        assert_eq!(err.driver_message(), "Connection refused");
    }

    #[test]
    fn driver_message_keeps_full_text_for_other_variants() {
        let err = RecceError::ConfigValidationError {
            message: "bad value".into(),
        };
        assert!(err.driver_message().contains("Invalid configuration"));
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: RecceError = io_err.into();
        assert!(matches!(err, RecceError::Io(_)));
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(RecceError::ConfigValidationError {
                message: "test".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
