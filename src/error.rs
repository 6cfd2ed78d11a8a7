//! Unified error types for cpp-api-diff.
//!
//! The diff engine itself is a pure function and has no failure modes;
//! everything that can go wrong happens at the boundaries: loading and
//! validating a snapshot, or rendering a report. Malformed input is a hard
//! precondition failure reported before any issue is emitted, never a
//! silently defaulted field.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for cpp-api-diff operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiDiffError {
    /// Errors while loading an API snapshot
    #[error("Failed to load API snapshot: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// Errors during report generation
    #[error("Report generation failed: {context}")]
    Report {
        context: String,
        #[source]
        source: ReportErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors (severity policy construction)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Structural validation errors in a loaded snapshot
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl ApiDiffError {
    /// Wrap an IO error with the path it occurred at.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            path: Some(path.into()),
            source,
        }
    }

    /// Build a load error with context.
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }
}

/// Specific snapshot-loading error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Missing required field: {field} at {location}")]
    MissingField { field: String, location: String },

    #[error("Invalid field value: {message}")]
    InvalidValue { message: String },

    #[error("Snapshot exceeds size limit: {size_mb} MB (limit {limit_mb} MB)")]
    TooLarge { size_mb: u64, limit_mb: u64 },
}

/// Specific report error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ReportErrorKind {
    #[error("JSON serialization failed: {0}")]
    JsonSerializationError(String),
}

/// Convenient Result type for cpp-api-diff operations
pub type Result<T> = std::result::Result<T, ApiDiffError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_carries_path() {
        let err = ApiDiffError::io(
            "/tmp/missing.json",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        let message = err.to_string();
        assert!(message.contains("missing.json"), "got: {message}");
    }

    #[test]
    fn test_load_error_display() {
        let err = ApiDiffError::load(
            "old snapshot",
            LoadErrorKind::MissingField {
                field: "access_level".to_string(),
                location: "line 4, column 12".to_string(),
            },
        );
        assert!(err.to_string().contains("old snapshot"));
    }
}
