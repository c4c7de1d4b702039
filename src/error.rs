//! Error taxonomy for a measurement run
//!
//! Every variant is fatal: the run either produces the full report or
//! aborts. Nothing here is retried.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a measurement run
#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid split: {0}")]
    InvalidSplit(String),

    #[error("{op}({}) failed: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{op}({}) == {actual} (expected {expected})", path.display())]
    Mismatch {
        op: &'static str,
        path: PathBuf,
        expected: String,
        actual: String,
    },
}

impl SplitError {
    /// Wrap an I/O error with the primitive and path that produced it
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SplitError::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Result type for split measurement operations
pub type Result<T> = std::result::Result<T, SplitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mismatch_names_operation_path_and_result() {
        let err = SplitError::Mismatch {
            op: "exists?",
            path: PathBuf::from("/tmp/id_splits/ab/c/3"),
            expected: "true".to_string(),
            actual: "false".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("exists?"));
        assert!(msg.contains("/tmp/id_splits/ab/c/3"));
        assert!(msg.contains("false"));
        assert!(msg.contains("expected true"));
    }

    #[test]
    fn test_io_error_keeps_source() {
        let err = SplitError::io(
            "make",
            "/nope/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("make(/nope/x) failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
