//! # Reference Errors
//!
//! Failures loading the municipality reference table.

use crate::domain::services::IndexError;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for reference-table operations.
#[derive(Debug, Clone, Error)]
pub enum ReferenceError {
    /// The reference source could not be read.
    #[error("reference source unreadable: {path}: {message}")]
    Io {
        /// Source path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// The reference source is not a list of entries.
    #[error("reference source malformed: {0}")]
    Parse(String),

    /// The entries could not be indexed.
    #[error("reference index error: {0}")]
    Index(#[from] IndexError),

    /// The source returned no entries.
    #[error("reference table is empty")]
    Empty,
}

impl ReferenceError {
    /// Creates an I/O error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }
}

/// Result type for reference operations.
pub type ReferenceResult<T> = Result<T, ReferenceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::DivisionCode;

    #[test]
    fn display() {
        let err = ReferenceError::io("/tmp/divisions.json", "not found");
        assert!(err.to_string().contains("/tmp/divisions.json"));

        let err: ReferenceError = IndexError::DuplicateCode(DivisionCode::new("05001")).into();
        assert!(err.to_string().contains("05001"));
    }
}
