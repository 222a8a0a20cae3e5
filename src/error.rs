//! Error types for vchk

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vchk operations
pub type Result<T> = std::result::Result<T, VchkError>;

/// Error types that can occur in vchk
#[derive(Debug, Error)]
pub enum VchkError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input report does not exist
    #[error("No such file: {}", path.display())]
    FileNotFound {
        /// Path that could not be opened
        path: PathBuf,
    },

    /// A section header declares a column without the `[N]name` form.
    ///
    /// Fatal for the whole file.
    #[error("File not in correct format: malformed column '{field}' in header at line {line}")]
    MalformedHeader {
        /// Line number of the header
        line: usize,
        /// Offending column field (trimmed)
        field: String,
    },

    /// A body row disagrees with its section's declared column count.
    ///
    /// Local to one section; the parser drops the section and carries on.
    #[error("Section '{section}' expected {expected} values, got {actual} at line {line}")]
    FieldCount {
        /// Section code
        section: String,
        /// Number of declared columns
        expected: usize,
        /// Number of values found on the row
        actual: usize,
        /// Line number where error occurred
        line: usize,
    },

    /// Lookup of a section that was never registered
    #[error("Section '{0}' is not available")]
    SectionUnavailable(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VchkError {
    /// Whether the error only invalidates one section rather than the file.
    pub fn is_section_local(&self) -> bool {
        matches!(self, VchkError::FieldCount { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_count_is_section_local() {
        let err = VchkError::FieldCount {
            section: "dp".to_string(),
            expected: 3,
            actual: 2,
            line: 12,
        };
        assert!(err.is_section_local());
        assert_eq!(
            err.to_string(),
            "Section 'dp' expected 3 values, got 2 at line 12"
        );
    }

    #[test]
    fn test_structural_errors_are_not_local() {
        let err = VchkError::MalformedHeader {
            line: 1,
            field: "Quality".to_string(),
        };
        assert!(!err.is_section_local());

        let err = VchkError::FileNotFound {
            path: PathBuf::from("missing.vchk"),
        };
        assert!(!err.is_section_local());
        assert_eq!(err.to_string(), "No such file: missing.vchk");
    }
}
