//! Error types for presence analyzer operations

use std::path::PathBuf;
use thiserror::Error;

/// The attendance file or user directory could not be opened or read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Data source {path} unavailable: {reason}")]
pub struct DataSourceError {
    pub path: PathBuf,
    pub reason: String,
}

impl DataSourceError {
    pub fn new(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// A single attendance row that could not be turned into a record.
///
/// Row errors never escape the loader: they are logged and the row is skipped.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("Expected 4 fields, found {found}")]
    FieldCount { found: usize },

    #[error("Invalid user id {value:?}")]
    UserId { value: String },

    #[error("Invalid date {value:?}, expected YYYY-MM-DD")]
    Date { value: String },

    #[error("Invalid {field} time {value:?}, expected HH:MM:SS")]
    Time { field: &'static str, value: String },

    #[error("Unreadable record: {reason}")]
    Unreadable { reason: String },
}

/// The user directory document is structurally invalid.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDirectoryError {
    #[error("Malformed user directory: {reason}")]
    Malformed { reason: String },

    #[error("Missing element <{element}>")]
    MissingElement { element: &'static str },

    #[error("Invalid user id attribute {value:?}")]
    InvalidUserId { value: String },
}

/// Master error type for all presence analyzer errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PresenceError {
    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),

    #[error("User directory error: {0}")]
    UserDirectory(#[from] UserDirectoryError),
}

/// Result type alias for presence analyzer operations.
pub type PresenceResult<T> = Result<T, PresenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_source_error_display() {
        let err = DataSourceError::new("/missing/data.csv", "No such file or directory");
        let msg = err.to_string();
        assert!(msg.contains("/missing/data.csv"));
        assert!(msg.contains("No such file"));
    }

    #[test]
    fn test_row_error_display() {
        let err = RowError::Time {
            field: "start",
            value: "25:00".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid start time \"25:00\", expected HH:MM:SS"
        );
        assert_eq!(
            RowError::FieldCount { found: 3 }.to_string(),
            "Expected 4 fields, found 3"
        );
    }

    #[test]
    fn test_presence_error_from_conversions() {
        let err: PresenceError = DataSourceError::new("data.csv", "denied").into();
        assert!(matches!(err, PresenceError::DataSource(_)));

        let err: PresenceError = UserDirectoryError::MissingElement { element: "users" }.into();
        assert!(err.to_string().contains("<users>"));
    }
}
