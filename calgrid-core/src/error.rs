//! Error types for calgrid.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in calgrid operations.
#[derive(Error, Debug)]
pub enum CalGridError {
    #[error("Event time overlaps with an existing event on {date} ({conflicting_id})")]
    Overlap {
        date: NaiveDate,
        conflicting_id: String,
    },

    #[error("Event not found: {0}")]
    NotFound(String),

    #[error("An event with id '{0}' already exists")]
    DuplicateId(String),

    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid time '{0}'. Expected HH:MM")]
    InvalidTime(String),

    #[error("Invalid date '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Unknown export format '{0}'. Expected json or csv")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CalGridError {
    fn from(err: serde_json::Error) -> Self {
        CalGridError::Serialization(err.to_string())
    }
}

/// Result type alias for calgrid operations.
pub type CalGridResult<T> = Result<T, CalGridError>;
