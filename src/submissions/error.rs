//! Submission store errors.

use thiserror::Error;

/// Errors from the submissions store.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Underlying SQLite failure.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored timestamp could not be parsed back.
    #[error("invalid stored timestamp '{raw}': {source}")]
    InvalidTimestamp {
        raw: String,
        #[source]
        source: chrono::ParseError,
    },
}
