//! Submission record types.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A scored submission ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    /// Registration number of the submitting student.
    pub student_id: i64,
    /// Display name resolved through the roster.
    pub student_name: String,
    /// Stored (unique) filename of the uploaded CSV.
    pub filename: String,
    /// "Higher is better" score from the evaluator.
    pub score: f64,
    /// Submission time (UTC).
    pub timestamp: DateTime<Utc>,
}

/// A persisted submission as read back from the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    /// Store-assigned row id.
    pub id: i64,
    pub student_id: i64,
    pub student_name: String,
    pub filename: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}
