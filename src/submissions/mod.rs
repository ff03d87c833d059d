//! Submission records and the leaderboard store.
//!
//! The gateway is generic over [`SubmissionStore`] so tests can swap the
//! SQLite backend for an in-memory mock.

/// Store errors.
pub mod error;
/// Submission record types.
pub mod model;
/// SQLite-backed store.
pub mod store;


pub use error::SubmissionError;
pub use model::{NewSubmission, Submission};
pub use store::SqliteStore;

/// Persistence seam for scored submissions.
pub trait SubmissionStore {
    /// Persists one scored submission and returns the stored record.
    fn record(&self, submission: NewSubmission) -> Result<Submission, SubmissionError>;

    /// All submissions, ordered best score first (ties: earlier wins).
    fn ranking(&self) -> Result<Vec<Submission>, SubmissionError>;
}
