use std::path::Path;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rusqlite::Connection;
use tracing::debug;

use super::error::SubmissionError;
use super::model::{NewSubmission, Submission};
use super::SubmissionStore;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS submissions (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id   INTEGER NOT NULL,
    student_name TEXT    NOT NULL,
    filename     TEXT    NOT NULL,
    score        REAL    NOT NULL,
    timestamp    TEXT    NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_submissions_score ON submissions (score DESC);
";

/// SQLite-backed [`SubmissionStore`].
///
/// The connection sits behind a mutex: writes are rare (one per upload) and
/// the leaderboard read is a single indexed scan, so one connection is
/// plenty for a classroom.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl std::fmt::Debug for SqliteStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteStore").finish_non_exhaustive()
    }
}

impl SqliteStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SubmissionError> {
        let conn = Connection::open(path)?;
        Self::with_connection(conn)
    }

    /// In-memory store for tests.
    pub fn open_in_memory() -> Result<Self, SubmissionError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self, SubmissionError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl SubmissionStore for SqliteStore {
    fn record(&self, submission: NewSubmission) -> Result<Submission, SubmissionError> {
        let conn = self.conn.lock();
        conn.execute(
            "INSERT INTO submissions (student_id, student_name, filename, score, timestamp)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![
                submission.student_id,
                submission.student_name,
                submission.filename,
                submission.score,
                submission.timestamp.to_rfc3339(),
            ],
        )?;
        let id = conn.last_insert_rowid();

        debug!(
            id,
            student_id = submission.student_id,
            score = submission.score,
            "Submission recorded"
        );

        Ok(Submission {
            id,
            student_id: submission.student_id,
            student_name: submission.student_name,
            filename: submission.filename,
            score: submission.score,
            timestamp: submission.timestamp,
        })
    }

    fn ranking(&self) -> Result<Vec<Submission>, SubmissionError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT id, student_id, student_name, filename, score, timestamp
             FROM submissions
             ORDER BY score DESC, timestamp ASC",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, f64>(4)?,
                row.get::<_, String>(5)?,
            ))
        })?;

        let mut submissions = Vec::new();
        for row in rows {
            let (id, student_id, student_name, filename, score, raw_timestamp) = row?;
            let timestamp = parse_timestamp(&raw_timestamp)?;
            submissions.push(Submission {
                id,
                student_id,
                student_name,
                filename,
                score,
                timestamp,
            });
        }
        Ok(submissions)
    }
}

fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, SubmissionError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|source| SubmissionError::InvalidTimestamp {
            raw: raw.to_string(),
            source,
        })
}
