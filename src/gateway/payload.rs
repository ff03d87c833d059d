use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::submissions::Submission;

/// Body returned for an accepted, scored submission.
#[derive(Serialize, Debug, Clone)]
pub struct SubmissionAccepted {
    pub student_name: String,
    pub score: f64,
    pub message: String,
}

/// One row of the leaderboard.
#[derive(Serialize, Debug, Clone)]
pub struct LeaderboardEntry {
    pub rank: usize,
    pub student_id: i64,
    pub student_name: String,
    pub score: f64,
    pub timestamp: DateTime<Utc>,
}

impl LeaderboardEntry {
    pub fn from_submission(rank: usize, submission: Submission) -> Self {
        Self {
            rank,
            student_id: submission.student_id,
            student_name: submission.student_name,
            score: submission.score,
            timestamp: submission.timestamp,
        }
    }
}

/// Full leaderboard, best score first.
#[derive(Serialize, Debug, Clone)]
pub struct LeaderboardResponse {
    pub entries: Vec<LeaderboardEntry>,
}
