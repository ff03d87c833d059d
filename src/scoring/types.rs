//! Task and alignment types.

use std::fmt;

use crate::table::{IdKey, Value};

/// Which metric to compute for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskType {
    /// Weighted F1 over class labels.
    Classification,
    /// Bounded MAPE (`1 / (1 + MAPE)`).
    Regression,
}

impl TaskType {
    /// Maps a selector string to a task type.
    ///
    /// Only the exact string `"classification"` selects classification;
    /// every other value means regression. Infallible by contract.
    pub fn parse(raw: &str) -> Self {
        if raw == "classification" {
            TaskType::Classification
        } else {
            TaskType::Regression
        }
    }

    /// The canonical selector string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Classification => "classification",
            TaskType::Regression => "regression",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One reference row paired with the candidate value for the same id.
///
/// Produced by the right join: every reference row yields exactly one pair;
/// `predicted` holds the fill sentinel when the join found no candidate cell.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    /// Identity key shared by both rows.
    pub id: IdKey,
    /// Ground-truth value from the reference dataset.
    pub truth: Value,
    /// Candidate value (or the `-1` sentinel).
    pub predicted: Value,
}
