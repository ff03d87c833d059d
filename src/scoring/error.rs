//! Evaluation error taxonomy.
//!
//! Every condition here is detected inside the evaluator and returned as
//! data. The hosting layer's only job is to show the message to the student
//! and allow resubmission.

use thiserror::Error;

use crate::table::{IdKey, TableError};

/// Errors returned by evaluation and validation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// A required column is absent from the named table.
    #[error("the {table} table is missing required column '{column}'")]
    MissingColumn {
        /// Which table failed the check (`"predictions"` or `"reference"`).
        table: &'static str,
        /// First missing column in scan order.
        column: String,
    },

    /// Candidate id set differs from the reference id set.
    ///
    /// Carries both directions of the difference so a student can see exactly
    /// which rows to add or remove.
    #[error("prediction ids do not match the reference ids.{}", id_mismatch_detail(.missing, .extra))]
    IdentityMismatch {
        /// Reference ids absent from the predictions, sorted.
        missing: Vec<IdKey>,
        /// Prediction ids absent from the reference, sorted.
        extra: Vec<IdKey>,
    },

    /// The aligned result contained zero rows.
    #[error("no matching records between predictions and reference")]
    EmptyAlignment,

    /// Regression where every reference value is exactly zero.
    #[error("cannot compute percentage error: all reference values are zero")]
    DegenerateMetric,

    /// Any other failure during metric computation.
    #[error("score computation failed: {reason}")]
    ComputationFailure { reason: String },

    /// The reference dataset failed to load at construction time.
    #[error("reference data unavailable: {reason}")]
    ReferenceUnavailable { reason: String },

    /// Reference dataset load failure (fail-fast constructor only).
    #[error(transparent)]
    Table(#[from] TableError),
}

fn id_mismatch_detail(missing: &[IdKey], extra: &[IdKey]) -> String {
    let mut detail = String::new();
    if !missing.is_empty() {
        detail.push_str(&format!(" Missing ids: {}.", join_ids(missing)));
    }
    if !extra.is_empty() {
        detail.push_str(&format!(" Extra ids: {}.", join_ids(extra)));
    }
    detail
}

fn join_ids(ids: &[IdKey]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
