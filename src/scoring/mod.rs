//! Prediction evaluation and validation pipeline.
//!
//! Given a candidate predictions [`Table`](crate::table::Table) and a task
//! type, the [`Evaluator`] checks schema and identity against its reference
//! dataset, aligns rows by id, and computes a single "higher is better"
//! score. Every rejection comes back as a structured [`EvalError`], never a
//! panic across the module boundary.

/// Evaluation/validation errors.
pub mod error;
/// The evaluator itself.
pub mod evaluator;
/// Metric computation (weighted F1, bounded MAPE).
pub mod metrics;
/// Column-presence validation.
pub mod schema;
/// Task and alignment types.
pub mod types;


pub use error::EvalError;
pub use evaluator::{Evaluator, ID_COLUMN, REQUIRED_COLUMNS, TARGET_COLUMN};
pub use schema::validate_columns;
pub use types::{AlignedPair, TaskType};
