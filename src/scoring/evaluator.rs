use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::table::{IdKey, Table, Value};

use super::error::EvalError;
use super::metrics;
use super::schema::validate_columns;
use super::types::{AlignedPair, TaskType};

/// Identity column shared by reference and candidate tables.
pub const ID_COLUMN: &str = "id";
/// Value column shared by reference and candidate tables.
pub const TARGET_COLUMN: &str = "target";
/// Columns every table entering metric computation must carry.
pub const REQUIRED_COLUMNS: [&str; 2] = [ID_COLUMN, TARGET_COLUMN];

/// Owns the reference dataset and scores candidate predictions against it.
///
/// The reference is loaded once at construction and never mutated; a new
/// dataset requires a new `Evaluator`. Evaluation itself is synchronous and
/// free of interior mutability, so a shared instance can serve concurrent
/// calls without locking.
pub struct Evaluator {
    reference: Result<Table, String>,
}

impl std::fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Evaluator")
            .field("degraded", &self.is_degraded())
            .field("reference_rows", &self.reference_len())
            .finish()
    }
}

impl Evaluator {
    /// Wraps an already-loaded reference table.
    pub fn new(reference: Table) -> Self {
        Self {
            reference: Ok(reference),
        }
    }

    /// Loads the reference dataset, failing fast on any load error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, EvalError> {
        let reference = Table::from_csv_path(path)?;
        Ok(Self::new(reference))
    }

    /// Loads the reference dataset, entering a degraded state on failure.
    ///
    /// A degraded evaluator stays constructible so a missing file cannot take
    /// the hosting process down, but every [`evaluate`](Self::evaluate) call
    /// returns [`EvalError::ReferenceUnavailable`] carrying the load failure,
    /// rather than a misleading "no matches" result.
    pub fn load_or_degraded(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Table::from_csv_path(path) {
            Ok(reference) => {
                info!(
                    path = %path.display(),
                    rows = reference.len(),
                    "Reference dataset loaded"
                );
                Self::new(reference)
            }
            Err(e) => {
                let reason = e.to_string();
                warn!(
                    path = %path.display(),
                    error = %reason,
                    "Reference dataset failed to load; evaluator is degraded"
                );
                Self::degraded(reason)
            }
        }
    }

    /// Constructs a degraded evaluator with the given load-failure reason.
    pub fn degraded(reason: impl Into<String>) -> Self {
        Self {
            reference: Err(reason.into()),
        }
    }

    /// Returns `true` if the reference dataset failed to load.
    pub fn is_degraded(&self) -> bool {
        self.reference.is_err()
    }

    /// Number of reference rows, if the reference loaded.
    pub fn reference_len(&self) -> Option<usize> {
        self.reference.as_ref().ok().map(Table::len)
    }

    /// Scores `predictions` against the reference dataset.
    ///
    /// Pipeline: column checks on both tables, first-occurrence dedup of
    /// candidate ids, exact id-set validation, right-join alignment anchored
    /// on the reference, then the task-appropriate metric. Returns either a
    /// "higher is better" score or the first [`EvalError`] encountered.
    pub fn evaluate(&self, predictions: &Table, task: TaskType) -> Result<f64, EvalError> {
        let reference = self
            .reference
            .as_ref()
            .map_err(|reason| EvalError::ReferenceUnavailable {
                reason: reason.clone(),
            })?;

        validate_columns(predictions, &REQUIRED_COLUMNS, "predictions")?;
        validate_columns(reference, &REQUIRED_COLUMNS, "reference")?;

        // Repeated candidate ids are deliberate leniency: the first row wins
        // and later duplicates are dropped before the identity check.
        let candidates = dedup_by_id(predictions);
        validate_ids(reference, &candidates)?;

        let aligned = align(reference, &candidates);
        if aligned.is_empty() {
            return Err(EvalError::EmptyAlignment);
        }

        let score = match task {
            TaskType::Classification => metrics::weighted_f1(&aligned),
            TaskType::Regression => metrics::bounded_mape(&aligned)?,
        };

        debug!(task = %task, rows = aligned.len(), score, "Evaluation complete");
        Ok(score)
    }
}

/// Extracts `(id, target)` pairs from a candidate table, keeping only the
/// first occurrence of each id.
fn dedup_by_id(predictions: &Table) -> Vec<(IdKey, Value)> {
    // Columns were validated by the caller; a missing index would be a bug.
    let id_col = predictions.column_index(ID_COLUMN);
    let target_col = predictions.column_index(TARGET_COLUMN);
    let (Some(id_col), Some(target_col)) = (id_col, target_col) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(predictions.len());
    for row in predictions.rows() {
        let key = row[id_col].id_key();
        if seen.insert(key.clone()) {
            out.push((key, row[target_col].clone()));
        }
    }
    out
}

/// Requires exact id-set equality between reference and (deduplicated)
/// candidate. On mismatch both difference directions are reported, sorted,
/// so the message is diagnostic rather than a bare boolean.
fn validate_ids(reference: &Table, candidates: &[(IdKey, Value)]) -> Result<(), EvalError> {
    // Caller has already validated the reference columns.
    let Some(id_col) = reference.column_index(ID_COLUMN) else {
        return Err(EvalError::MissingColumn {
            table: "reference",
            column: ID_COLUMN.to_string(),
        });
    };

    let reference_ids: HashSet<IdKey> =
        reference.rows().iter().map(|row| row[id_col].id_key()).collect();
    let candidate_ids: HashSet<IdKey> = candidates.iter().map(|(id, _)| id.clone()).collect();

    if reference_ids == candidate_ids {
        return Ok(());
    }

    let mut missing: Vec<IdKey> = reference_ids.difference(&candidate_ids).cloned().collect();
    let mut extra: Vec<IdKey> = candidate_ids.difference(&reference_ids).cloned().collect();
    missing.sort();
    extra.sort();

    debug!(
        missing = missing.len(),
        extra = extra.len(),
        "Identity set mismatch"
    );

    Err(EvalError::IdentityMismatch { missing, extra })
}

/// Right join of candidate onto reference, anchored on reference order.
///
/// Every reference row yields exactly one pair. The id-set check already
/// guarantees a real candidate value for each id under normal operation; the
/// `-1` fill only covers residual join anomalies such as duplicate reference
/// ids.
fn align(reference: &Table, candidates: &[(IdKey, Value)]) -> Vec<AlignedPair> {
    // Caller has already validated the reference columns.
    let id_col = reference.column_index(ID_COLUMN);
    let target_col = reference.column_index(TARGET_COLUMN);
    let (Some(id_col), Some(target_col)) = (id_col, target_col) else {
        return Vec::new();
    };

    let by_id: HashMap<&IdKey, &Value> =
        candidates.iter().map(|(id, value)| (id, value)).collect();

    reference
        .rows()
        .iter()
        .map(|row| {
            let id = row[id_col].id_key();
            let predicted = by_id
                .get(&id)
                .map(|value| (*value).clone())
                .unwrap_or(Value::Int(-1));
            AlignedPair {
                id,
                truth: row[target_col].clone(),
                predicted,
            }
        })
        .collect()
}
