//! Metric computation over aligned pairs.
//!
//! Both metrics are oriented so that larger means better: weighted F1 is
//! already bounded in `[0, 1]`, and raw MAPE is mapped through `1 / (1 + m)`.

use std::collections::BTreeMap;

use super::error::EvalError;
use super::types::AlignedPair;

#[derive(Debug, Default)]
struct ClassCounts {
    true_positive: usize,
    false_positive: usize,
    false_negative: usize,
    support: usize,
}

/// Weighted F1 score over class labels.
///
/// Per-class F1 values are averaged weighted by each class's support in the
/// reference data, so uneven class frequencies do not let a majority-class
/// guess dominate. Labels canonicalize through [`Value::class_label`]
/// (numeric cells use their display form), which makes the `-1` join
/// sentinel behave as an ordinary, always-wrong class.
///
/// [`Value::class_label`]: crate::table::Value::class_label
pub fn weighted_f1(pairs: &[AlignedPair]) -> f64 {
    let mut counts: BTreeMap<String, ClassCounts> = BTreeMap::new();

    for pair in pairs {
        let truth = pair.truth.class_label();
        let predicted = pair.predicted.class_label();

        if truth == predicted {
            let c = counts.entry(truth).or_default();
            c.true_positive += 1;
            c.support += 1;
        } else {
            counts.entry(predicted).or_default().false_positive += 1;
            let c = counts.entry(truth).or_default();
            c.false_negative += 1;
            c.support += 1;
        }
    }

    let total: usize = counts.values().map(|c| c.support).sum();
    if total == 0 {
        return 0.0;
    }

    counts
        .values()
        .filter(|c| c.support > 0)
        .map(|c| {
            let weight = c.support as f64 / total as f64;
            weight * f1(c)
        })
        .sum()
}

fn f1(c: &ClassCounts) -> f64 {
    let tp = c.true_positive as f64;
    let precision_den = tp + c.false_positive as f64;
    let recall_den = tp + c.false_negative as f64;

    let precision = if precision_den > 0.0 {
        tp / precision_den
    } else {
        0.0
    };
    let recall = if recall_den > 0.0 { tp / recall_den } else { 0.0 };

    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

/// Bounded regression score `1 / (1 + MAPE)`.
///
/// Rows whose true value is exactly zero are excluded before averaging
/// (division-by-zero guard). If no rows remain the metric is degenerate and
/// evaluation fails with [`EvalError::DegenerateMetric`] instead of
/// producing NaN or infinity. Non-numeric values on surviving rows are a
/// [`EvalError::ComputationFailure`].
pub fn bounded_mape(pairs: &[AlignedPair]) -> Result<f64, EvalError> {
    let mut total = 0.0;
    let mut rows = 0usize;

    for pair in pairs {
        let truth = pair.truth.as_f64().ok_or_else(|| EvalError::ComputationFailure {
            reason: format!(
                "non-numeric reference value '{}' for id {}",
                pair.truth, pair.id
            ),
        })?;
        if truth == 0.0 {
            continue;
        }
        let predicted = pair
            .predicted
            .as_f64()
            .ok_or_else(|| EvalError::ComputationFailure {
                reason: format!(
                    "non-numeric prediction '{}' for id {}",
                    pair.predicted, pair.id
                ),
            })?;

        total += ((truth - predicted) / truth).abs();
        rows += 1;
    }

    if rows == 0 {
        return Err(EvalError::DegenerateMetric);
    }

    let mape = total / rows as f64;
    Ok(1.0 / (1.0 + mape))
}
