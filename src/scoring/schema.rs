//! Column-presence validation.

use crate::table::Table;

use super::error::EvalError;

/// Checks that `table` contains every column in `required`, in scan order.
///
/// Pure predicate: no side effects, reports the first missing column only.
/// `table_name` labels the failing table in the error so the student knows
/// whether their file or the instructor's reference is at fault.
pub fn validate_columns(
    table: &Table,
    required: &[&str],
    table_name: &'static str,
) -> Result<(), EvalError> {
    for &column in required {
        if !table.has_column(column) {
            return Err(EvalError::MissingColumn {
                table: table_name,
                column: column.to_string(),
            });
        }
    }
    Ok(())
}
