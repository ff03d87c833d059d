//! Roster errors.

use thiserror::Error;

use crate::table::TableError;

/// Errors from roster loading and lookup.
#[derive(Debug, Error)]
pub enum RosterError {
    /// The roster CSV could not be loaded.
    #[error(transparent)]
    Table(#[from] TableError),

    /// The roster CSV lacks a required column.
    #[error("the roster is missing required column '{column}'")]
    MissingColumn { column: String },

    /// A registration-number cell was not numeric.
    #[error("row {row} of the roster has a non-numeric registration number")]
    InvalidRegistrationNumber { row: usize },

    /// Lookup of an unknown registration number.
    #[error("registration number {registration_number} is not registered")]
    NotRegistered { registration_number: i64 },
}
