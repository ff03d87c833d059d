//! Student roster lookup.
//!
//! Maps a registration number to a display name, loaded once from a CSV with
//! columns `registration_number` and `name`.

pub mod error;


pub use error::RosterError;

use std::collections::HashMap;
use std::path::Path;

use tracing::info;

use crate::table::Table;

/// Registration-number column in the roster CSV.
pub const REGISTRATION_COLUMN: &str = "registration_number";
/// Display-name column in the roster CSV.
pub const NAME_COLUMN: &str = "name";

/// Immutable registration-number → display-name mapping.
#[derive(Debug, Clone)]
pub struct Roster {
    students: HashMap<i64, String>,
}

impl Roster {
    /// Loads the roster from a CSV file.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RosterError> {
        let path = path.as_ref();
        let table = Table::from_csv_path(path)?;
        let roster = Self::from_table(&table)?;
        info!(
            path = %path.display(),
            students = roster.len(),
            "Roster loaded"
        );
        Ok(roster)
    }

    /// Builds the roster from an already-loaded table.
    pub fn from_table(table: &Table) -> Result<Self, RosterError> {
        for column in [REGISTRATION_COLUMN, NAME_COLUMN] {
            if !table.has_column(column) {
                return Err(RosterError::MissingColumn {
                    column: column.to_string(),
                });
            }
        }

        let mut students = HashMap::with_capacity(table.len());
        for row in 0..table.len() {
            // Registration numbers are exact integers; a fractional cell is
            // a broken roster, not a student to round to.
            let registration = match table.cell(row, REGISTRATION_COLUMN) {
                Some(crate::table::Value::Int(i)) => *i,
                _ => return Err(RosterError::InvalidRegistrationNumber { row }),
            };
            let name = table
                .cell(row, NAME_COLUMN)
                .map(ToString::to_string)
                .unwrap_or_default();
            students.insert(registration, name);
        }

        Ok(Self { students })
    }

    /// Display name for `registration_number`, or `NotRegistered`.
    pub fn lookup(&self, registration_number: i64) -> Result<&str, RosterError> {
        self.students
            .get(&registration_number)
            .map(String::as_str)
            .ok_or(RosterError::NotRegistered {
                registration_number,
            })
    }

    /// Number of registered students.
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Returns `true` if the roster has no students.
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}
