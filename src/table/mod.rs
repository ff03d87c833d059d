//! Typed in-memory tables loaded from CSV.
//!
//! A [`Table`] keeps the full header row plus every parsed cell, so schema
//! checks downstream operate on what the file actually contained rather than
//! on whatever survived parsing.

pub mod error;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::TableError;
pub use types::{IdKey, Value};

use std::io::Read;
use std::path::Path;

use tracing::debug;

/// An ordered, column-named table of parsed CSV cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    /// Builds a table from in-memory parts. Rows shorter than the header are
    /// padded with empty text cells; longer rows are truncated.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Value>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, Value::Text(String::new()));
                row
            })
            .collect();
        Self { headers, rows }
    }

    /// Loads a table from a CSV file on disk.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_csv_reader(file)?;
        debug!(path = %path.display(), rows = table.len(), "Loaded CSV table");
        Ok(table)
    }

    /// Loads a table from any CSV byte stream.
    pub fn from_csv_reader(reader: impl Read) -> Result<Self, TableError> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr
            .headers()
            .map_err(TableError::Csv)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record.map_err(TableError::Csv)?;
            let row: Vec<Value> = record.iter().map(Value::parse).collect();
            rows.push(row);
        }

        Ok(Self::new(headers, rows))
    }

    /// Column names in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Index of `name` in the header row, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Returns `true` if the table has a column named `name`.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Data rows in file order.
    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// Cell at (`row`, column `name`), if both exist.
    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }
}
