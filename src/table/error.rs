//! Table loading errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a CSV table.
#[derive(Debug, Error)]
pub enum TableError {
    /// The file could not be opened or read.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content was not parseable as CSV.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}
