//! Upload storage errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from persisting uploads.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Upload is not a `.csv` file.
    #[error("file '{filename}' is not allowed: only .csv uploads are accepted")]
    DisallowedExtension { filename: String },

    /// The filename sanitized down to nothing usable.
    #[error("file '{filename}' has no usable name after sanitization")]
    UnusableFilename { filename: String },

    /// Filesystem failure while writing the upload.
    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
