//! Uploaded-file storage.
//!
//! Every accepted upload lands on disk under the configured directory with a
//! sanitized, timestamped name, so the original file can be re-examined when
//! a student disputes a score.

pub mod error;


pub use error::StorageError;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

/// Only extension accepted for uploads.
pub const ALLOWED_EXTENSION: &str = "csv";

/// A persisted upload.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFile {
    /// Unique stored filename (`{student_id}_{timestamp}_{sanitized}`).
    pub name: String,
    /// Full path of the stored file.
    pub path: PathBuf,
}

/// Writes uploads under a root directory.
#[derive(Debug, Clone)]
pub struct UploadStore {
    root: PathBuf,
}

impl UploadStore {
    /// Creates a store rooted at `root`. The directory is created lazily on
    /// first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory uploads are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Persists one upload.
    ///
    /// Rejects anything that is not a `.csv` and anything whose name
    /// sanitizes to nothing. The stored name embeds the student id and a
    /// UTC timestamp so repeat submissions never collide.
    pub fn store(
        &self,
        student_id: i64,
        original_name: &str,
        timestamp: DateTime<Utc>,
        contents: &[u8],
    ) -> Result<StoredFile, StorageError> {
        if !has_allowed_extension(original_name) {
            return Err(StorageError::DisallowedExtension {
                filename: original_name.to_string(),
            });
        }

        let sanitized = sanitize_filename(original_name);
        // The extension is the only part guaranteed to survive sanitization;
        // a name must keep something recognizable in front of it.
        let stem = sanitized
            .strip_suffix(ALLOWED_EXTENSION)
            .and_then(|s| s.strip_suffix('.'))
            .unwrap_or(&sanitized);
        if stem.trim_matches(['_', '.']).is_empty() {
            return Err(StorageError::UnusableFilename {
                filename: original_name.to_string(),
            });
        }

        std::fs::create_dir_all(&self.root).map_err(|source| StorageError::Io {
            path: self.root.clone(),
            source,
        })?;

        let name = format!(
            "{student_id}_{}_{sanitized}",
            timestamp.format("%Y%m%d%H%M%S")
        );
        let path = self.root.join(&name);
        std::fs::write(&path, contents).map_err(|source| StorageError::Io {
            path: path.clone(),
            source,
        })?;

        debug!(name = %name, bytes = contents.len(), "Upload stored");
        Ok(StoredFile { name, path })
    }
}

/// Returns `true` if `filename` has the `.csv` extension (case-insensitive).
pub fn has_allowed_extension(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && ext.eq_ignore_ascii_case(ALLOWED_EXTENSION))
}

/// Reduces an arbitrary client-supplied filename to a safe form.
///
/// Keeps ASCII alphanumerics, `.`, `_` and `-`; every other character
/// (separators included, which kills path traversal) becomes `_`, and runs
/// of `_` collapse.
pub fn sanitize_filename(filename: &str) -> String {
    let mut out = String::with_capacity(filename.len());
    let mut last_was_underscore = false;
    for c in filename.chars() {
        let keep = c.is_ascii_alphanumeric() || c == '.' || c == '-';
        if keep {
            out.push(c);
            last_was_underscore = false;
        } else if !last_was_underscore {
            out.push('_');
            last_was_underscore = true;
        }
    }
    out.trim_matches('_').to_string()
}
