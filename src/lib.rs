//! Podium library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! The exports are organized by module:
//!
//! ## Core
//! - [`Evaluator`], [`EvalError`], [`TaskType`] - Scoring pipeline
//! - [`Table`], [`Value`], [`IdKey`] - Typed CSV tables
//!
//! ## Collaborators
//! - [`Roster`] - Registration-number → display-name lookup
//! - [`SubmissionStore`], [`SqliteStore`], [`Submission`] - Persistence
//! - [`UploadStore`] - Raw upload retention
//!
//! ## Hosting
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`gateway`] - Axum router, handlers, rate limiting

pub mod config;
pub mod gateway;
pub mod roster;
pub mod scoring;
pub mod storage;
pub mod submissions;
pub mod table;

pub use config::{Config, ConfigError};
pub use roster::{Roster, RosterError};
pub use scoring::{
    AlignedPair, EvalError, Evaluator, ID_COLUMN, REQUIRED_COLUMNS, TARGET_COLUMN, TaskType,
    validate_columns,
};
pub use storage::{StorageError, StoredFile, UploadStore, sanitize_filename};
pub use submissions::{NewSubmission, SqliteStore, Submission, SubmissionError, SubmissionStore};
pub use table::{IdKey, Table, TableError, Value};
