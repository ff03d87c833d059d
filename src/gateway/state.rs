use std::sync::Arc;

use crate::roster::Roster;
use crate::scoring::{Evaluator, TaskType};
use crate::storage::UploadStore;
use crate::submissions::SubmissionStore;

use super::limit::RateLimiter;

/// Shared state threaded through every handler.
///
/// Generic over the submission store so tests can swap SQLite for an
/// in-memory mock. Everything here is either `Arc`-shared and immutable or
/// internally synchronized, so the state clones per-request for free.
pub struct HandlerState<S: SubmissionStore + Send + Sync + 'static> {
    pub evaluator: Arc<Evaluator>,

    pub roster: Arc<Roster>,

    pub store: Arc<S>,

    pub uploads: UploadStore,

    pub task_type: TaskType,

    pub limiter: RateLimiter,
}

impl<S> Clone for HandlerState<S>
where
    S: SubmissionStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            evaluator: Arc::clone(&self.evaluator),
            roster: Arc::clone(&self.roster),
            store: Arc::clone(&self.store),
            uploads: self.uploads.clone(),
            task_type: self.task_type,
            limiter: self.limiter.clone(),
        }
    }
}

impl<S> HandlerState<S>
where
    S: SubmissionStore + Send + Sync + 'static,
{
    pub fn new(
        evaluator: Arc<Evaluator>,
        roster: Arc<Roster>,
        store: Arc<S>,
        uploads: UploadStore,
        task_type: TaskType,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            evaluator,
            roster,
            store,
            uploads,
            task_type,
            limiter,
        }
    }
}
