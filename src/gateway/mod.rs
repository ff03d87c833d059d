//! HTTP gateway (Axum) for submissions and the leaderboard.
//!
//! This module is primarily used by the `podium` server binary. It is thin
//! plumbing around the scoring core: every domain decision lives in
//! [`crate::scoring`], [`crate::roster`], [`crate::storage`] and
//! [`crate::submissions`]; handlers only sequence the calls and translate
//! errors to HTTP.

pub mod error;
pub mod handler;
pub mod limit;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{leaderboard_handler, submit_handler};
pub use limit::RateLimiter;
pub use state::HandlerState;

use crate::submissions::SubmissionStore;

/// Builds the application router over the given state.
///
/// `max_upload_bytes` bounds the request body before multipart parsing, so
/// an oversized upload is rejected without buffering it.
pub fn create_router_with_state<S>(state: HandlerState<S>, max_upload_bytes: usize) -> Router
where
    S: SubmissionStore + Send + Sync + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<S>))
        .route("/leaderboard", get(leaderboard_handler::<S>))
        .route("/submissions", post(submit_handler::<S>))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub reference_loaded: bool,
    pub reference_rows: Option<usize>,
    pub roster_students: usize,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn ready_handler<S>(State(state): State<HandlerState<S>>) -> Response
where
    S: SubmissionStore + Send + Sync + 'static,
{
    let degraded = state.evaluator.is_degraded();
    let body = Json(ReadyResponse {
        status: if degraded { "degraded" } else { "ready" },
        components: ComponentStatus {
            reference_loaded: !degraded,
            reference_rows: state.evaluator.reference_len(),
            roster_students: state.roster.len(),
        },
    });

    if degraded {
        (StatusCode::SERVICE_UNAVAILABLE, body).into_response()
    } else {
        (StatusCode::OK, body).into_response()
    }
}
