use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::roster::RosterError;
use crate::scoring::EvalError;
use crate::storage::StorageError;
use crate::submissions::SubmissionError;

/// Errors surfaced by the HTTP layer.
///
/// Evaluation and upload failures are the student's to fix, so they map to
/// 4xx with the core's own message as the body; only store failures and a
/// missing reference dataset are server-side conditions.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Upload(#[from] StorageError),

    #[error(transparent)]
    Evaluation(#[from] EvalError),

    #[error(transparent)]
    Persistence(#[from] SubmissionError),

    #[error("too many submissions, slow down and try again in a minute")]
    RateLimited,
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            GatewayError::Roster(RosterError::NotRegistered { .. }) => StatusCode::FORBIDDEN,
            GatewayError::Roster(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upload(StorageError::Io { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::Upload(_) => StatusCode::BAD_REQUEST,
            GatewayError::Evaluation(EvalError::ReferenceUnavailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            GatewayError::Evaluation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            GatewayError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            GatewayError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}
