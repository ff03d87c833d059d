use std::net::SocketAddr;

use axum::{
    Json,
    extract::{ConnectInfo, Multipart, State},
};
use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::submissions::{NewSubmission, SubmissionStore};
use crate::table::Table;

use super::error::GatewayError;
use super::payload::{LeaderboardEntry, LeaderboardResponse, SubmissionAccepted};
use super::state::HandlerState;

/// Accepts one multipart submission (`student_id` + `file`), scores it, and
/// persists the result.
///
/// Flow: rate limit → parse fields → roster lookup → store the raw upload →
/// parse → evaluate → record. The raw file is stored before evaluation so a
/// rejected submission can still be inspected afterwards.
#[instrument(skip(state, multipart), fields(student_id = tracing::field::Empty))]
pub async fn submit_handler<S>(
    State(state): State<HandlerState<S>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    multipart: Multipart,
) -> Result<Json<SubmissionAccepted>, GatewayError>
where
    S: SubmissionStore + Send + Sync + 'static,
{
    if !state.limiter.allow(addr.ip()) {
        return Err(GatewayError::RateLimited);
    }

    let form = SubmissionForm::from_multipart(multipart).await?;
    tracing::Span::current().record("student_id", form.student_id);

    let student_name = state.roster.lookup(form.student_id)?.to_string();

    let now = Utc::now();
    let stored = state
        .uploads
        .store(form.student_id, &form.original_name, now, &form.contents)?;

    let predictions = Table::from_csv_reader(form.contents.as_slice())
        .map_err(|e| GatewayError::InvalidRequest(format!("could not parse the upload: {e}")))?;

    let score = state.evaluator.evaluate(&predictions, state.task_type)?;

    state.store.record(NewSubmission {
        student_id: form.student_id,
        student_name: student_name.clone(),
        filename: stored.name,
        score,
        timestamp: now,
    })?;

    info!(
        student_id = form.student_id,
        score,
        task = %state.task_type,
        "Submission scored"
    );

    Ok(Json(SubmissionAccepted {
        student_name,
        score,
        message: format!("Submission accepted. Your score is {score:.4}"),
    }))
}

/// Returns the full ranking, best score first.
#[instrument(skip(state))]
pub async fn leaderboard_handler<S>(
    State(state): State<HandlerState<S>>,
) -> Result<Json<LeaderboardResponse>, GatewayError>
where
    S: SubmissionStore + Send + Sync + 'static,
{
    let entries = state
        .store
        .ranking()?
        .into_iter()
        .enumerate()
        .map(|(i, submission)| LeaderboardEntry::from_submission(i + 1, submission))
        .collect();

    Ok(Json(LeaderboardResponse { entries }))
}

struct SubmissionForm {
    student_id: i64,
    original_name: String,
    contents: Vec<u8>,
}

impl SubmissionForm {
    async fn from_multipart(mut multipart: Multipart) -> Result<Self, GatewayError> {
        let mut student_id = None;
        let mut file = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| GatewayError::InvalidRequest(format!("malformed multipart body: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("student_id") => {
                    let raw = field.text().await.map_err(|e| {
                        GatewayError::InvalidRequest(format!("unreadable student_id field: {e}"))
                    })?;
                    let parsed = raw.trim().parse::<i64>().map_err(|_| {
                        GatewayError::InvalidRequest(format!(
                            "student_id must be a registration number, got '{raw}'"
                        ))
                    })?;
                    student_id = Some(parsed);
                }
                Some("file") => {
                    let original_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await.map_err(|e| {
                        GatewayError::InvalidRequest(format!("unreadable file field: {e}"))
                    })?;
                    file = Some((original_name, bytes.to_vec()));
                }
                other => {
                    debug!(field = ?other, "Ignoring unknown multipart field");
                }
            }
        }

        let student_id = student_id.ok_or_else(|| {
            GatewayError::InvalidRequest("missing 'student_id' field".to_string())
        })?;
        let (original_name, contents) = file
            .ok_or_else(|| GatewayError::InvalidRequest("missing 'file' field".to_string()))?;

        Ok(Self {
            student_id,
            original_name,
            contents,
        })
    }
}
