use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::extract::connect_info::MockConnectInfo;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use crate::gateway::{HandlerState, RateLimiter, create_router_with_state};
use crate::roster::Roster;
use crate::scoring::{Evaluator, TaskType};
use crate::storage::UploadStore;
use crate::submissions::{SqliteStore, SubmissionStore};
use crate::table::Table;

const BOUNDARY: &str = "podium-test-boundary";

fn table(csv: &str) -> Table {
    Table::from_csv_reader(csv.as_bytes()).expect("test CSV should parse")
}

fn test_roster() -> Roster {
    Roster::from_table(&table(
        "registration_number,name\n101,Ada Lovelace\n102,Alan Turing\n",
    ))
    .expect("roster should build")
}

fn test_state(
    evaluator: Evaluator,
    task_type: TaskType,
    uploads: &TempDir,
    limiter: RateLimiter,
) -> HandlerState<SqliteStore> {
    HandlerState::new(
        Arc::new(evaluator),
        Arc::new(test_roster()),
        Arc::new(SqliteStore::open_in_memory().expect("in-memory store")),
        UploadStore::new(uploads.path()),
        task_type,
        limiter,
    )
}

fn test_router(state: HandlerState<SqliteStore>) -> Router {
    create_router_with_state(state, 1024 * 1024)
        .layer(MockConnectInfo(SocketAddr::from(([127, 0, 0, 1], 9999))))
}

fn classification_state(uploads: &TempDir) -> HandlerState<SqliteStore> {
    test_state(
        Evaluator::new(table("id,target\n1,cat\n2,dog\n")),
        TaskType::Classification,
        uploads,
        RateLimiter::per_minute(100),
    )
}

fn multipart_request(uri: &str, student_id: &str, filename: &str, contents: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"student_id\"\r\n\r\n\
         {student_id}\r\n\
         --{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {contents}\r\n\
         --{BOUNDARY}--\r\n"
    );

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .expect("request should build")
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body should collect")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body should be JSON")
}

#[tokio::test]
async fn test_healthz() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .oneshot(Request::get("/healthz").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_ready_reports_reference() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ready");
    assert_eq!(json["components"]["reference_rows"], 2);
}

#[tokio::test]
async fn test_ready_degraded_is_503() {
    let uploads = TempDir::new().expect("tempdir");
    let state = test_state(
        Evaluator::degraded("reference file missing"),
        TaskType::Classification,
        &uploads,
        RateLimiter::per_minute(100),
    );
    let app = test_router(state);

    let response = app
        .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert_eq!(json["status"], "degraded");
}

#[tokio::test]
async fn test_submit_happy_path_and_leaderboard() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .clone()
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["student_name"], "Ada Lovelace");
    assert_eq!(json["score"], 1.0);

    let response = app
        .oneshot(Request::get("/leaderboard").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");
    assert_eq!(response.status(), StatusCode::OK);

    let json = response_json(response).await;
    let entries = json["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["rank"], 1);
    assert_eq!(entries[0]["student_id"], 101);
    assert_eq!(entries[0]["score"], 1.0);
}

#[tokio::test]
async fn test_submit_stores_upload_on_disk() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    app.oneshot(multipart_request(
        "/submissions",
        "101",
        "predictions.csv",
        "id,target\n1,cat\n2,dog\n",
    ))
    .await
    .expect("request should succeed");

    let stored: Vec<_> = std::fs::read_dir(uploads.path())
        .expect("upload dir readable")
        .collect();
    assert_eq!(stored.len(), 1);
}

#[tokio::test]
async fn test_submit_unknown_student_forbidden() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .oneshot(multipart_request(
            "/submissions",
            "999",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .expect("error string")
            .contains("not registered")
    );
}

#[tokio::test]
async fn test_submit_missing_file_field() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"student_id\"\r\n\r\n101\r\n\
         --{BOUNDARY}--\r\n"
    );
    let request = Request::builder()
        .method("POST")
        .uri("/submissions")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.expect("request should succeed");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_rejects_non_csv_upload() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.xlsx",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_submit_identity_mismatch_is_unprocessable() {
    let uploads = TempDir::new().expect("tempdir");
    let app = test_router(classification_state(&uploads));

    let response = app
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .expect("error string")
            .contains("Missing ids: 2")
    );
}

#[tokio::test]
async fn test_submit_degraded_reference_is_503() {
    let uploads = TempDir::new().expect("tempdir");
    let state = test_state(
        Evaluator::degraded("reference file missing"),
        TaskType::Classification,
        &uploads,
        RateLimiter::per_minute(100),
    );
    let app = test_router(state);

    let response = app
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .expect("error string")
            .contains("reference data unavailable")
    );
}

#[tokio::test]
async fn test_submit_rate_limited() {
    let uploads = TempDir::new().expect("tempdir");
    let state = test_state(
        Evaluator::new(table("id,target\n1,cat\n2,dog\n")),
        TaskType::Classification,
        &uploads,
        RateLimiter::per_minute(1),
    );
    let app = test_router(state);

    let first = app
        .clone()
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_regression_submission_scores_one() {
    let uploads = TempDir::new().expect("tempdir");
    let state = test_state(
        Evaluator::new(table("id,target\n1,10.0\n2,20.0\n")),
        TaskType::Regression,
        &uploads,
        RateLimiter::per_minute(100),
    );
    let app = test_router(state);

    let response = app
        .oneshot(multipart_request(
            "/submissions",
            "102",
            "predictions.csv",
            "id,target\n1,10.0\n2,20.0\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["score"], 1.0);
    assert_eq!(json["student_name"], "Alan Turing");
}

#[tokio::test]
async fn test_leaderboard_orders_multiple_students() {
    let uploads = TempDir::new().expect("tempdir");
    let state = classification_state(&uploads);
    let store = Arc::clone(&state.store);
    let app = test_router(state);

    // Ada scores 1.0, Alan scores lower.
    app.clone()
        .oneshot(multipart_request(
            "/submissions",
            "101",
            "predictions.csv",
            "id,target\n1,cat\n2,dog\n",
        ))
        .await
        .expect("request should succeed");
    app.clone()
        .oneshot(multipart_request(
            "/submissions",
            "102",
            "predictions.csv",
            "id,target\n1,cat\n2,cat\n",
        ))
        .await
        .expect("request should succeed");

    assert_eq!(store.ranking().expect("ranking").len(), 2);

    let response = app
        .oneshot(Request::get("/leaderboard").body(Body::empty()).unwrap())
        .await
        .expect("request should succeed");
    let json = response_json(response).await;
    let entries = json["entries"].as_array().expect("entries array");

    assert_eq!(entries[0]["student_name"], "Ada Lovelace");
    assert_eq!(entries[1]["student_name"], "Alan Turing");
    assert_eq!(entries[1]["rank"], 2);
}
