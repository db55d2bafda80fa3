use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use tracing::error;

use super::domain::Category;
use super::draft::DraftStore;
use super::scoring::{cqc_questions, ANSA_HELP, ANSA_LABEL, UQC_QUESTIONS};
use super::service::{ReviewService, ReviewServiceError};
use super::session::ReviewAction;
use super::transport::SubmissionTransport;

/// Router builder exposing the review session over HTTP.
pub fn review_router<S, T>(service: Arc<ReviewService<S, T>>) -> Router
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    Router::new()
        .route("/api/v1/review/case", get(case_handler::<S, T>))
        .route("/api/v1/review/rules", get(rules_handler))
        .route("/api/v1/review/session", get(session_handler::<S, T>))
        .route("/api/v1/review/session/actions", post(action_handler::<S, T>))
        .route("/api/v1/review/session/preview", get(preview_handler::<S, T>))
        .route("/api/v1/review/session/submit", post(submit_handler::<S, T>))
        .route("/api/v1/review/session/cancel", post(cancel_handler::<S, T>))
        .with_state(service)
}

pub(crate) async fn case_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    (StatusCode::OK, axum::Json(service.case().clone())).into_response()
}

pub(crate) async fn rules_handler() -> Response {
    let categories: Vec<_> = Category::ordered()
        .into_iter()
        .map(|category| {
            json!({
                "category": category,
                "questions": cqc_questions(category),
            })
        })
        .collect();

    let payload = json!({
        "uqc": {
            "questions": UQC_QUESTIONS,
            "ansa": { "label": ANSA_LABEL, "help": ANSA_HELP },
        },
        "cqc": categories,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

pub(crate) async fn session_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    (StatusCode::OK, axum::Json(service.snapshot())).into_response()
}

pub(crate) async fn action_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
    axum::Json(action): axum::Json<ReviewAction>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    match service.apply(action) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    (StatusCode::OK, axum::Json(service.preview())).into_response()
}

pub(crate) async fn submit_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    // The transport may block on the network.
    match tokio::task::spawn_blocking(move || service.submit()).await {
        Ok(Ok(submitted)) => (StatusCode::OK, axum::Json(submitted)).into_response(),
        Ok(Err(err)) => error_response(err),
        Err(join_error) => {
            error!(error = %join_error, "submission task failed");
            let payload = json!({
                "error": "submission task failed",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn cancel_handler<S, T>(
    State(service): State<Arc<ReviewService<S, T>>>,
) -> Response
where
    S: DraftStore + 'static,
    T: SubmissionTransport + 'static,
{
    match service.cancel() {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ReviewServiceError) -> Response {
    let status = err.status();
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
