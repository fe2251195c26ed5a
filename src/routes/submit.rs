use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::error::AppError;
use crate::models::Submission;
use crate::state::SharedState;

/// Accept a contact-form submission: parse the JSON body, require the three
/// string fields, upsert into the store keyed by email.
///
/// The body is taken as raw bytes rather than through the `Json` extractor so
/// that a malformed body surfaces as our own error (HTTP 500 with a generic
/// message) instead of a framework-shaped 400/415 rejection.
pub async fn submit(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Response, AppError> {
    tracing::info!("Received request: {}", String::from_utf8_lossy(&body));

    let data: serde_json::Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Parse(format!("Invalid JSON: {e}")))?;

    let submission = Submission::from_json(&data).map_err(AppError::Validation)?;

    state.store.upsert(&submission).await?;

    Ok((
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Headers", "Content-Type"),
        ],
        Json(json!({ "message": "Form submitted successfully" })),
    )
        .into_response())
}

/// CORS preflight for browser clients posting the form cross-origin.
pub async fn submit_options() -> Response {
    (
        [
            ("Access-Control-Allow-Origin", "*"),
            ("Access-Control-Allow-Methods", "POST, OPTIONS"),
            ("Access-Control-Allow-Headers", "Content-Type"),
            ("Access-Control-Max-Age", "86400"),
        ],
        StatusCode::NO_CONTENT,
    )
        .into_response()
}
