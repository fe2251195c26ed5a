use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::store::StoreError;

/// Everything that can go wrong while handling a submission. All variants
/// surface to the caller as the same generic 500; the split exists so a future
/// revision can map them to distinct status codes without touching callers.
#[derive(Debug)]
pub enum AppError {
    Parse(String),
    Validation(String),
    Store(StoreError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Parse(msg) => write!(f, "Parse error: {msg}"),
            AppError::Validation(msg) => write!(f, "Validation error: {msg}"),
            AppError::Store(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("Error: {self}");

        // No detail leaks to the caller. The error path deliberately carries
        // only the allow-origin header, not Access-Control-Allow-Headers.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("Access-Control-Allow-Origin", "*")],
            axum::Json(json!({ "message": "Internal Server Error" })),
        )
            .into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

#[cfg(test)]
mod tests {
    use axum::response::IntoResponse;

    use super::AppError;

    #[test]
    fn every_variant_maps_to_500_with_origin_header_only() {
        for err in [
            AppError::Parse("bad json".to_string()),
            AppError::Validation("missing field".to_string()),
            AppError::Store("connection refused".into()),
        ] {
            let resp = err.into_response();
            assert_eq!(resp.status(), 500);
            assert_eq!(
                resp.headers().get("Access-Control-Allow-Origin").unwrap(),
                "*"
            );
            assert!(resp.headers().get("Access-Control-Allow-Headers").is_none());
        }
    }

    #[test]
    fn display_keeps_the_error_kind() {
        let err = AppError::Validation("missing field: email".to_string());
        assert_eq!(err.to_string(), "Validation error: missing field: email");
    }
}
