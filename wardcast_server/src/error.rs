use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use wardcast_model::ModelError;

/// Request-scoped failure. Every variant renders the same structured
/// envelope with a server-error status; a failure is terminal for its
/// request and touches nothing shared.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid request: {0}")]
    BadRequest(#[from] serde_json::Error),
    #[error("invalid date: {0}")]
    BadDate(#[from] chrono::ParseError),
    #[error(transparent)]
    Model(#[from] ModelError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::error!("request failed: {self}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
