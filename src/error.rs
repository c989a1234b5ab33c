//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all error conditions and implements Axum's
//! `IntoResponse` to automatically convert errors to appropriate HTTP
//! responses with JSON error bodies.
//!
//! Error mappings:
//! - `Transport` → 502
//! - `RateLimited` → 429
//! - `BadRequest` → 400
//! - `Http`, `Internal` → 500
//!
//! Fetch failures are fail-fast: one bad source aborts the whole aggregate
//! fetch, so the caller never sees a partially merged timeline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Upstream returned status {status} for {source_tag}")]
    Transport { source_tag: String, status: u16 },

    #[error("Rate limited by upstream: {0}")]
    RateLimited(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::Transport { source_tag, status } => (
                StatusCode::BAD_GATEWAY,
                format!("Upstream returned status {} for {}", status, source_tag),
            ),
            AppError::RateLimited(source) => (
                StatusCode::TOO_MANY_REQUESTS,
                format!("Rate limited by upstream: {}", source),
            ),
            AppError::Http(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
