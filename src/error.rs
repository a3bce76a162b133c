//! Application error taxonomy and its HTTP mapping.
//!
//! Handlers return `Result<T, AppError>`; axum converts the `Err` branch
//! into a `{ "error": { "code", "message" } }` JSON body via `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Resource absent, or present but not owned by the caller. Ownership
    /// failures deliberately look identical to absence.
    #[error("Resource not found")]
    NotFound,

    /// Malformed input: bad series data, out-of-range day-of-week,
    /// level/intensity outside 1..=5.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Lifecycle violation, e.g. recording an exercise on a completed
    /// session. The tolerated duplicate start/complete paths never raise
    /// this; they report success with `is_new`/`is_duplicate` flags.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::Validation(ref msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            AppError::InvalidState(ref msg) => {
                (StatusCode::CONFLICT, "invalid_state", msg.clone())
            }
            AppError::Unauthorized(ref msg) => {
                (StatusCode::UNAUTHORIZED, "unauthorized", msg.clone())
            }
            AppError::Database(ref e) => {
                // Log the real error, return a generic body.
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
