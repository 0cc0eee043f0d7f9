//! Error types for dobrika-server

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type alias for dobrika-server operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can stop the server from starting or running
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from the search layer
    #[error("Core error: {0}")]
    Core(#[from] dobrika_core::Error),

    /// Invalid settings or unreadable configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Listener bind or accept failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking startup worker panicked or was cancelled
    #[error("Startup error: {0}")]
    Startup(String),
}

/// Failure of one HTTP request, rendered as a JSON body.
#[derive(Debug)]
pub enum ApiError {
    /// Body was not valid JSON for the endpoint.
    InvalidJson,
    /// The task was rejected before reaching the index.
    InvalidTask(String),
    /// The index write failed.
    IndexFailed,
    /// A blocking worker panicked or was cancelled.
    Internal,
}

impl ApiError {
    /// Classify a failed index write.
    pub fn from_index_error(err: &dobrika_core::Error) -> Self {
        if err.is_client_error() {
            ApiError::InvalidTask(describe(err))
        } else {
            ApiError::IndexFailed
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        log::debug!("Rejected request body: {rejection}");
        ApiError::InvalidJson
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidJson => (StatusCode::BAD_REQUEST, json!({ "error": "invalid json" })),
            ApiError::InvalidTask(message) => (
                StatusCode::BAD_REQUEST,
                json!({ "ok": false, "error": message }),
            ),
            ApiError::IndexFailed => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "ok": false, "error": "index failed" }),
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "internal error" }),
            ),
        };
        (status, Json(body)).into_response()
    }
}

fn describe(err: &dobrika_core::Error) -> String {
    match err {
        dobrika_core::Error::Validation {
            field: Some(field),
            message,
        } => format!("{field} {message}"),
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
