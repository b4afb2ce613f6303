//! API error responses
//!
//! Every handler failure collapses to a JSON `{"error": ...}` body with a
//! non-2xx status; details stay in the server log.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Errors surfaced to API clients
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or invalid request input
    BadRequest(String),
    /// Store or other internal failure
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        ApiError::Internal(format!("Database error: {}", e))
    }
}

impl From<tunegen_common::Error> for ApiError {
    fn from(e: tunegen_common::Error) -> Self {
        match e {
            tunegen_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}
