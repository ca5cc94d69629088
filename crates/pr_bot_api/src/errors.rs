//! Error handling and HTTP error conversion
//!
//! Workflow errors are converted to a `500 Internal Server Error` carrying the failing
//! step, its error kind and the GitHub status and body, so callers can tell a stale SHA
//! from a missing base branch without parsing the message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use pr_bot_core::WorkflowError;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Standard error response for all API errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Error details
    pub error: ErrorDetails,
}

/// Error details structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorDetails {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional context (optional, type varies by error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Axum response wrapper for API errors.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The pull request workflow failed at one of its steps.
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_response) = convert_error(&self);

        log_error(&self, status);

        (status, Json(error_response)).into_response()
    }
}

/// Convert an API error to an HTTP status code and error response.
pub fn convert_error(error: &ApiError) -> (StatusCode, ErrorResponse) {
    match error {
        ApiError::Workflow(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            ErrorResponse {
                error: ErrorDetails {
                    code: e.kind().to_string(),
                    message: e.to_string(),
                    details: Some(json!({
                        "step": e.step().as_str(),
                        "githubStatus": e.status(),
                        "githubBody": e.body(),
                    })),
                },
            },
        ),
    }
}

/// Log error with appropriate level based on HTTP status
fn log_error(error: &ApiError, status: StatusCode) {
    if status.is_server_error() {
        tracing::error!("API error: {} - {}", status, error);
    } else {
        tracing::warn!("API error: {} - {}", status, error);
    }
}
