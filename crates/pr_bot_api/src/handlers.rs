//! HTTP request handlers
//!
//! Handlers translate HTTP requests to domain operations and domain results to HTTP
//! responses.

use axum::{extract::State, Json};

use crate::{
    errors::ApiError,
    models::{request::CreatePullRequestRequest, response::*},
    translation::{domain_outcome_to_http, http_create_pull_request_to_domain},
    AppState,
};

/// POST /api/pull-request
///
/// Ensures the working branch, commits the file and opens a pull request.
pub async fn create_pull_request(
    State(state): State<AppState>,
    Json(request): Json<CreatePullRequestRequest>,
) -> Result<Json<CreatePullRequestResponse>, ApiError> {
    let request = http_create_pull_request_to_domain(request);

    tracing::info!(
        branch = %request.branch_name,
        path = request.file_path.as_str(),
        "Creating pull request"
    );

    let outcome = state.workflow.execute(&request).await?;

    Ok(Json(domain_outcome_to_http(outcome)))
}

/// GET /api/health
///
/// Returns service health status with version and timestamp.
pub async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: "healthy".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
