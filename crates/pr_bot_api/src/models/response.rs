//! HTTP response type definitions
//!
//! Response types are created from domain results and use camelCase for JSON.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;

/// Message returned when a pull request was opened.
pub const PULL_REQUEST_CREATED_MESSAGE: &str = "Pull Request created successfully";

/// HTTP response for a successfully opened pull request.
///
/// # Example
///
/// ```json
/// {
///   "message": "Pull Request created successfully",
///   "branchName": "chatbot-0f8e4c1a-3b8e-4c55-9c55-7d6f2b2c9a10",
///   "pullRequestUrl": "https://github.com/my-org/my-repo/pull/42",
///   "branchCreated": true,
///   "fileCommitted": "created"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePullRequestResponse {
    pub message: String,

    /// Working branch the change was committed to
    pub branch_name: String,

    /// Browser URL of the pull request
    pub pull_request_url: String,

    /// Whether the branch was created by this request
    pub branch_created: bool,

    /// `created` or `updated`
    pub file_committed: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthCheckResponse {
    /// Service status: "healthy" or "unhealthy"
    pub status: String,

    /// Service version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Current timestamp (ISO 8601)
    pub timestamp: String,
}
