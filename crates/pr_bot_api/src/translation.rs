//! Translation between HTTP types and domain types

use pr_bot_core::{FileCommitted, PrOutcome, PrRequest, PrRequestBuilder};

use crate::models::{
    request::CreatePullRequestRequest,
    response::{CreatePullRequestResponse, PULL_REQUEST_CREATED_MESSAGE},
};

#[cfg(test)]
#[path = "translation_tests.rs"]
mod tests;

/// Convert an HTTP request to a domain `PrRequest`.
///
/// Resolves the branch name; no other field is validated.
pub fn http_create_pull_request_to_domain(http_req: CreatePullRequestRequest) -> PrRequest {
    PrRequestBuilder::new(
        http_req.file_path,
        http_req.file_content,
        http_req.commit_message,
        http_req.pr_title,
    )
    .maybe_branch_name(http_req.branch_name)
    .maybe_pr_body(http_req.pr_body)
    .build()
}

/// Convert a workflow outcome to the HTTP response.
pub fn domain_outcome_to_http(outcome: PrOutcome) -> CreatePullRequestResponse {
    let file_committed = match outcome.file_committed {
        FileCommitted::Created => "created",
        FileCommitted::Updated => "updated",
    };

    CreatePullRequestResponse {
        message: PULL_REQUEST_CREATED_MESSAGE.to_string(),
        branch_name: outcome.branch.to_string(),
        pull_request_url: outcome.pull_request_url,
        branch_created: outcome.branch_created,
        file_committed: file_committed.to_string(),
    }
}
