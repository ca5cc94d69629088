//! HTTP request type definitions
//!
//! Request types accept flexible input from HTTP clients and are translated to domain
//! types at the API boundary.

use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// HTTP request to publish a file change as a pull request.
///
/// Only the branch name is defaulted locally. Missing fields are taken as empty strings
/// and left for GitHub to reject.
///
/// # Example
///
/// ```json
/// {
///   "branchName": null,
///   "filePath": "docs/a.txt",
///   "fileContent": "hi",
///   "commitMessage": "Add a.txt",
///   "prTitle": "Add a.txt",
///   "prBody": "Adds a greeting"
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreatePullRequestRequest {
    /// Working branch; generated when absent or blank
    pub branch_name: Option<String>,

    /// Repository-relative path of the file
    pub file_path: String,

    /// Full new content of the file
    pub file_content: String,

    pub commit_message: String,

    pub pr_title: String,

    pub pr_body: Option<String>,
}
