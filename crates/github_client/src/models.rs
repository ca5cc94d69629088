//! # Models
//!
//! Request payloads and response shapes for the Git references, repository contents
//! and pull request endpoints of the GitHub REST API.
//!
//! Only the fields this crate needs are modelled. Everything else GitHub returns is
//! ignored during deserialization.

use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "models_tests.rs"]
mod tests;

/// A Git reference, e.g. `refs/heads/main`.
///
/// Returned by `GET /repos/{owner}/{repo}/git/ref/heads/{branch}` and
/// `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitRef {
    /// Fully qualified reference name (`refs/heads/...`)
    #[serde(rename = "ref")]
    pub reference: String,

    /// The object the reference points to
    pub object: GitObject,
}

impl GitRef {
    /// Returns the SHA of the commit the reference points to.
    pub fn sha(&self) -> &str {
        &self.object.sha
    }
}

/// The Git object a reference points to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GitObject {
    /// SHA of the object
    pub sha: String,

    /// Object type, normally `commit`
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

/// Metadata of a single file returned by the contents API.
///
/// The blob SHA doubles as the optimistic-concurrency token that GitHub requires
/// when an existing file is updated.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FileMetadata {
    /// Blob SHA of the current file content
    pub sha: String,

    /// Repository-relative path of the file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A pull request as returned after creation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreatedPullRequest {
    /// Pull request number within the repository
    pub number: u64,

    /// Canonical browser URL of the pull request
    pub html_url: String,
}

/// Body of `POST /repos/{owner}/{repo}/git/refs`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateRefPayload {
    /// Fully qualified name of the new reference
    #[serde(rename = "ref")]
    pub reference: String,

    /// Commit SHA the new reference points to
    pub sha: String,
}

impl CreateRefPayload {
    /// Creates the payload for a new branch `refs/heads/{branch}` at `sha`.
    pub fn for_branch(branch: &str, sha: impl Into<String>) -> Self {
        Self {
            reference: format!("refs/heads/{branch}"),
            sha: sha.into(),
        }
    }
}

/// Body of `PUT /repos/{owner}/{repo}/contents/{path}`.
///
/// The same request creates a file or updates it. GitHub tells the two apart by the
/// presence of `sha`: it must be sent for an existing file and must be absent for a
/// new one. An absent SHA is left out of the JSON entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileUpsertPayload {
    /// Commit message
    pub message: String,

    /// Base64 encoded file content
    pub content: String,

    /// Branch to commit to
    pub branch: String,

    /// Blob SHA of the file being replaced
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
}

impl FileUpsertPayload {
    /// Builds an upsert payload, base64 encoding `content`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use github_client::models::FileUpsertPayload;
    ///
    /// let payload = FileUpsertPayload::new("Add greeting", "hi", "chatbot-1", None);
    /// assert_eq!(payload.content, "aGk=");
    /// assert!(payload.sha.is_none());
    /// ```
    pub fn new(
        message: impl Into<String>,
        content: &str,
        branch: impl Into<String>,
        sha: Option<String>,
    ) -> Self {
        Self {
            message: message.into(),
            content: encode_content(content),
            branch: branch.into(),
            sha,
        }
    }

    /// Returns `true` if this payload updates an existing file.
    pub fn is_update(&self) -> bool {
        self.sha.is_some()
    }
}

/// Body of `POST /repos/{owner}/{repo}/pulls`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestPayload {
    /// Pull request title
    pub title: String,

    /// Pull request description
    pub body: String,

    /// Head reference in `owner:branch` form
    pub head: String,

    /// Branch the changes should be merged into
    pub base: String,
}

impl PullRequestPayload {
    /// Builds a payload whose head is `{owner}:{branch}`.
    pub fn new(
        title: impl Into<String>,
        body: impl Into<String>,
        owner: &str,
        branch: &str,
        base: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            head: format!("{owner}:{branch}"),
            base: base.into(),
        }
    }
}

/// Base64 encodes file content with the standard, padded alphabet the contents API expects.
pub fn encode_content(content: &str) -> String {
    STANDARD.encode(content.as_bytes())
}
