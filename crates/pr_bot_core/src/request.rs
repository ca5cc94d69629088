//! Pull request creation request types
//!
//! A [`PrRequest`] describes one single-file change to publish as a pull request. The
//! working branch is resolved when the request is built: a caller supplied name is used
//! as-is, otherwise a unique `chatbot-<uuid>` name is generated.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

#[cfg(test)]
#[path = "request_tests.rs"]
mod tests;

/// Prefix of generated branch names.
pub const GENERATED_BRANCH_PREFIX: &str = "chatbot-";

/// Name of the working branch a change is committed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BranchName(String);

impl BranchName {
    /// Create a branch name from caller input, kept exactly as given.
    ///
    /// # Errors
    /// Returns `ValidationError` if the name is empty or only whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();

        if name.trim().is_empty() {
            return Err(ValidationError::empty_field("branch_name"));
        }

        Ok(Self(name))
    }

    /// Generate a fresh branch name that does not collide with concurrent requests.
    pub fn generate() -> Self {
        Self(format!("{}{}", GENERATED_BRANCH_PREFIX, uuid::Uuid::new_v4()))
    }

    /// Use `requested` when it holds a usable name, otherwise generate one.
    pub fn resolve(requested: Option<String>) -> Self {
        requested
            .and_then(|name| Self::new(name).ok())
            .unwrap_or_else(Self::generate)
    }

    /// Returns `true` if the name was produced by [`BranchName::generate`].
    pub fn is_generated(&self) -> bool {
        self.0.starts_with(GENERATED_BRANCH_PREFIX)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A single-file change to publish as a pull request.
///
/// Immutable once built; the branch name is always resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrRequest {
    /// Working branch for the commit and the pull request head
    pub branch_name: BranchName,

    /// Repository-relative path of the file
    pub file_path: String,

    /// Full new content of the file
    pub file_content: String,

    /// Commit message
    pub commit_message: String,

    /// Pull request title
    pub pr_title: String,

    /// Pull request description
    pub pr_body: Option<String>,
}

impl PrRequest {
    /// Pull request description as sent to GitHub; empty when none was given.
    pub fn body_or_default(&self) -> &str {
        self.pr_body.as_deref().unwrap_or_default()
    }
}

/// Builder for [`PrRequest`].
///
/// # Example
///
/// ```
/// use pr_bot_core::PrRequestBuilder;
///
/// let request = PrRequestBuilder::new("a.txt", "hi", "Add greeting", "Greeting")
///     .pr_body("Adds a greeting file")
///     .build();
///
/// assert!(request.branch_name.is_generated());
/// ```
#[derive(Debug, Clone)]
pub struct PrRequestBuilder {
    branch_name: Option<String>,
    file_path: String,
    file_content: String,
    commit_message: String,
    pr_title: String,
    pr_body: Option<String>,
}

impl PrRequestBuilder {
    pub fn new(
        file_path: impl Into<String>,
        file_content: impl Into<String>,
        commit_message: impl Into<String>,
        pr_title: impl Into<String>,
    ) -> Self {
        Self {
            branch_name: None,
            file_path: file_path.into(),
            file_content: file_content.into(),
            commit_message: commit_message.into(),
            pr_title: pr_title.into(),
            pr_body: None,
        }
    }

    /// Use an explicit working branch. Blank names fall back to a generated one.
    pub fn branch_name(mut self, branch_name: impl Into<String>) -> Self {
        self.branch_name = Some(branch_name.into());
        self
    }

    pub fn maybe_branch_name(mut self, branch_name: Option<String>) -> Self {
        self.branch_name = branch_name;
        self
    }

    pub fn pr_body(mut self, body: impl Into<String>) -> Self {
        self.pr_body = Some(body.into());
        self
    }

    pub fn maybe_pr_body(mut self, body: Option<String>) -> Self {
        self.pr_body = body;
        self
    }

    pub fn build(self) -> PrRequest {
        PrRequest {
            branch_name: BranchName::resolve(self.branch_name),
            file_path: self.file_path,
            file_content: self.file_content,
            commit_message: self.commit_message,
            pr_title: self.pr_title,
            pr_body: self.pr_body,
        }
    }
}
