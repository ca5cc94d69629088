//! Repository state observed during a workflow run
//!
//! These values are fetched per request and never cached, so a run always acts on the
//! current state of the branch and the file.

use github_client::GitRef;

use crate::request::BranchName;

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;

/// A branch and the SHA of the commit it points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchRef {
    pub name: String,
    pub sha: String,
}

impl BranchRef {
    pub fn from_git_ref(name: impl Into<String>, git_ref: &GitRef) -> Self {
        Self {
            name: name.into(),
            sha: git_ref.sha().to_string(),
        }
    }
}

/// Whether a file exists on the working branch.
///
/// The blob SHA of an existing file is required to update it and must not be sent when
/// creating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBlobState {
    Absent,
    Present { sha: String },
}

impl FileBlobState {
    pub fn exists(&self) -> bool {
        matches!(self, FileBlobState::Present { .. })
    }

    /// The SHA to send with the upsert, if any.
    pub fn sha(&self) -> Option<&str> {
        match self {
            FileBlobState::Absent => None,
            FileBlobState::Present { sha } => Some(sha),
        }
    }
}

/// Result of ensuring the working branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchEnsured {
    /// The branch was already there; nothing was changed.
    AlreadyExisted(BranchName),
    /// The branch was created from the head of the base branch.
    Created(BranchRef),
}

impl BranchEnsured {
    pub fn was_created(&self) -> bool {
        matches!(self, BranchEnsured::Created(_))
    }

    pub fn name(&self) -> &str {
        match self {
            BranchEnsured::AlreadyExisted(name) => name.as_str(),
            BranchEnsured::Created(r) => &r.name,
        }
    }
}

/// How the file change was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCommitted {
    Created,
    Updated,
}

/// Outcome of a successful workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrOutcome {
    /// Working branch the change was committed to
    pub branch: BranchName,

    /// Whether the working branch was created by this run
    pub branch_created: bool,

    pub file_committed: FileCommitted,

    /// Browser URL of the new pull request
    pub pull_request_url: String,
}
