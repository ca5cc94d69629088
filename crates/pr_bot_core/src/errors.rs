//! Error types for the pull request workflow.
//!
//! Each remote step has its own [`StepError`] variant carrying the GitHub error, which in
//! turn holds the HTTP status and raw response body. [`WorkflowError`] is the single
//! top-level error returned by [`crate::PrWorkflow::execute`].

use github_client::Error as GitHubError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors raised while validating domain values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        Self::EmptyField {
            field: field.into(),
        }
    }
}

/// The step of the workflow an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStep {
    EnsureBranch,
    CommitFile,
    OpenPullRequest,
}

impl WorkflowStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkflowStep::EnsureBranch => "ensure_branch",
            WorkflowStep::CommitFile => "commit_file",
            WorkflowStep::OpenPullRequest => "open_pull_request",
        }
    }
}

impl std::fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single remote step.
///
/// None of these are retried.
#[derive(Error, Debug)]
pub enum StepError {
    /// The branch existence check got no response, or failed with a status other than
    /// 404 while strict branch checking is enabled.
    #[error("Failed to look up branch '{branch}': {source}")]
    BranchLookup {
        branch: String,
        #[source]
        source: GitHubError,
    },

    /// The head of the configured base branch could not be read.
    #[error("Failed to get base branch SHA: {source}")]
    BaseBranchLookup {
        base_branch: String,
        #[source]
        source: GitHubError,
    },

    /// The working branch could not be created.
    #[error("Failed to create branch '{branch}': {source}")]
    BranchCreate {
        branch: String,
        #[source]
        source: GitHubError,
    },

    /// The file create/update commit was rejected.
    #[error("Failed to commit file '{path}': {source}")]
    Commit {
        path: String,
        branch: String,
        #[source]
        source: GitHubError,
    },

    /// The pull request could not be opened.
    #[error("Failed to create pull request: {source}")]
    PrCreate {
        head: String,
        base: String,
        #[source]
        source: GitHubError,
    },
}

impl StepError {
    /// Machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            StepError::BranchLookup { .. } => "BranchLookupError",
            StepError::BaseBranchLookup { .. } => "BaseBranchLookupError",
            StepError::BranchCreate { .. } => "BranchCreateError",
            StepError::Commit { .. } => "CommitError",
            StepError::PrCreate { .. } => "PrCreateError",
        }
    }

    pub fn step(&self) -> WorkflowStep {
        match self {
            StepError::BranchLookup { .. }
            | StepError::BaseBranchLookup { .. }
            | StepError::BranchCreate { .. } => WorkflowStep::EnsureBranch,
            StepError::Commit { .. } => WorkflowStep::CommitFile,
            StepError::PrCreate { .. } => WorkflowStep::OpenPullRequest,
        }
    }

    /// The underlying GitHub error.
    pub fn github_error(&self) -> &GitHubError {
        match self {
            StepError::BranchLookup { source, .. }
            | StepError::BaseBranchLookup { source, .. }
            | StepError::BranchCreate { source, .. }
            | StepError::Commit { source, .. }
            | StepError::PrCreate { source, .. } => source,
        }
    }

    /// HTTP status GitHub answered with, if a response was received.
    pub fn status(&self) -> Option<u16> {
        self.github_error().status()
    }

    /// Raw GitHub response body, if a response was received.
    pub fn body(&self) -> Option<&str> {
        self.github_error().body()
    }
}

/// Top-level error of a pull request workflow run.
///
/// Wraps the first failing step. Artifacts created by earlier steps (a branch, a commit)
/// are left in place.
#[derive(Error, Debug)]
#[error("GitHub PR creation failed: {source}")]
pub struct WorkflowError {
    #[from]
    source: StepError,
}

impl WorkflowError {
    pub fn step_error(&self) -> &StepError {
        &self.source
    }

    pub fn kind(&self) -> &'static str {
        self.source.kind()
    }

    pub fn step(&self) -> WorkflowStep {
        self.source.step()
    }

    pub fn status(&self) -> Option<u16> {
        self.source.status()
    }

    pub fn body(&self) -> Option<&str> {
        self.source.body()
    }
}

/// Errors raised when building the repository coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Missing required configuration value '{0}'")]
    MissingValue(&'static str),
}
