//! The pull request workflow.
//!
//! [`PrWorkflow`] runs three remote steps strictly in sequence: ensure the working branch,
//! commit the file change to it, and open a pull request from it. The first failure stops
//! the run. Nothing created by earlier steps is rolled back.

use std::sync::Arc;

use github_client::{
    Error as GitHubError, FileUpsertPayload, PullRequestClient, PullRequestPayload,
};
use tracing::{debug, error, info, instrument, warn};

use crate::{
    configuration::RepoCoordinates,
    errors::{StepError, WorkflowError},
    repository::{BranchEnsured, BranchRef, FileBlobState, FileCommitted, PrOutcome},
    request::{BranchName, PrRequest},
};

#[cfg(test)]
#[path = "workflow_tests.rs"]
mod tests;

/// Orchestrates branch creation, file commit and pull request creation against one
/// repository.
///
/// Built once per process and shared across requests. It holds no per-request state, so
/// concurrent runs are independent of each other.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use github_client::{create_token_client, ClientSettings, GitHubClient};
/// use pr_bot_core::{PrRequestBuilder, PrWorkflow, RepoCoordinates};
/// use secrecy::SecretString;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let token = SecretString::from("ghp_example".to_string());
/// let octocrab = create_token_client(&token, &ClientSettings::default())?;
/// let coordinates = RepoCoordinates::new("my-org", "my-repo", "main", token)?;
/// let workflow = PrWorkflow::new(Arc::new(GitHubClient::new(octocrab)), coordinates);
///
/// let request = PrRequestBuilder::new("a.txt", "hi", "Add a.txt", "Add a.txt").build();
/// let outcome = workflow.execute(&request).await?;
/// println!("{}", outcome.pull_request_url);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PrWorkflow {
    client: Arc<dyn PullRequestClient>,
    coordinates: RepoCoordinates,
    strict_branch_check: bool,
}

impl std::fmt::Debug for PrWorkflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrWorkflow")
            .field("coordinates", &self.coordinates)
            .field("strict_branch_check", &self.strict_branch_check)
            .finish_non_exhaustive()
    }
}

impl PrWorkflow {
    pub fn new(client: Arc<dyn PullRequestClient>, coordinates: RepoCoordinates) -> Self {
        Self {
            client,
            coordinates,
            strict_branch_check: false,
        }
    }

    /// When enabled, only a 404 from the branch existence check means the branch is
    /// missing. Any other error status aborts the run with `StepError::BranchLookup`.
    pub fn with_strict_branch_check(mut self, strict: bool) -> Self {
        self.strict_branch_check = strict;
        self
    }

    /// Makes sure `branch` exists, creating it from the head of the base branch if needed.
    ///
    /// An existing branch is left untouched.
    ///
    /// Any success status on the existence check counts as an existing branch.
    ///
    /// # Errors
    /// * `StepError::BranchLookup` - the existence check got no response, or (strict mode)
    ///   failed with a non-404 status
    /// * `StepError::BaseBranchLookup` - the base branch head could not be read
    /// * `StepError::BranchCreate` - the new ref was rejected
    #[instrument(skip(self), fields(branch = %branch))]
    pub async fn ensure_branch(&self, branch: &BranchName) -> Result<BranchEnsured, StepError> {
        let owner = self.coordinates.owner();
        let repo = self.coordinates.repo();

        match self
            .client
            .get_branch_ref(owner, repo, branch.as_str())
            .await
        {
            Ok(_) => {
                info!("Branch {} already exists.", branch);
                return Ok(BranchEnsured::AlreadyExisted(branch.clone()));
            }
            // A success status means the branch exists, whatever the body holds.
            Err(e @ GitHubError::Deserialization(_)) => {
                debug!(branch = %branch, "Unreadable branch reference body: {}", e);
                info!("Branch {} already exists.", branch);
                return Ok(BranchEnsured::AlreadyExisted(branch.clone()));
            }
            Err(e) if e.is_not_found() => {
                debug!(branch = %branch, "Branch not found, creating it");
            }
            Err(e @ GitHubError::Transport(_)) => {
                error!(branch = %branch, "Branch existence check got no response: {}", e);
                return Err(StepError::BranchLookup {
                    branch: branch.to_string(),
                    source: e,
                });
            }
            Err(e) => {
                if self.strict_branch_check {
                    error!(
                        branch = %branch,
                        status = ?e.status(),
                        "Branch existence check failed: {}",
                        e
                    );
                    return Err(StepError::BranchLookup {
                        branch: branch.to_string(),
                        source: e,
                    });
                }

                warn!(
                    branch = %branch,
                    status = ?e.status(),
                    "Branch existence check failed with a status other than 404, attempting to create the branch: {}",
                    e
                );
            }
        }

        let base = self.base_branch_head().await?;

        let created = self
            .client
            .create_branch_ref(owner, repo, branch.as_str(), &base.sha)
            .await
            .map_err(|e| {
                error!(branch = %branch, "Failed to create branch: {}", e);
                StepError::BranchCreate {
                    branch: branch.to_string(),
                    source: e,
                }
            })?;

        info!(
            branch = %branch,
            base_branch = base.name.as_str(),
            sha = base.sha.as_str(),
            "Branch created"
        );

        let sha = if created.sha().is_empty() {
            base.sha
        } else {
            created.sha().to_string()
        };

        Ok(BranchEnsured::Created(BranchRef {
            name: branch.to_string(),
            sha,
        }))
    }

    /// Reads the head commit of the configured base branch.
    pub async fn base_branch_head(&self) -> Result<BranchRef, StepError> {
        let base_branch = self.coordinates.base_branch();

        let git_ref = self
            .client
            .get_branch_ref(self.coordinates.owner(), self.coordinates.repo(), base_branch)
            .await
            .map_err(|e| {
                error!(base_branch, "Failed to get base branch SHA: {}", e);
                StepError::BaseBranchLookup {
                    base_branch: base_branch.to_string(),
                    source: e,
                }
            })?;

        Ok(BranchRef::from_git_ref(base_branch, &git_ref))
    }

    /// Looks up the file at `path` on `branch`.
    ///
    /// Any failure, including a missing file, yields `FileBlobState::Absent`.
    #[instrument(skip(self), fields(branch = %branch))]
    pub async fn lookup_file(&self, path: &str, branch: &BranchName) -> FileBlobState {
        match self
            .client
            .get_file_metadata(
                self.coordinates.owner(),
                self.coordinates.repo(),
                path,
                branch.as_str(),
            )
            .await
        {
            Ok(metadata) => FileBlobState::Present { sha: metadata.sha },
            Err(e) => {
                debug!(path, status = ?e.status(), "File not found on branch: {}", e);
                FileBlobState::Absent
            }
        }
    }

    /// Commits `content` as the full new content of `path` on `branch`.
    ///
    /// Updates the file when it already exists, otherwise creates it.
    ///
    /// # Errors
    /// Returns `StepError::Commit` if the commit is rejected, including a stale SHA conflict.
    #[instrument(skip(self, content, message), fields(branch = %branch))]
    pub async fn commit_file(
        &self,
        path: &str,
        branch: &BranchName,
        content: &str,
        message: &str,
    ) -> Result<FileCommitted, StepError> {
        let existing = self.lookup_file(path, branch).await;
        let payload = FileUpsertPayload::new(
            message,
            content,
            branch.as_str(),
            existing.sha().map(str::to_string),
        );

        self.client
            .put_file(
                self.coordinates.owner(),
                self.coordinates.repo(),
                path,
                &payload,
            )
            .await
            .map_err(|e| {
                error!(path, "Failed to commit file: {}", e);
                StepError::Commit {
                    path: path.to_string(),
                    branch: branch.to_string(),
                    source: e,
                }
            })?;

        let committed = if payload.is_update() {
            FileCommitted::Updated
        } else {
            FileCommitted::Created
        };

        info!(path, committed = ?committed, "File committed");
        Ok(committed)
    }

    /// Opens a pull request from `branch` into the base branch and returns its URL.
    ///
    /// # Errors
    /// Returns `StepError::PrCreate` if the pull request is rejected.
    #[instrument(skip(self, body), fields(branch = %branch))]
    pub async fn open_pull_request(
        &self,
        title: &str,
        body: &str,
        branch: &BranchName,
    ) -> Result<String, StepError> {
        let payload = PullRequestPayload::new(
            title,
            body,
            self.coordinates.owner(),
            branch.as_str(),
            self.coordinates.base_branch(),
        );

        let created = self
            .client
            .create_pull_request(self.coordinates.owner(), self.coordinates.repo(), &payload)
            .await
            .map_err(|e| {
                error!(head = payload.head.as_str(), "Failed to create pull request: {}", e);
                StepError::PrCreate {
                    head: payload.head.clone(),
                    base: payload.base.clone(),
                    source: e,
                }
            })?;

        info!("Pull Request created: {}", created.html_url);
        Ok(created.html_url)
    }

    /// Runs the full workflow for `request`.
    ///
    /// # Errors
    /// Returns `WorkflowError` wrapping the first step that failed.
    #[instrument(skip(self, request), fields(branch = %request.branch_name, path = request.file_path.as_str()))]
    pub async fn execute(&self, request: &PrRequest) -> Result<PrOutcome, WorkflowError> {
        let branch = &request.branch_name;

        let ensured = self.ensure_branch(branch).await?;

        let file_committed = self
            .commit_file(
                &request.file_path,
                branch,
                &request.file_content,
                &request.commit_message,
            )
            .await?;

        let pull_request_url = self
            .open_pull_request(&request.pr_title, request.body_or_default(), branch)
            .await?;

        Ok(PrOutcome {
            branch: branch.clone(),
            branch_created: ensured.was_created(),
            file_committed,
            pull_request_url,
        })
    }
}
