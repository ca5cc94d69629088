//! # PR Bot Core
//!
//! This crate provides the orchestration logic for opening a pull request that changes a
//! single file in a GitHub repository.
//!
//! ## Overview
//!
//! A run of the workflow performs three remote steps in order:
//! 1. Ensure the working branch exists, creating it from the base branch head if needed
//! 2. Commit the new file content to the branch, as an update when the file already exists
//! 3. Open a pull request from the branch into the base branch
//!
//! The first failing step stops the run. Branches and commits created before the failure
//! are left in place.
//!
//! ## Main Types
//!
//! - [`PrWorkflow`] - Runs the workflow against one repository
//! - [`PrRequest`] / [`PrRequestBuilder`] - Describes the change to publish
//! - [`RepoCoordinates`] - Target repository and credential
//! - [`WorkflowError`] / [`StepError`] - Failures with the GitHub status and body
//!
//! ## Examples
//!
//! ```no_run
//! use std::sync::Arc;
//! use github_client::{create_token_client, ClientSettings, GitHubClient};
//! use pr_bot_core::{PrRequestBuilder, PrWorkflow, RepoCoordinates};
//! use secrecy::SecretString;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let token = SecretString::from("ghp_example".to_string());
//! let client = create_token_client(&token, &ClientSettings::default())?;
//! let coordinates = RepoCoordinates::new("my-org", "my-repo", "main", token)?;
//! let workflow = PrWorkflow::new(Arc::new(GitHubClient::new(client)), coordinates);
//!
//! let request = PrRequestBuilder::new("docs/a.txt", "hi", "Add a.txt", "Add a.txt")
//!     .pr_body("Adds a.txt")
//!     .build();
//!
//! match workflow.execute(&request).await {
//!     Ok(outcome) => println!("Pull request opened: {}", outcome.pull_request_url),
//!     Err(e) => eprintln!("{} ({:?}): {}", e.kind(), e.status(), e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! The workflow talks to GitHub only through the [`github_client::PullRequestClient`]
//! trait, so tests can substitute an in-memory implementation.

pub mod configuration;
pub mod errors;
pub mod repository;
pub mod request;
pub mod workflow;

pub use configuration::RepoCoordinates;
pub use errors::{ConfigurationError, StepError, ValidationError, WorkflowError, WorkflowStep};
pub use repository::{BranchEnsured, BranchRef, FileBlobState, FileCommitted, PrOutcome};
pub use request::{BranchName, PrRequest, PrRequestBuilder, GENERATED_BRANCH_PREFIX};
pub use workflow::PrWorkflow;
