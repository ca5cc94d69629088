//! PR Bot REST API
//!
//! This crate provides the HTTP entry point of the PR bot. A single endpoint accepts a
//! file change and turns it into a pull request against the configured repository.
//!
//! # Architecture
//!
//! This crate exists in the HTTP layer and handles:
//! - HTTP request/response translation
//! - Error mapping from domain to HTTP
//! - Configuration loading
//! - Routing and server configuration
//!
//! **CRITICAL**: This crate must never be imported by business logic.
//! The dependency flows: HTTP API → Business Logic, never the reverse.

use std::sync::Arc;

use github_client::{create_token_client, GitHubClient};
use pr_bot_core::PrWorkflow;

pub mod config;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;
pub mod translation;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export key types for convenience
pub use config::{ConfigError, ServiceConfig};
pub use errors::{ApiError, ErrorResponse};
pub use models::{request, response};
pub use server::{ApiConfig, ApiServer};

/// Default API port
pub const DEFAULT_PORT: u16 = 8080;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Workflow bound to the configured repository
    pub workflow: PrWorkflow,
}

impl AppState {
    pub fn new(workflow: PrWorkflow) -> Self {
        Self { workflow }
    }

    /// Builds the GitHub client and workflow described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `github_client::Error::AuthError` if the GitHub client cannot be built.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, github_client::Error> {
        let octocrab = create_token_client(config.coordinates.token(), &config.client)?;
        let workflow = PrWorkflow::new(
            Arc::new(GitHubClient::new(octocrab)),
            config.coordinates.clone(),
        )
        .with_strict_branch_check(config.strict_branch_check);

        Ok(Self::new(workflow))
    }
}
