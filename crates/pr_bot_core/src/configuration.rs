//! Repository coordinates
//!
//! The process-wide, read-only description of which repository pull requests are
//! opened against and how to authenticate. Built once at start-up and handed to
//! [`crate::PrWorkflow`] explicitly.

use secrecy::{ExposeSecret, SecretString};

use crate::errors::ConfigurationError;

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;

/// Owner, repository, base branch and credential of the target repository.
///
/// The token is held as a [`SecretString`] and never appears in `Debug` output.
#[derive(Debug, Clone)]
pub struct RepoCoordinates {
    owner: String,
    repo: String,
    base_branch: String,
    token: SecretString,
}

impl RepoCoordinates {
    /// Create repository coordinates.
    ///
    /// # Errors
    /// Returns `ConfigurationError::MissingValue` if any value is empty or only whitespace.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        base_branch: impl Into<String>,
        token: SecretString,
    ) -> Result<Self, ConfigurationError> {
        let owner = required(owner.into(), "owner")?;
        let repo = required(repo.into(), "repo")?;
        let base_branch = required(base_branch.into(), "base_branch")?;

        if token.expose_secret().trim().is_empty() {
            return Err(ConfigurationError::MissingValue("token"));
        }

        Ok(Self {
            owner,
            repo,
            base_branch,
            token,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Branch every pull request targets.
    pub fn base_branch(&self) -> &str {
        &self.base_branch
    }

    pub fn token(&self) -> &SecretString {
        &self.token
    }
}

fn required(value: String, field: &'static str) -> Result<String, ConfigurationError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(ConfigurationError::MissingValue(field));
    }
    Ok(value)
}
