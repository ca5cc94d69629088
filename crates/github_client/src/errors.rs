//! Error types for GitHub client operations.
//!
//! This module defines the error types that can occur when interacting with the GitHub API
//! through the github_client crate. Failed API calls keep the HTTP status and the raw
//! response body so callers can surface exactly what GitHub said.

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur during GitHub client operations.
///
/// ## Examples
///
/// ```rust,ignore
/// use github_client::Error;
///
/// match client.get_branch_ref("owner", "repo", "main").await {
///     Ok(git_ref) => println!("main is at {}", git_ref.object.sha),
///     Err(Error::Api { status, body }) => eprintln!("GitHub returned {status}: {body}"),
///     Err(err) => eprintln!("Other error: {err}"),
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// GitHub answered with a non-success status code.
    ///
    /// `status` is the HTTP status code and `body` the response body exactly as received.
    #[error("{status} - {body}")]
    Api { status: u16, body: String },

    /// Authentication or GitHub client initialization failure.
    ///
    /// The contained string provides specific details about the failure, e.g. an
    /// invalid base URL or header value.
    #[error("Failed to authenticate or initialize GitHub client: {0}")]
    AuthError(String),

    /// Error deserializing a successful response from GitHub.
    ///
    /// This may indicate API version changes or an unexpected response shape,
    /// e.g. a directory listing where a single file was expected.
    #[error("Failed to deserialize GitHub response: {0}")]
    Deserialization(#[from] serde_json::Error),

    /// The request never produced an HTTP response.
    ///
    /// Covers connection failures, TLS errors, timeouts and malformed URIs.
    #[error("Failed to reach GitHub: {0}")]
    Transport(String),
}

impl Error {
    /// Returns the HTTP status code GitHub answered with, if there was a response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body of a failed API call.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Api { body, .. } => Some(body.as_str()),
            _ => None,
        }
    }

    /// Returns `true` if GitHub reported the resource as missing (404).
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

impl From<octocrab::Error> for Error {
    fn from(e: octocrab::Error) -> Self {
        match e {
            octocrab::Error::GitHub { source, .. } => Error::Api {
                status: source.status_code.as_u16(),
                body: source.message,
            },
            other => Error::Transport(other.to_string()),
        }
    }
}
