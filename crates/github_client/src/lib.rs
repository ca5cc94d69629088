//! Crate for interacting with the GitHub REST API.
//!
//! This crate provides a client for making token-authenticated requests to GitHub
//! covering the small surface needed to open a pull request for a single file change:
//! Git references, repository contents and pull requests.
//!
//! The client is built once per process with its authentication and identification
//! headers already attached, and is then shared by every request.

use async_trait::async_trait;
use http::header::{HeaderName, ACCEPT, USER_AGENT};
use http::StatusCode;
use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, instrument};

pub mod errors;
pub use errors::Error;

pub mod models;
pub use models::{
    CreateRefPayload, CreatedPullRequest, FileMetadata, FileUpsertPayload, GitObject, GitRef,
    PullRequestPayload,
};

// Reference the tests module in the separate file
#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Default GitHub REST API endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Default value of the `User-Agent` header identifying this client.
pub const DEFAULT_CLIENT_NAME: &str = "pr-bot";

/// Versioned JSON media type sent in the `Accept` header.
pub const GITHUB_JSON_MEDIA_TYPE: &str = "application/vnd.github+json";

/// REST API version pinned through the `X-GitHub-Api-Version` header.
pub const GITHUB_API_VERSION: &str = "2022-11-28";

/// Default connect, read and write timeout for API calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings applied once when the underlying HTTP client is constructed.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// API base URL. `None` uses [`DEFAULT_API_BASE_URL`].
    pub api_base_url: Option<String>,

    /// Value of the `User-Agent` header
    pub client_name: String,

    /// Connect, read and write timeout
    pub timeout: Duration,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            client_name: DEFAULT_CLIENT_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// GitHub operations needed to publish a single file change as a pull request.
///
/// Every failed call reports the HTTP status and the raw response body through
/// [`Error::Api`]. Implementations must not retry.
#[async_trait]
pub trait PullRequestClient: Send + Sync {
    /// Fetches the reference `heads/{branch}`.
    ///
    /// # Errors
    /// Returns `Error::Api` for any non-success status, including 404 for a missing branch.
    async fn get_branch_ref(&self, owner: &str, repo: &str, branch: &str)
        -> Result<GitRef, Error>;

    /// Creates the reference `refs/heads/{branch}` pointing at `sha`.
    async fn create_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, Error>;

    /// Fetches the metadata of the file at `path` on `branch`.
    ///
    /// # Errors
    /// Returns `Error::Api` with status 404 if the file does not exist and
    /// `Error::Deserialization` if `path` names a directory.
    async fn get_file_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileMetadata, Error>;

    /// Creates or updates the file at `path` in a single commit.
    async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        payload: &FileUpsertPayload,
    ) -> Result<(), Error>;

    /// Opens a pull request.
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        payload: &PullRequestPayload,
    ) -> Result<CreatedPullRequest, Error>;
}

/// A client for interacting with the GitHub API, authenticated with a token.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Octocrab,
}

impl GitHubClient {
    /// Creates a new `GitHubClient` wrapping a configured `Octocrab` instance.
    ///
    /// Use [`create_token_client`] to build an instance with the expected headers.
    pub fn new(client: Octocrab) -> Self {
        Self { client }
    }

    async fn get_json<R: DeserializeOwned>(&self, route: String) -> Result<R, Error> {
        let response = self.client._get(route).await.map_err(|e| {
            log_octocrab_error("GET request failed", &e);
            Error::from(e)
        })?;
        let status = response.status();
        let body = self.client.body_to_string(response).await?;

        let body = check_status(status, body)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<P, R>(&self, route: String, payload: &P) -> Result<R, Error>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            ._post(route, Some(payload))
            .await
            .map_err(|e| {
                log_octocrab_error("POST request failed", &e);
                Error::from(e)
            })?;
        let status = response.status();
        let body = self.client.body_to_string(response).await?;

        let body = check_status(status, body)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn put(&self, route: String, payload: &FileUpsertPayload) -> Result<String, Error> {
        let response = self
            .client
            ._put(route, Some(payload))
            .await
            .map_err(|e| {
                log_octocrab_error("PUT request failed", &e);
                Error::from(e)
            })?;
        let status = response.status();
        let body = self.client.body_to_string(response).await?;

        check_status(status, body)
    }
}

#[async_trait]
impl PullRequestClient for GitHubClient {
    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch))]
    async fn get_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<GitRef, Error> {
        let route = repo_route(owner, repo, &format!("git/ref/heads/{}", encode_path(branch)));
        debug!(route = %route, "Looking up branch reference");

        self.get_json(route).await
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, branch = %branch, sha = %sha))]
    async fn create_branch_ref(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
        sha: &str,
    ) -> Result<GitRef, Error> {
        let route = repo_route(owner, repo, "git/refs");
        let payload = CreateRefPayload::for_branch(branch, sha);

        let created: GitRef = self.post_json(route, &payload).await?;
        info!(
            reference = %created.reference,
            sha = %created.sha(),
            "Created branch reference"
        );
        Ok(created)
    }

    #[instrument(skip(self), fields(owner = %owner, repo = %repo, path = %path, branch = %branch))]
    async fn get_file_metadata(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        branch: &str,
    ) -> Result<FileMetadata, Error> {
        let encoded_branch: String = url::form_urlencoded::byte_serialize(branch.as_bytes()).collect();
        let route = repo_route(
            owner,
            repo,
            &format!("contents/{}?ref={}", encode_path(path), encoded_branch),
        );
        debug!(route = %route, "Looking up file metadata");

        self.get_json(route).await
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, path = %path, branch = %payload.branch, update = payload.is_update()))]
    async fn put_file(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        payload: &FileUpsertPayload,
    ) -> Result<(), Error> {
        let route = repo_route(owner, repo, &format!("contents/{}", encode_path(path)));

        self.put(route, payload).await?;
        info!("Committed file");
        Ok(())
    }

    #[instrument(skip(self, payload), fields(owner = %owner, repo = %repo, head = %payload.head, base = %payload.base))]
    async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        payload: &PullRequestPayload,
    ) -> Result<CreatedPullRequest, Error> {
        let route = repo_route(owner, repo, "pulls");

        let created: CreatedPullRequest = self.post_json(route, payload).await?;
        info!(
            number = created.number,
            url = %created.html_url,
            "Created pull request"
        );
        Ok(created)
    }
}

/// Creates an `Octocrab` client authenticated with a bearer token.
///
/// The client identifier (`User-Agent`), the versioned JSON `Accept` header and the API
/// version header are attached here once, together with the timeouts from `settings`.
///
/// # Errors
///
/// Returns `Error::AuthError` if the base URL is invalid or the client cannot be built.
///
/// # Example
///
/// ```rust,no_run
/// use github_client::{create_token_client, ClientSettings, GitHubClient};
/// use secrecy::SecretString;
///
/// # fn example() -> Result<(), github_client::Error> {
/// let token = SecretString::from("ghp_example".to_string());
/// let octocrab = create_token_client(&token, &ClientSettings::default())?;
/// let client = GitHubClient::new(octocrab);
/// # Ok(())
/// # }
/// ```
#[instrument(skip(token))]
pub fn create_token_client(
    token: &SecretString,
    settings: &ClientSettings,
) -> Result<Octocrab, Error> {
    let mut builder = Octocrab::builder()
        .personal_token(token.expose_secret().to_string())
        .add_header(USER_AGENT, settings.client_name.clone())
        .add_header(ACCEPT, GITHUB_JSON_MEDIA_TYPE.to_string())
        .add_header(
            HeaderName::from_static("x-github-api-version"),
            GITHUB_API_VERSION.to_string(),
        )
        .set_connect_timeout(Some(settings.timeout))
        .set_read_timeout(Some(settings.timeout))
        .set_write_timeout(Some(settings.timeout));

    if let Some(base_url) = &settings.api_base_url {
        builder = builder.base_uri(base_url.clone()).map_err(|e| {
            error!(base_url = %base_url, error = %e, "Invalid GitHub API base URL");
            Error::AuthError(format!("Invalid GitHub API base URL '{}': {}", base_url, e))
        })?;
    }

    let octocrab = builder.build().map_err(|e| {
        error!(error = ?e, "Failed to build Octocrab client with token credentials");
        Error::AuthError(format!("Failed to build GitHub client: {}", e))
    })?;

    info!(
        client_name = %settings.client_name,
        api_base_url = settings.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL),
        timeout_secs = settings.timeout.as_secs(),
        "Created GitHub client"
    );

    Ok(octocrab)
}

fn check_status(status: StatusCode, body: String) -> Result<String, Error> {
    if status.is_success() {
        Ok(body)
    } else {
        debug!(status = status.as_u16(), body = %body, "GitHub returned an error status");
        Err(Error::Api {
            status: status.as_u16(),
            body,
        })
    }
}

fn repo_route(owner: &str, repo: &str, tail: &str) -> String {
    format!(
        "/repos/{}/{}/{}",
        encode_segment(owner),
        encode_segment(repo),
        tail
    )
}

/// Percent-encodes every segment of a slash separated path, keeping the separators.
fn encode_path(path: &str) -> String {
    path.split('/')
        .filter(|segment| !segment.is_empty())
        .map(encode_segment)
        .collect::<Vec<_>>()
        .join("/")
}

fn encode_segment(segment: &str) -> String {
    // Form encoding writes spaces as '+', which is only valid in queries.
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn log_octocrab_error(message: &str, e: &octocrab::Error) {
    match e {
        octocrab::Error::GitHub { source, backtrace } => error!(
            error_message = source.message,
            status = source.status_code.as_u16(),
            backtrace = backtrace.to_string(),
            "{}. Received an error from GitHub",
            message
        ),
        octocrab::Error::UriParse { source, .. } => error!(
            error_message = source.to_string(),
            "{}. Failed to parse URI.",
            message
        ),
        octocrab::Error::Uri { source, .. } => error!(
            error_message = source.to_string(),
            "{}, Failed to parse URI.",
            message
        ),
        octocrab::Error::InvalidHeaderValue { source, .. } => error!(
            error_message = source.to_string(),
            "{}. One of the header values was invalid.",
            message
        ),
        _ => error!(error_message = e.to_string(), message),
    };
}
