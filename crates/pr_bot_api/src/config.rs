//! Service configuration.
//!
//! Configuration is read once at start-up from an optional TOML file and then from
//! environment variables, which take precedence. The result is handed to the server and
//! the workflow explicitly.
//!
//! # Example TOML Configuration
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! request_timeout_secs = 120
//!
//! [github]
//! owner = "my-org"
//! repo = "my-repo"
//! base_branch = "main"
//! api_base_url = "https://api.github.com"
//! client_name = "pr-bot"
//! timeout_secs = 30
//! strict_branch_check = false
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use github_client::ClientSettings;
use pr_bot_core::{ConfigurationError, RepoCoordinates};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::{debug, info};

use crate::server::ApiConfig;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "PR_BOT_CONFIG";

/// Configuration file used when `PR_BOT_CONFIG` is not set.
pub const DEFAULT_CONFIG_FILENAME: &str = "pr_bot.toml";

/// Default time allowed for a whole inbound request.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Errors raised while loading the service configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required setting '{key}' (set {env} or add it to the configuration file)")]
    Missing {
        key: &'static str,
        env: &'static str,
    },

    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },

    #[error("Failed to read configuration file {path:?}: {reason}")]
    File { path: PathBuf, reason: String },
}

impl From<ConfigurationError> for ConfigError {
    fn from(err: ConfigurationError) -> Self {
        match err {
            ConfigurationError::MissingValue(field) => {
                let (key, env) = match field {
                    "owner" => ("github.owner", "GITHUB_OWNER"),
                    "repo" => ("github.repo", "GITHUB_REPO"),
                    "base_branch" => ("github.base_branch", "GITHUB_BASE_BRANCH"),
                    _ => ("github.token", "GITHUB_TOKEN"),
                };
                ConfigError::Missing { key, env }
            }
        }
    }
}

/// Contents of the TOML configuration file. Every value is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub server: ServerSection,
    pub github: GitHubSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub request_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubSection {
    pub owner: Option<String>,
    pub repo: Option<String>,
    pub base_branch: Option<String>,
    pub token: Option<String>,
    pub api_base_url: Option<String>,
    pub client_name: Option<String>,
    pub timeout_secs: Option<u64>,
    pub strict_branch_check: Option<bool>,
}

impl FileConfig {
    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::File` if the file cannot be read or is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        debug!("Loading configuration from {:?}", path);

        let content = fs::read_to_string(path).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::File {
            path: path.to_path_buf(),
            reason: format!("Failed to parse configuration file: {}", e),
        })
    }
}

/// Fully resolved configuration of the service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub server: ApiConfig,
    pub coordinates: RepoCoordinates,
    pub client: ClientSettings,
    pub strict_branch_check: bool,
}

impl ServiceConfig {
    /// Loads the configuration from `$PR_BOT_CONFIG` (or `pr_bot.toml` when present) and
    /// the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required value is missing, a value cannot be parsed, or
    /// an explicitly named configuration file cannot be read.
    pub fn load() -> Result<Self, ConfigError> {
        let file = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Some(FileConfig::load(Path::new(&path))?),
            Err(_) => {
                let default_path = Path::new(DEFAULT_CONFIG_FILENAME);
                if default_path.exists() {
                    Some(FileConfig::load(default_path)?)
                } else {
                    None
                }
            }
        };

        let config = Self::from_sources(file.unwrap_or_default(), |key| std::env::var(key).ok())?;

        info!(
            owner = config.coordinates.owner(),
            repo = config.coordinates.repo(),
            base_branch = config.coordinates.base_branch(),
            strict_branch_check = config.strict_branch_check,
            "Configuration loaded"
        );

        Ok(config)
    }

    /// Resolves the configuration from file values and an environment lookup.
    ///
    /// Values returned by `env` override the file. Empty environment values are ignored.
    pub fn from_sources<F>(file: FileConfig, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| env(key).filter(|value| !value.trim().is_empty());
        let FileConfig { server, github } = file;

        let defaults = ApiConfig::default();
        let host = lookup("API_HOST").or(server.host).unwrap_or(defaults.host);
        let port = match lookup("API_PORT") {
            Some(value) => parse_value("API_PORT", &value)?,
            None => server.port.unwrap_or(defaults.port),
        };
        let request_timeout = server
            .request_timeout_secs
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        let owner = required(lookup("GITHUB_OWNER").or(github.owner), "github.owner", "GITHUB_OWNER")?;
        let repo = required(lookup("GITHUB_REPO").or(github.repo), "github.repo", "GITHUB_REPO")?;
        let base_branch = required(
            lookup("GITHUB_BASE_BRANCH").or(github.base_branch),
            "github.base_branch",
            "GITHUB_BASE_BRANCH",
        )?;
        let token = required(lookup("GITHUB_TOKEN").or(github.token), "github.token", "GITHUB_TOKEN")?;

        let coordinates =
            RepoCoordinates::new(owner, repo, base_branch, SecretString::from(token))?;

        let client_defaults = ClientSettings::default();
        let timeout = match lookup("GITHUB_TIMEOUT_SECS") {
            Some(value) => Duration::from_secs(parse_value("GITHUB_TIMEOUT_SECS", &value)?),
            None => github
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(client_defaults.timeout),
        };
        let client = ClientSettings {
            api_base_url: lookup("GITHUB_API_URL").or(github.api_base_url),
            client_name: lookup("GITHUB_CLIENT_NAME")
                .or(github.client_name)
                .unwrap_or(client_defaults.client_name),
            timeout,
        };

        let strict_branch_check = match lookup("GITHUB_STRICT_BRANCH_CHECK") {
            Some(value) => parse_value("GITHUB_STRICT_BRANCH_CHECK", &value)?,
            None => github.strict_branch_check.unwrap_or(false),
        };

        Ok(Self {
            server: ApiConfig {
                host,
                port,
                request_timeout,
            },
            coordinates,
            client,
            strict_branch_check,
        })
    }
}

fn required(
    value: Option<String>,
    key: &'static str,
    env: &'static str,
) -> Result<String, ConfigError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing { key, env })
}

fn parse_value<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
