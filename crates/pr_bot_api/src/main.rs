//! PR Bot REST API Server
//!
//! Main binary for running the API server.
//!
//! # Environment Variables
//!
//! - `PR_BOT_CONFIG`: Path of the TOML configuration file (default: pr_bot.toml, if present)
//! - `API_PORT`: Port to listen on (default: 8080)
//! - `API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `GITHUB_OWNER`, `GITHUB_REPO`, `GITHUB_BASE_BRANCH`, `GITHUB_TOKEN`: Target repository (required)
//! - `GITHUB_API_URL`: GitHub API base URL (default: https://api.github.com)
//! - `GITHUB_CLIENT_NAME`: User-Agent sent to GitHub (default: pr-bot)
//! - `GITHUB_TIMEOUT_SECS`: Timeout of each GitHub call (default: 30)
//! - `GITHUB_STRICT_BRANCH_CHECK`: Only treat 404 as a missing branch (default: false)
//! - `RUST_LOG`: Log level (default: info)
//! - `LOG_FORMAT`: `json` for JSON log lines

use std::env;

use anyhow::Context;
use pr_bot_api::{ApiServer, AppState, ServiceConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = ServiceConfig::load().context("Failed to load configuration")?;
    let state = AppState::from_config(&config).context("Failed to create GitHub client")?;
    let server = ApiServer::new(config.server.clone(), state);

    tracing::info!("Starting PR bot API server");
    tracing::info!(
        "Target repository: {}/{} (base branch {})",
        config.coordinates.owner(),
        config.coordinates.repo(),
        config.coordinates.base_branch()
    );

    server.serve().await
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
