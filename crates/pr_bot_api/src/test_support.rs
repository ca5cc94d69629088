//! Shared helpers for the API tests: an application state wired to a wiremock GitHub.

use std::time::Duration;

use github_client::ClientSettings;
use pr_bot_core::RepoCoordinates;
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::{config::ServiceConfig, server::ApiConfig, AppState};

pub const OWNER: &str = "octo";
pub const REPO: &str = "hello-world";
pub const BASE: &str = "main";
pub const BASE_SHA: &str = "aa218f56b14c9653891f9e74264a383fa43fefbd";
pub const BLOB_SHA: &str = "3d21ec53a331a6f037a91c368710b99387d012c1";
pub const PR_URL: &str = "https://github.com/octo/hello-world/pull/42";

pub const GENERATED_REF_PATH: &str = r"^/repos/octo/hello-world/git/ref/heads/chatbot-[0-9a-f-]+$";

pub fn service_config(mock_server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        server: ApiConfig::default(),
        coordinates: RepoCoordinates::new(
            OWNER,
            REPO,
            BASE,
            SecretString::from("test-token-123".to_string()),
        )
        .unwrap(),
        client: ClientSettings {
            api_base_url: Some(mock_server.uri()),
            timeout: Duration::from_secs(5),
            ..Default::default()
        },
        strict_branch_check: false,
    }
}

pub fn app_state(mock_server: &MockServer) -> AppState {
    AppState::from_config(&service_config(mock_server)).unwrap()
}

pub fn git_ref_body(branch: &str, sha: &str) -> serde_json::Value {
    json!({
        "ref": format!("refs/heads/{branch}"),
        "object": { "type": "commit", "sha": sha }
    })
}

pub fn not_found_body() -> serde_json::Value {
    json!({
        "message": "Not Found",
        "documentation_url": "https://docs.github.com/rest"
    })
}

pub async fn mount_base_branch(mock_server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/{BASE}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(git_ref_body(BASE, BASE_SHA)))
        .mount(mock_server)
        .await;
}

/// Mounts a repository with a base branch but no working branch and no file.
pub async fn mount_fresh_repository(mock_server: &MockServer) {
    mount_missing_branch_and_file(mock_server).await;
    mount_put_file(mock_server).await;
}

/// Mounts the base branch, a missing generated branch, branch creation and a missing
/// `a.txt`, leaving the commit itself unmocked.
pub async fn mount_missing_branch_and_file(mock_server: &MockServer) {
    mount_base_branch(mock_server).await;

    Mock::given(method("GET"))
        .and(path_regex(GENERATED_REF_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(git_ref_body("chatbot-new", BASE_SHA)),
        )
        .mount(mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/a.txt")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(mock_server)
        .await;
}

pub async fn mount_put_file(mock_server: &MockServer) {
    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/a.txt")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "path": "a.txt", "sha": "95b966ae1c166bd92f8ae7d1c313e738c731dfc3" },
            "commit": { "sha": "7638417db6d59f3c431d3e1f261cc637155684cd" }
        })))
        .mount(mock_server)
        .await;
}

pub async fn mount_pull_request(mock_server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 42,
            "html_url": PR_URL,
            "state": "open"
        })))
        .mount(mock_server)
        .await;
}
