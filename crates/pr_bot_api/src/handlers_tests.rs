//! Tests for handlers module

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde_json::json;
use std::time::Duration;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::routes::create_router;
use crate::test_support::*;

fn app(mock_server: &MockServer) -> Router {
    create_router(app_state(mock_server), Duration::from_secs(30))
}

fn post_pull_request(body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/pull-request")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

fn sample_body() -> serde_json::Value {
    json!({
        "branchName": null,
        "filePath": "a.txt",
        "fileContent": "hi",
        "commitMessage": "m",
        "prTitle": "t",
        "prBody": "b"
    })
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn requests_with(mock_server: &MockServer, verb: &str) -> Vec<wiremock::Request> {
    mock_server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.method.as_str() == verb)
        .collect()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check_returns_json() {
    let response = health_check().await;

    assert_eq!(response.0.status, "healthy");
    assert_eq!(
        response.0.version,
        Some(env!("CARGO_PKG_VERSION").to_string())
    );
    assert!(chrono::DateTime::parse_from_rfc3339(&response.0.timestamp).is_ok());
}

#[tokio::test]
async fn test_health_check_route() {
    let mock_server = MockServer::start().await;

    let request = Request::builder()
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let response = app(&mock_server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

// ============================================================================
// Pull Request Tests
// ============================================================================

#[tokio::test]
async fn test_create_pull_request_fresh_repository() {
    let mock_server = MockServer::start().await;
    mount_fresh_repository(&mock_server).await;
    mount_pull_request(&mock_server).await;

    let response = app(&mock_server)
        .oneshot(post_pull_request(sample_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["message"], "Pull Request created successfully");
    assert_eq!(json["pullRequestUrl"], PR_URL);
    assert_eq!(json["branchCreated"], true);
    assert_eq!(json["fileCommitted"], "created");
    let branch = json["branchName"].as_str().unwrap().to_string();
    assert!(branch.starts_with("chatbot-"));

    let created_refs = requests_with(&mock_server, "POST")
        .await
        .into_iter()
        .filter(|r| r.url.path().ends_with("/git/refs"))
        .collect::<Vec<_>>();
    assert_eq!(created_refs.len(), 1);
    let ref_body: serde_json::Value = serde_json::from_slice(&created_refs[0].body).unwrap();
    assert_eq!(ref_body["ref"], format!("refs/heads/{branch}"));
    assert_eq!(ref_body["sha"], BASE_SHA);

    let puts = requests_with(&mock_server, "PUT").await;
    assert_eq!(puts.len(), 1);
    let put_body: serde_json::Value = serde_json::from_slice(&puts[0].body).unwrap();
    assert!(put_body.get("sha").is_none());
    assert_eq!(put_body["branch"], branch.as_str());
    assert_eq!(put_body["message"], "m");
    assert_eq!(
        STANDARD
            .decode(put_body["content"].as_str().unwrap())
            .unwrap(),
        b"hi"
    );

    let pulls = requests_with(&mock_server, "POST")
        .await
        .into_iter()
        .filter(|r| r.url.path().ends_with("/pulls"))
        .collect::<Vec<_>>();
    let pr_body: serde_json::Value = serde_json::from_slice(&pulls[0].body).unwrap();
    assert_eq!(
        pr_body,
        json!({
            "title": "t",
            "body": "b",
            "head": format!("{OWNER}:{branch}"),
            "base": BASE
        })
    );
}

#[tokio::test]
async fn test_create_pull_request_existing_branch_updates_file() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/docs-update")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(git_ref_body("docs-update", "1111")),
        )
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/a.txt")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "file",
            "name": "a.txt",
            "path": "a.txt",
            "sha": BLOB_SHA
        })))
        .mount(&mock_server)
        .await;
    mount_put_file(&mock_server).await;
    mount_pull_request(&mock_server).await;

    let mut body = sample_body();
    body["branchName"] = json!("docs-update");
    let response = app(&mock_server)
        .oneshot(post_pull_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["branchName"], "docs-update");
    assert_eq!(json["branchCreated"], false);
    assert_eq!(json["fileCommitted"], "updated");

    let puts = requests_with(&mock_server, "PUT").await;
    let put_body: serde_json::Value = serde_json::from_slice(&puts[0].body).unwrap();
    assert_eq!(put_body["sha"], BLOB_SHA);
}

#[tokio::test]
async fn test_create_pull_request_existing_branch_with_unexpected_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/feature")))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/refs")))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message":"Reference already exists"}"#),
        )
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/a.txt")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&mock_server)
        .await;
    mount_put_file(&mock_server).await;
    mount_pull_request(&mock_server).await;

    let mut body = sample_body();
    body["branchName"] = json!("feature");
    let response = app(&mock_server)
        .oneshot(post_pull_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["branchName"], "feature");
    assert_eq!(json["branchCreated"], false);
    assert_eq!(json["pullRequestUrl"], PR_URL);
}

#[tokio::test]
async fn test_create_pull_request_base_branch_missing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/docs-update")))
        .respond_with(ResponseTemplate::new(404).set_body_json(not_found_body()))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/repos/{OWNER}/{REPO}/git/ref/heads/{BASE}")))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Not Found"}"#))
        .mount(&mock_server)
        .await;

    let mut body = sample_body();
    body["branchName"] = json!("docs-update");
    let response = app(&mock_server)
        .oneshot(post_pull_request(body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "BaseBranchLookupError");
    assert_eq!(
        json["error"]["message"],
        r#"GitHub PR creation failed: Failed to get base branch SHA: 404 - {"message":"Not Found"}"#
    );
    assert_eq!(json["error"]["details"]["step"], "ensure_branch");
    assert_eq!(json["error"]["details"]["githubStatus"], 404);
    assert_eq!(
        json["error"]["details"]["githubBody"],
        r#"{"message":"Not Found"}"#
    );

    assert!(requests_with(&mock_server, "PUT").await.is_empty());
    assert!(requests_with(&mock_server, "POST").await.is_empty());
}

#[tokio::test]
async fn test_create_pull_request_commit_conflict() {
    let mock_server = MockServer::start().await;
    mount_missing_branch_and_file(&mock_server).await;

    Mock::given(method("PUT"))
        .and(path(format!("/repos/{OWNER}/{REPO}/contents/a.txt")))
        .respond_with(
            ResponseTemplate::new(409).set_body_string(r#"{"message":"a.txt does not match"}"#),
        )
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post_pull_request(sample_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "CommitError");
    assert_eq!(json["error"]["details"]["step"], "commit_file");
    assert_eq!(json["error"]["details"]["githubStatus"], 409);

    let pulls = requests_with(&mock_server, "POST")
        .await
        .into_iter()
        .filter(|r| r.url.path().ends_with("/pulls"))
        .count();
    assert_eq!(pulls, 0);
}

#[tokio::test]
async fn test_create_pull_request_pull_request_rejected() {
    let mock_server = MockServer::start().await;
    mount_fresh_repository(&mock_server).await;

    Mock::given(method("POST"))
        .and(path(format!("/repos/{OWNER}/{REPO}/pulls")))
        .respond_with(ResponseTemplate::new(422).set_body_string(
            r#"{"message":"Validation Failed","errors":[{"message":"A pull request already exists"}]}"#,
        ))
        .mount(&mock_server)
        .await;

    let response = app(&mock_server)
        .oneshot(post_pull_request(sample_body()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = response_json(response).await;
    assert_eq!(json["error"]["code"], "PrCreateError");
    assert_eq!(json["error"]["details"]["step"], "open_pull_request");
    assert_eq!(json["error"]["details"]["githubStatus"], 422);
    assert!(json["error"]["details"]["githubBody"]
        .as_str()
        .unwrap()
        .contains("A pull request already exists"));
}

#[tokio::test]
async fn test_create_pull_request_malformed_json() {
    let mock_server = MockServer::start().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/pull-request")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app(&mock_server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_pull_request_without_json_content_type() {
    let mock_server = MockServer::start().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/pull-request")
        .body(Body::from(serde_json::to_string(&sample_body()).unwrap()))
        .unwrap();
    let response = app(&mock_server).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}
