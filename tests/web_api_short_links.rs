//! Web API Short Link Tests
//!
//! Integration tests for short link creation, resolution and toggling.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use fileshare::Capability;
use serde_json::{json, Value};

/// Shorten `filename` and return the response body.
async fn shorten(app: &TestApp, token: &str, filename: &str) -> Value {
    let response = app
        .server
        .post("/shorten")
        .authorization_bearer(token)
        .json(&json!({ "filename": filename }))
        .await;
    response.assert_status_ok();
    response.json::<Value>()
}

fn message(body: &Value) -> &str {
    body["data"]["message"].as_str().unwrap()
}

#[tokio::test]
async fn test_private_report_flow() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;
    let shorten_key = app.issue_key(Capability::Shorten).await;
    let download_key = app.issue_key(Capability::Download).await;

    app.upload(&upload_key, "report.pdf", b"%PDF-1.7", false)
        .await
        .assert_status_ok();

    let body = shorten(&app, &shorten_key, "report.pdf").await;
    assert_eq!(body["data"]["is_private"], true);
    assert_eq!(body["data"]["filename"], "report.pdf");
    let code = body["data"]["short_code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 10);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["data"]["short_url_path"], format!("/s/{code}"));

    // Private link without a token.
    app.server
        .get(&format!("/s/{code}"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    // Private link with a token of the wrong capability.
    app.server
        .get(&format!("/s/{code}"))
        .add_query_param("token", &shorten_key)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .get(&format!("/s/{code}"))
        .add_query_param("token", &download_key)
        .await;
    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), b"%PDF-1.7");
    assert_eq!(response.header("content-type"), "application/pdf");

    // Disable twice, then the link is gone.
    let response = app
        .server
        .delete(&format!("/shorten/{code}"))
        .authorization_bearer(&shorten_key)
        .await;
    response.assert_status_ok();
    assert_eq!(message(&response.json()), "Short link disabled");

    let response = app
        .server
        .delete(&format!("/shorten/{code}"))
        .authorization_bearer(&shorten_key)
        .await;
    response.assert_status_ok();
    assert_eq!(message(&response.json()), "Short link already disabled");

    app.server
        .get(&format!("/s/{code}"))
        .add_query_param("token", &download_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);

    // Enable twice, then the link works again.
    let response = app
        .server
        .post(&format!("/shorten/{code}/enable"))
        .authorization_bearer(&shorten_key)
        .await;
    response.assert_status_ok();
    assert_eq!(message(&response.json()), "Short link enabled");

    let response = app
        .server
        .post(&format!("/shorten/{code}/enable"))
        .authorization_bearer(&shorten_key)
        .await;
    response.assert_status_ok();
    assert_eq!(message(&response.json()), "Short link already enabled");

    app.server
        .get(&format!("/s/{code}"))
        .add_query_param("token", &download_key)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_public_link_needs_no_token() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    app.upload(&upload_key, "flyer.txt", b"come along", true)
        .await
        .assert_status_ok();

    let body = shorten(&app, &shorten_key, "flyer.txt").await;
    assert_eq!(body["data"]["is_private"], false);
    let code = body["data"]["short_code"].as_str().unwrap();

    let response = app.server.get(&format!("/s/{code}")).await;
    response.assert_status_ok();
    assert_eq!(response.text(), "come along");
}

#[tokio::test]
async fn test_public_copy_wins() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    app.upload(&upload_key, "both.txt", b"private copy", false)
        .await
        .assert_status_ok();
    app.upload(&upload_key, "both.txt", b"public copy", true)
        .await
        .assert_status_ok();

    let body = shorten(&app, &shorten_key, "both.txt").await;
    assert_eq!(body["data"]["is_private"], false);
    let code = body["data"]["short_code"].as_str().unwrap();

    let response = app.server.get(&format!("/s/{code}")).await;
    response.assert_status_ok();
    assert_eq!(response.text(), "public copy");
}

#[tokio::test]
async fn test_shorten_missing_file() {
    let app = TestApp::new().await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    let response = app
        .server
        .post("/shorten")
        .authorization_bearer(&shorten_key)
        .json(&json!({ "filename": "ghost.txt" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shorten_requires_shorten_capability() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;

    app.upload(&upload_key, "notes.txt", b"hello", true)
        .await
        .assert_status_ok();

    let response = app
        .server
        .post("/shorten")
        .authorization_bearer(&upload_key)
        .json(&json!({ "filename": "notes.txt" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_shorten_rejects_traversal() {
    let app = TestApp::new().await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    let response = app
        .server
        .post("/shorten")
        .authorization_bearer(&shorten_key)
        .json(&json!({ "filename": "../../etc/passwd" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_code_is_not_found() {
    let app = TestApp::new().await;

    let response = app.server.get("/s/doesnotexist").await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_toggle_unknown_code_is_not_found() {
    let app = TestApp::new().await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    app.server
        .delete("/shorten/doesnotexist")
        .authorization_bearer(&shorten_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_link_to_deleted_file() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;
    let shorten_key = app.issue_key(Capability::Shorten).await;

    app.upload(&upload_key, "temp.txt", b"short lived", true)
        .await
        .assert_status_ok();
    let body = shorten(&app, &shorten_key, "temp.txt").await;
    let code = body["data"]["short_code"].as_str().unwrap();

    std::fs::remove_file(app.storage.base_path().join("public").join("temp.txt")).unwrap();

    let response = app.server.get(&format!("/s/{code}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Original file not found");
}
