//! Web API Key Administration Tests

mod common;

use axum::http::StatusCode;
use common::TestApp;
use fileshare::Capability;
use serde_json::{json, Value};

#[tokio::test]
async fn test_create_api_key() {
    let app = TestApp::new().await;
    let admin_key = app.issue_key(Capability::Administer).await;

    let response = app
        .server
        .post("/api-keys")
        .authorization_bearer(&admin_key)
        .json(&json!({ "type": "Upload" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "upload");
    assert_eq!(body["data"]["is_enabled"], true);
    let key = body["data"]["key"].as_str().unwrap();
    assert!(uuid::Uuid::parse_str(key).is_ok());

    // The new key works for its capability.
    app.upload(key, "notes.txt", b"hello", false)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_create_api_key_api_alias() {
    let app = TestApp::new().await;
    let admin_key = app.issue_key(Capability::Administer).await;

    let response = app
        .server
        .post("/api-keys")
        .authorization_bearer(&admin_key)
        .json(&json!({ "type": "api" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["data"]["type"], "administer");
}

#[tokio::test]
async fn test_create_api_key_invalid_type() {
    let app = TestApp::new().await;
    let admin_key = app.issue_key(Capability::Administer).await;

    let response = app
        .server
        .post("/api-keys")
        .authorization_bearer(&admin_key)
        .json(&json!({ "type": "superuser" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"]["message"], "Invalid API key type");
}

#[tokio::test]
async fn test_create_api_key_requires_administer() {
    let app = TestApp::new().await;
    let upload_key = app.issue_key(Capability::Upload).await;

    app.server
        .post("/api-keys")
        .authorization_bearer(&upload_key)
        .json(&json!({ "type": "upload" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    app.server
        .post("/api-keys")
        .json(&json!({ "type": "upload" }))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_disable_and_enable_api_key() {
    let app = TestApp::new().await;
    let admin_key = app.issue_key(Capability::Administer).await;
    let upload_key = app.issue_key(Capability::Upload).await;

    let response = app
        .server
        .delete(&format!("/api-keys/{upload_key}"))
        .authorization_bearer(&admin_key)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["message"], "API key disabled");

    let response = app
        .server
        .delete(&format!("/api-keys/{upload_key}"))
        .authorization_bearer(&admin_key)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"]["message"],
        "API key already disabled"
    );

    // A disabled key authorizes nothing.
    app.upload(&upload_key, "notes.txt", b"hello", false)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    let response = app
        .server
        .post(&format!("/api-keys/{upload_key}/enable"))
        .authorization_bearer(&admin_key)
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["data"]["message"], "API key enabled");

    let response = app
        .server
        .post(&format!("/api-keys/{upload_key}/enable"))
        .authorization_bearer(&admin_key)
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["data"]["message"],
        "API key already enabled"
    );

    app.upload(&upload_key, "notes.txt", b"hello", false)
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_disable_unknown_api_key() {
    let app = TestApp::new().await;
    let admin_key = app.issue_key(Capability::Administer).await;

    app.server
        .delete("/api-keys/00000000-0000-4000-8000-000000000000")
        .authorization_bearer(&admin_key)
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
