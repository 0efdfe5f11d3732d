//! Test helpers for HTTP integration tests.
//!
//! Every test app gets its own temporary storage root and in-memory database.

#![allow(dead_code)]

use std::sync::Arc;

use axum_test::multipart::{MultipartForm, Part};
use axum_test::{TestResponse, TestServer};
use axum::http::{HeaderName, HeaderValue};
use fileshare::{ApiKeyRepository, AppState, Capability, Database, FileStorage, KeyManager};
use tempfile::TempDir;

/// Upload limit used by test apps, in megabytes.
pub const TEST_UPLOAD_LIMIT_MB: u64 = 1;

/// A router under test with its backing stores.
pub struct TestApp {
    pub server: TestServer,
    pub db: Database,
    pub storage: FileStorage,
    _temp: TempDir,
}

impl TestApp {
    /// Create a test app with an empty storage root and database.
    pub async fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let db = Database::open_in_memory()
            .await
            .expect("Failed to create test database");
        let storage = FileStorage::new(temp.path()).expect("Failed to create storage");

        let app_state = Arc::new(AppState::new(&db, storage.clone(), 10, TEST_UPLOAD_LIMIT_MB));
        let router = fileshare::create_router(app_state);
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            db,
            storage,
            _temp: temp,
        }
    }

    /// Issue an enabled key directly through the key manager.
    pub async fn issue_key(&self, capability: Capability) -> String {
        let keys = KeyManager::new(Arc::new(ApiKeyRepository::new(self.db.pool())));
        keys.issue(capability)
            .await
            .expect("Failed to issue key")
            .key
    }

    /// Upload `content` as `filename`, optionally into the public subtree.
    pub async fn upload(
        &self,
        token: &str,
        filename: &str,
        content: &[u8],
        public: bool,
    ) -> TestResponse {
        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(content.to_vec()).file_name(filename.to_string()),
        );

        let mut request = self
            .server
            .post("/upload")
            .authorization_bearer(token)
            .multipart(form);
        if public {
            request = request.add_header(
                HeaderName::from_static("x-target-dir"),
                HeaderValue::from_static("public"),
            );
        }
        request.await
    }
}
