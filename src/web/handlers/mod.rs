//! API handlers for the fileshare HTTP surface.
//!
//! Handlers are thin: every capability check goes through
//! [`TokenAuthorizer`], every path through the storage sandbox and every
//! short code through [`ShortCodeRegistry`].

pub mod api_key;
pub mod file;
pub mod health;
pub mod short_link;

pub use api_key::{create_api_key, disable_api_key, enable_api_key};
pub use file::{download_file, upload_file};
pub use health::{health_check, random_uuid};
pub use short_link::{create_short_link, disable_short_link, enable_short_link, resolve_short_link};

use std::sync::Arc;

use crate::auth::{KeyManager, TokenAuthorizer};
use crate::db::{ApiKeyRepository, CredentialStore, Database, LinkStore, ShortLinkRepository};
use crate::file::FileStorage;
use crate::shortlink::ShortCodeRegistry;

/// Shared state for all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Sandboxed file storage.
    pub storage: FileStorage,
    /// Capability gate.
    pub authorizer: TokenAuthorizer,
    /// API key administration.
    pub keys: KeyManager,
    /// Short link allocation and resolution.
    pub registry: ShortCodeRegistry,
    /// Maximum upload size in bytes.
    pub max_upload_size: usize,
}

impl AppState {
    /// Create state backed by the sqlx repositories of `db`.
    pub fn new(
        db: &Database,
        storage: FileStorage,
        code_length: usize,
        max_upload_size_mb: u64,
    ) -> Self {
        Self::from_stores(
            Arc::new(ApiKeyRepository::new(db.pool())),
            Arc::new(ShortLinkRepository::new(db.pool())),
            storage,
            code_length,
            max_upload_size_mb,
        )
    }

    /// Create state over arbitrary store implementations.
    pub fn from_stores(
        credentials: Arc<dyn CredentialStore>,
        links: Arc<dyn LinkStore>,
        storage: FileStorage,
        code_length: usize,
        max_upload_size_mb: u64,
    ) -> Self {
        Self {
            storage,
            authorizer: TokenAuthorizer::new(credentials.clone()),
            keys: KeyManager::new(credentials),
            registry: ShortCodeRegistry::with_code_length(links, code_length),
            max_upload_size: (max_upload_size_mb as usize).saturating_mul(1024 * 1024),
        }
    }
}
