//! API key issuance and enable/disable administration.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use super::Capability;
use crate::db::{ApiKey, CredentialStore, EnableOutcome, InsertOutcome, NewApiKey};
use crate::{Result, ShareError};

/// Issues API keys and toggles their enabled flag.
#[derive(Clone)]
pub struct KeyManager {
    store: Arc<dyn CredentialStore>,
}

impl KeyManager {
    /// Create a key manager over a credential store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Issue a new enabled key with a random UUIDv4 secret.
    pub async fn issue(&self, capability: Capability) -> Result<ApiKey> {
        let secret = Uuid::new_v4().to_string();

        match self.store.insert(&NewApiKey::new(&secret, capability)).await? {
            InsertOutcome::Inserted => {}
            InsertOutcome::Duplicate => {
                return Err(ShareError::Conflict("API key already exists".to_string()));
            }
        }

        info!("Issued {} API key", capability);

        self.store
            .find_by_secret(&secret)
            .await?
            .ok_or_else(|| ShareError::NotFound("API key".to_string()))
    }

    /// Set a key's enabled flag.
    ///
    /// No write is issued when the key already has the requested state.
    pub async fn set_enabled(&self, secret: &str, enabled: bool) -> Result<EnableOutcome> {
        let secret = secret.trim();
        if secret.is_empty() {
            return Err(ShareError::Validation("API key must not be empty".to_string()));
        }

        let key = self
            .store
            .find_by_secret(secret)
            .await?
            .ok_or_else(|| ShareError::NotFound("API key".to_string()))?;

        if key.is_enabled == enabled {
            return Ok(EnableOutcome::Unchanged);
        }

        self.store.set_enabled(secret, enabled).await?;
        info!(
            "API key {} ({})",
            if enabled { "enabled" } else { "disabled" },
            key.key_type
        );
        Ok(EnableOutcome::Changed)
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::auth::{CredentialSources, TokenAuthorizer};
    use crate::db::{ApiKeyRepository, Database};

    async fn setup() -> (Database, Arc<dyn CredentialStore>) {
        let db = Database::open_in_memory().await.unwrap();
        let store: Arc<dyn CredentialStore> = Arc::new(ApiKeyRepository::new(db.pool()));
        (db, store)
    }

    #[tokio::test]
    async fn test_issue_key() {
        let (_db, store) = setup().await;
        let keys = KeyManager::new(store);

        let key = keys.issue(Capability::Upload).await.unwrap();

        assert!(Uuid::parse_str(&key.key).is_ok());
        assert_eq!(key.capability(), Some(Capability::Upload));
        assert!(key.is_enabled);
    }

    #[tokio::test]
    async fn test_issued_keys_are_distinct() {
        let (_db, store) = setup().await;
        let keys = KeyManager::new(store);

        let a = keys.issue(Capability::Download).await.unwrap();
        let b = keys.issue(Capability::Download).await.unwrap();
        assert_ne!(a.key, b.key);
    }

    #[tokio::test]
    async fn test_disable_then_enable() {
        let (_db, store) = setup().await;
        let keys = KeyManager::new(store.clone());
        let authorizer = TokenAuthorizer::new(store);
        let key = keys.issue(Capability::Shorten).await.unwrap();
        let sources = CredentialSources::bearer(&key.key);

        assert_eq!(
            keys.set_enabled(&key.key, false).await.unwrap(),
            EnableOutcome::Changed
        );
        assert!(!authorizer.authorize(&sources, Capability::Shorten).await);

        assert_eq!(
            keys.set_enabled(&key.key, false).await.unwrap(),
            EnableOutcome::Unchanged
        );

        assert_eq!(
            keys.set_enabled(&key.key, true).await.unwrap(),
            EnableOutcome::Changed
        );
        assert!(authorizer.authorize(&sources, Capability::Shorten).await);
    }

    #[tokio::test]
    async fn test_set_enabled_trims_secret() {
        let (_db, store) = setup().await;
        let keys = KeyManager::new(store);
        let key = keys.issue(Capability::Upload).await.unwrap();

        let padded = format!("  {}  ", key.key);
        assert_eq!(
            keys.set_enabled(&padded, true).await.unwrap(),
            EnableOutcome::Unchanged
        );
    }

    #[tokio::test]
    async fn test_set_enabled_unknown_or_blank() {
        let (_db, store) = setup().await;
        let keys = KeyManager::new(store);

        assert!(matches!(
            keys.set_enabled("missing", false).await,
            Err(ShareError::NotFound(_))
        ));
        assert!(matches!(
            keys.set_enabled("   ", false).await,
            Err(ShareError::Validation(_))
        ));
    }
}
