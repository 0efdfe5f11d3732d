//! API key repository.

use async_trait::async_trait;

use super::{CredentialStore, DbPool, InsertOutcome};
use crate::auth::Capability;
use crate::Result;

/// API key entity.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ApiKey {
    /// Row ID.
    pub id: i64,
    /// Bearer secret.
    pub key: String,
    /// Capability name as stored.
    pub key_type: String,
    /// Whether the key authorizes anything.
    pub is_enabled: bool,
    /// Creation timestamp.
    pub created_at: String,
}

impl ApiKey {
    /// Capability this key is scoped to, if the stored name is recognized.
    pub fn capability(&self) -> Option<Capability> {
        Capability::parse(&self.key_type)
    }
}

/// New API key for creation.
#[derive(Debug, Clone)]
pub struct NewApiKey {
    /// Bearer secret.
    pub key: String,
    /// Capability the key is scoped to.
    pub capability: Capability,
    /// Initial enabled flag.
    pub is_enabled: bool,
}

impl NewApiKey {
    /// Create an enabled key.
    pub fn new(key: impl Into<String>, capability: Capability) -> Self {
        Self {
            key: key.into(),
            capability,
            is_enabled: true,
        }
    }

    /// Set the initial enabled flag.
    pub fn with_enabled(mut self, is_enabled: bool) -> Self {
        self.is_enabled = is_enabled;
        self
    }
}

/// sqlx-backed credential store.
#[derive(Clone)]
pub struct ApiKeyRepository {
    pool: DbPool,
}

impl ApiKeyRepository {
    /// Create a new repository instance.
    pub fn new(pool: &DbPool) -> Self {
        Self { pool: pool.clone() }
    }
}

#[async_trait]
impl CredentialStore for ApiKeyRepository {
    async fn find_by_credential_and_capability(
        &self,
        secret: &str,
        capability: Capability,
    ) -> Result<Option<ApiKey>> {
        let key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, key_type, is_enabled, created_at
             FROM api_keys WHERE key = $1 AND key_type = $2",
        )
        .bind(secret)
        .bind(capability.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>> {
        let key = sqlx::query_as::<_, ApiKey>(
            "SELECT id, key, key_type, is_enabled, created_at
             FROM api_keys WHERE key = $1",
        )
        .bind(secret)
        .fetch_optional(&self.pool)
        .await?;

        Ok(key)
    }

    async fn insert(&self, new_key: &NewApiKey) -> Result<InsertOutcome> {
        let result = sqlx::query("INSERT INTO api_keys (key, key_type, is_enabled) VALUES ($1, $2, $3)")
            .bind(&new_key.key)
            .bind(new_key.capability.as_str())
            .bind(new_key.is_enabled)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(InsertOutcome::Inserted),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Ok(InsertOutcome::Duplicate),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_enabled(&self, secret: &str, enabled: bool) -> Result<()> {
        sqlx::query("UPDATE api_keys SET is_enabled = $1 WHERE key = $2")
            .bind(enabled)
            .bind(secret)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
