//! Store interfaces consumed by the access-control core.
//!
//! Components receive these as `Arc<dyn …>` at construction, so the core
//! never reaches for a process-wide connection handle. `ApiKeyRepository`
//! and `ShortLinkRepository` are the sqlx-backed implementations; tests
//! substitute in-memory fakes.

use async_trait::async_trait;

use crate::auth::Capability;
use crate::db::{ApiKey, NewApiKey, NewShortLink, ShortLink};
use crate::Result;

/// Result of an insert against a uniqueness constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// The row was written.
    Inserted,
    /// A row with the same unique value already exists; nothing was written.
    Duplicate,
}

/// Result of an idempotent enable/disable request.
///
/// Both variants are successes; `Unchanged` means no write was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnableOutcome {
    /// The stored flag was flipped.
    Changed,
    /// The stored flag already had the requested value.
    Unchanged,
}

/// Persistent store of API keys.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Find a key whose secret and capability both match.
    ///
    /// Disabled keys are returned too; the caller checks `is_enabled`.
    async fn find_by_credential_and_capability(
        &self,
        secret: &str,
        capability: Capability,
    ) -> Result<Option<ApiKey>>;

    /// Find a key by secret alone.
    async fn find_by_secret(&self, secret: &str) -> Result<Option<ApiKey>>;

    /// Insert a new key.
    async fn insert(&self, new_key: &NewApiKey) -> Result<InsertOutcome>;

    /// Set the enabled flag of a key.
    async fn set_enabled(&self, secret: &str, enabled: bool) -> Result<()>;
}

/// Persistent store of short links.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Find a link by code, enabled or not.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>>;

    /// Check whether a code is already taken.
    async fn exists_by_code(&self, code: &str) -> Result<bool>;

    /// Insert a new link.
    async fn insert(&self, new_link: &NewShortLink) -> Result<InsertOutcome>;

    /// Set the enabled flag of a link.
    async fn set_enabled(&self, code: &str, enabled: bool) -> Result<()>;
}
