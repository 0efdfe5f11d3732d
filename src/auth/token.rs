//! Bearer token extraction and capability checks.

use std::sync::Arc;

use tracing::{debug, warn};

use super::Capability;
use crate::db::CredentialStore;
use crate::{Result, ShareError};

/// The places a request may carry its credential.
///
/// Only two sources exist: the `Authorization` header and the `token` query
/// parameter. Nothing else is ever consulted.
#[derive(Debug, Clone, Default)]
pub struct CredentialSources {
    authorization: Option<String>,
    query: Option<String>,
}

impl CredentialSources {
    /// Build from the raw `Authorization` header value and raw query string.
    pub fn new(authorization: Option<&str>, query: Option<&str>) -> Self {
        Self {
            authorization: authorization.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    /// Sources carrying only an `Authorization: Bearer` header.
    pub fn bearer(token: &str) -> Self {
        Self::new(Some(&format!("Bearer {token}")), None)
    }

    /// Extract the credential, first match wins.
    ///
    /// A `Bearer ` header shadows the query parameter even when its value is
    /// empty; callers treat an empty credential as a failure.
    pub fn token(&self) -> Option<String> {
        if let Some(value) = self
            .authorization
            .as_deref()
            .and_then(|h| h.strip_prefix("Bearer "))
        {
            return Some(value.trim().to_string());
        }

        self.query.as_deref().and_then(query_token)
    }
}

/// Take the first `token` parameter in a raw query string.
///
/// Later `token` parameters are never consulted. A value that does not
/// decode yields an empty credential.
fn query_token(query: &str) -> Option<String> {
    let value = query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        (key == "token").then_some(value)
    })?;

    Some(
        urlencoding::decode(value)
            .map(|s| s.into_owned())
            .unwrap_or_default(),
    )
}

/// Decides whether a request's credential grants a capability.
#[derive(Clone)]
pub struct TokenAuthorizer {
    store: Arc<dyn CredentialStore>,
}

impl TokenAuthorizer {
    /// Create an authorizer over a credential store.
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Whether the request is authorized for `required`.
    ///
    /// Store failures are logged and reported as "not authorized".
    pub async fn authorize(&self, sources: &CredentialSources, required: Capability) -> bool {
        match self.check(sources, required).await {
            Ok(authorized) => authorized,
            Err(e) => {
                warn!("Credential lookup failed for {} check: {}", required, e);
                false
            }
        }
    }

    /// Like [`authorize`](Self::authorize), but surfaces store failures.
    ///
    /// `Ok(false)` covers a missing, empty, unknown, wrong-capability or
    /// disabled credential alike.
    pub async fn check(&self, sources: &CredentialSources, required: Capability) -> Result<bool> {
        let Some(secret) = sources.token() else {
            debug!("No credential supplied for {}", required);
            return Ok(false);
        };
        if secret.is_empty() {
            return Ok(false);
        }

        let key = self
            .store
            .find_by_credential_and_capability(&secret, required)
            .await?;

        Ok(matches!(key, Some(k) if k.is_enabled && k.capability() == Some(required)))
    }

    /// Fail with `Unauthorized` unless the request is authorized.
    ///
    /// A store failure is a denial like any other.
    pub async fn require(&self, sources: &CredentialSources, required: Capability) -> Result<()> {
        if self.authorize(sources, required).await {
            Ok(())
        } else {
            Err(ShareError::Unauthorized)
        }
    }
}
