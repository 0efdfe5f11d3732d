//! Credential extraction for handlers.

use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::auth::CredentialSources;

/// The credential sources of a request.
///
/// Extraction never fails; whether the credential is good for a capability
/// is decided by [`TokenAuthorizer`](crate::auth::TokenAuthorizer).
#[derive(Debug, Clone)]
pub struct RequestCredentials(pub CredentialSources);

#[async_trait]
impl<S> FromRequestParts<S> for RequestCredentials
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Ok(RequestCredentials(CredentialSources::new(
            authorization,
            parts.uri.query(),
        )))
    }
}
