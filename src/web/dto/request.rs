//! Request DTOs for Web API.

use serde::Deserialize;

/// Short link creation request.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    /// Name of a stored file.
    pub filename: String,
}

/// API key creation request.
#[derive(Debug, Deserialize)]
pub struct CreateApiKeyRequest {
    /// Capability name (`upload`, `download`, `shorten`, `administer`).
    #[serde(rename = "type")]
    pub key_type: String,
}
