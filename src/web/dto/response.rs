//! Response DTOs for Web API.

use serde::Serialize;

use crate::db::ApiKey;

/// Generic API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a new API response.
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Health check response. Not wrapped in [`ApiResponse`].
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `UP` while the process serves requests.
    pub status: &'static str,
}

/// Random UUID response.
#[derive(Debug, Serialize)]
pub struct UuidResponse {
    /// A fresh UUIDv4.
    pub uuid: String,
}

/// Plain message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Human-readable message.
    pub message: String,
}

impl MessageResponse {
    /// Create a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// File upload response.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Stored (sanitized) filename.
    pub filename: String,
    /// Whether the file went into the private subtree.
    pub is_private: bool,
    /// Path the file can be downloaded from.
    pub download_path: String,
}

/// Short link creation response.
#[derive(Debug, Serialize)]
pub struct ShortLinkResponse {
    /// The new short code.
    pub short_code: String,
    /// Path the link resolves at.
    pub short_url_path: String,
    /// Target filename.
    pub filename: String,
    /// Whether downloading through the link needs a credential.
    pub is_private: bool,
}

/// API key response.
#[derive(Debug, Serialize)]
pub struct ApiKeyResponse {
    /// Bearer secret.
    pub key: String,
    /// Capability name.
    #[serde(rename = "type")]
    pub key_type: String,
    /// Whether the key is enabled.
    pub is_enabled: bool,
}

impl From<ApiKey> for ApiKeyResponse {
    fn from(key: ApiKey) -> Self {
        Self {
            key: key.key,
            key_type: key.key_type,
            is_enabled: key.is_enabled,
        }
    }
}
