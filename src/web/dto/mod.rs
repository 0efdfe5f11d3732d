//! Request and response bodies of the HTTP API.
//!
//! Every successful JSON response except `/health` is wrapped in
//! [`ApiResponse`] as `{"data": ...}`.

pub mod request;
pub mod response;

pub use request::{CreateApiKeyRequest, ShortenRequest};
pub use response::{
    ApiKeyResponse, ApiResponse, HealthResponse, MessageResponse, ShortLinkResponse,
    UploadResponse, UuidResponse,
};
