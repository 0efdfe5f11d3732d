//! Middleware for Web API.

pub mod auth;
pub mod security;

pub use auth::RequestCredentials;
pub use security::security_headers;
