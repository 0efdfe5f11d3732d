//! Web API module for fileshare.
//!
//! This module exposes upload, download, short link and API key
//! administration over HTTP. It is plumbing around the `auth`, `file` and
//! `shortlink` cores.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use handlers::AppState;
pub use router::create_router;
pub use server::WebServer;
