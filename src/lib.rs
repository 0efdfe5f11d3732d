//! fileshare - a small file-sharing service.
//!
//! Files are uploaded into a sandboxed base directory, optionally published
//! behind short codes, and every privileged operation is gated by
//! capability-scoped API keys.

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod file;
pub mod logging;
pub mod shortlink;
pub mod web;

pub use auth::{Capability, CredentialSources, KeyManager, TokenAuthorizer};
pub use config::Config;
pub use db::{
    ApiKey, ApiKeyRepository, CredentialStore, Database, EnableOutcome, InsertOutcome, LinkStore,
    ShortLink, ShortLinkRepository,
};
pub use error::{Result, ShareError};
pub use file::{sanitize_filename, FileStorage, PathSandbox, Subtree};
pub use shortlink::{CodeGenerator, RandomCodeGenerator, ResolvedLink, ShortCodeRegistry};
pub use web::{create_router, AppState, WebServer};
