//! Authorization module for fileshare.
//!
//! API keys are scoped to exactly one [`Capability`]. [`TokenAuthorizer`]
//! is the single gate every capability-protected operation goes through;
//! [`KeyManager`] issues keys and toggles them.

mod capability;
mod keys;
mod token;

pub use capability::Capability;
pub use keys::KeyManager;
pub use token::{CredentialSources, TokenAuthorizer};
