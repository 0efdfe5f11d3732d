//! Short link module for fileshare.
//!
//! [`ShortCodeRegistry`] hands out unguessable codes for stored files and
//! resolves them back, hiding disabled links behind `NotFound`.

mod code;
mod registry;

pub use code::{CodeGenerator, RandomCodeGenerator, DEFAULT_CODE_LENGTH, MAX_ALLOCATION_ATTEMPTS};
pub use registry::{AllocatedLink, ResolvedLink, ShortCodeRegistry};
