//! File management module for fileshare.
//!
//! This module provides the path sandbox and the storage built on it:
//! - Filename sanitization and containment certification
//! - Public/private subtrees with public-first lookup
//! - Save and load operations

mod sandbox;
mod storage;

pub use sandbox::{sanitize_filename, PathSandbox, Subtree, MAX_FILENAME_LENGTH};
pub use storage::FileStorage;
