//! Short code allocation and resolution.

use std::sync::Arc;

use tracing::{debug, info, warn};

use super::code::{CodeGenerator, RandomCodeGenerator, MAX_ALLOCATION_ATTEMPTS};
use crate::db::{EnableOutcome, InsertOutcome, LinkStore, NewShortLink};
use crate::file::{sanitize_filename, FileStorage, Subtree};
use crate::{Result, ShareError};

/// What an enabled short code points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    /// Sanitized base name of the target file.
    pub target_filename: String,
    /// Whether the target was private when the link was created.
    pub private: bool,
}

impl ResolvedLink {
    /// Subtree the target is served from.
    pub fn subtree(&self) -> Subtree {
        Subtree::from_private(self.private)
    }
}

/// A freshly allocated link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocatedLink {
    /// The new short code.
    pub code: String,
    /// Sanitized base name of the target file.
    pub target_filename: String,
    /// Recorded privacy of the target.
    pub private: bool,
}

/// Allocates unique short codes and resolves them back to files.
///
/// Links move between enabled and disabled; there is no delete.
#[derive(Clone)]
pub struct ShortCodeRegistry {
    store: Arc<dyn LinkStore>,
    generator: Arc<dyn CodeGenerator>,
}

impl ShortCodeRegistry {
    /// Create a registry over a link store and a code source.
    pub fn new(store: Arc<dyn LinkStore>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self { store, generator }
    }

    /// Create a registry drawing random codes of `code_length` characters.
    pub fn with_code_length(store: Arc<dyn LinkStore>, code_length: usize) -> Self {
        Self::new(store, Arc::new(RandomCodeGenerator::new(code_length)))
    }

    /// Allocate a new enabled link to `target_filename`.
    ///
    /// A code already in the store, or one that a concurrent writer inserts
    /// first, costs one attempt. After [`MAX_ALLOCATION_ATTEMPTS`] the
    /// allocation fails with `Exhausted`.
    pub async fn allocate(&self, target_filename: &str, private: bool) -> Result<String> {
        let target_filename = sanitize_filename(target_filename)?;

        for attempt in 1..=MAX_ALLOCATION_ATTEMPTS {
            let code = self.generator.generate();

            if self.store.exists_by_code(&code).await? {
                debug!("Short code collision on attempt {}", attempt);
                continue;
            }

            let new_link = NewShortLink {
                short_code: code.clone(),
                original_filename: target_filename.clone(),
                is_private: private,
            };
            match self.store.insert(&new_link).await? {
                InsertOutcome::Inserted => {
                    info!(
                        "Allocated short code for {} (private: {})",
                        target_filename, private
                    );
                    return Ok(code);
                }
                InsertOutcome::Duplicate => {
                    debug!("Short code taken concurrently on attempt {}", attempt);
                }
            }
        }

        warn!(
            "Short code allocation exhausted after {} attempts",
            MAX_ALLOCATION_ATTEMPTS
        );
        Err(ShareError::Exhausted {
            attempts: MAX_ALLOCATION_ATTEMPTS,
        })
    }

    /// Allocate a link for a stored file, deriving privacy from its location.
    ///
    /// The file is looked up public first. A file in neither subtree fails
    /// with `NotFound` before any code is drawn.
    pub async fn allocate_for_file(
        &self,
        storage: &FileStorage,
        user_filename: &str,
    ) -> Result<AllocatedLink> {
        let target_filename = sanitize_filename(user_filename)?;
        let subtree = storage
            .locate(&target_filename)?
            .ok_or_else(|| ShareError::NotFound(format!("File {target_filename}")))?;

        let private = subtree.is_private();
        let code = self.allocate(&target_filename, private).await?;

        Ok(AllocatedLink {
            code,
            target_filename,
            private,
        })
    }

    /// Resolve an enabled code.
    ///
    /// Disabled and unknown codes are both `NotFound`.
    pub async fn resolve(&self, code: &str) -> Result<ResolvedLink> {
        match self.store.find_by_code(code).await? {
            Some(link) if link.is_enabled => Ok(ResolvedLink {
                target_filename: link.original_filename,
                private: link.is_private,
            }),
            _ => Err(ShareError::NotFound("Short link".to_string())),
        }
    }

    /// Enable or disable a link.
    ///
    /// No write is issued when the link already has the requested state.
    pub async fn set_enabled(&self, code: &str, enabled: bool) -> Result<EnableOutcome> {
        let link = self
            .store
            .find_by_code(code)
            .await?
            .ok_or_else(|| ShareError::NotFound("Short link".to_string()))?;

        if link.is_enabled == enabled {
            return Ok(EnableOutcome::Unchanged);
        }

        self.store.set_enabled(code, enabled).await?;
        info!(
            "Short link {}",
            if enabled { "enabled" } else { "disabled" }
        );
        Ok(EnableOutcome::Changed)
    }
}
