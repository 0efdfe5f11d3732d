//! Path sandbox for user-supplied filenames.
//!
//! Every filesystem path the service touches is produced here. A filename is
//! first sanitized down to a single segment, then joined under one of the two
//! fixed subtrees, then certified against the canonical sandbox root.
//!
//! ```text
//! {base_dir}/
//! ├── public/
//! │   └── notes.txt
//! └── private/
//!     └── report.pdf
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::{Result, ShareError};

/// Maximum length for a stored filename (in bytes).
pub const MAX_FILENAME_LENGTH: usize = 255;

/// One of the two fixed subtrees under the sandbox root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subtree {
    /// Readable without a credential.
    Public,
    /// Readable only with a download credential.
    Private,
}

impl Subtree {
    /// Lookup order when a name may exist in both subtrees.
    pub const PRECEDENCE: [Subtree; 2] = [Subtree::Public, Subtree::Private];

    /// Directory name under the sandbox root.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Subtree::Public => "public",
            Subtree::Private => "private",
        }
    }

    /// Whether files in this subtree need a download credential.
    pub fn is_private(&self) -> bool {
        matches!(self, Subtree::Private)
    }

    /// The subtree a link's recorded privacy flag points at.
    pub fn from_private(private: bool) -> Self {
        if private {
            Subtree::Private
        } else {
            Subtree::Public
        }
    }
}

impl fmt::Display for Subtree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Reduce a user-supplied filename to a single safe path segment.
///
/// Both `/` and `\` count as separators. Directory prefixes are stripped,
/// but any `..` segment rejects the whole name.
pub fn sanitize_filename(user_filename: &str) -> Result<String> {
    if user_filename.contains('\0') {
        return Err(ShareError::InvalidPath("filename contains NUL".to_string()));
    }

    let segments: Vec<&str> = user_filename.split(['/', '\\']).collect();
    if segments.iter().any(|s| *s == "..") {
        return Err(ShareError::InvalidPath(user_filename.to_string()));
    }

    let name = segments.last().copied().unwrap_or_default();
    if name.is_empty() || name == "." {
        return Err(ShareError::InvalidPath(format!(
            "no filename in {user_filename:?}"
        )));
    }
    if name.len() > MAX_FILENAME_LENGTH {
        return Err(ShareError::InvalidPath("filename too long".to_string()));
    }

    Ok(name.to_string())
}

/// Resolves filenames under a sandbox root and certifies containment.
#[derive(Debug, Clone)]
pub struct PathSandbox {
    base_dir: PathBuf,
}

impl PathSandbox {
    /// Create a sandbox rooted at `base_dir`. The directory is not touched.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// The configured root.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Canonical absolute form of the root. Fails if the root does not exist.
    pub fn canonical_base(&self) -> Result<PathBuf> {
        std::fs::canonicalize(&self.base_dir).map_err(|e| {
            ShareError::InvalidPath(format!("cannot canonicalize sandbox root: {e}"))
        })
    }

    /// Sanitize, compose and certify `base_dir/subtree/safe_name`.
    ///
    /// The certified path must also stay under the subtree's own root, so a
    /// link in one subtree never resolves to a file in the other. The file
    /// itself need not exist.
    pub fn resolve(&self, subtree: Subtree, user_filename: &str) -> Result<PathBuf> {
        let safe_name = sanitize_filename(user_filename)?;
        let candidate = self.base_dir.join(subtree.dir_name()).join(safe_name);
        let resolved = self.certify(&candidate)?;

        let root = self.canonical_base()?.join(subtree.dir_name());
        if resolved != root && resolved.starts_with(&root) {
            Ok(resolved)
        } else {
            Err(ShareError::InvalidPath(format!(
                "{} leaves the {} subtree",
                candidate.display(),
                subtree
            )))
        }
    }

    /// Certify that `candidate` lies strictly below the sandbox root.
    ///
    /// Both sides are canonicalized first, so symlinks pointing out of the
    /// root are rejected. Returns the canonical candidate.
    pub fn certify(&self, candidate: &Path) -> Result<PathBuf> {
        let base = self.canonical_base()?;
        let resolved = canonicalize_lenient(candidate)?;

        if resolved != base && resolved.starts_with(&base) {
            Ok(resolved)
        } else {
            Err(ShareError::InvalidPath(format!(
                "{} escapes the sandbox root",
                candidate.display()
            )))
        }
    }
}

/// Canonicalize a path whose trailing components may not exist yet.
///
/// The deepest existing ancestor is canonicalized and the remaining
/// components are appended. Those must be plain names.
fn canonicalize_lenient(path: &Path) -> Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();

    loop {
        match std::fs::canonicalize(existing) {
            Ok(mut resolved) => {
                for component in missing.iter().rev() {
                    resolved.push(component);
                }
                return Ok(resolved);
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // A dangling symlink has no canonical form to check.
                if existing.symlink_metadata().is_ok() {
                    return Err(ShareError::InvalidPath(format!(
                        "{} is a dangling link",
                        existing.display()
                    )));
                }
                let name = match existing.components().next_back() {
                    Some(Component::Normal(name)) => name,
                    _ => {
                        return Err(ShareError::InvalidPath(format!(
                            "cannot canonicalize {}",
                            path.display()
                        )))
                    }
                };
                missing.push(name.to_os_string());
                existing = match existing.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent,
                    Some(_) => Path::new("."),
                    None => {
                        return Err(ShareError::InvalidPath(format!(
                            "cannot canonicalize {}",
                            path.display()
                        )))
                    }
                };
            }
            Err(e) => {
                return Err(ShareError::InvalidPath(format!(
                    "cannot canonicalize {}: {e}",
                    path.display()
                )))
            }
        }
    }
}
