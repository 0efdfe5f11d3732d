//! File storage for fileshare.
//!
//! Files are stored under their sanitized names in one of two subtrees:
//! ```text
//! {base_path}/
//! ├── public/
//! └── private/
//! ```
//! Every path is produced by [`PathSandbox::resolve`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::sandbox::{sanitize_filename, PathSandbox, Subtree};
use crate::{Result, ShareError};

/// File storage service for the sandboxed base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    sandbox: PathSandbox,
}

impl FileStorage {
    /// Create a new FileStorage rooted at `base_path`.
    ///
    /// The `public` and `private` subtrees are created if they don't exist.
    pub fn new(base_path: impl Into<PathBuf>) -> Result<Self> {
        let base_path = base_path.into();
        for subtree in Subtree::PRECEDENCE {
            fs::create_dir_all(base_path.join(subtree.dir_name()))?;
        }

        Ok(Self {
            sandbox: PathSandbox::new(base_path),
        })
    }

    /// Get the base path of this storage.
    pub fn base_path(&self) -> &Path {
        self.sandbox.base_dir()
    }

    /// The sandbox every path goes through.
    pub fn sandbox(&self) -> &PathSandbox {
        &self.sandbox
    }

    /// Save content under the sanitized form of `user_filename`.
    ///
    /// An existing file of the same name is overwritten. Returns the stored
    /// name.
    pub fn save(&self, subtree: Subtree, user_filename: &str, content: &[u8]) -> Result<String> {
        let stored_name = sanitize_filename(user_filename)?;
        let file_path = self.sandbox.resolve(subtree, &stored_name)?;

        fs::write(&file_path, content)?;

        Ok(stored_name)
    }

    /// Load content from a subtree.
    pub fn load(&self, subtree: Subtree, name: &str) -> Result<Vec<u8>> {
        let file_path = self.sandbox.resolve(subtree, name)?;

        match fs::read(&file_path) {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ShareError::NotFound(format!("File {name}")))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Check if a regular file exists in a subtree.
    ///
    /// Names the sandbox rejects do not exist.
    pub fn exists(&self, subtree: Subtree, name: &str) -> bool {
        self.sandbox
            .resolve(subtree, name)
            .map(|path| path.is_file())
            .unwrap_or(false)
    }

    /// Find which subtree holds `name`, public first.
    ///
    /// Only an invalid name is an error. A candidate the sandbox rejects,
    /// such as a dangling link, counts as absent from that subtree.
    pub fn locate(&self, name: &str) -> Result<Option<Subtree>> {
        let safe_name = sanitize_filename(name)?;

        Ok(Subtree::PRECEDENCE
            .into_iter()
            .find(|subtree| self.exists(*subtree, &safe_name)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_new_creates_subtrees() {
        let (storage, _temp) = create_test_storage();
        assert!(storage.base_path().join("public").is_dir());
        assert!(storage.base_path().join("private").is_dir());
    }

    #[test]
    fn test_save_and_load() {
        let (storage, _temp) = create_test_storage();
        let content = b"Hello, World!";

        let stored_name = storage.save(Subtree::Private, "hello.txt", content).unwrap();
        assert_eq!(stored_name, "hello.txt");

        let loaded = storage.load(Subtree::Private, &stored_name).unwrap();
        assert_eq!(loaded, content);
    }

    #[test]
    fn test_save_strips_directories() {
        let (storage, _temp) = create_test_storage();

        let stored_name = storage.save(Subtree::Public, "nested/dir/a.bin", b"x").unwrap();
        assert_eq!(stored_name, "a.bin");
        assert!(storage.base_path().join("public").join("a.bin").is_file());
    }

    #[test]
    fn test_save_rejects_traversal() {
        let (storage, _temp) = create_test_storage();

        let result = storage.save(Subtree::Public, "../escape.txt", b"x");
        assert!(matches!(result, Err(ShareError::InvalidPath(_))));
        assert!(!storage.base_path().join("escape.txt").exists());
    }

    #[test]
    fn test_save_overwrites() {
        let (storage, _temp) = create_test_storage();
        storage.save(Subtree::Public, "a.txt", b"one").unwrap();
        storage.save(Subtree::Public, "a.txt", b"two").unwrap();

        assert_eq!(storage.load(Subtree::Public, "a.txt").unwrap(), b"two");
    }

    #[test]
    fn test_load_nonexistent() {
        let (storage, _temp) = create_test_storage();
        let result = storage.load(Subtree::Public, "missing.txt");
        assert!(matches!(result, Err(ShareError::NotFound(_))));
    }

    #[test]
    fn test_load_wrong_subtree() {
        let (storage, _temp) = create_test_storage();
        storage.save(Subtree::Private, "secret.txt", b"s").unwrap();

        assert!(storage.load(Subtree::Public, "secret.txt").is_err());
    }

    #[test]
    fn test_exists() {
        let (storage, _temp) = create_test_storage();
        assert!(!storage.exists(Subtree::Public, "a.txt"));

        storage.save(Subtree::Public, "a.txt", b"x").unwrap();
        assert!(storage.exists(Subtree::Public, "a.txt"));
        assert!(!storage.exists(Subtree::Private, "a.txt"));
        assert!(!storage.exists(Subtree::Public, "../a.txt"));
    }

    #[test]
    fn test_exists_ignores_directories() {
        let (storage, _temp) = create_test_storage();
        fs::create_dir_all(storage.base_path().join("public").join("dir")).unwrap();
        assert!(!storage.exists(Subtree::Public, "dir"));
    }

    #[test]
    fn test_locate_public_wins() {
        let (storage, _temp) = create_test_storage();
        storage.save(Subtree::Private, "both.txt", b"private").unwrap();
        assert_eq!(storage.locate("both.txt").unwrap(), Some(Subtree::Private));

        storage.save(Subtree::Public, "both.txt", b"public").unwrap();
        assert_eq!(storage.locate("both.txt").unwrap(), Some(Subtree::Public));

        assert_eq!(storage.locate("none.txt").unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_locate_skips_rejected_public_candidate() {
        let (storage, temp) = create_test_storage();
        storage.save(Subtree::Private, "report.txt", b"private").unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("gone.txt"),
            temp.path().join("public").join("report.txt"),
        )
        .unwrap();

        assert_eq!(storage.locate("report.txt").unwrap(), Some(Subtree::Private));
    }

    #[test]
    fn test_locate_invalid_name() {
        let (storage, _temp) = create_test_storage();
        assert!(matches!(
            storage.locate("../../etc/passwd"),
            Err(ShareError::InvalidPath(_))
        ));
    }
}
