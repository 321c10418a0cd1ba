//! Flat-directory file store for uploaded results.
//!
//! The store owns one directory and nothing else. Files are written with
//! atomic exclusive creation, so a name can be claimed exactly once; a
//! duplicate upload observes `DuplicateFile` rather than racing a separate
//! existence check against the write.

use crate::{sanitize_filename, StoreError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Service for persisting uploaded files into a single flat directory.
///
/// # Design
///
/// - Directory-scoped: each store instance is bound to one storage directory
/// - Immutable: files are never modified or overwritten after creation
/// - Defensive: only names already in sanitized form are accepted, so a
///   stored path can never escape the storage directory
#[derive(Debug)]
pub struct FileStore {
    storage_dir: PathBuf,
}

impl FileStore {
    /// Opens a store over `storage_dir`, creating the directory if needed.
    ///
    /// Creation is idempotent; an existing directory is reused as-is. The
    /// path is canonicalised after creation so that later joins resolve
    /// against a fixed absolute root.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidStorageDir` if the path exists but is not
    /// a directory, or if creation/canonicalisation fails.
    pub fn open(storage_dir: &Path) -> Result<Self, StoreError> {
        std::fs::create_dir_all(storage_dir).map_err(|e| {
            StoreError::InvalidStorageDir(format!(
                "Cannot create storage directory {}: {}",
                storage_dir.display(),
                e
            ))
        })?;

        if !storage_dir.is_dir() {
            return Err(StoreError::InvalidStorageDir(format!(
                "Path is not a directory: {}",
                storage_dir.display()
            )));
        }

        let storage_dir = storage_dir.canonicalize().map_err(|e| {
            StoreError::InvalidStorageDir(format!(
                "Cannot canonicalize path {}: {}",
                storage_dir.display(),
                e
            ))
        })?;

        Ok(Self { storage_dir })
    }

    /// Writes `payload` to `<storage_dir>/<name>`, claiming the name
    /// atomically.
    ///
    /// The write uses `create_new`, so the filesystem itself rejects a second
    /// file of the same name; two concurrent uploads of one name cannot both
    /// succeed and an existing file is never touched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if:
    /// - `name` is not in sanitized form (`UnsafeFilename`) — callers are
    ///   expected to have run [`sanitize_filename`] already
    /// - a file with this name already exists (`DuplicateFile`)
    /// - the file cannot be created or written (I/O)
    pub fn save(&self, name: &str, payload: &[u8]) -> Result<(), StoreError> {
        if name.is_empty() || sanitize_filename(name) != name {
            return Err(StoreError::UnsafeFilename(name.to_string()));
        }

        let path = self.storage_dir.join(name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => StoreError::DuplicateFile(name.to_string()),
                _ => StoreError::Io(e),
            })?;

        file.write_all(payload)?;
        Ok(())
    }

    /// Returns whether a file named `name` exists in the store.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.storage_dir.join(name).is_file()
    }

    /// Returns the storage directory this store is bound to.
    #[must_use]
    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }
}
