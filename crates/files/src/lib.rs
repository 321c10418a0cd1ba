//! CogKit File Storage
//!
//! This crate provides the storage core for the CogKit results server: the
//! upload allow-list policy, untrusted-filename sanitization, and a
//! flat-directory file store for uploaded result CSVs.
//!
//! ## Design Principles
//!
//! - Client-supplied filenames and MIME types are untrusted input
//! - A file is stored only after it passes the extension and MIME allow-list
//! - Stored names are produced by one shared sanitization function, the same
//!   one used to vet static asset paths, so the two cannot drift
//! - Stored files are immutable once created (a duplicate name is an error,
//!   never an overwrite)
//! - Writes use atomic exclusive creation, so two concurrent uploads of the
//!   same name cannot both succeed
//!
//! ## Storage Layout
//!
//! A single flat directory of sanitized-named files:
//!
//! ```text
//! <storage_dir>/
//! ├── data.csv
//! ├── stroop_run_2.csv
//! └── …
//! ```
//!
//! No index, manifest, or metadata sidecar is maintained.
//!
//! ## Example Usage
//!
//! ```no_run
//! use cogkit_files::{FileStore, UploadPolicy};
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let policy = UploadPolicy::new(
//!     PathBuf::from("uploads"),
//!     8 * 1024 * 1024,
//!     ["csv"],
//!     "text/csv",
//! )?;
//! let store = FileStore::open(policy.storage_dir())?;
//! store.save("data.csv", b"trial,rt\n1,412\n")?;
//! # Ok(())
//! # }
//! ```

mod policy;
mod sanitize;
mod store;

pub use policy::{UploadPolicy, DEFAULT_MAX_UPLOAD_MB};
pub use sanitize::sanitize_filename;
pub use store::FileStore;

/// Errors that can occur during storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Storage directory does not exist, is not a directory, or cannot be prepared
    #[error("Invalid storage directory: {0}")]
    InvalidStorageDir(String),

    /// Policy configuration rejected at construction time
    #[error("Invalid upload policy: {0}")]
    InvalidPolicy(String),

    /// Filename is not in sanitized form (potential traversal or unsafe characters)
    #[error("Unsafe filename: {0:?}")]
    UnsafeFilename(String),

    /// A file with this name already exists (immutability violation)
    #[error("File {0:?} already exists in storage")]
    DuplicateFile(String),

    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
