//! Upload policy resolved once at startup.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into the request handlers. The intent is to avoid
//! reading process-wide environment variables during request handling, which
//! can lead to inconsistent behaviour in multi-threaded runtimes and test
//! harnesses.

use crate::StoreError;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Default request body cap in MiB when no override is configured.
pub const DEFAULT_MAX_UPLOAD_MB: u64 = 8;

/// Immutable upload validation policy.
///
/// Holds everything the upload path needs to decide whether a file is
/// acceptable: the body size cap, the allowed extension set, the required
/// declared MIME type, and the storage directory. Constructed once at startup
/// and shared by reference; there is no ambient global state.
#[derive(Clone, Debug)]
pub struct UploadPolicy {
    storage_dir: PathBuf,
    max_upload_bytes: usize,
    allowed_extensions: BTreeSet<String>,
    required_mime: String,
}

impl UploadPolicy {
    /// Create a new `UploadPolicy`.
    ///
    /// Extensions are stored case-folded; matching is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidPolicy` if the size cap is zero, the
    /// extension set is empty, or the required MIME type is blank.
    pub fn new(
        storage_dir: PathBuf,
        max_upload_bytes: usize,
        allowed_extensions: impl IntoIterator<Item = impl AsRef<str>>,
        required_mime: impl Into<String>,
    ) -> Result<Self, StoreError> {
        if max_upload_bytes == 0 {
            return Err(StoreError::InvalidPolicy(
                "max upload size cannot be zero".into(),
            ));
        }

        let allowed_extensions: BTreeSet<String> = allowed_extensions
            .into_iter()
            .map(|e| e.as_ref().trim().to_ascii_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        if allowed_extensions.is_empty() {
            return Err(StoreError::InvalidPolicy(
                "allowed extension set cannot be empty".into(),
            ));
        }

        let required_mime = required_mime.into();
        if required_mime.trim().is_empty() {
            return Err(StoreError::InvalidPolicy(
                "required MIME type cannot be empty".into(),
            ));
        }

        Ok(Self {
            storage_dir,
            max_upload_bytes,
            allowed_extensions,
            required_mime,
        })
    }

    pub fn storage_dir(&self) -> &Path {
        &self.storage_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn allowed_extensions(&self) -> impl Iterator<Item = &str> {
        self.allowed_extensions.iter().map(String::as_str)
    }

    pub fn required_mime(&self) -> &str {
        &self.required_mime
    }

    /// Allow-list check for an incoming file.
    ///
    /// A file passes only if BOTH hold:
    ///
    /// - the declared filename contains a `.` and the substring after the
    ///   last `.` (case-folded) is in the allowed extension set, and
    /// - the declared MIME type exactly equals the required type string.
    ///
    /// A missing filename or missing MIME type fails unconditionally. The
    /// inputs are client-declared and untrusted; this check gates every
    /// write and cannot be skipped by any client-supplied override.
    #[must_use]
    pub fn is_allowed_file(&self, filename: Option<&str>, mime: Option<&str>) -> bool {
        let Some(filename) = filename else {
            return false;
        };
        let Some(mime) = mime else {
            return false;
        };

        let Some((_, extension)) = filename.rsplit_once('.') else {
            return false;
        };

        self.allowed_extensions
            .contains(&extension.to_ascii_lowercase())
            && mime == self.required_mime
    }
}
