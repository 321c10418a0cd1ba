//! Server-side HTTP configuration.
//!
//! Like the upload policy, this is resolved once at startup from the
//! environment (in `main`) and then passed in; request handlers never read
//! environment variables.

use std::path::{Path, PathBuf};

/// Immutable HTTP surface configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    base_path: String,
    public_dir: PathBuf,
    allowed_domain: Option<String>,
}

impl ServerConfig {
    /// Create a new `ServerConfig`.
    ///
    /// `base_path` is normalised: blank input becomes the empty prefix,
    /// anything else gains a leading `/` and loses trailing `/`s, so it can
    /// be passed straight to `Router::nest`.
    pub fn new(
        base_path: impl AsRef<str>,
        public_dir: PathBuf,
        allowed_domain: Option<String>,
    ) -> Self {
        let trimmed = base_path.as_ref().trim().trim_end_matches('/');
        let base_path = if trimmed.is_empty() {
            String::new()
        } else if trimmed.starts_with('/') {
            trimmed.to_string()
        } else {
            format!("/{trimmed}")
        };

        Self {
            base_path,
            public_dir,
            allowed_domain: allowed_domain
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        }
    }

    /// Base URL path prefix; empty string means "mounted at the root".
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    pub fn allowed_domain(&self) -> Option<&str> {
        self.allowed_domain.as_deref()
    }
}

/// Derives the CORS origin allow-list from the configured domain.
///
/// A pure mapping: `None` (or blank) means cross-origin access is not
/// granted at all, which is the secure default rather than an error. A
/// configured domain is stripped of any scheme prefix and trailing slashes
/// and yields exactly two origins, `https://<domain>` and `http://<domain>`.
#[must_use]
pub fn cors_allowed_origins(domain: Option<&str>) -> Option<[String; 2]> {
    let domain = domain?.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    let domain = domain.trim_end_matches('/');
    if domain.is_empty() {
        return None;
    }

    Some([format!("https://{domain}"), format!("http://{domain}")])
}
