//! On-disk page cache
//!
//! Page bodies are stored as JSON files named by the SHA-256 of their URL.
//! Pages under the site origin never expire; everything else goes stale
//! after the configured TTL.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// A cached page body with the time it was fetched
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedPage {
    /// The URL the body was fetched from
    pub url: String,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,

    /// Page body content
    pub body: String,
}

impl CachedPage {
    /// Creates a new entry stamped with the current time
    pub fn new(url: &str, body: String) -> Self {
        Self {
            url: url.to_string(),
            fetched_at: Utc::now(),
            body,
        }
    }

    /// Checks if the entry is older than `ttl`
    pub fn is_stale(&self, ttl: Duration) -> bool {
        Utc::now() - self.fetched_at > ttl
    }
}

/// File cache shared by every fetch of a run
#[derive(Debug, Clone)]
pub struct PageCache {
    dir: PathBuf,
    origin: String,
    ttl: Duration,
}

impl PageCache {
    /// Creates a cache rooted at `dir`
    ///
    /// # Arguments
    ///
    /// * `dir` - Directory holding the cache entries (created on first write)
    /// * `origin` - URL prefix whose pages are cached forever
    /// * `ttl_secs` - Lifetime of entries outside the origin
    pub fn new(dir: impl Into<PathBuf>, origin: &str, ttl_secs: u64) -> Self {
        Self {
            dir: dir.into(),
            origin: origin.to_string(),
            ttl: Duration::seconds(ttl_secs.min(u64::from(u32::MAX)) as i64),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the cached body for `url`, if a fresh entry exists
    pub fn get(&self, url: &str) -> Option<String> {
        let path = self.entry_path(url);
        let content = std::fs::read_to_string(&path).ok()?;

        let entry: CachedPage = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!("Ignoring corrupt cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        // Hash collisions are not worth trusting
        if entry.url != url {
            return None;
        }

        if !self.is_forever(url) && entry.is_stale(self.ttl) {
            tracing::debug!("Cache entry for {} is stale", url);
            return None;
        }

        Some(entry.body)
    }

    /// Stores `body` for `url`; failures are logged and otherwise ignored
    pub fn put(&self, url: &str, body: &str) {
        if let Err(e) = self.try_put(url, body) {
            tracing::warn!("Failed to cache {}: {}", url, e);
        }
    }

    fn try_put(&self, url: &str, body: &str) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let entry = CachedPage::new(url, body.to_string());
        let json = serde_json::to_string(&entry)?;
        std::fs::write(self.entry_path(url), json)
    }

    /// Pages under the site origin are cached without expiry
    pub fn is_forever(&self, url: &str) -> bool {
        url.starts_with(&self.origin)
    }

    fn entry_path(&self, url: &str) -> PathBuf {
        self.dir.join(cache_key(url))
    }
}

/// Hex SHA-256 of the URL
pub fn cache_key(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    hex::encode(hasher.finalize())
}
