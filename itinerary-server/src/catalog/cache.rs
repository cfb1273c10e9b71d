//! Disk-based cache of the last good catalog.
//!
//! Lets the service plan trips straight after a restart even while the
//! content store is unreachable.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CatalogError;
use super::record::AttractionRecord;

/// Records older than this are not served from disk.
const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

const DEFAULT_FILE: &str = "attractions_cache.json";

/// On-disk layout.
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    written_at: DateTime<Utc>,
    attractions: Vec<AttractionRecord>,
}

/// Where the catalog cache lives and how long it stays usable.
#[derive(Debug, Clone)]
pub struct CatalogCacheConfig {
    pub path: PathBuf,
    pub ttl: Duration,
}

impl CatalogCacheConfig {
    /// Cache at `path`, usable for 24 hours after it is written.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ttl: DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

impl Default for CatalogCacheConfig {
    fn default() -> Self {
        Self::new(DEFAULT_FILE)
    }
}

/// Last successfully fetched attraction records, kept on disk.
#[derive(Debug, Clone)]
pub struct CatalogCache {
    config: CatalogCacheConfig,
}

impl CatalogCache {
    pub fn new(config: CatalogCacheConfig) -> Self {
        Self { config }
    }

    /// Read the cached records.
    ///
    /// A missing, unreadable or stale file yields `None`; the caller then
    /// waits for the content store instead.
    pub fn load(&self) -> Option<Vec<AttractionRecord>> {
        let contents = std::fs::read_to_string(&self.config.path).ok()?;
        let file: CacheFile = match serde_json::from_str(&contents) {
            Ok(file) => file,
            Err(e) => {
                debug!(path = %self.config.path.display(), error = %e, "ignoring corrupt catalog cache");
                return None;
            }
        };

        let age = (Utc::now() - file.written_at).to_std().unwrap_or(Duration::ZERO);
        if age >= self.config.ttl {
            debug!(path = %self.config.path.display(), age = ?age, "catalog cache is stale");
            return None;
        }

        Some(file.attractions)
    }

    /// Overwrite the cache with `attractions`, creating parent directories.
    pub fn save(&self, attractions: &[AttractionRecord]) -> Result<(), CatalogError> {
        let file = CacheFile {
            written_at: Utc::now(),
            attractions: attractions.to_vec(),
        };

        if let Some(dir) = self.config.path.parent()
            && !dir.as_os_str().is_empty()
        {
            std::fs::create_dir_all(dir).map_err(|e| cache_error("create directory", e))?;
        }

        let json = serde_json::to_vec(&file).map_err(|e| cache_error("serialize", e))?;
        std::fs::write(&self.config.path, json).map_err(|e| cache_error("write", e))
    }

    pub fn path(&self) -> &Path {
        &self.config.path
    }
}

fn cache_error(action: &str, e: impl std::fmt::Display) -> CatalogError {
    CatalogError::Cache {
        message: format!("failed to {action}: {e}"),
    }
}
