//! The live catalog: a swappable reference to the current snapshot.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::cache::CatalogCache;
use super::client::CatalogClient;
use super::error::CatalogError;
use super::record::{AttractionRecord, parse_records};
use super::snapshot::CatalogSnapshot;

/// First retry delay while no snapshot has been loaded.
const INITIAL_BACKOFF: Duration = Duration::from_secs(5);

/// Where attraction records come from.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    /// The content store over HTTP.
    Remote(CatalogClient),
    /// A JSON file in the same format the content store serves.
    File(PathBuf),
    /// A fixed list of records.
    Static(Vec<AttractionRecord>),
}

impl CatalogSource {
    /// Fetch every record from the source.
    pub async fn fetch(&self) -> Result<Vec<AttractionRecord>, CatalogError> {
        match self {
            CatalogSource::Remote(client) => client.fetch_all().await,
            CatalogSource::File(path) => {
                let body =
                    tokio::fs::read_to_string(path)
                        .await
                        .map_err(|source| CatalogError::Io {
                            path: path.display().to_string(),
                            source,
                        })?;
                parse_records(&body)
            }
            CatalogSource::Static(records) => Ok(records.clone()),
        }
    }

    /// Human-readable description for logs.
    pub fn describe(&self) -> String {
        match self {
            CatalogSource::Remote(client) => client.base_url().to_string(),
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Static(records) => format!("{} static records", records.len()),
        }
    }
}

/// Thread-safe handle to the current catalog snapshot.
///
/// Readers take a clone of the snapshot `Arc` and keep using it for the
/// whole request, so a concurrent refresh never changes what an in-flight
/// request sees. Refresh builds the replacement snapshot before taking the
/// write lock, which is held only for the pointer swap.
#[derive(Debug, Clone)]
pub struct Catalog {
    current: Arc<RwLock<Option<Arc<CatalogSnapshot>>>>,
    source: Arc<CatalogSource>,
    cache: Option<CatalogCache>,
}

impl Catalog {
    /// Create an empty catalog backed by `source`.
    ///
    /// Nothing is loaded until [`Catalog::refresh`] or
    /// [`Catalog::seed_from_cache`] succeeds.
    pub fn new(source: CatalogSource) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            source: Arc::new(source),
            cache: None,
        }
    }

    /// Persist successful loads to a disk cache.
    pub fn with_cache(mut self, cache: CatalogCache) -> Self {
        self.cache = Some(cache);
        self
    }

    /// The configured source.
    pub fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// The current snapshot.
    ///
    /// Fails with [`CatalogError::Unavailable`] until a snapshot has loaded.
    pub async fn snapshot(&self) -> Result<Arc<CatalogSnapshot>, CatalogError> {
        let guard = self.current.read().await;
        guard.clone().ok_or(CatalogError::Unavailable)
    }

    /// Returns true once any snapshot has been installed.
    pub async fn is_loaded(&self) -> bool {
        self.current.read().await.is_some()
    }

    /// Replace the current snapshot.
    pub async fn install(&self, snapshot: CatalogSnapshot) -> Arc<CatalogSnapshot> {
        let snapshot = Arc::new(snapshot);
        let mut guard = self.current.write().await;
        *guard = Some(snapshot.clone());
        snapshot
    }

    /// Load the disk cache if it is present and fresh.
    ///
    /// Returns the number of attractions installed.
    pub async fn seed_from_cache(&self) -> Option<usize> {
        let records = self.cache.as_ref()?.load()?;
        let snapshot = self.install(CatalogSnapshot::from_records(&records)).await;
        info!(count = snapshot.len(), "seeded attraction catalog from disk cache");
        Some(snapshot.len())
    }

    /// Refresh the catalog from its source.
    ///
    /// On success, replaces the current snapshot and returns its size. On
    /// failure, the existing snapshot is preserved and the error is returned.
    pub async fn refresh(&self) -> Result<usize, CatalogError> {
        let records = self.source.fetch().await?;
        let snapshot = CatalogSnapshot::from_records(&records);
        let skipped = snapshot.skipped();
        let snapshot = self.install(snapshot).await;

        if let Some(cache) = &self.cache
            && let Err(e) = cache.save(&records)
        {
            warn!(path = %cache.path().display(), error = %e, "failed to write catalog cache");
        }

        info!(
            count = snapshot.len(),
            skipped,
            source = %self.source.describe(),
            "loaded attraction catalog"
        );
        Ok(snapshot.len())
    }
}

/// Double the retry delay, capped at `max`.
pub fn next_backoff(current: Duration, max: Duration) -> Duration {
    current.saturating_mul(2).min(max)
}

/// Spawn a background task that keeps the catalog fresh.
///
/// The first refresh runs immediately. After that the catalog is reloaded
/// every `interval`. While no snapshot has ever loaded, failed attempts are
/// retried with exponential backoff starting at five seconds and capped at
/// `interval`.
pub fn spawn_refresh(catalog: Catalog, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut backoff = INITIAL_BACKOFF.min(interval);
        loop {
            let wait = match catalog.refresh().await {
                Ok(_) => {
                    backoff = INITIAL_BACKOFF.min(interval);
                    interval
                }
                Err(e) => {
                    if catalog.is_loaded().await {
                        warn!(error = %e, "catalog refresh failed, keeping previous snapshot");
                        interval
                    } else {
                        warn!(error = %e, retry_in = ?backoff, "attraction catalog unavailable");
                        let wait = backoff;
                        backoff = next_backoff(backoff, interval);
                        wait
                    }
                }
            };
            tokio::time::sleep(wait).await;
        }
    })
}
