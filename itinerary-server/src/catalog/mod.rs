//! Attraction catalog.
//!
//! Loads attraction records from the content store (or a local file),
//! validates them into an immutable [`CatalogSnapshot`] and publishes it
//! behind a swappable reference. A background task refreshes the snapshot
//! periodically; a disk cache covers restarts while the store is down.

mod cache;
mod client;
mod error;
mod record;
mod snapshot;
mod store;

pub use cache::{CatalogCache, CatalogCacheConfig};
pub use client::{CatalogClient, CatalogClientConfig};
pub use error::CatalogError;
pub use record::{AttractionRecord, RecordPage, parse_page, parse_records};
pub use snapshot::CatalogSnapshot;
pub use store::{Catalog, CatalogSource, next_backoff, spawn_refresh};
