//! Immutable point-in-time view of the attraction catalog.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::domain::{Attraction, AttractionId, Interests};

use super::record::AttractionRecord;

/// An immutable catalog snapshot.
///
/// Attractions are held in the base ordering used for candidate selection:
/// ticket price ascending, then identifier ascending. A snapshot is never
/// modified after construction; refreshing the catalog builds a new one.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    attractions: Vec<Attraction>,
    index: HashMap<AttractionId, usize>,
    loaded_at: DateTime<Utc>,
    skipped: usize,
}

impl CatalogSnapshot {
    /// Build a snapshot from validated attractions.
    ///
    /// When two attractions share an identifier the first one wins.
    pub fn new(attractions: impl IntoIterator<Item = Attraction>) -> Self {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();
        let mut skipped = 0;

        for attraction in attractions {
            if !seen.insert(attraction.id) {
                warn!(id = %attraction.id, "skipping duplicate attraction id");
                skipped += 1;
                continue;
            }
            kept.push(attraction);
        }

        kept.sort_by(|a, b| {
            a.ticket_price
                .cmp(&b.ticket_price)
                .then_with(|| a.id.cmp(&b.id))
        });

        let index = kept.iter().enumerate().map(|(i, a)| (a.id, i)).collect();

        Self {
            attractions: kept,
            index,
            loaded_at: Utc::now(),
            skipped,
        }
    }

    /// Build a snapshot from wire records, skipping any that fail validation.
    pub fn from_records(records: &[AttractionRecord]) -> Self {
        let mut invalid = 0;
        let attractions: Vec<Attraction> = records
            .iter()
            .filter_map(|record| match Attraction::try_from(record) {
                Ok(a) => Some(a),
                Err(e) => {
                    warn!(id = record.id, error = %e, "skipping invalid attraction record");
                    invalid += 1;
                    None
                }
            })
            .collect();

        let mut snapshot = Self::new(attractions);
        snapshot.skipped += invalid;
        snapshot
    }

    /// An empty snapshot.
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Number of attractions.
    pub fn len(&self) -> usize {
        self.attractions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attractions.is_empty()
    }

    /// When this snapshot was built.
    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }

    /// Number of source records rejected while building the snapshot.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Look up an attraction by identifier.
    pub fn get(&self, id: AttractionId) -> Option<&Attraction> {
        self.index.get(&id).map(|&i| &self.attractions[i])
    }

    /// All attractions, in price-then-identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Attraction> {
        self.attractions.iter()
    }

    /// Select and order candidates for the given interests.
    ///
    /// With non-empty interests, returns the attractions sharing at least
    /// one tag with them, ordered by number of matching tags (descending),
    /// then ticket price, then identifier. If interests are empty or
    /// nothing matches, returns the whole catalog in price-then-identifier
    /// order.
    pub fn select_candidates(&self, interests: &Interests) -> Vec<&Attraction> {
        if interests.is_empty() {
            return self.attractions.iter().collect();
        }

        let mut ranked: Vec<(usize, &Attraction)> = self
            .attractions
            .iter()
            .map(|a| (a.matching_tags(interests), a))
            .filter(|(matches, _)| *matches > 0)
            .collect();

        if ranked.is_empty() {
            return self.attractions.iter().collect();
        }

        // Stable sort keeps the price/identifier order within each rank.
        ranked.sort_by(|(a, _), (b, _)| b.cmp(a));
        ranked.into_iter().map(|(_, a)| a).collect()
    }
}
