//! Wire format of attraction records supplied by the content store.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Attraction, AttractionId, DomainError, Money, OpeningHours};

use super::error::CatalogError;

/// An attraction record as served by the content store.
///
/// `attraction_type` is accepted in place of `category`. Prices may be
/// decimal strings or numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default, alias = "attraction_type")]
    pub category: String,
    #[serde(default)]
    pub interest_tags: Vec<String>,
    #[serde(default)]
    pub ticket_price: Money,
    pub visit_duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closing_time: Option<String>,
}

impl TryFrom<&AttractionRecord> for Attraction {
    type Error = DomainError;

    fn try_from(record: &AttractionRecord) -> Result<Self, Self::Error> {
        let hours = match (&record.opening_time, &record.closing_time) {
            (Some(opens), Some(closes)) => Some(OpeningHours::parse(opens, closes)?),
            _ => None,
        };

        Ok(Attraction::new(
            AttractionId(record.id),
            record.name.clone(),
            record.category.clone(),
            record.visit_duration_minutes,
            record.ticket_price,
        )?
        .with_tags(&record.interest_tags)
        .with_description(record.description.clone())
        .with_image(record.image.clone())
        .with_hours(hours))
    }
}

/// Top-level catalog payload: a bare list or a paginated page.
#[derive(Deserialize)]
#[serde(untagged)]
enum Payload {
    List(Vec<serde_json::Value>),
    Page {
        results: Vec<serde_json::Value>,
        #[serde(default)]
        next: Option<String>,
    },
}

/// One page of a catalog listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordPage {
    pub records: Vec<AttractionRecord>,

    /// URL of the following page, if the listing continues.
    pub next: Option<String>,
}

/// Parse one catalog payload.
///
/// The payload as a whole must be valid JSON of a known shape. Individual
/// records that fail to decode are skipped and logged, so one bad row
/// does not take the whole catalog down. A bare list never has a next page.
pub fn parse_page(body: &str) -> Result<RecordPage, CatalogError> {
    let payload: Payload = serde_json::from_str(body).map_err(|e| CatalogError::Json {
        message: e.to_string(),
    })?;

    let (values, next) = match payload {
        Payload::List(values) => (values, None),
        Payload::Page { results, next } => (results, next.filter(|n| !n.trim().is_empty())),
    };

    let records = values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            serde_json::from_value::<AttractionRecord>(value)
                .inspect_err(|e| warn!(index, error = %e, "skipping undecodable attraction record"))
                .ok()
        })
        .collect();

    Ok(RecordPage { records, next })
}

/// Parse a self-contained catalog payload into records.
///
/// Nothing can be fetched from here, so a `next` link is logged and the
/// records of this page are returned on their own.
pub fn parse_records(body: &str) -> Result<Vec<AttractionRecord>, CatalogError> {
    let page = parse_page(body)?;
    if let Some(next) = &page.next {
        warn!(
            next = %next,
            loaded = page.records.len(),
            "catalog payload is one page of a longer listing, later pages not loaded"
        );
    }
    Ok(page.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bare_list() {
        let body = r#"[
            {"id": 1, "name": "White Desert", "description": "Chalk formations",
             "attraction_type": "natural", "ticket_price": "50.00",
             "visit_duration_minutes": 180, "opening_time": "00:00:00",
             "closing_time": "23:59:59", "image": null}
        ]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.id, 1);
        assert_eq!(r.category, "natural");
        assert_eq!(r.ticket_price, Money::from_major(50));
        assert_eq!(r.opening_time.as_deref(), Some("00:00:00"));
        assert!(r.interest_tags.is_empty());
    }

    #[test]
    fn parses_paginated_page() {
        let body = r#"{"count": 1, "next": null, "results": [
            {"id": 2, "name": "Qasr", "category": "historical",
             "interest_tags": ["historical", "cultural"],
             "ticket_price": 20, "visit_duration_minutes": 90}
        ]}"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].interest_tags, vec!["historical", "cultural"]);
    }

    #[test]
    fn page_reports_next_link() {
        let body = r#"{"count": 3, "next": "http://store/attractions/?page=2", "results": [
            {"id": 1, "name": "Siwa Oasis", "category": "natural", "visit_duration_minutes": 240}
        ]}"#;

        let page = parse_page(body).unwrap();
        assert_eq!(page.records.len(), 1);
        assert_eq!(page.next.as_deref(), Some("http://store/attractions/?page=2"));
    }

    #[test]
    fn last_page_and_bare_list_have_no_next() {
        let last = r#"{"count": 1, "next": null, "results": []}"#;
        assert_eq!(parse_page(last).unwrap().next, None);
        assert_eq!(parse_page("[]").unwrap().next, None);
    }

    #[test]
    fn skips_bad_records() {
        let body = r#"[
            {"id": 1, "name": "Good", "category": "natural", "visit_duration_minutes": 60},
            {"id": 2, "name": "Negative price", "category": "natural",
             "ticket_price": "-5", "visit_duration_minutes": 60},
            {"id": 3, "name": "No duration", "category": "natural"},
            {"id": 4, "name": "Negative duration", "category": "natural",
             "visit_duration_minutes": -30}
        ]"#;

        let records = parse_records(body).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].ticket_price, Money::ZERO);
    }

    #[test]
    fn rejects_unknown_payload_shape() {
        assert!(matches!(
            parse_records(r#"{"attractions": []}"#),
            Err(CatalogError::Json { .. })
        ));
        assert!(matches!(parse_records("not json"), Err(CatalogError::Json { .. })));
    }

    #[test]
    fn record_converts_to_attraction() {
        let record = AttractionRecord {
            id: 5,
            name: "Deir el-Hagar".into(),
            description: "Roman temple".into(),
            image: Some("".into()),
            category: "Historical".into(),
            interest_tags: vec![],
            ticket_price: Money::from_major(40),
            visit_duration_minutes: 75,
            opening_time: Some("08:00".into()),
            closing_time: Some("17:00".into()),
        };

        let attraction = Attraction::try_from(&record).unwrap();
        assert_eq!(attraction.id, AttractionId(5));
        assert_eq!(attraction.tags().collect::<Vec<_>>(), vec!["historical"]);
        assert_eq!(attraction.image, None);
        assert_eq!(attraction.hours.unwrap().to_string(), "08:00-17:00");
    }

    #[test]
    fn record_with_bad_hours_is_rejected() {
        let record = AttractionRecord {
            id: 6,
            name: "Museum".into(),
            description: String::new(),
            image: None,
            category: "cultural".into(),
            interest_tags: vec![],
            ticket_price: Money::ZERO,
            visit_duration_minutes: 60,
            opening_time: Some("9am".into()),
            closing_time: Some("5pm".into()),
        };

        assert!(Attraction::try_from(&record).is_err());
    }

    #[test]
    fn cache_roundtrip_preserves_records() {
        let body = r#"[{"id": 7, "name": "Spring", "category": "natural",
                        "ticket_price": "12.34", "visit_duration_minutes": 30}]"#;
        let records = parse_records(body).unwrap();
        let json = serde_json::to_string(&records).unwrap();
        assert_eq!(parse_records(&json).unwrap(), records);
    }
}
