//! Points of interest and their interest tags.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::money::Money;

/// Unique identifier of an attraction in the content store.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttractionId(pub u64);

impl fmt::Debug for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttractionId({})", self.0)
    }
}

impl fmt::Display for AttractionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalise a tag: trimmed and ASCII-lowercased. Blank tags are dropped.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_ascii_lowercase())
    }
}

/// The set of interests a traveller asked for.
///
/// May be empty. Unknown tags are legal; they simply match nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Interests(BTreeSet<String>);

impl Interests {
    /// No stated interests.
    pub fn none() -> Self {
        Self::default()
    }

    /// Returns true if no interests were given.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct interests.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the (normalised) tag is one of the interests.
    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    /// Iterate over the interests in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for Interests {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Interests(
            iter.into_iter()
                .filter_map(|t| normalize_tag(t.as_ref()))
                .collect(),
        )
    }
}

/// Daily opening hours of an attraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
}

impl OpeningHours {
    /// Parse opening and closing times in `HH:MM` or `HH:MM:SS` form.
    pub fn parse(opens: &str, closes: &str) -> Result<Self, DomainError> {
        Ok(Self {
            opens: parse_time_of_day(opens)?,
            closes: parse_time_of_day(closes)?,
        })
    }
}

impl fmt::Display for OpeningHours {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}",
            self.opens.format("%H:%M"),
            self.closes.format("%H:%M")
        )
    }
}

fn parse_time_of_day(s: &str) -> Result<NaiveTime, DomainError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .map_err(|_| DomainError::InvalidOpeningTime(s.to_string()))
}

/// A point of interest that can be scheduled into an itinerary.
///
/// Attractions are validated on construction: the name is non-empty and the
/// visit duration is positive. Without explicit tags, the category is the
/// only tag. They are immutable once placed in a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub category: String,
    tags: BTreeSet<String>,
    pub visit_duration_mins: u32,
    pub ticket_price: Money,
    pub hours: Option<OpeningHours>,
}

impl Attraction {
    /// Create an attraction tagged only with its category.
    pub fn new(
        id: AttractionId,
        name: impl Into<String>,
        category: impl Into<String>,
        visit_duration_mins: u32,
        ticket_price: Money,
    ) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::EmptyName(id.0));
        }
        if visit_duration_mins == 0 {
            return Err(DomainError::ZeroDuration(id.0));
        }

        let category = category.into();
        let tags = normalize_tag(&category).into_iter().collect();

        Ok(Self {
            id,
            name,
            description: String::new(),
            image: None,
            category,
            tags,
            visit_duration_mins,
            ticket_price,
            hours: None,
        })
    }

    /// Replace the interest tags. Blank tags are dropped; if nothing is
    /// left the category remains the only tag.
    pub fn with_tags<S: AsRef<str>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        let tags: BTreeSet<String> = tags
            .into_iter()
            .filter_map(|t| normalize_tag(t.as_ref()))
            .collect();
        if !tags.is_empty() {
            self.tags = tags;
        }
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the image reference. Blank references are treated as absent.
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|i| !i.trim().is_empty());
        self
    }

    /// Set the opening hours.
    pub fn with_hours(mut self, hours: Option<OpeningHours>) -> Self {
        self.hours = hours;
        self
    }

    /// The attraction's interest tags.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tags.iter().map(String::as_str)
    }

    /// Number of this attraction's tags that appear in `interests`.
    pub fn matching_tags(&self, interests: &Interests) -> usize {
        self.tags.iter().filter(|t| interests.contains(t)).count()
    }
}
