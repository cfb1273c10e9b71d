//! Data transfer objects for web requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::{ActivitySlot, DayPlan, Itinerary, Money};

fn default_days() -> i64 {
    3
}

/// Trip length as sent by forms: a number or a numeric string.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDays {
    Number(i64),
    Text(String),
}

fn deserialize_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match RawDays::deserialize(deserializer)? {
        RawDays::Number(days) => Ok(days),
        RawDays::Text(text) => text
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("days must be an integer, got {text:?}"))),
    }
}

fn default_budget() -> String {
    "medium".to_string()
}

/// Request to plan a trip.
///
/// Missing fields take the planner page's defaults: three days, the medium
/// budget and no particular interests.
#[derive(Debug, Deserialize)]
pub struct PlanTripRequest {
    /// Trip length in days
    #[serde(default = "default_days", deserialize_with = "deserialize_days")]
    pub days: i64,

    /// Budget tier name ("low", "medium" or "high", any case)
    #[serde(default = "default_budget")]
    pub budget: String,

    /// Interest tags
    #[serde(default)]
    pub interests: Vec<String>,
}

/// Response from trip planning.
#[derive(Debug, Serialize)]
pub struct PlanTripResponse {
    /// One entry per day, in order
    pub itinerary: Vec<DayResult>,

    /// Ticket prices plus the daily allowance for every day
    pub total_estimated_cost: Money,
}

impl PlanTripResponse {
    /// Convert a planned itinerary to the wire format.
    pub fn from_itinerary(itinerary: &Itinerary) -> Self {
        Self {
            itinerary: itinerary.days.iter().map(DayResult::from_plan).collect(),
            total_estimated_cost: itinerary.total_estimated_cost,
        }
    }
}

/// One day of an itinerary.
#[derive(Debug, Serialize)]
pub struct DayResult {
    /// Day number, starting at 1
    pub day: u32,

    /// Visits in the order they happen
    pub activities: Vec<ActivityResult>,
}

impl DayResult {
    fn from_plan(plan: &DayPlan) -> Self {
        Self {
            day: plan.day,
            activities: plan.activities.iter().map(ActivityResult::from_slot).collect(),
        }
    }
}

/// A scheduled visit.
#[derive(Debug, Serialize)]
pub struct ActivityResult {
    /// "Morning", "Afternoon" or "Evening"
    pub time: String,
    pub id: u64,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: Money,

    /// Opening hours as "HH:MM-HH:MM"
    pub hours: Option<String>,
}

impl ActivityResult {
    fn from_slot(slot: &ActivitySlot) -> Self {
        Self {
            time: slot.time.as_str().to_string(),
            id: slot.attraction_id.0,
            name: slot.name.clone(),
            description: slot.description.clone(),
            image: slot.image.clone(),
            price: slot.price,
            hours: slot.hours.map(|h| h.to_string()),
        }
    }
}

/// Status of the loaded attraction catalog.
#[derive(Debug, Serialize)]
pub struct CatalogStatusResponse {
    /// Number of attractions in the current snapshot
    pub attractions: usize,

    /// When the current snapshot was built
    pub loaded_at: DateTime<Utc>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
