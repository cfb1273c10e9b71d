//! Generated itineraries: days, slots and time-of-day labels.

use std::fmt;

use super::attraction::{Attraction, AttractionId, OpeningHours};
use super::money::Money;

/// Time-of-day label attached to a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    /// Label for the slot at `index` (0-based) within a day.
    ///
    /// The first slot is Morning, the second Afternoon and every later
    /// slot Evening.
    pub fn for_slot(index: usize) -> Self {
        match index {
            0 => TimeOfDay::Morning,
            1 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "Morning",
            TimeOfDay::Afternoon => "Afternoon",
            TimeOfDay::Evening => "Evening",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single scheduled visit.
///
/// Display fields are copied from the attraction when the slot is created,
/// so an itinerary stays self-contained after the catalog snapshot that
/// produced it has been replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitySlot {
    pub time: TimeOfDay,
    pub attraction_id: AttractionId,
    pub name: String,
    pub description: String,
    pub image: Option<String>,
    pub price: Money,
    pub duration_mins: u32,
    pub hours: Option<OpeningHours>,
}

impl ActivitySlot {
    /// Create a slot from an attraction.
    pub fn from_attraction(time: TimeOfDay, attraction: &Attraction) -> Self {
        Self {
            time,
            attraction_id: attraction.id,
            name: attraction.name.clone(),
            description: attraction.description.clone(),
            image: attraction.image.clone(),
            price: attraction.ticket_price,
            duration_mins: attraction.visit_duration_mins,
            hours: attraction.hours,
        }
    }
}

/// The plan for one day of the trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayPlan {
    /// 1-based day number.
    pub day: u32,

    /// Slots in admission order; labels follow [`TimeOfDay::for_slot`].
    pub activities: Vec<ActivitySlot>,
}

impl DayPlan {
    /// An empty day.
    pub fn empty(day: u32) -> Self {
        Self {
            day,
            activities: Vec::new(),
        }
    }

    /// Total visit time scheduled on this day.
    pub fn total_minutes(&self) -> u32 {
        self.activities.iter().map(|a| a.duration_mins).sum()
    }

    /// Sum of ticket prices on this day.
    pub fn ticket_total(&self) -> Money {
        self.activities.iter().map(|a| a.price).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.activities.is_empty()
    }
}

/// A complete trip plan with its cost estimate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Itinerary {
    /// One entry per day, in order `1..=days`.
    pub days: Vec<DayPlan>,

    /// Ticket prices plus the daily allowance for every day.
    pub total_estimated_cost: Money,
}

impl Itinerary {
    /// Iterate over every scheduled slot across all days.
    pub fn slots(&self) -> impl Iterator<Item = &ActivitySlot> {
        self.days.iter().flat_map(|d| d.activities.iter())
    }

    /// Number of scheduled visits.
    pub fn slot_count(&self) -> usize {
        self.days.iter().map(|d| d.activities.len()).sum()
    }
}
