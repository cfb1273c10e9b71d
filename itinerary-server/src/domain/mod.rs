//! Domain types for the itinerary planner.
//!
//! This module contains the validated value types the planner works with.
//! Types enforce their invariants at construction time, so code that
//! receives them can trust their validity.

mod attraction;
mod budget;
mod error;
mod itinerary;
mod money;

pub use attraction::{Attraction, AttractionId, Interests, OpeningHours, normalize_tag};
pub use budget::{AllowanceTable, BudgetTier};
pub use error::DomainError;
pub use itinerary::{ActivitySlot, DayPlan, Itinerary, TimeOfDay};
pub use money::Money;
