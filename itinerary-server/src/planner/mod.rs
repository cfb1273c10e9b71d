//! Itinerary planner.
//!
//! Answers: "given a catalog of attractions, a trip length, a budget tier
//! and some interests, what should I see on each day and what will it cost?"
//!
//! Planning runs in four stages against a single catalog snapshot:
//! request validation, candidate selection by interest, greedy first-fit
//! allocation of candidates to days, and cost estimation.

mod allocate;
mod config;
mod cost;
mod pipeline;
mod validate;

pub use allocate::allocate;
pub use config::PlannerConfig;
pub use cost::estimate;
pub use pipeline::Planner;
pub use validate::{PlanError, TripRequest, validate};
