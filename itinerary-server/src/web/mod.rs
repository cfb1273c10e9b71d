//! Web layer for the itinerary planner.
//!
//! Provides HTTP endpoints for planning trips and inspecting the catalog.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
