//! Application state for the web layer.

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::planner::PlannerConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Live attraction catalog
    pub catalog: Catalog,

    /// Itinerary planner configuration
    pub config: Arc<PlannerConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: Catalog, config: PlannerConfig) -> Self {
        Self {
            catalog,
            config: Arc::new(config),
        }
    }
}
