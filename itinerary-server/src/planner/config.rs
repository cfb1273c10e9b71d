//! Planner configuration.

use crate::domain::AllowanceTable;

/// Configuration parameters for itinerary planning.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Total visit time that fits into one day (minutes).
    pub daily_capacity_mins: u32,

    /// Shortest trip accepted (days).
    pub min_days: u32,

    /// Longest trip accepted (days).
    pub max_days: u32,

    /// Per-day non-ticket allowance by budget tier.
    pub allowances: AllowanceTable,
}

impl PlannerConfig {
    /// Create a configuration with the default 1–7 day bounds.
    pub fn new(daily_capacity_mins: u32, allowances: AllowanceTable) -> Self {
        Self {
            daily_capacity_mins,
            allowances,
            ..Self::default()
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            daily_capacity_mins: 480, // 8 hours
            min_days: 1,
            max_days: 7,
            allowances: AllowanceTable::default(),
        }
    }
}
