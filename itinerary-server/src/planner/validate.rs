//! Trip requests and their validation.

use crate::domain::{BudgetTier, Interests};

use super::config::PlannerConfig;

/// Error from itinerary planning.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    /// Trip length or budget tier is out of bounds
    #[error("invalid trip request: {0}")]
    InvalidRequest(String),
}

/// A traveller's request for an itinerary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRequest {
    /// Trip length in days.
    pub days: u32,

    /// Budget tier.
    pub budget: BudgetTier,

    /// Requested interests, possibly empty.
    pub interests: Interests,
}

impl TripRequest {
    /// Create a request. Call [`validate`] before planning with it.
    pub fn new(days: u32, budget: BudgetTier, interests: Interests) -> Self {
        Self {
            days,
            budget,
            interests,
        }
    }

    /// Build and validate a request from loosely typed input.
    ///
    /// `days` is taken as a signed integer so that zero and negative
    /// values are reported as out of range rather than as parse errors.
    pub fn parse<S: AsRef<str>>(
        days: i64,
        budget: &str,
        interests: impl IntoIterator<Item = S>,
        config: &PlannerConfig,
    ) -> Result<Self, PlanError> {
        let days = u32::try_from(days)
            .ok()
            .filter(|d| in_range(*d, config))
            .ok_or_else(|| days_out_of_range(days, config))?;

        let budget =
            BudgetTier::parse(budget).map_err(|e| PlanError::InvalidRequest(e.to_string()))?;

        let request = Self::new(days, budget, interests.into_iter().collect());
        validate(&request, config)?;
        Ok(request)
    }
}

fn in_range(days: u32, config: &PlannerConfig) -> bool {
    (config.min_days..=config.max_days).contains(&days)
}

fn days_out_of_range(days: impl std::fmt::Display, config: &PlannerConfig) -> PlanError {
    PlanError::InvalidRequest(format!(
        "days must be between {} and {} (got {days})",
        config.min_days, config.max_days
    ))
}

/// Check a request against the configured trip-length bounds.
///
/// Returns the request unchanged on success. The budget tier is a closed
/// enumeration, so an unknown tier can only be rejected while parsing.
/// Interests have no validity constraint.
pub fn validate<'a>(
    request: &'a TripRequest,
    config: &PlannerConfig,
) -> Result<&'a TripRequest, PlanError> {
    if !in_range(request.days, config) {
        return Err(days_out_of_range(request.days, config));
    }
    Ok(request)
}
