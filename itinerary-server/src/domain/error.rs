//! Domain error types.
//!
//! These errors represent validation failures in catalog records and
//! configuration values. They are distinct from catalog I/O errors and
//! from request validation errors.

/// Domain-level errors for value validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// An amount of money could not be parsed or is out of range
    #[error("invalid amount {input:?}: {reason}")]
    InvalidMoney { input: String, reason: &'static str },

    /// Budget tier is not one of low, medium or high
    #[error("unknown budget tier {0:?} (expected low, medium or high)")]
    UnknownBudgetTier(String),

    /// Allowance table is not strictly increasing by tier
    #[error("daily allowances must satisfy low < medium < high")]
    AllowanceOrder,

    /// Visit duration must be a positive number of minutes
    #[error("attraction {0} has a zero visit duration")]
    ZeroDuration(u64),

    /// Attraction is missing a display name
    #[error("attraction {0} has an empty name")]
    EmptyName(u64),

    /// Opening hours could not be parsed
    #[error("invalid opening time {0:?}")]
    InvalidOpeningTime(String),
}
