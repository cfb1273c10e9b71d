//! Budget tiers and the per-day allowance table.

use std::fmt;
use std::str::FromStr;

use super::error::DomainError;
use super::money::Money;

/// A discrete budget level chosen by the traveller.
///
/// The tier controls the per-day non-ticket allowance (lodging and food).
/// Parsing is case-insensitive and ignores surrounding whitespace.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::BudgetTier;
///
/// assert_eq!(BudgetTier::parse("Medium").unwrap(), BudgetTier::Medium);
/// assert!(BudgetTier::parse("vip").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    /// All tiers, cheapest first.
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Low, BudgetTier::Medium, BudgetTier::High];

    /// Parse a tier name.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(BudgetTier::Low),
            "medium" => Ok(BudgetTier::Medium),
            "high" => Ok(BudgetTier::High),
            _ => Err(DomainError::UnknownBudgetTier(s.to_string())),
        }
    }

    /// The canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Low => "low",
            BudgetTier::Medium => "medium",
            BudgetTier::High => "high",
        }
    }
}

impl FromStr for BudgetTier {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BudgetTier::parse(s)
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-day allowance for each budget tier.
///
/// The values are deployment configuration. The table guarantees
/// `low < medium < high`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowanceTable {
    low: Money,
    medium: Money,
    high: Money,
}

impl AllowanceTable {
    /// Create a table, rejecting allowances that are not strictly increasing.
    pub fn new(low: Money, medium: Money, high: Money) -> Result<Self, DomainError> {
        if !(low < medium && medium < high) {
            return Err(DomainError::AllowanceOrder);
        }
        Ok(Self { low, medium, high })
    }

    /// The per-day allowance for a tier.
    pub fn daily_allowance(&self, tier: BudgetTier) -> Money {
        match tier {
            BudgetTier::Low => self.low,
            BudgetTier::Medium => self.medium,
            BudgetTier::High => self.high,
        }
    }
}

impl Default for AllowanceTable {
    /// Daily rates in Egyptian pounds.
    fn default() -> Self {
        Self {
            low: Money::from_major(550),
            medium: Money::from_major(1300),
            high: Money::from_major(3500),
        }
    }
}
