//! Exact monetary amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// Minor units (piastres) per major unit.
const MINOR_PER_MAJOR: u64 = 100;

/// A non-negative amount of money.
///
/// Stored as an exact count of hundredths so that ticket prices and daily
/// allowances sum without rounding. Two itineraries built from the same
/// inputs always report bit-identical totals.
///
/// # Examples
///
/// ```
/// use itinerary_server::domain::Money;
///
/// let price = Money::parse("50.25").unwrap();
/// assert_eq!(price.minor(), 5025);
/// assert_eq!(price.to_string(), "50.25");
///
/// assert!(Money::parse("-1").is_err());
/// assert!(Money::parse("1.005").is_err());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(u64);

impl Money {
    /// Zero, the price of a free attraction.
    pub const ZERO: Money = Money(0);

    /// Create from a count of hundredths.
    pub const fn from_minor(minor: u64) -> Self {
        Money(minor)
    }

    /// Create from a whole number of major units.
    pub const fn from_major(major: u64) -> Self {
        Money(major.saturating_mul(MINOR_PER_MAJOR))
    }

    /// The amount in hundredths.
    pub fn minor(&self) -> u64 {
        self.0
    }

    /// Returns true for a zero amount.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Parse a plain decimal string such as `"120"`, `"49.5"` or `"50.00"`.
    ///
    /// At most two fractional digits are accepted. Signs, exponents and
    /// thousands separators are rejected.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let trimmed = s.trim();
        let invalid = |reason: &'static str| DomainError::InvalidMoney {
            input: s.to_string(),
            reason,
        };

        let (whole, frac) = match trimmed.split_once('.') {
            Some((whole, frac)) => (whole, Some(frac)),
            None => (trimmed, None),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid("expected digits before the decimal point"));
        }

        let frac_minor = match frac {
            None => 0,
            Some(f) => {
                if f.is_empty() || f.len() > 2 || !f.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid("expected one or two fractional digits"));
                }
                let digits: u64 = f.parse().map_err(|_| invalid("bad fractional digits"))?;
                if f.len() == 1 { digits * 10 } else { digits }
            }
        };

        let whole: u64 = whole.parse().map_err(|_| invalid("amount too large"))?;
        whole
            .checked_mul(MINOR_PER_MAJOR)
            .and_then(|m| m.checked_add(frac_minor))
            .map(Money)
            .ok_or_else(|| invalid("amount too large"))
    }

    /// Convert from a floating-point amount, rounding to the nearest hundredth.
    pub fn from_f64(value: f64) -> Result<Self, DomainError> {
        let invalid = |reason: &'static str| DomainError::InvalidMoney {
            input: value.to_string(),
            reason,
        };

        if !value.is_finite() {
            return Err(invalid("amount must be finite"));
        }
        if value < 0.0 {
            return Err(invalid("amount must not be negative"));
        }

        let minor = (value * MINOR_PER_MAJOR as f64).round();
        if minor >= u64::MAX as f64 {
            return Err(invalid("amount too large"));
        }
        Ok(Money(minor as u64))
    }

    /// The amount in major units, for JSON output.
    pub fn as_f64(&self) -> f64 {
        self.0 as f64 / MINOR_PER_MAJOR as f64
    }
}

impl FromStr for Money {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::parse(s)
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({self})")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:02}",
            self.0 / MINOR_PER_MAJOR,
            self.0 % MINOR_PER_MAJOR
        )
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, rhs: u32) -> Money {
        Money(self.0.saturating_mul(u64::from(rhs)))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

/// Wire forms accepted for an amount: decimal fields from the content
/// store arrive as strings, hand-written catalogs tend to use numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawMoney {
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let result = match RawMoney::deserialize(deserializer)? {
            RawMoney::Number(n) => Money::from_f64(n),
            RawMoney::Text(s) => Money::parse(&s),
        };
        result.map_err(serde::de::Error::custom)
    }
}
