//! Monetary amounts tagged with a currency code.

use std::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// An exact decimal amount in the currency named by `currency`.
///
/// Binary floats never appear in amounts; every multiplication, division
/// and rounding goes through `Decimal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: Decimal,
    pub currency: String,
}

impl Money {
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Zero in the given currency.
    pub fn zero(currency: impl Into<String>) -> Self {
        Self::new(Decimal::ZERO, currency)
    }

    /// Parses a textual amount such as `"2678.27"`.
    pub fn parse(raw: &str, currency: impl Into<String>) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        let amount = Decimal::from_str(trimmed)
            .or_else(|_| Decimal::from_scientific(trimmed))
            .map_err(|_| DomainError::InvalidAmount(raw.to_string()))?;

        Ok(Self::new(amount, currency))
    }

    /// Rounds half away from zero to `places` decimal places.
    pub fn round_dp(&self, places: u32) -> Self {
        Self::new(round_half_away(self.amount, places), self.currency.clone())
    }
}

/// Rounds `value` to `places` decimal places, ties away from zero.
pub fn round_half_away(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.currency.is_empty() {
            write!(f, "{}", self.amount)
        } else {
            write!(f, "{} {}", self.amount, self.currency)
        }
    }
}

/// Result of converting money into another currency.
///
/// `rate` is the effective price of one source unit in the target currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversion {
    pub money: Money,
    pub rate: Decimal,
}
