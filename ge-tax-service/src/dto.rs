//! Requests and responses of the income service.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use ge_tax_types::domain::calendar::parse_date;
use ge_tax_types::{DomainError, Money, Side};

// ─────────────────────────────────────────────────────────────────────────────
// Single conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Conversion request with every field still in its raw text form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertRequest {
    pub year: String,
    /// English month name or number
    pub month: String,
    pub day: String,
    pub currency_from: String,
    pub currency_to: String,
    pub amount: String,
}

/// Outcome of one conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertResponse {
    pub date: NaiveDate,
    /// Amount as requested
    pub amount: Money,
    /// Amount in the target currency, 2 decimal places
    pub converted: Money,
    /// Price of one source unit in the target currency, 4 decimal places
    pub rate: Decimal,
}

// ─────────────────────────────────────────────────────────────────────────────
// Income batches
// ─────────────────────────────────────────────────────────────────────────────

/// Money received on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub date: NaiveDate,
    pub money: Money,
}

impl Income {
    pub fn new(date: NaiveDate, money: Money) -> Self {
        Self { date, money }
    }
}

/// Parses `DATE:AMOUNT:CODE`, e.g. `2024-01-05:2678.27:EUR`.
impl FromStr for Income {
    type Err = DomainError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.splitn(3, ':');

        let date = parse_date(parts.next().unwrap_or_default())?;
        let amount = parts
            .next()
            .ok_or_else(|| DomainError::InvalidAmount(raw.to_string()))?;
        let code = parts.next().map(str::trim).unwrap_or_default();
        if code.is_empty() {
            return Err(DomainError::CurrencyNotSet(Side::From));
        }

        let money = Money::parse(amount, code.to_ascii_uppercase())?;
        Ok(Self::new(date, money))
    }
}

/// Incomes to convert, plus the income already received this year.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IncomeBatch {
    pub incomes: Vec<Income>,
    /// Prior income of the year in lari, zero when absent
    #[serde(default)]
    pub year_income: Option<String>,
}

impl IncomeBatch {
    pub fn new(incomes: Vec<Income>) -> Self {
        Self {
            incomes,
            year_income: None,
        }
    }

    pub fn with_year_income(mut self, raw: impl Into<String>) -> Self {
        self.year_income = Some(raw.into());
        self
    }
}

/// Incomes converted to the local currency, in input order.
///
/// `total` sums this batch; `year_income` adds it to the prior year income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub incomes: Vec<ConvertResponse>,
    pub total: Money,
    pub year_income: Money,
}
