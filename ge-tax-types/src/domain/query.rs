//! Parameters of a rates request.

use chrono::{Local, NaiveDate};

use crate::domain::currencies;

/// Date and currency selection for a rates request.
///
/// Without a date the request targets today's local date. Without currency
/// codes the feed returns every published currency.
///
/// ```
/// use ge_tax_types::{RatesQuery, currencies};
///
/// let query = RatesQuery::new()
///     .with_currency("usd")
///     .with_currency(currencies::USD)
///     .with_currency(currencies::EUR);
///
/// assert_eq!(query.currencies(), &["USD".to_string(), "EUR".to_string()]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatesQuery {
    date: Option<NaiveDate>,
    currencies: Vec<String>,
}

impl RatesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Adds a currency code. Codes are trimmed and upper-cased; blanks and
    /// duplicates are ignored and insertion order is kept.
    pub fn with_currency(mut self, code: impl AsRef<str>) -> Self {
        let code = code.as_ref().trim().to_ascii_uppercase();
        if !code.is_empty() && !self.currencies.contains(&code) {
            self.currencies.push(code);
        }
        self
    }

    pub fn with_currencies<I, S>(self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        codes.into_iter().fold(self, |q, c| q.with_currency(c))
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Requested date, or today when none was set.
    pub fn resolved_date(&self) -> NaiveDate {
        self.date.unwrap_or_else(|| Local::now().date_naive())
    }

    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    /// True when no currency restriction applies.
    pub fn requests_all(&self) -> bool {
        self.currencies.is_empty()
    }

    /// True when the local currency must be part of the answer: either every
    /// currency was requested or the local code was named explicitly.
    pub fn wants_local_currency(&self) -> bool {
        self.requests_all() || self.currencies.iter().any(|c| currencies::is_local(c))
    }
}
