//! Official daily quotes as published by the rate feed.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::currencies;
use crate::error::DomainError;

/// Exchange data of one currency for one date.
///
/// `rate` is the amount of local currency paid for `quantity` units of the
/// foreign currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyQuote {
    pub code: String,
    pub quantity: i64,
    #[serde(default)]
    pub rate_formated: String,
    #[serde(default)]
    pub diff_formated: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rate: Decimal,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub diff: Decimal,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub valid_from_date: String,
}

impl CurrencyQuote {
    /// Builds the local currency quote: one unit at rate one, no change.
    pub fn local(date: &str) -> Self {
        Self {
            code: currencies::LOCAL_CURRENCY.to_string(),
            quantity: 1,
            rate_formated: "1.0000".to_string(),
            diff_formated: "0.0000".to_string(),
            rate: Decimal::ONE,
            name: currencies::display_name(currencies::LOCAL_CURRENCY)
                .unwrap_or_default()
                .to_string(),
            diff: Decimal::ZERO,
            date: date.to_string(),
            valid_from_date: date.to_string(),
        }
    }

    /// Price of a single unit in local currency.
    ///
    /// Fails when the quote cannot take part in a conversion, i.e. when the
    /// rate or the quantity is not strictly positive.
    pub fn unit_rate(&self) -> Result<Decimal, DomainError> {
        if self.rate <= Decimal::ZERO || self.quantity <= 0 {
            return Err(DomainError::InvalidQuote {
                code: self.code.clone(),
                rate: self.rate,
                quantity: self.quantity,
            });
        }

        self.rate
            .checked_div(Decimal::from(self.quantity))
            .ok_or_else(|| DomainError::InvalidQuote {
                code: self.code.clone(),
                rate: self.rate,
                quantity: self.quantity,
            })
    }
}

/// All quotes published for one date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteSet {
    pub date: String,
    #[serde(default)]
    pub currencies: Vec<CurrencyQuote>,
}

impl QuoteSet {
    pub fn new(date: impl Into<String>, currencies: Vec<CurrencyQuote>) -> Self {
        Self {
            date: date.into(),
            currencies,
        }
    }

    /// Returns the quote for `code`, compared case-insensitively.
    pub fn quote(&self, code: &str) -> Result<&CurrencyQuote, DomainError> {
        let code = code.trim();
        self.currencies
            .iter()
            .find(|q| q.code.eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::CodeNotFound(code.to_string()))
    }

    pub fn contains(&self, code: &str) -> bool {
        self.quote(code).is_ok()
    }

    /// Appends the synthesized local currency quote unless one is present.
    pub fn ensure_local_currency(&mut self) {
        if !self.contains(currencies::LOCAL_CURRENCY) {
            let local = CurrencyQuote::local(&self.date);
            self.currencies.push(local);
        }
    }

    /// Orders quotes by code, ascending.
    pub fn sort_by_code(&mut self) {
        self.currencies.sort_by(|a, b| a.code.cmp(&b.code));
    }

    pub fn is_empty(&self) -> bool {
        self.currencies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.currencies.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const FEED_JSON: &str = r#"{
        "date": "2024-01-05T00:00:00.000Z",
        "currencies": [
            {
                "code": "USD",
                "quantity": 1,
                "rateFormated": "2.6854",
                "diffFormated": "0.0049",
                "rate": 2.6854,
                "name": "US Dollar",
                "diff": 0.0049,
                "date": "2024-01-04T17:45:12.345Z",
                "validFromDate": "2024-01-05T00:00:00.000Z"
            },
            {
                "code": "JPY",
                "quantity": 100,
                "rateFormated": "1.8573",
                "diffFormated": "-0.0102",
                "rate": 1.8573,
                "name": "Japanese Yen",
                "diff": -0.0102,
                "date": "2024-01-04T17:45:12.345Z",
                "validFromDate": "2024-01-05T00:00:00.000Z"
            }
        ]
    }"#;

    fn quote(code: &str, quantity: i64, rate: Decimal) -> CurrencyQuote {
        CurrencyQuote {
            code: code.to_string(),
            quantity,
            rate_formated: rate.to_string(),
            diff_formated: "0".to_string(),
            rate,
            name: code.to_string(),
            diff: Decimal::ZERO,
            date: "2024-01-05".to_string(),
            valid_from_date: "2024-01-05".to_string(),
        }
    }

    #[test]
    fn test_deserialize_feed_object() {
        let set: QuoteSet = serde_json::from_str(FEED_JSON).unwrap();

        assert_eq!(set.date, "2024-01-05T00:00:00.000Z");
        assert_eq!(set.len(), 2);

        let usd = set.quote("USD").unwrap();
        assert_eq!(usd.rate, dec!(2.6854));
        assert_eq!(usd.diff, dec!(0.0049));
        assert_eq!(usd.rate_formated, "2.6854");
        assert_eq!(usd.valid_from_date, "2024-01-05T00:00:00.000Z");

        let jpy = set.quote("JPY").unwrap();
        assert_eq!(jpy.quantity, 100);
        assert_eq!(jpy.diff, dec!(-0.0102));
    }

    #[test]
    fn test_quote_lookup_is_case_insensitive() {
        let set = QuoteSet::new("2024-01-05", vec![quote("EUR", 1, dec!(2.9417))]);

        assert_eq!(set.quote("eur").unwrap().code, "EUR");
        assert_eq!(set.quote(" Eur ").unwrap().code, "EUR");
    }

    #[test]
    fn test_quote_lookup_missing_code() {
        let set = QuoteSet::new("2024-01-05", vec![quote("EUR", 1, dec!(2.9417))]);

        let err = set.quote("ZZZ").unwrap_err();
        assert!(matches!(err, DomainError::CodeNotFound(ref c) if c == "ZZZ"));
    }

    #[test]
    fn test_ensure_local_currency_appends_once() {
        let mut set = QuoteSet::new("2024-01-05", vec![quote("USD", 1, dec!(2.6854))]);

        set.ensure_local_currency();
        set.ensure_local_currency();

        let locals: Vec<_> = set.currencies.iter().filter(|q| q.code == "GEL").collect();
        assert_eq!(locals.len(), 1);

        let gel = locals[0];
        assert_eq!(gel.rate, Decimal::ONE);
        assert_eq!(gel.quantity, 1);
        assert_eq!(gel.diff, Decimal::ZERO);
        assert_eq!(gel.name, "Georgian Lari");
        assert_eq!(gel.date, "2024-01-05");
        assert_eq!(gel.valid_from_date, "2024-01-05");
    }

    #[test]
    fn test_ensure_local_currency_keeps_feed_quote() {
        let mut feed_gel = quote("GEL", 1, Decimal::ONE);
        feed_gel.name = "Lari from feed".to_string();
        let mut set = QuoteSet::new("2024-01-05", vec![feed_gel]);

        set.ensure_local_currency();

        assert_eq!(set.len(), 1);
        assert_eq!(set.currencies[0].name, "Lari from feed");
    }

    #[test]
    fn test_sort_by_code() {
        let mut set = QuoteSet::new(
            "2024-01-05",
            vec![
                quote("USD", 1, dec!(2.6854)),
                quote("EUR", 1, dec!(2.9417)),
                quote("GEL", 1, Decimal::ONE),
            ],
        );

        set.sort_by_code();

        let codes: Vec<_> = set.currencies.iter().map(|q| q.code.as_str()).collect();
        assert_eq!(codes, vec!["EUR", "GEL", "USD"]);
    }

    #[test]
    fn test_unit_rate_divides_by_quantity() {
        assert_eq!(
            quote("JPY", 100, dec!(1.8573)).unit_rate().unwrap(),
            dec!(0.018573)
        );
        assert_eq!(quote("EUR", 1, dec!(2.9417)).unit_rate().unwrap(), dec!(2.9417));
    }

    #[test]
    fn test_unit_rate_rejects_non_positive_values() {
        assert!(matches!(
            quote("USD", 0, dec!(2.6854)).unit_rate(),
            Err(DomainError::InvalidQuote { .. })
        ));
        assert!(matches!(
            quote("USD", 1, Decimal::ZERO).unit_rate(),
            Err(DomainError::InvalidQuote { .. })
        ));
    }
}
