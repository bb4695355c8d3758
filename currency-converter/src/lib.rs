//! Currency conversion at official daily rates.
//!
//! [`Converter`] is written against the [`RatesClient`] port, so the raw
//! feed client and its caching decorator plug in without code changes.
//!
//! Every quote carries the price of `quantity` foreign units in local
//! currency, which makes the cross rate between two currencies
//!
//! ```text
//! rate = (from.rate / from.quantity) / (to.rate / to.quantity)
//! ```
//!
//! All arithmetic runs on `Decimal`; the converted amount is rounded to 2
//! places and the reported rate to 4, ties away from zero.
//!
//! # Example
//! ```no_run
//! use chrono::NaiveDate;
//! use currency_converter::Converter;
//! use ge_tax_types::{CancellationToken, Money, currencies};
//! use nbg_client::NbgClient;
//! use rust_decimal_macros::dec;
//!
//! # async fn run() -> Result<(), ge_tax_types::ConvertError> {
//! let converter = Converter::new(NbgClient::new());
//! let income = Money::new(dec!(2678.27), currencies::EUR);
//! let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
//!
//! let converted = converter
//!     .convert(&CancellationToken::new(), &income, currencies::GEL, date)
//!     .await?;
//! println!("{} at {}", converted.money, converted.rate);
//! # Ok(())
//! # }
//! ```

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use ge_tax_types::domain::money::round_half_away;
use ge_tax_types::{
    CancellationToken, Conversion, ConvertError, CurrencyQuote, DomainError, Money,
    MoneyConverter, RatesClient, RatesQuery, Side,
};

/// Decimal places of a converted amount.
pub const AMOUNT_PLACES: u32 = 2;
/// Decimal places of a reported rate.
pub const RATE_PLACES: u32 = 4;

/// Converts money using quotes from any rates client.
pub struct Converter<C> {
    client: C,
}

impl<C: RatesClient> Converter<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Converts `money` into `to` at the rates published for `date`.
    ///
    /// Empty currency codes fail before any request is made. Codes missing
    /// from the published set fail with [`DomainError::CodeNotFound`].
    pub async fn convert(
        &self,
        cancel: &CancellationToken,
        money: &Money,
        to: &str,
        date: NaiveDate,
    ) -> Result<Conversion, ConvertError> {
        let from = money.currency.trim();
        if from.is_empty() {
            return Err(DomainError::CurrencyNotSet(Side::From).into());
        }

        let to = to.trim();
        if to.is_empty() {
            return Err(DomainError::CurrencyNotSet(Side::To).into());
        }

        // Naming both codes lets the client synthesize the local quote.
        let query = RatesQuery::new()
            .with_date(date)
            .with_currency(from)
            .with_currency(to);
        let rates = self.client.rates(cancel, query).await?;

        let rate = cross_rate(rates.quote(from)?, rates.quote(to)?)?;
        let converted = money
            .amount
            .checked_mul(rate)
            .ok_or_else(|| DomainError::InvalidAmount(money.amount.to_string()))?;

        debug!(%date, %from, %to, %rate, "Converted amount");

        Ok(Conversion {
            money: Money::new(
                round_half_away(converted, AMOUNT_PLACES),
                to.to_ascii_uppercase(),
            ),
            rate: round_half_away(rate, RATE_PLACES),
        })
    }
}

/// Price of one `from` unit expressed in `to` units, unrounded.
pub fn cross_rate(from: &CurrencyQuote, to: &CurrencyQuote) -> Result<Decimal, DomainError> {
    let div_from = from.unit_rate()?;
    let div_to = to.unit_rate()?;

    div_from
        .checked_div(div_to)
        .ok_or_else(|| DomainError::InvalidQuote {
            code: to.code.clone(),
            rate: to.rate,
            quantity: to.quantity,
        })
}

#[async_trait::async_trait]
impl<C: RatesClient> MoneyConverter for Converter<C> {
    async fn convert(
        &self,
        cancel: &CancellationToken,
        money: &Money,
        to: &str,
        date: NaiveDate,
    ) -> Result<Conversion, ConvertError> {
        Converter::convert(self, cancel, money, to, date).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};

    use ge_tax_types::{QuoteSet, RatesError, currencies};
    use rust_decimal_macros::dec;

    fn quote(code: &str, quantity: i64, rate: Decimal) -> CurrencyQuote {
        CurrencyQuote {
            code: code.to_string(),
            quantity,
            rate_formated: rate.to_string(),
            diff_formated: "0.0000".to_string(),
            rate,
            name: code.to_string(),
            diff: Decimal::ZERO,
            date: "2024-01-05T00:00:00.000Z".to_string(),
            valid_from_date: "2024-01-05T00:00:00.000Z".to_string(),
        }
    }

    /// Behaves like the feed: answers with the requested codes it knows and
    /// synthesizes the local quote the same way the HTTP client does.
    struct FeedStub {
        published: Vec<CurrencyQuote>,
        calls: AtomicUsize,
    }

    impl FeedStub {
        fn new() -> Self {
            Self {
                published: vec![
                    quote("EUR", 1, dec!(3.2617)),
                    quote("USD", 1, dec!(2.6854)),
                    quote("GBP", 1, dec!(3.4213)),
                    quote("JPY", 100, dec!(1.8573)),
                    quote("RUB", 100, dec!(2.9750)),
                    quote("XXX", 0, dec!(1.0)),
                ],
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait::async_trait]
    impl RatesClient for FeedStub {
        async fn rates(
            &self,
            cancel: &CancellationToken,
            query: RatesQuery,
        ) -> Result<QuoteSet, RatesError> {
            if cancel.is_cancelled() {
                return Err(RatesError::Cancelled);
            }
            self.calls.fetch_add(1, Ordering::SeqCst);

            let currencies = self
                .published
                .iter()
                .filter(|q| query.requests_all() || query.currencies().contains(&q.code))
                .cloned()
                .collect();
            let mut set = QuoteSet::new("2024-01-05T00:00:00.000Z", currencies);
            if query.wants_local_currency() {
                set.ensure_local_currency();
            }
            set.sort_by_code();
            Ok(set)
        }
    }

    fn jan_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()
    }

    async fn convert(amount: Decimal, from: &str, to: &str) -> Result<Conversion, ConvertError> {
        let converter = Converter::new(FeedStub::new());
        converter
            .convert(&CancellationToken::new(), &Money::new(amount, from), to, jan_5())
            .await
    }

    #[tokio::test]
    async fn test_eur_to_gel() {
        let result = convert(dec!(2678.27), currencies::EUR, currencies::GEL)
            .await
            .unwrap();

        assert_eq!(result.money, Money::new(dec!(8735.71), "GEL"));
        assert_eq!(result.rate, dec!(3.2617));
    }

    #[tokio::test]
    async fn test_eur_to_eur() {
        let result = convert(dec!(2678.27), currencies::EUR, currencies::EUR)
            .await
            .unwrap();

        assert_eq!(result.money, Money::new(dec!(2678.27), "EUR"));
        assert_eq!(result.rate, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_same_currency_only_rounds_amount() {
        let gel = convert(dec!(1234.565), "GEL", "GEL").await.unwrap();
        assert_eq!(gel.money.amount, dec!(1234.57));
        assert_eq!(gel.rate, Decimal::ONE);

        let jpy = convert(dec!(99.994), "JPY", "jpy").await.unwrap();
        assert_eq!(jpy.money.amount, dec!(99.99));
        assert_eq!(jpy.rate, Decimal::ONE);
    }

    #[tokio::test]
    async fn test_eur_to_gbp() {
        let result = convert(dec!(2678.27), currencies::EUR, currencies::GBP)
            .await
            .unwrap();

        assert_eq!(result.money, Money::new(dec!(2553.33), "GBP"));
        assert_eq!(result.rate, dec!(0.9534));
    }

    #[tokio::test]
    async fn test_quantity_is_applied_on_both_sides() {
        let usd_jpy = convert(dec!(1000), "USD", "JPY").await.unwrap();
        assert_eq!(usd_jpy.money.amount, dec!(144586.23));
        assert_eq!(usd_jpy.rate, dec!(144.5862));

        let jpy_gel = convert(dec!(150000), "JPY", "GEL").await.unwrap();
        assert_eq!(jpy_gel.money.amount, dec!(2785.95));
        assert_eq!(jpy_gel.rate, dec!(0.0186));

        let rub_usd = convert(dec!(100000), "RUB", "USD").await.unwrap();
        assert_eq!(rub_usd.money.amount, dec!(1107.84));
        assert_eq!(rub_usd.rate, dec!(0.0111));
    }

    #[tokio::test]
    async fn test_local_to_foreign() {
        let result = convert(dec!(8735.71), "GEL", "EUR").await.unwrap();

        assert_eq!(result.money, Money::new(dec!(2678.27), "EUR"));
        assert_eq!(result.rate, dec!(0.3066));
    }

    #[tokio::test]
    async fn test_round_trip_stays_within_one_cent() {
        let amount = dec!(2678.27);

        let there = convert(amount, "EUR", "GEL").await.unwrap();
        let back = convert(there.money.amount, "GEL", "EUR").await.unwrap();

        assert!((back.money.amount - amount).abs() <= dec!(0.01));
    }

    #[tokio::test]
    async fn test_codes_are_case_insensitive() {
        let result = convert(dec!(2678.27), "eur", "gel").await.unwrap();

        assert_eq!(result.money, Money::new(dec!(8735.71), "GEL"));
    }

    #[tokio::test]
    async fn test_negative_amount_converts() {
        let result = convert(dec!(-500), "USD", "GEL").await.unwrap();
        assert_eq!(result.money.amount, dec!(-1342.70));
    }

    #[tokio::test]
    async fn test_missing_source_currency() {
        let converter = Converter::new(FeedStub::new());

        let result = converter
            .convert(&CancellationToken::new(), &Money::new(dec!(10), ""), "GEL", jan_5())
            .await;

        assert!(matches!(
            result,
            Err(ConvertError::Domain(DomainError::CurrencyNotSet(Side::From)))
        ));
        assert_eq!(converter.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_target_currency() {
        let converter = Converter::new(FeedStub::new());

        let result = converter
            .convert(&CancellationToken::new(), &Money::new(dec!(10), "USD"), "  ", jan_5())
            .await;

        assert!(matches!(
            result,
            Err(ConvertError::Domain(DomainError::CurrencyNotSet(Side::To)))
        ));
        assert_eq!(converter.client().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_unknown_code_is_lookup_error() {
        let result = convert(dec!(10), "ZZZ", "GEL").await;
        assert!(matches!(
            result,
            Err(ConvertError::Domain(DomainError::CodeNotFound(ref c))) if c == "ZZZ"
        ));

        let result = convert(dec!(10), "USD", "ZZZ").await;
        assert!(matches!(
            result,
            Err(ConvertError::Domain(DomainError::CodeNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_unusable_quote_is_rejected() {
        let result = convert(dec!(10), "XXX", "GEL").await;
        assert!(matches!(
            result,
            Err(ConvertError::Domain(DomainError::InvalidQuote { .. }))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_conversion() {
        let converter = Converter::new(FeedStub::new());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = converter
            .convert(&cancel, &Money::new(dec!(10), "USD"), "GEL", jan_5())
            .await;

        assert!(result.as_ref().is_err_and(ConvertError::is_cancelled));
    }

    #[tokio::test]
    async fn test_usable_through_port() {
        let converter: Box<dyn MoneyConverter> = Box::new(Converter::new(FeedStub::new()));

        let result = converter
            .convert(
                &CancellationToken::new(),
                &Money::new(dec!(2500), "EUR"),
                "GEL",
                jan_5(),
            )
            .await
            .unwrap();

        assert_eq!(result.money.amount, dec!(8154.25));
    }

    #[test]
    fn test_cross_rate_of_identical_quotes_is_one() {
        let jpy = quote("JPY", 100, dec!(1.8573));
        assert_eq!(cross_rate(&jpy, &jpy).unwrap(), Decimal::ONE);
    }
}
