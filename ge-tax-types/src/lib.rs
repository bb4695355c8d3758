//! # Georgian Tax Types
//!
//! Domain types and port traits shared by the rate client, the currency
//! converter and the income service. This crate performs no IO.
//!
//! ## Layout
//!
//! - `domain/` - quotes, rate queries, money, currency codes, calendar parsing
//! - `ports/` - contracts implemented by the rate clients and the converter
//! - `error/` - error taxonomy shared across the workspace

pub mod domain;
pub mod error;
pub mod ports;

pub use domain::{
    Conversion, CurrencyQuote, DATE_FORMAT, Money, QuoteSet, RatesQuery, currencies,
};
pub use error::{AppError, BoxError, ConvertError, DomainError, RatesError, Side};
pub use ports::{MoneyConverter, RatesClient};

pub use tokio_util::sync::CancellationToken;
