//! Domain models for rate lookup and currency conversion.

pub mod calendar;
pub mod currencies;
pub mod money;
pub mod query;
pub mod quote;

pub use money::{Conversion, Money};
pub use query::RatesQuery;
pub use quote::{CurrencyQuote, QuoteSet};

/// Date layout used on the wire and in cache keys.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
