//! Port traits (interfaces for adapters).
//!
//! Callers depend on these contracts, never on a concrete client, so a raw
//! feed client and its caching decorator are interchangeable.

mod converter;
mod rates;

pub use converter::MoneyConverter;
pub use rates::RatesClient;
