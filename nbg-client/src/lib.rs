//! # NBG Client
//!
//! Client for the official daily exchange rates published by the National
//! Bank of Georgia, plus a caching decorator over any [`RatesClient`].
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use ge_tax_types::{CancellationToken, RatesClient, RatesQuery, currencies};
//! use nbg_client::{CachedClient, NbgClient};
//!
//! # async fn run() -> Result<(), ge_tax_types::RatesError> {
//! let client = CachedClient::new(NbgClient::new(), Duration::from_secs(30 * 60));
//! let cancel = CancellationToken::new();
//!
//! let rates = client
//!     .rates(
//!         &cancel,
//!         RatesQuery::new()
//!             .with_currency(currencies::USD)
//!             .with_currency(currencies::GEL),
//!     )
//!     .await?;
//!
//! // USD from the feed plus the synthesized GEL quote.
//! assert!(rates.contains(currencies::USD));
//! assert!(rates.contains(currencies::GEL));
//! # Ok(())
//! # }
//! ```

pub mod cache;
mod client;
mod response;

pub use cache::{CacheKey, CacheStats, CachedClient};
pub use client::{DEFAULT_BASE_URL, NbgClient};

pub use ge_tax_types::RatesClient;
