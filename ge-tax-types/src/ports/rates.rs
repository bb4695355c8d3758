//! Rate source port.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::domain::{QuoteSet, RatesQuery};
use crate::error::RatesError;

/// Source of official daily quotes.
///
/// Implementations must return quotes sorted by code and must abort with
/// [`RatesError::Cancelled`] once `cancel` fires.
#[async_trait::async_trait]
pub trait RatesClient: Send + Sync {
    /// Returns the quotes for the query's date, today by default, restricted
    /// to the query's currencies, all published currencies by default.
    async fn rates(
        &self,
        cancel: &CancellationToken,
        query: RatesQuery,
    ) -> Result<QuoteSet, RatesError>;
}

#[async_trait::async_trait]
impl<T: RatesClient + ?Sized> RatesClient for Arc<T> {
    async fn rates(
        &self,
        cancel: &CancellationToken,
        query: RatesQuery,
    ) -> Result<QuoteSet, RatesError> {
        (**self).rates(cancel, query).await
    }
}
