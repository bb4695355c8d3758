//! Currency conversion port.

use chrono::NaiveDate;
use tokio_util::sync::CancellationToken;

use crate::domain::{Conversion, Money};
use crate::error::ConvertError;

/// Converts money between currencies at the official rate of a given date.
#[async_trait::async_trait]
pub trait MoneyConverter: Send + Sync {
    /// Converts `money` into `to` using the rates published for `date`.
    ///
    /// The converted amount is rounded to 2 decimal places and the reported
    /// rate to 4, both half away from zero.
    async fn convert(
        &self,
        cancel: &CancellationToken,
        money: &Money,
        to: &str,
        date: NaiveDate,
    ) -> Result<Conversion, ConvertError>;
}
