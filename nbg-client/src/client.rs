//! HTTP client for the official rates feed.

use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use tracing::debug;

use ge_tax_types::{CancellationToken, DATE_FORMAT, QuoteSet, RatesClient, RatesError, RatesQuery};

use crate::response;

/// Official rates endpoint of the National Bank of Georgia.
pub const DEFAULT_BASE_URL: &str =
    "https://nbg.gov.ge/gw/api/ct/monetarypolicy/currencies/en/json";

pub(crate) const CURRENCIES_PARAM: &str = "currencies";
pub(crate) const DATE_PARAM: &str = "date";

/// Stateless client for the rates feed. Cheap to clone and safe to share.
#[derive(Debug, Clone)]
pub struct NbgClient {
    base_url: String,
    http: Client,
}

impl Default for NbgClient {
    fn default() -> Self {
        Self::new()
    }
}

impl NbgClient {
    /// Creates a client for the official endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client for another endpoint serving the same payload.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Replaces the underlying HTTP client (proxies, timeouts, TLS setup).
    pub fn with_http_client(mut self, http: Client) -> Self {
        self.http = http;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch(&self, query: &RatesQuery) -> Result<QuoteSet, RatesError> {
        let date = query.resolved_date();
        let params = query_params(date, query.currencies());

        debug!(%date, currencies = ?query.currencies(), "Requesting official rates");

        let resp = self
            .http
            .get(&self.base_url)
            .query(&params)
            .send()
            .await
            .map_err(RatesError::transport)?;

        let status = resp.status();
        if status != StatusCode::OK {
            return Err(RatesError::Status(status.as_u16()));
        }

        let body = resp.bytes().await.map_err(RatesError::transport)?;

        let mut rates = response::decode(&body)?;
        response::finalize(&mut rates, query);

        debug!(%date, quotes = rates.len(), "Received official rates");
        Ok(rates)
    }
}

fn query_params(date: NaiveDate, codes: &[String]) -> Vec<(&'static str, String)> {
    codes
        .iter()
        .map(|code| (CURRENCIES_PARAM, code.clone()))
        .chain(std::iter::once((
            DATE_PARAM,
            date.format(DATE_FORMAT).to_string(),
        )))
        .collect()
}

#[async_trait::async_trait]
impl RatesClient for NbgClient {
    async fn rates(
        &self,
        cancel: &CancellationToken,
        query: RatesQuery,
    ) -> Result<QuoteSet, RatesError> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RatesError::Cancelled),
            result = self.fetch(&query) => result,
        }
    }
}
