//! Decoding and post-processing of the feed payload.
//!
//! The feed answers with a JSON array holding one object per date. A query
//! always targets a single date, so more than one element breaks the
//! contract, while an empty array means nothing was published.

use ge_tax_types::{QuoteSet, RatesError, RatesQuery};

/// Parses a response body into a single quote set.
pub(crate) fn decode(body: &[u8]) -> Result<QuoteSet, RatesError> {
    let mut sets: Vec<QuoteSet> = serde_json::from_slice(body)?;

    match sets.len() {
        0 => Ok(QuoteSet::default()),
        1 => Ok(sets.pop().unwrap_or_default()),
        n => Err(RatesError::UnexpectedShape(n)),
    }
}

/// Adds the local currency when the query asks for it and orders quotes.
pub(crate) fn finalize(rates: &mut QuoteSet, query: &RatesQuery) {
    if query.wants_local_currency() {
        rates.ensure_local_currency();
    }
    rates.sort_by_code();
}
