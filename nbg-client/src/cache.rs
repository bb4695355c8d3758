//! Caching decorator over any [`RatesClient`].
//!
//! Entries are keyed by the query date and its sorted currency codes and
//! expire lazily: staleness is only checked when an entry is read, counted or
//! swept by [`CachedClient::clear_expired`]. A TTL of zero disables expiry.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use chrono::NaiveDate;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::debug;

use ge_tax_types::{CancellationToken, DATE_FORMAT, QuoteSet, RatesClient, RatesError, RatesQuery};

/// TTL used by [`CachedClient::with_default_ttl`].
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

/// CRC-32 fingerprint of a query date and its currency codes.
///
/// Codes are sorted before hashing, so the order they were supplied in does
/// not change the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey(u32);

impl CacheKey {
    pub fn new(date: NaiveDate, codes: &[String]) -> Self {
        let mut sorted: Vec<&str> = codes.iter().map(String::as_str).collect();
        sorted.sort_unstable();

        let data = format!("{}:{}", date.format(DATE_FORMAT), sorted.join(","));
        Self(crc32fast::hash(data.as_bytes()))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:08x}", self.0)
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    rates: QuoteSet,
    stored_at: Instant,
}

impl CacheEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        !ttl.is_zero() && self.stored_at.elapsed() >= ttl
    }
}

/// Snapshot of the cache contents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub total_entries: usize,
    pub expired_entries: usize,
}

/// Rates client that memoizes the answers of an inner client.
///
/// Reads share a read lock; stores, clears and sweeps take the write lock and
/// always replace whole entries. Concurrent misses on the same key wait on a
/// per-key gate so that only the first one reaches the inner client.
pub struct CachedClient<C> {
    inner: C,
    entries: RwLock<HashMap<CacheKey, CacheEntry>>,
    gates: Gates,
    ttl: Duration,
}

impl<C: RatesClient> CachedClient<C> {
    /// Wraps `inner`. A zero `ttl` keeps entries until the process exits.
    pub fn new(inner: C, ttl: Duration) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::new()),
            gates: DashMap::new(),
            ttl,
        }
    }

    /// Wraps `inner` with a one hour TTL.
    pub fn with_default_ttl(inner: C) -> Self {
        Self::new(inner, DEFAULT_TTL)
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    /// Drops every entry.
    pub fn clear_cache(&self) {
        let mut entries = self.write_entries();
        let removed = entries.len();
        *entries = HashMap::new();
        debug!(removed, "Rates cache cleared");
    }

    /// Drops entries older than the TTL. No-op when the TTL is zero.
    pub fn clear_expired(&self) {
        if self.ttl.is_zero() {
            return;
        }

        let mut entries = self.write_entries();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        debug!(removed = before - entries.len(), "Expired rates evicted");
    }

    pub fn cache_stats(&self) -> CacheStats {
        let entries = self.read_entries();

        let expired_entries = if self.ttl.is_zero() {
            0
        } else {
            entries.values().filter(|e| e.is_expired(self.ttl)).count()
        };

        CacheStats {
            total_entries: entries.len(),
            expired_entries,
        }
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, CacheEntry>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn lookup(&self, key: CacheKey) -> Option<QuoteSet> {
        self.read_entries()
            .get(&key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.rates.clone())
    }

    fn store(&self, key: CacheKey, rates: QuoteSet) {
        let entry = CacheEntry {
            rates,
            stored_at: Instant::now(),
        };
        self.write_entries().insert(key, entry);
        debug!(%key, "Rates stored in cache");
    }

    async fn fill(
        &self,
        cancel: &CancellationToken,
        key: CacheKey,
        query: RatesQuery,
        gate: &Mutex<()>,
    ) -> Result<QuoteSet, RatesError> {
        let _guard = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(RatesError::Cancelled),
            guard = gate.lock() => guard,
        };

        if let Some(rates) = self.lookup(key) {
            debug!(%key, "Rates filled by a concurrent request");
            return Ok(rates);
        }

        debug!(%key, "Rates cache miss");
        let rates = self.inner.rates(cancel, query).await?;
        self.store(key, rates.clone());
        Ok(rates)
    }
}

type Gates = DashMap<CacheKey, Arc<Mutex<()>>>;

/// Shared per-key gate. Dropping the handle forgets the gate once nobody but
/// the map holds it, also when the request future is dropped mid-fetch.
struct GateHandle<'a> {
    gates: &'a Gates,
    key: CacheKey,
    gate: Arc<Mutex<()>>,
}

impl<'a> GateHandle<'a> {
    fn acquire(gates: &'a Gates, key: CacheKey) -> Self {
        let gate = Arc::clone(
            gates
                .entry(key)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .value(),
        );
        Self { gates, key, gate }
    }
}

impl Drop for GateHandle<'_> {
    fn drop(&mut self) {
        self.gates.remove_if(&self.key, |_, held| {
            Arc::ptr_eq(held, &self.gate) && Arc::strong_count(held) <= 2
        });
    }
}

#[async_trait::async_trait]
impl<C: RatesClient> RatesClient for CachedClient<C> {
    async fn rates(
        &self,
        cancel: &CancellationToken,
        query: RatesQuery,
    ) -> Result<QuoteSet, RatesError> {
        // Pin the date so the key and the inner request agree across midnight.
        let date = query.resolved_date();
        let query = query.with_date(date);
        let key = CacheKey::new(date, query.currencies());

        if let Some(rates) = self.lookup(key) {
            debug!(%key, %date, "Rates cache hit");
            return Ok(rates);
        }

        let gate = GateHandle::acquire(&self.gates, key);
        self.fill(cancel, key, query, &gate.gate).await
    }
}
