//! Bounded cache with least-recently-used eviction and a time-to-live

use super::IpCache;
use crate::model::IpDetails;
use std::time::Duration;

/// Default maximum number of entries
pub const DEFAULT_MAX_ENTRIES: u64 = 4096;

/// Default time-to-live for entries (24 hours)
pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Bounded, expiring cache backed by moka.
///
/// Cloning shares the underlying store.
#[derive(Clone, Debug)]
pub struct LruCache {
    inner: moka::sync::Cache<String, IpDetails>,
}

impl LruCache {
    /// Create a cache holding at most `max_entries` records for `ttl` each
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let inner = moka::sync::Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .build();
        Self { inner }
    }

    /// Create a cache with the default TTL and a custom capacity
    pub fn with_capacity(max_entries: u64) -> Self {
        Self::new(max_entries, DEFAULT_TTL)
    }

    /// Approximate number of entries
    ///
    /// Pending evictions are applied first, so the count is accurate once
    /// all writers have finished.
    pub fn entry_count(&self) -> u64 {
        self.inner.run_pending_tasks();
        self.inner.entry_count()
    }

    /// Remove all entries
    pub fn clear(&self) {
        self.inner.invalidate_all();
        self.inner.run_pending_tasks();
    }
}

impl Default for LruCache {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES, DEFAULT_TTL)
    }
}

impl IpCache for LruCache {
    fn get(&self, key: &str) -> Option<IpDetails> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: IpDetails) {
        self.inner.insert(key.to_string(), value);
    }
}
