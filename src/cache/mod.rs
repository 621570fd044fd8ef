//! Pluggable caching for lookup results
//!
//! The resolver talks to its cache only through [`IpCache`], so callers can
//! run without a cache, with a simple map, or with a bounded LRU store.

pub mod lru;
pub mod memory;

pub use lru::LruCache;
pub use memory::MemoryCache;

use crate::model::IpDetails;

/// Key/value store for resolved lookups, keyed by the queried address string.
///
/// Implementations must synchronize internally: the resolver shares one cache
/// between all in-flight lookups and takes no lock of its own.
pub trait IpCache: Send + Sync {
    /// Returns the cached record for `key`, or `None` if absent
    fn get(&self, key: &str) -> Option<IpDetails>;

    /// Stores `value` under `key`, replacing any existing entry
    fn set(&self, key: &str, value: IpDetails);
}

/// Pass-through cache: nothing is ever stored or returned.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCache;

impl IpCache for NoCache {
    fn get(&self, _key: &str) -> Option<IpDetails> {
        None
    }

    fn set(&self, _key: &str, _value: IpDetails) {}
}
