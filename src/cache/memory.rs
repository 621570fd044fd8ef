//! Unbounded in-memory cache

use super::IpCache;
use crate::model::IpDetails;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Thread-safe, unbounded map from queried address to record
#[derive(Clone, Debug, Default)]
pub struct MemoryCache {
    cache: Arc<Mutex<HashMap<String, IpDetails>>>,
}

impl MemoryCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of entries in the cache
    pub fn len(&self) -> usize {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.is_empty()
    }

    /// Check if an entry exists for `key`
    pub fn contains(&self, key: &str) -> bool {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.contains_key(key)
    }

    /// Clear all entries from the cache
    pub fn clear(&self) {
        let mut cache = self.cache.lock().expect("mutex poisoned");
        cache.clear();
    }
}

impl IpCache for MemoryCache {
    fn get(&self, key: &str) -> Option<IpDetails> {
        let cache = self.cache.lock().expect("mutex poisoned");
        cache.get(key).cloned()
    }

    fn set(&self, key: &str, value: IpDetails) {
        let mut cache = self.cache.lock().expect("mutex poisoned");
        cache.insert(key.to_string(), value);
    }
}
