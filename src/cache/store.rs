//! Cache Store Module
//!
//! Main cache engine combining HashMap storage with FIFO insertion tracking,
//! TTL expiration and soft memory accounting.

use std::collections::HashMap;

use tracing::debug;

use crate::cache::weigh::entry_size;
use crate::cache::{CacheEntry, CacheStats, Clock, EntryInfo, InsertionOrder, StatsCounters, SystemClock, Weigh};
use crate::config::CacheConfig;

// == Cache Store ==
/// Cache storage with FIFO eviction, lazy TTL expiry and statistics.
///
/// The store is single-threaded; wrap it in [`SharedCache`](crate::cache::SharedCache)
/// to share it between request handlers.
#[derive(Debug)]
pub struct CacheStore<V, C = SystemClock> {
    /// Key-value storage
    entries: HashMap<String, CacheEntry<V>>,
    /// Insertion order for eviction
    order: InsertionOrder,
    /// Performance counters
    stats: StatsCounters,
    /// Capacity limits
    config: CacheConfig,
    /// Sum of `size_bytes` over all entries
    memory_bytes_used: usize,
    clock: C,
}

impl<V: Clone + Weigh> CacheStore<V, SystemClock> {
    // == Constructor ==
    /// Creates a new CacheStore with the given limits on the system clock.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<V: Clone + Weigh, C: Clock> CacheStore<V, C> {
    /// Creates a new CacheStore driven by a custom clock.
    pub fn with_clock(config: CacheConfig, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: StatsCounters::new(),
            config: config.normalized(),
            memory_bytes_used: 0,
            clock,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Expired entries are removed and counted as misses. Reads do not
    /// change eviction order.
    pub fn get(&mut self, key: &str) -> Option<V> {
        self.get_if(key, |_| true)
    }

    /// Like [`get`](Self::get), but a fresh value that `accept` rejects is
    /// counted as a miss and not returned. The entry itself is kept.
    pub fn get_if<F>(&mut self, key: &str, accept: F) -> Option<V>
    where
        F: FnOnce(&V) -> bool,
    {
        let now = self.clock.now_ms();

        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired(now),
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expirations(1);
            self.stats.record_miss();
            return None;
        }

        let value = self
            .entries
            .get(key)
            .filter(|entry| accept(&entry.value))
            .map(|entry| entry.value.clone());
        match value {
            Some(_) => self.stats.record_hit(),
            None => self.stats.record_miss(),
        }
        value
    }

    // == Set ==
    /// Stores a value under `key` for `ttl_seconds`.
    ///
    /// Overwriting moves the key to the back of the eviction queue. Before
    /// returning, expired entries are swept and the oldest entries evicted
    /// until the new entry fits both limits. The new entry itself is never
    /// evicted, so one oversized entry may exceed the memory limit alone.
    pub fn set(&mut self, key: &str, value: V, ttl_seconds: i64) {
        let now = self.clock.now_ms();
        let size_bytes = entry_size(key, &value);

        self.remove_entry(key);
        self.sweep(now);
        self.make_room(size_bytes);

        let sequence = self.order.push(key);
        self.memory_bytes_used += size_bytes;
        self.entries.insert(
            key.to_string(),
            CacheEntry::new(value, now, ttl_seconds, sequence, size_bytes),
        );
    }

    // == Delete ==
    /// Removes an entry regardless of its expiry state.
    ///
    /// Returns whether an entry was removed.
    pub fn delete(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    // == Clear ==
    /// Removes every entry and returns how many were removed.
    ///
    /// Hit and miss counters are kept.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.order.clear();
        self.memory_bytes_used = 0;
        count
    }

    // == Entries ==
    /// Metadata for every physically present entry, oldest first.
    ///
    /// Expired entries that have not been swept yet are included and flagged.
    pub fn entries(&self) -> Vec<EntryInfo> {
        let now = self.clock.now_ms();
        self.order
            .iter()
            .filter_map(|(_, key)| self.entries.get(key).map(|entry| entry.info(key, now)))
            .collect()
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.entries.len(),
            max_size: self.config.max_entries,
            max_memory_bytes: self.config.max_memory_bytes,
            memory_bytes_used: self.memory_bytes_used,
            hits: self.stats.hits,
            misses: self.stats.misses,
            evictions: self.stats.evictions,
            expirations: self.stats.expirations,
            hit_rate: self.stats.hit_rate(),
            miss_rate: self.stats.miss_rate(),
        }
    }

    // == Purge Expired ==
    /// Removes all expired entries from the cache.
    ///
    /// Returns the number of entries removed.
    pub fn purge_expired(&mut self) -> usize {
        let now = self.clock.now_ms();
        self.sweep(now)
    }

    // == Reconfigure ==
    /// Replaces the capacity limits.
    ///
    /// Nothing is evicted here; a store that now exceeds its limits is
    /// brought back within them by the next `set`.
    pub fn reconfigure(&mut self, config: CacheConfig) {
        self.config = config.normalized();
    }

    /// Current capacity limits.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Whether a live, unexpired entry exists for `key`. Does not touch stats.
    pub fn contains_key(&self, key: &str) -> bool {
        let now = self.clock.now_ms();
        self.entries
            .get(key)
            .is_some_and(|entry| !entry.is_expired(now))
    }

    // == Length ==
    /// Returns the number of entries physically present.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes `key` and releases its order slot and bytes.
    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry<V>> {
        let entry = self.entries.remove(key)?;
        self.order.remove(entry.sequence);
        self.memory_bytes_used = self.memory_bytes_used.saturating_sub(entry.size_bytes);
        Some(entry)
    }

    /// Removes every entry expired at `now`.
    fn sweep(&mut self, now: u64) -> usize {
        let expired_keys: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired(now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            self.remove_entry(key);
        }

        let count = expired_keys.len();
        if count > 0 {
            self.stats.record_expirations(count);
            debug!(removed = count, "swept expired cache entries");
        }
        count
    }

    /// Evicts oldest entries until one more entry of `incoming_bytes` fits.
    fn make_room(&mut self, incoming_bytes: usize) {
        while !self.entries.is_empty() && self.over_capacity(incoming_bytes) {
            let Some((_, key)) = self.order.pop_oldest() else {
                break;
            };
            if let Some(entry) = self.entries.remove(&key) {
                self.memory_bytes_used = self.memory_bytes_used.saturating_sub(entry.size_bytes);
                self.stats.record_eviction();
                debug!(key = %key, size_bytes = entry.size_bytes, "evicted cache entry");
            }
        }
    }

    fn over_capacity(&self, incoming_bytes: usize) -> bool {
        self.entries.len() >= self.config.max_entries
            || self.memory_bytes_used.saturating_add(incoming_bytes) > self.config.max_memory_bytes
    }
}
