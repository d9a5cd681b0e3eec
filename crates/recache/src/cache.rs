//! Thread-safe cache front: locking discipline and statistics
//!
//! One `RwLock` guards the whole core (index + chain move together).
//! `get` takes the write lock even though it is a read for the caller:
//! the hit path relinks the entry at the front of the recency chain,
//! so it mutates shared structure. Only operations that never touch
//! the chain topology run under the read lock.

use std::hash::Hash;

use parking_lot::RwLock;

use crate::lru::{LruCore, PutOutcome};
use crate::stats::CacheStats;

/// Fixed-capacity, thread-safe LRU cache.
///
/// Holds at most `capacity` entries and evicts the least-recently-used
/// entry when an insert would exceed the bound. Lookup, insertion, and
/// eviction are O(1) expected time. Share across threads with `Arc`.
///
/// ```
/// use recache::LruCache;
///
/// let cache = LruCache::new(2);
/// cache.put("a", 1);
/// cache.put("b", 2);
/// cache.put("c", 3); // evicts "a"
///
/// assert_eq!(cache.get(&"a"), None);
/// assert_eq!(cache.get(&"b"), Some(2));
/// ```
pub struct LruCache<K, V> {
    inner: RwLock<LruCore<K, V>>,
    stats: CacheStats,
}

impl<K, V> LruCache<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Create a cache bounded to `capacity` entries.
    ///
    /// A capacity of zero is valid: every `put` is accepted and
    /// immediately evicted, so nothing is ever retrievable.
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(LruCore::new(capacity)),
            stats: CacheStats::new(),
        }
    }

    /// Fetch a copy of the value for `key`, marking the entry most
    /// recently used. Returns `None` on a miss, with no side effect on
    /// recency order.
    pub fn get(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write();
        match inner.get(key) {
            Some(value) => {
                let value = value.clone();
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Insert `key` or overwrite its value in place; either way the
    /// entry becomes most recently used. Inserting a new key into a
    /// full cache evicts exactly one entry, the current LRU.
    pub fn put(&self, key: K, value: V) {
        let outcome = self.inner.write().put(key, value);
        match outcome {
            Ok(PutOutcome::Updated) => self.stats.record_update(),
            Ok(PutOutcome::Inserted { evicted }) => {
                self.stats.record_insertion();
                if evicted.is_some() {
                    self.stats.record_eviction();
                }
            }
            // Index/chain desync is a bug in this crate, not a caller
            // condition; fatal in debug builds.
            Err(err) => debug_assert!(false, "cache invariant violated: {err}"),
        }
    }

    /// Whether `key` is currently cached. Unlike [`get`](Self::get),
    /// this never changes the entry's place in the eviction order.
    pub fn contains_key(&self, key: &K) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Current number of live entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Configured capacity bound.
    pub fn capacity(&self) -> usize {
        self.inner.read().capacity()
    }

    /// Atomically drop every entry.
    pub fn clear(&self) {
        self.inner.write().clear();
    }

    /// Copy out all live entries from a single consistent state, most
    /// recently used first.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.inner.read().snapshot()
    }

    /// Copy of the entry next in line for eviction, for diagnostics.
    pub fn eviction_candidate(&self) -> Option<(K, V)> {
        self.inner
            .read()
            .eviction_candidate()
            .map(|(k, v)| (k.clone(), v.clone()))
    }

    /// Hit/miss/eviction counters for this cache.
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}
