//! LRU core: hash index composed with the recency chain
//!
//! Every operation mutates both structures together so they stay in
//! bijection: each indexed key points at exactly one linked chain slot
//! and each linked slot is indexed under exactly one key. The core is
//! unsynchronized; [`crate::cache::LruCache`] serializes access.

use std::hash::Hash;

use crate::error::{Error, Result};
use crate::index::RecencyIndex;
use crate::list::RecencyList;

/// Effect of a `put` on the cache, reported for statistics.
pub(crate) enum PutOutcome<K, V> {
    /// The key was already cached; its value was overwritten in place.
    Updated,

    /// A new entry was inserted, evicting the LRU entry if the insert
    /// pushed the cache over capacity.
    Inserted { evicted: Option<(K, V)> },
}

/// Fixed-capacity LRU store. Lookup, insertion, and eviction are all
/// O(1) expected time regardless of capacity.
pub(crate) struct LruCore<K, V> {
    list: RecencyList<K, V>,
    index: RecencyIndex<K>,
    capacity: usize,
}

impl<K, V> LruCore<K, V>
where
    K: Hash + Eq + Clone,
{
    /// Create a core bounded to `capacity` live entries. Zero is valid:
    /// every insert immediately evicts itself.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            list: RecencyList::new(capacity),
            index: RecencyIndex::new(capacity),
            capacity,
        }
    }

    /// Look up `key`, re-ranking its entry as most recently used on a
    /// hit. A miss has no side effect.
    pub(crate) fn get(&mut self, key: &K) -> Option<&V> {
        let idx = self.index.lookup(key)?;
        self.list.move_to_front(idx);
        self.list.value(idx)
    }

    /// Insert or overwrite `key`, re-ranking it as most recently used.
    /// At most one entry is evicted, and only on an over-capacity
    /// insert of a new key.
    ///
    /// Errors signal index/chain desync, which is a bug in this module,
    /// never a caller condition.
    pub(crate) fn put(&mut self, key: K, value: V) -> Result<PutOutcome<K, V>> {
        if let Some(idx) = self.index.lookup(&key) {
            self.list.update(idx, value);
            self.list.move_to_front(idx);
            self.check_sync();
            return Ok(PutOutcome::Updated);
        }

        let idx = self.list.acquire(key.clone(), value);
        self.list.push_front(idx);
        self.index.insert(key, idx)?;

        let evicted = if self.index.len() > self.capacity {
            Some(self.evict()?)
        } else {
            None
        };

        self.check_sync();
        Ok(PutOutcome::Inserted { evicted })
    }

    /// Whether `key` is cached. Recency order is left untouched.
    pub(crate) fn contains_key(&self, key: &K) -> bool {
        self.index.contains(key)
    }

    /// Current live-entry count.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Configured capacity bound.
    pub(crate) fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty the index and the chain together.
    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.list.clear();
        self.check_sync();
    }

    /// Peek at the entry next in line for eviction.
    pub(crate) fn eviction_candidate(&self) -> Option<(&K, &V)> {
        self.list.peek_tail()
    }

    /// Copy out all live entries, most recently used first.
    pub(crate) fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        self.list
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Unlink the tail entry and unmap its key in one step.
    fn evict(&mut self) -> Result<(K, V)> {
        let idx = self.list.pop_tail().ok_or(Error::NotFound)?;
        let (key, value) = self.list.release(idx).ok_or(Error::NotFound)?;
        self.index.remove(&key)?;
        Ok((key, value))
    }

    /// Debug-build bijection check; compiles to nothing in release.
    #[inline]
    fn check_sync(&self) {
        debug_assert_eq!(
            self.index.len(),
            self.list.len(),
            "hash index and recency chain out of sync"
        );
        debug_assert!(
            self.list.len() <= self.capacity,
            "live entries exceed configured capacity"
        );
    }
}
