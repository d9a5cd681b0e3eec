//! Recency index: O(1) key to chain-slot lookup
//!
//! Thin wrapper over an AHash map. Insert/remove signal misuse as
//! errors so the cache layer can assert the index and chain never
//! drift apart; callers go through the cache, never the index.

use std::collections::HashMap;
use std::hash::Hash;

use ahash::RandomState;

use crate::error::{Error, Result};

/// Hash index mapping each cached key to its slot in the recency chain.
pub(crate) struct RecencyIndex<K> {
    map: HashMap<K, usize, RandomState>,
}

impl<K> RecencyIndex<K>
where
    K: Hash + Eq,
{
    /// Create an index sized for `capacity` keys.
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Slot of the entry for `key`, if cached.
    pub(crate) fn lookup(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    /// Whether `key` is cached. Never touches the recency chain.
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.map.contains_key(key)
    }

    /// Map a new key to its chain slot.
    pub(crate) fn insert(&mut self, key: K, idx: usize) -> Result<()> {
        if self.map.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }

        self.map.insert(key, idx);
        Ok(())
    }

    /// Unmap a key, returning the slot it pointed at.
    pub(crate) fn remove(&mut self, key: &K) -> Result<usize> {
        self.map.remove(key).ok_or(Error::NotFound)
    }

    /// Number of cached keys.
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Drop every mapping.
    pub(crate) fn clear(&mut self) {
        self.map.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_lookup() {
        let mut index = RecencyIndex::new(4);

        index.insert("a", 2).unwrap();
        index.insert("b", 3).unwrap();

        assert_eq!(index.lookup(&"a"), Some(2));
        assert_eq!(index.lookup(&"b"), Some(3));
        assert_eq!(index.lookup(&"c"), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut index = RecencyIndex::new(4);

        index.insert("a", 2).unwrap();
        assert_eq!(index.insert("a", 5), Err(Error::DuplicateKey));

        // Original mapping survives the rejected insert
        assert_eq!(index.lookup(&"a"), Some(2));
    }

    #[test]
    fn test_remove_missing_rejected() {
        let mut index: RecencyIndex<&str> = RecencyIndex::new(4);

        assert_eq!(index.remove(&"a"), Err(Error::NotFound));

        index.insert("a", 2).unwrap();
        assert_eq!(index.remove(&"a"), Ok(2));
        assert_eq!(index.remove(&"a"), Err(Error::NotFound));
    }

    #[test]
    fn test_contains_and_clear() {
        let mut index = RecencyIndex::new(4);

        index.insert("a", 2).unwrap();
        assert!(index.contains(&"a"));

        index.clear();
        assert!(!index.contains(&"a"));
        assert_eq!(index.len(), 0);
    }
}
