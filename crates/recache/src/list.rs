//! Recency chain: doubly-linked ordering of live entries
//!
//! Entries live in an index-addressed arena so links are plain `usize`
//! slot numbers instead of pointers. Two permanent sentinel slots mark
//! the chain boundaries, keeping every link/unlink at exactly four
//! index reassignments with no null checks.

/// Arena slot of the head sentinel. `nodes[HEAD].next` is the
/// most-recently-used live entry, or `TAIL` when the chain is empty.
const HEAD: usize = 0;

/// Arena slot of the tail sentinel. `nodes[TAIL].prev` is the
/// least-recently-used live entry, or `HEAD` when the chain is empty.
const TAIL: usize = 1;

/// Node in the recency chain. Sentinels carry no entry.
struct Node<K, V> {
    entry: Option<(K, V)>,
    prev: usize,
    next: usize,
}

/// Doubly-linked recency ordering from most- to least-recently used.
///
/// Owns the entry storage; callers address entries by the slot index
/// returned from [`acquire`](RecencyList::acquire). Slot indices stay
/// stable for the lifetime of the entry and are recycled after release.
pub(crate) struct RecencyList<K, V> {
    nodes: Vec<Node<K, V>>,
    free: Vec<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    /// Create an empty chain, reserving arena room for `capacity` live
    /// entries plus the two sentinels.
    pub(crate) fn new(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.saturating_add(2));
        nodes.push(Node {
            entry: None,
            prev: HEAD,
            next: TAIL,
        });
        nodes.push(Node {
            entry: None,
            prev: HEAD,
            next: TAIL,
        });

        Self {
            nodes,
            free: Vec::new(),
            len: 0,
        }
    }

    /// Number of live (non-sentinel) entries in the chain.
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Store a new, unlinked entry in the arena and return its slot.
    pub(crate) fn acquire(&mut self, key: K, value: V) -> usize {
        let node = Node {
            entry: Some((key, value)),
            prev: HEAD,
            next: TAIL,
        };

        if let Some(idx) = self.free.pop() {
            self.nodes[idx] = node;
            idx
        } else {
            self.nodes.push(node);
            self.nodes.len() - 1
        }
    }

    /// Return an unlinked slot to the free pool, yielding its entry.
    pub(crate) fn release(&mut self, idx: usize) -> Option<(K, V)> {
        let entry = self.nodes[idx].entry.take();
        if entry.is_some() {
            self.free.push(idx);
        }
        entry
    }

    /// Link a freshly acquired slot immediately after the head sentinel.
    pub(crate) fn push_front(&mut self, idx: usize) {
        let old_front = self.nodes[HEAD].next;

        self.nodes[idx].prev = HEAD;
        self.nodes[idx].next = old_front;
        self.nodes[old_front].prev = idx;
        self.nodes[HEAD].next = idx;

        self.len += 1;
    }

    /// Re-rank a linked slot as most recently used. No-op if it is
    /// already at the front of the chain.
    pub(crate) fn move_to_front(&mut self, idx: usize) {
        if self.nodes[HEAD].next == idx {
            return;
        }

        self.unlink(idx);
        self.push_front(idx);
    }

    /// Unlink and return the least-recently-used slot, or `None` when
    /// the chain holds no live entries.
    pub(crate) fn pop_tail(&mut self) -> Option<usize> {
        let idx = self.nodes[TAIL].prev;
        if idx == HEAD {
            return None;
        }

        self.unlink(idx);
        Some(idx)
    }

    /// Read-only peek at the current eviction candidate (the entry at
    /// the tail of the chain).
    pub(crate) fn peek_tail(&self) -> Option<(&K, &V)> {
        let idx = self.nodes[TAIL].prev;
        if idx == HEAD {
            return None;
        }

        self.nodes[idx].entry.as_ref().map(|(k, v)| (k, v))
    }

    /// Borrow the value stored in a slot.
    pub(crate) fn value(&self, idx: usize) -> Option<&V> {
        self.nodes[idx].entry.as_ref().map(|(_, v)| v)
    }

    /// Overwrite the value stored in a slot, leaving the key and the
    /// chain topology untouched.
    pub(crate) fn update(&mut self, idx: usize, value: V) {
        if let Some((_, v)) = self.nodes[idx].entry.as_mut() {
            *v = value;
        }
    }

    /// Iterate entries in recency order, most recently used first.
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            cursor: self.nodes[HEAD].next,
        }
    }

    /// Drop every live entry and relink the sentinels to each other.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(2);
        self.nodes[HEAD].next = TAIL;
        self.nodes[TAIL].prev = HEAD;
        self.free.clear();
        self.len = 0;
    }

    fn unlink(&mut self, idx: usize) {
        let prev = self.nodes[idx].prev;
        let next = self.nodes[idx].next;

        self.nodes[prev].next = next;
        self.nodes[next].prev = prev;

        self.len -= 1;
    }
}

/// Iterator over live entries, head (MRU) to tail (LRU).
pub(crate) struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    cursor: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == TAIL {
            return None;
        }

        let node = &self.list.nodes[self.cursor];
        self.cursor = node.next;
        node.entry.as_ref().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys<'a>(list: &RecencyList<&'a str, u32>) -> Vec<&'a str> {
        list.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_empty_chain() {
        let mut list: RecencyList<&str, u32> = RecencyList::new(4);

        assert_eq!(list.len(), 0);
        assert!(list.peek_tail().is_none());
        assert!(list.pop_tail().is_none());
    }

    #[test]
    fn test_push_front_orders_mru_first() {
        let mut list = RecencyList::new(4);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let b = list.acquire("b", 2);
        list.push_front(b);
        let c = list.acquire("c", 3);
        list.push_front(c);

        assert_eq!(keys(&list), vec!["c", "b", "a"]);
        assert_eq!(list.peek_tail(), Some((&"a", &1)));
    }

    #[test]
    fn test_move_to_front() {
        let mut list = RecencyList::new(4);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let b = list.acquire("b", 2);
        list.push_front(b);
        let c = list.acquire("c", 3);
        list.push_front(c);

        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);

        // Already at front: topology unchanged
        list.move_to_front(a);
        assert_eq!(keys(&list), vec!["a", "c", "b"]);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_pop_tail_unlinks_lru() {
        let mut list = RecencyList::new(4);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let b = list.acquire("b", 2);
        list.push_front(b);

        let popped = list.pop_tail().unwrap();
        assert_eq!(popped, a);
        assert_eq!(list.release(popped), Some(("a", 1)));
        assert_eq!(keys(&list), vec!["b"]);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_slot_recycling() {
        let mut list = RecencyList::new(2);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let popped = list.pop_tail().unwrap();
        list.release(popped);

        // The freed slot is handed back out
        let b = list.acquire("b", 2);
        assert_eq!(b, a);
    }

    #[test]
    fn test_update_keeps_topology() {
        let mut list = RecencyList::new(4);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let b = list.acquire("b", 2);
        list.push_front(b);

        list.update(a, 10);
        assert_eq!(list.value(a), Some(&10));
        assert_eq!(keys(&list), vec!["b", "a"]);
    }

    #[test]
    fn test_clear_relinks_sentinels() {
        let mut list = RecencyList::new(4);

        let a = list.acquire("a", 1);
        list.push_front(a);
        let b = list.acquire("b", 2);
        list.push_front(b);

        list.clear();

        assert_eq!(list.len(), 0);
        assert!(list.peek_tail().is_none());
        assert_eq!(keys(&list), Vec::<&str>::new());

        // Chain is usable again after clearing
        let c = list.acquire("c", 3);
        list.push_front(c);
        assert_eq!(keys(&list), vec!["c"]);
    }
}
