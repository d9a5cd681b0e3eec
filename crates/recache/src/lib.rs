//! # recache
//!
//! Fixed-capacity, thread-safe LRU cache.
//!
//! ## Architecture
//! - **Recency index**: AHash map from key to chain slot (O(1) lookup)
//! - **Recency chain**: arena-backed doubly-linked list with sentinel
//!   slots, ordered most- to least-recently used (O(1) eviction)
//! - **Locking**: one `parking_lot::RwLock` over both structures;
//!   `get` is a writer because a hit relinks the recency chain
//!
//! Lookup, insertion, and eviction run in O(1) expected time for any
//! capacity. Values are returned by clone, never as internal handles.

#![warn(missing_docs)]

mod cache;
mod error;
mod index;
mod list;
mod lru;
mod stats;

pub use cache::LruCache;
pub use error::{Error, Result};
pub use stats::{CacheStats, StatsSnapshot};
