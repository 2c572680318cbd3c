//! Bounded memoization cache for block-log lookups.
//!
//! The block-event lookup is the one I/O-bound dependency of an otherwise
//! pure evaluation, and the same (wiki, user, timestamp) triple recurs for
//! every revision a user has in the queue. The cache exists purely to avoid
//! repeated remote lookups within a run, not for correctness: stale entries
//! are safe to evict at any time, and an explicit [`clear`](BlockLookupCache::clear)
//! is exposed for tests and configuration changes.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::RwLock;

/// Default number of cached lookups.
pub const DEFAULT_BLOCK_CACHE_CAPACITY: usize = 1024;

/// Key for one memoized block lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BlockLookupKey {
    /// Wiki code (e.g. "fi").
    pub wiki: String,

    /// Username the lookup is about.
    pub username: String,

    /// Edit timestamp the block log was scanned after.
    pub timestamp: DateTime<Utc>,
}

impl BlockLookupKey {
    /// Build a key.
    pub fn new(wiki: impl Into<String>, username: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            wiki: wiki.into(),
            username: username.into(),
            timestamp,
        }
    }
}

/// Bounded FIFO cache of block-lookup results.
///
/// Concurrent reads are cheap; insertion evicts the oldest entry once the
/// capacity is reached. Never ambient global state: the evaluator owns its
/// cache instance.
#[derive(Debug)]
pub struct BlockLookupCache {
    entries: RwLock<IndexMap<BlockLookupKey, bool>>,
    capacity: usize,
}

impl Default for BlockLookupCache {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_CACHE_CAPACITY)
    }
}

impl BlockLookupCache {
    /// Create a cache holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            capacity: capacity.max(1),
        }
    }

    /// Look up a memoized result.
    pub fn get(&self, key: &BlockLookupKey) -> Option<bool> {
        self.entries.read().unwrap().get(key).copied()
    }

    /// Memoize a lookup result, evicting the oldest entry at capacity.
    pub fn insert(&self, key: BlockLookupKey, blocked: bool) {
        let mut entries = self.entries.write().unwrap();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            entries.shift_remove_index(0);
        }
        entries.insert(key, blocked);
    }

    /// Drop every memoized entry.
    pub fn clear(&self) {
        self.entries.write().unwrap().clear();
    }

    /// Number of memoized entries.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(user: &str) -> BlockLookupKey {
        BlockLookupKey::new("fi", user, Utc::now())
    }

    #[test]
    fn test_get_after_insert() {
        let cache = BlockLookupCache::new(10);
        let k = key("Alice");

        assert_eq!(cache.get(&k), None);
        cache.insert(k.clone(), true);
        assert_eq!(cache.get(&k), Some(true));
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let cache = BlockLookupCache::new(2);
        let a = key("A");
        let b = key("B");
        let c = key("C");

        cache.insert(a.clone(), false);
        cache.insert(b.clone(), false);
        cache.insert(c.clone(), true);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&a), None);
        assert_eq!(cache.get(&b), Some(false));
        assert_eq!(cache.get(&c), Some(true));
    }

    #[test]
    fn test_reinserting_existing_key_does_not_evict() {
        let cache = BlockLookupCache::new(2);
        let a = key("A");
        let b = key("B");

        cache.insert(a.clone(), false);
        cache.insert(b.clone(), false);
        cache.insert(a.clone(), true);

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&a), Some(true));
        assert_eq!(cache.get(&b), Some(false));
    }

    #[test]
    fn test_clear() {
        let cache = BlockLookupCache::default();
        cache.insert(key("A"), true);
        assert!(!cache.is_empty());

        cache.clear();
        assert!(cache.is_empty());
    }
}
