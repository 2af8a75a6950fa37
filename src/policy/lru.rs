//! LRU Policy Module
//!
//! Implements least-recently-used tracking for cache eviction. This is
//! the extensibility proof for the policy trait: recency-based eviction
//! plugs in without any change to the cache contract.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::policy::EvictionPolicy;

// == LRU Policy ==
/// Tracks access order for LRU eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug, Default)]
pub struct LruPolicy<K> {
    /// Order of keys by access time
    order: Mutex<VecDeque<K>>,
}

impl<K> LruPolicy<K> {
    // == Constructor ==
    /// Creates a new empty LRU policy.
    pub fn new() -> Self {
        Self {
            order: Mutex::new(VecDeque::new()),
        }
    }
}

impl<K> EvictionPolicy<K> for LruPolicy<K>
where
    K: Clone + Eq + std::fmt::Debug + Send + Sync,
{
    // == Record Access ==
    /// Marks a key as recently used (moves to front).
    ///
    /// If the key is already tracked, it is removed first then re-added
    /// at the front.
    fn record_access(&self, key: &K) {
        let mut order = self.order.lock().expect("lru policy lock poisoned");
        order.retain(|k| k != key);
        order.push_front(key.clone());
    }

    // == Evict ==
    /// Returns and untracks the least recently used key.
    fn evict(&self) -> Option<K> {
        self.order
            .lock()
            .expect("lru policy lock poisoned")
            .pop_back()
    }

    // == Remove ==
    /// Untracks a key; no-op if absent.
    fn remove(&self, key: &K) {
        self.order
            .lock()
            .expect("lru policy lock poisoned")
            .retain(|k| k != key);
    }

    // == Length ==
    fn len(&self) -> usize {
        self.order.lock().expect("lru policy lock poisoned").len()
    }
}
