//! FIFO Policy Module
//!
//! Implements first-in-first-out tracking for cache eviction.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::policy::EvictionPolicy;

// == FIFO Policy ==
/// Tracks insertion order for FIFO eviction.
///
/// Keys are stored in a VecDeque where:
/// - Front = Oldest inserted
/// - Back = Newest inserted
///
/// First-seen order is permanent: later accesses to a tracked key do not
/// move it.
#[derive(Debug, Default)]
pub struct FifoPolicy<K> {
    /// Keys in insertion order
    order: Mutex<VecDeque<K>>,
}

impl<K> FifoPolicy<K> {
    // == Constructor ==
    /// Creates a new empty FIFO policy.
    pub fn new() -> Self {
        Self {
            order: Mutex::new(VecDeque::new()),
        }
    }
}

impl<K> EvictionPolicy<K> for FifoPolicy<K>
where
    K: Clone + Eq + std::fmt::Debug + Send + Sync,
{
    // == Record Access ==
    /// Adds the key at the back only if absent; repeats are ignored.
    fn record_access(&self, key: &K) {
        let mut order = self.order.lock().expect("fifo policy lock poisoned");
        if !order.contains(key) {
            order.push_back(key.clone());
        }
    }

    // == Evict ==
    /// Returns and untracks the oldest inserted key.
    fn evict(&self) -> Option<K> {
        self.order
            .lock()
            .expect("fifo policy lock poisoned")
            .pop_front()
    }

    // == Remove ==
    /// Untracks a key; no-op if absent.
    fn remove(&self, key: &K) {
        self.order
            .lock()
            .expect("fifo policy lock poisoned")
            .retain(|k| k != key);
    }

    // == Length ==
    fn len(&self) -> usize {
        self.order.lock().expect("fifo policy lock poisoned").len()
    }
}
