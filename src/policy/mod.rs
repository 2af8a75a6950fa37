//! Eviction Policy Module
//!
//! Pluggable eviction bookkeeping for bounded caches. Policies track
//! per-key ordering/frequency metadata and choose the next victim; they
//! know nothing about values or capacity.

mod fifo;
mod lfu;
mod lru;

use std::fmt::Debug;
use std::hash::Hash;
use std::str::FromStr;

// Re-export public types
pub use fifo::FifoPolicy;
pub use lfu::LfuPolicy;
pub use lru::LruPolicy;

// == Eviction Policy Trait ==
/// Bookkeeping contract shared by all eviction strategies.
///
/// A policy instance is owned exclusively by one cache and guards its own
/// internal structures, so every method is safe to call from multiple
/// threads without external locking.
///
/// Invariant: the set of keys tracked by the policy always equals the set
/// of keys stored in the owning cache.
pub trait EvictionPolicy<K>: Send + Sync + Debug {
    /// Informs the policy that `key` was just read or written.
    ///
    /// FIFO ignores repeats of an already-tracked key; LFU increments a
    /// frequency counter; LRU moves the key to the most-recent position.
    fn record_access(&self, key: &K);

    /// Selects and untracks the next key to evict.
    ///
    /// Returns `None` if no keys are tracked. Never fails.
    fn evict(&self) -> Option<K>;

    /// Untracks a key outside the normal evict path.
    ///
    /// No-op if the key is not tracked.
    fn remove(&self, key: &K);

    /// Returns the number of tracked keys.
    fn len(&self) -> usize;

    /// Returns true if no keys are tracked.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// == Policy Kind ==
/// Selectable eviction strategy, used by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    /// Evicts the oldest-inserted key regardless of access pattern
    Fifo,
    /// Evicts the least-frequently-accessed key
    Lfu,
    /// Evicts the least-recently-used key
    Lru,
}

impl PolicyKind {
    /// Builds a fresh policy instance of this kind.
    pub fn build<K>(self) -> Box<dyn EvictionPolicy<K>>
    where
        K: Clone + Eq + Hash + Debug + Send + Sync + 'static,
    {
        match self {
            PolicyKind::Fifo => Box::new(FifoPolicy::new()),
            PolicyKind::Lfu => Box::new(LfuPolicy::new()),
            PolicyKind::Lru => Box::new(LruPolicy::new()),
        }
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" => Ok(PolicyKind::Fifo),
            "lfu" => Ok(PolicyKind::Lfu),
            "lru" => Ok(PolicyKind::Lru),
            other => Err(format!("Unknown eviction policy: {}", other)),
        }
    }
}
