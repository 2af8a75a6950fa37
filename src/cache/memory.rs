//! In-Memory Cache Module
//!
//! Bounded key-value store combining HashMap storage with a pluggable
//! eviction policy.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::{debug, error};

use crate::cache::{Cache, CacheStats};
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::policy::EvictionPolicy;

// == Inner State ==
/// Map, policy and counters, guarded together so the whole
/// "check size -> evict -> mutate map -> update policy" sequence is atomic.
#[derive(Debug)]
struct Inner<K, V> {
    /// Key-value storage
    entries: HashMap<K, V>,
    /// Eviction bookkeeping; tracked keys always equal the map's keys
    policy: Box<dyn EvictionPolicy<K>>,
    /// Performance counters
    stats: CacheStats,
}

// == In-Memory Cache ==
/// Bounded in-memory cache with policy-driven eviction.
///
/// Capacity and policy are fixed at construction; the policy instance is
/// owned exclusively by this cache. A single lock guards map and policy,
/// so same-key operations are linearizable and the capacity bound holds
/// after every operation, including concurrent puts racing to evict.
#[derive(Debug)]
pub struct InMemoryCache<K, V> {
    inner: Mutex<Inner<K, V>>,
    /// Maximum number of entries allowed
    capacity: usize,
}

impl<K, V> InMemoryCache<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    // == Constructor ==
    /// Creates a cache with the given capacity and eviction policy.
    ///
    /// # Arguments
    /// * `capacity` - Maximum number of entries; must be at least 1
    /// * `policy` - Eviction policy; ownership transfers to the cache
    pub fn new(capacity: usize, policy: Box<dyn EvictionPolicy<K>>) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidArgument(
                "Cache capacity must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                policy,
                stats: CacheStats::new(),
            }),
            capacity,
        })
    }

    // == From Config ==
    /// Creates a cache from configuration (capacity and policy kind).
    pub fn from_config(config: &CacheConfig) -> Result<Self>
    where
        K: 'static,
    {
        Self::new(config.capacity, config.policy.build())
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// A hit records the access with the policy; a miss returns `None`.
    pub fn get(&self, key: &K) -> Result<Option<V>> {
        let mut inner = self.lock();

        if let Some(value) = inner.entries.get(key) {
            let value = value.clone();
            inner.policy.record_access(key);
            inner.stats.record_hit();
            Ok(Some(value))
        } else {
            inner.stats.record_miss();
            Ok(None)
        }
    }

    // == Put ==
    /// Stores a key-value pair.
    ///
    /// An existing key is overwritten in place (no eviction). A new key
    /// on a full cache triggers exactly one eviction first. If the policy
    /// has no victim despite a full map, the map and policy have drifted
    /// apart; the put is aborted with an invariant violation rather than
    /// silently dropping data.
    pub fn put(&self, key: K, value: V) -> Result<()> {
        let mut inner = self.lock();

        if inner.entries.contains_key(&key) {
            inner.entries.insert(key.clone(), value);
            inner.policy.record_access(&key);
            return Ok(());
        }

        if inner.entries.len() >= self.capacity {
            match inner.policy.evict() {
                Some(victim) => {
                    inner.entries.remove(&victim);
                    inner.stats.record_eviction();
                    debug!(?victim, "evicted entry at capacity");
                }
                None => {
                    error!(
                        capacity = self.capacity,
                        "policy returned no victim for a full cache"
                    );
                    return Err(CacheError::InvariantViolation(
                        "Eviction policy returned no victim for a full cache".to_string(),
                    ));
                }
            }
        }

        inner.entries.insert(key.clone(), value);
        inner.policy.record_access(&key);
        Ok(())
    }

    // == Remove ==
    /// Removes an entry and untracks it from the policy; no-op if absent.
    pub fn remove(&self, key: &K) -> Result<()> {
        let mut inner = self.lock();

        if inner.entries.remove(key).is_some() {
            inner.policy.remove(key);
        }
        Ok(())
    }

    // == Length ==
    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    /// Returns true if the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.lock().entries.is_empty()
    }

    // == Capacity ==
    /// Returns the fixed capacity set at construction.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Stats ==
    /// Returns a snapshot of the performance counters.
    pub fn stats(&self) -> CacheStats {
        let inner = self.lock();
        inner.stats.snapshot(inner.entries.len())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<K, V>> {
        self.inner.lock().expect("cache lock poisoned")
    }
}

// == Cache Trait Implementation ==
#[async_trait]
impl<K, V> Cache<K, V> for InMemoryCache<K, V>
where
    K: Clone + Eq + Hash + Debug + Send + Sync,
    V: Clone + Send + Sync,
{
    async fn get(&self, key: &K) -> Result<Option<V>> {
        InMemoryCache::get(self, key)
    }

    async fn put(&self, key: K, value: V) -> Result<()> {
        InMemoryCache::put(self, key, value)
    }

    async fn remove(&self, key: &K) -> Result<()> {
        InMemoryCache::remove(self, key)
    }

    async fn len(&self) -> usize {
        InMemoryCache::len(self)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{FifoPolicy, LfuPolicy, LruPolicy};

    fn fifo_cache(capacity: usize) -> InMemoryCache<String, i64> {
        InMemoryCache::new(capacity, Box::new(FifoPolicy::new())).unwrap()
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let result: Result<InMemoryCache<String, i64>> =
            InMemoryCache::new(0, Box::new(FifoPolicy::new()));
        assert!(matches!(result, Err(CacheError::InvalidArgument(_))));
    }

    #[test]
    fn test_put_and_get() {
        let cache = fifo_cache(10);

        cache.put("key1".to_string(), 1).unwrap();
        assert_eq!(cache.get(&"key1".to_string()).unwrap(), Some(1));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_get_miss_returns_none() {
        let cache = fifo_cache(10);
        assert_eq!(cache.get(&"missing".to_string()).unwrap(), None);
    }

    #[test]
    fn test_overwrite_keeps_size() {
        let cache = fifo_cache(10);

        cache.put("key1".to_string(), 1).unwrap();
        cache.put("key1".to_string(), 2).unwrap();

        assert_eq!(cache.get(&"key1".to_string()).unwrap(), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_put_idempotent() {
        let cache = fifo_cache(10);

        cache.put("key1".to_string(), 1).unwrap();
        cache.put("key1".to_string(), 1).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"key1".to_string()).unwrap(), Some(1));
    }

    #[test]
    fn test_remove_untracks() {
        let cache = fifo_cache(10);

        cache.put("key1".to_string(), 1).unwrap();
        cache.remove(&"key1".to_string()).unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.get(&"key1".to_string()).unwrap(), None);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let cache = fifo_cache(10);
        cache.remove(&"missing".to_string()).unwrap();
        assert!(cache.is_empty());
    }

    // Scenario: capacity 2, FIFO, put a, b, c -> a evicted
    #[test]
    fn test_fifo_eviction_order() {
        let cache = fifo_cache(2);

        cache.put("a".to_string(), 1).unwrap();
        cache.put("b".to_string(), 2).unwrap();
        cache.put("c".to_string(), 3).unwrap();

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()).unwrap(), None);
        assert_eq!(cache.get(&"b".to_string()).unwrap(), Some(2));
        assert_eq!(cache.get(&"c".to_string()).unwrap(), Some(3));
    }

    // Scenario: capacity 2, LFU, put a, put b, get a twice, put c -> b evicted
    #[test]
    fn test_lfu_eviction_prefers_cold_key() {
        let cache: InMemoryCache<String, i64> =
            InMemoryCache::new(2, Box::new(LfuPolicy::new())).unwrap();

        cache.put("a".to_string(), 1).unwrap();
        cache.put("b".to_string(), 2).unwrap();
        cache.get(&"a".to_string()).unwrap();
        cache.get(&"a".to_string()).unwrap();
        cache.put("c".to_string(), 3).unwrap();

        assert_eq!(cache.get(&"b".to_string()).unwrap(), None);
        assert_eq!(cache.get(&"a".to_string()).unwrap(), Some(1));
        assert_eq!(cache.get(&"c".to_string()).unwrap(), Some(3));
    }

    #[test]
    fn test_lru_policy_plugs_in() {
        let cache: InMemoryCache<String, i64> =
            InMemoryCache::new(2, Box::new(LruPolicy::new())).unwrap();

        cache.put("a".to_string(), 1).unwrap();
        cache.put("b".to_string(), 2).unwrap();

        // Touch 'a' so 'b' is the least recently used
        cache.get(&"a".to_string()).unwrap();
        cache.put("c".to_string(), 3).unwrap();

        assert_eq!(cache.get(&"b".to_string()).unwrap(), None);
        assert_eq!(cache.get(&"a".to_string()).unwrap(), Some(1));
    }

    #[test]
    fn test_fifo_read_does_not_refresh() {
        let cache = fifo_cache(2);

        cache.put("a".to_string(), 1).unwrap();
        cache.put("b".to_string(), 2).unwrap();

        // Reads never move a FIFO-tracked key
        cache.get(&"a".to_string()).unwrap();
        cache.put("c".to_string(), 3).unwrap();

        assert_eq!(cache.get(&"a".to_string()).unwrap(), None);
    }

    #[test]
    fn test_stats_counts_hits_misses_evictions() {
        let cache = fifo_cache(1);

        cache.put("a".to_string(), 1).unwrap();
        cache.get(&"a".to_string()).unwrap(); // hit
        cache.get(&"b".to_string()).unwrap(); // miss
        cache.put("b".to_string(), 2).unwrap(); // evicts a

        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_capacity_invariant_across_operations() {
        let cache = fifo_cache(3);

        for i in 0..20 {
            cache.put(format!("key{}", i), i).unwrap();
            assert!(cache.len() <= cache.capacity());
        }
        assert_eq!(cache.len(), cache.capacity());
    }

    // == Invariant Violation ==

    /// Policy that tracks keys but never produces a victim, simulating
    /// map/policy desynchronization.
    #[derive(Debug, Default)]
    struct NoVictimPolicy {
        tracked: std::sync::Mutex<Vec<String>>,
    }

    impl EvictionPolicy<String> for NoVictimPolicy {
        fn record_access(&self, key: &String) {
            let mut tracked = self.tracked.lock().unwrap();
            if !tracked.contains(key) {
                tracked.push(key.clone());
            }
        }

        fn evict(&self) -> Option<String> {
            None
        }

        fn remove(&self, key: &String) {
            self.tracked.lock().unwrap().retain(|k| k != key);
        }

        fn len(&self) -> usize {
            self.tracked.lock().unwrap().len()
        }
    }

    #[test]
    fn test_no_victim_on_full_cache_is_invariant_violation() {
        let cache: InMemoryCache<String, i64> =
            InMemoryCache::new(2, Box::new(NoVictimPolicy::default())).unwrap();

        cache.put("a".to_string(), 1).unwrap();
        cache.put("b".to_string(), 2).unwrap();

        // Full cache, no victim: the put fails loudly instead of
        // silently dropping data
        let result = cache.put("c".to_string(), 3);
        assert!(matches!(result, Err(CacheError::InvariantViolation(_))));

        // The failed put left the cache untouched
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&"a".to_string()).unwrap(), Some(1));
        assert_eq!(cache.get(&"b".to_string()).unwrap(), Some(2));
        assert_eq!(cache.get(&"c".to_string()).unwrap(), None);
    }

    #[test]
    fn test_concurrent_puts_respect_capacity() {
        use std::sync::Arc;

        let cache = Arc::new(fifo_cache(8));
        let mut handles = Vec::new();

        for t in 0..4 {
            let cache = Arc::clone(&cache);
            handles.push(std::thread::spawn(move || {
                for i in 0..100 {
                    cache.put(format!("t{}-k{}", t, i), i).unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(cache.len() <= 8);
    }

    #[tokio::test]
    async fn test_cache_trait_object() {
        let cache: Box<dyn Cache<String, i64>> = Box::new(fifo_cache(2));

        cache.put("a".to_string(), 1).await.unwrap();
        assert_eq!(cache.get(&"a".to_string()).await.unwrap(), Some(1));
        cache.remove(&"a".to_string()).await.unwrap();
        assert_eq!(cache.len().await, 0);
    }
}
