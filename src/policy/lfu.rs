//! LFU Policy Module
//!
//! Implements least-frequently-used tracking for cache eviction.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;

use crate::policy::EvictionPolicy;

// == Frequency Record ==
/// Per-key frequency metadata.
#[derive(Debug, Clone, Copy)]
struct FreqRecord {
    /// Number of recorded accesses (starts at 1 on first sight)
    freq: u64,
    /// Logical clock value of the last access, used to break frequency ties
    stamp: u64,
}

// == LFU State ==
#[derive(Debug, Default)]
struct LfuState<K> {
    /// Frequency record per tracked key
    records: HashMap<K, FreqRecord>,
    /// Monotonic logical clock, bumped on every recorded access
    clock: u64,
}

// == LFU Policy ==
/// Tracks access frequency for LFU eviction.
///
/// `evict` removes the key with the lowest frequency; ties are broken by
/// the least-recently-updated key (smallest stamp), which keeps eviction
/// order deterministic.
#[derive(Debug, Default)]
pub struct LfuPolicy<K> {
    inner: Mutex<LfuState<K>>,
}

impl<K> LfuPolicy<K> {
    // == Constructor ==
    /// Creates a new empty LFU policy.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(LfuState {
                records: HashMap::new(),
                clock: 0,
            }),
        }
    }

    // == Frequency ==
    /// Returns the recorded frequency for a key, if tracked.
    pub fn frequency(&self, key: &K) -> Option<u64>
    where
        K: Eq + Hash,
    {
        self.inner
            .lock()
            .expect("lfu policy lock poisoned")
            .records
            .get(key)
            .map(|r| r.freq)
    }
}

impl<K> EvictionPolicy<K> for LfuPolicy<K>
where
    K: Clone + Eq + Hash + std::fmt::Debug + Send + Sync,
{
    // == Record Access ==
    /// Increments the key's frequency, starting at 1 on first sight.
    fn record_access(&self, key: &K) {
        let mut state = self.inner.lock().expect("lfu policy lock poisoned");
        state.clock += 1;
        let stamp = state.clock;
        state
            .records
            .entry(key.clone())
            .and_modify(|r| {
                r.freq += 1;
                r.stamp = stamp;
            })
            .or_insert(FreqRecord { freq: 1, stamp });
    }

    // == Evict ==
    /// Returns and untracks the lowest-frequency key, breaking ties by the
    /// least-recently-updated key.
    fn evict(&self) -> Option<K> {
        let mut state = self.inner.lock().expect("lfu policy lock poisoned");
        let victim = state
            .records
            .iter()
            .min_by_key(|(_, r)| (r.freq, r.stamp))
            .map(|(k, _)| k.clone())?;
        state.records.remove(&victim);
        Some(victim)
    }

    // == Remove ==
    /// Untracks a key; no-op if absent.
    fn remove(&self, key: &K) {
        self.inner
            .lock()
            .expect("lfu policy lock poisoned")
            .records
            .remove(key);
    }

    // == Length ==
    fn len(&self) -> usize {
        self.inner
            .lock()
            .expect("lfu policy lock poisoned")
            .records
            .len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lfu_new() {
        let lfu: LfuPolicy<String> = LfuPolicy::new();
        assert!(lfu.is_empty());
        assert_eq!(lfu.evict(), None);
    }

    #[test]
    fn test_lfu_frequency_starts_at_one() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a");
        assert_eq!(lfu.frequency(&"a"), Some(1));

        lfu.record_access(&"a");
        assert_eq!(lfu.frequency(&"a"), Some(2));
    }

    #[test]
    fn test_lfu_evicts_lowest_frequency() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a"); // a: 1
        lfu.record_access(&"b"); // b: 1
        lfu.record_access(&"a"); // a: 2
        lfu.record_access(&"a"); // a: 3

        assert_eq!(lfu.evict(), Some("b"));
        assert_eq!(lfu.len(), 1);
    }

    #[test]
    fn test_lfu_tie_broken_by_least_recently_updated() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a"); // a: 1, older
        lfu.record_access(&"b"); // b: 1, newer

        // Equal frequency: the least-recently-updated key loses
        assert_eq!(lfu.evict(), Some("a"));
        assert_eq!(lfu.evict(), Some("b"));
    }

    #[test]
    fn test_lfu_tie_break_follows_updates() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a"); // a: 1
        lfu.record_access(&"b"); // b: 1
        lfu.record_access(&"a"); // a: 2
        lfu.record_access(&"b"); // b: 2, updated last

        // Frequencies are tied at 2; 'a' was updated earlier
        assert_eq!(lfu.evict(), Some("a"));
    }

    #[test]
    fn test_lfu_remove_untracks() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a");
        lfu.record_access(&"b");

        lfu.remove(&"a");

        assert_eq!(lfu.len(), 1);
        assert_eq!(lfu.frequency(&"a"), None);
        assert_eq!(lfu.evict(), Some("b"));
    }

    #[test]
    fn test_lfu_remove_nonexistent_key() {
        let lfu = LfuPolicy::new();

        lfu.record_access(&"a");
        lfu.remove(&"missing");

        assert_eq!(lfu.len(), 1);
    }
}
