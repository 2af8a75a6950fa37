//! Cache Statistics Module
//!
//! Tracks cache performance counters: hits, misses and evictions.

use serde::Serialize;

// == Cache Stats ==
/// Performance counters for a cache instance.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Number of successful retrievals
    pub hits: u64,
    /// Number of retrievals for absent keys
    pub misses: u64,
    /// Number of entries removed by the eviction policy
    pub evictions: u64,
    /// Entry count at snapshot time
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates stats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any request.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Recorders ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Snapshot ==
    /// Returns a copy with the entry count filled in.
    pub fn snapshot(&self, total_entries: usize) -> Self {
        let mut stats = self.clone();
        stats.total_entries = total_entries;
        stats
    }
}
