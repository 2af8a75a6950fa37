//! Cache Loading Strategy Module
//!
//! Wraps a cache and a backing data source, deciding when misses fall
//! through to the source and whether results are cached.

use std::marker::PhantomData;

use async_trait::async_trait;
use tracing::warn;

use crate::cache::Cache;
use crate::error::{Result, SourceError};

// == Data Source Trait ==
/// Backing source of truth behind a loading cache.
#[async_trait]
pub trait DataSource<K, V>: Send + Sync {
    /// Loads the value for a key; `None` means the source has no entry.
    async fn load(&self, key: &K) -> std::result::Result<Option<V>, SourceError>;

    /// Persists a value for a key.
    async fn store(&self, key: &K, value: &V) -> std::result::Result<(), SourceError>;
}

// == Loading Mode ==
/// How the strategy coordinates cache and source.
///
/// Read-through always populates the cache on a miss that hits the
/// source. Write-through makes caching of loader results a configuration
/// flag instead; both modes commit writes to the source first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingMode {
    /// Misses that hit the source unconditionally populate the cache
    ReadThrough,
    /// Writes go source-first; caching of loader results is configurable
    WriteThrough {
        /// Whether a miss-driven load also populates the cache
        cache_loader_results: bool,
    },
}

impl LoadingMode {
    fn caches_loader_results(&self) -> bool {
        match self {
            LoadingMode::ReadThrough => true,
            LoadingMode::WriteThrough {
                cache_loader_results,
            } => *cache_loader_results,
        }
    }
}

// == Loading Cache ==
/// A cache coordinated with a backing data source.
///
/// Works over any `Cache` implementation, in-memory or distributed. The
/// source is the authority: a source failure always fails the operation,
/// while a cache failure after a successful source write is logged and
/// tolerated (the cache self-corrects on the next miss-driven reload or
/// explicit invalidation).
pub struct LoadingCache<K, V, C, S> {
    cache: C,
    source: S,
    mode: LoadingMode,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C, S> LoadingCache<K, V, C, S>
where
    K: Clone + Send + Sync,
    V: Clone + Send + Sync,
    C: Cache<K, V>,
    S: DataSource<K, V>,
{
    // == Constructor ==
    /// Creates a loading cache over a cache and a source.
    pub fn new(cache: C, source: S, mode: LoadingMode) -> Self {
        Self {
            cache,
            source,
            mode,
            _marker: PhantomData,
        }
    }

    // == Read ==
    /// Reads a value, falling through to the source on a cache miss.
    ///
    /// A cache hit returns immediately. On a miss, the source is asked;
    /// a loaded value populates the cache when the mode says so, and is
    /// returned even if that populate fails. A source failure propagates;
    /// nothing is ever cached for a failed load. An unavailable
    /// distributed cache propagates as `StoreUnavailable`, not a miss.
    pub async fn read(&self, key: &K) -> Result<Option<V>> {
        if let Some(value) = self.cache.get(key).await? {
            return Ok(Some(value));
        }

        let loaded = self.source.load(key).await?;
        let Some(value) = loaded else {
            return Ok(None);
        };

        if self.mode.caches_loader_results() {
            if let Err(err) = self.cache.put(key.clone(), value.clone()).await {
                warn!(error = %err, "failed to cache loaded value; returning it anyway");
            }
        }
        Ok(Some(value))
    }

    // == Write ==
    /// Writes a value source-first, then updates the cache.
    ///
    /// A source failure fails the write and leaves the cache untouched
    /// (a value that failed to persist is never cached). A cache failure
    /// after a successful source write is reported as success: the entry
    /// is stale until the next reload or invalidation.
    pub async fn write(&self, key: K, value: V) -> Result<()> {
        self.source.store(&key, &value).await?;

        if let Err(err) = self.cache.put(key, value).await {
            warn!(error = %err, "cache update failed after source write; entry stale until reloaded");
        }
        Ok(())
    }

    // == Invalidate ==
    /// Drops the cache entry for a key; the source is untouched.
    pub async fn invalidate(&self, key: &K) -> Result<()> {
        self.cache.remove(key).await
    }

    // == Accessors ==
    /// Returns the wrapped cache.
    pub fn cache(&self) -> &C {
        &self.cache
    }

    /// Returns the configured mode.
    pub fn mode(&self) -> LoadingMode {
        self.mode
    }
}
