//! Cache Module
//!
//! Defines the public cache contract and provides the bounded in-memory
//! implementation with pluggable eviction.

mod memory;
mod stats;


use async_trait::async_trait;

use crate::error::Result;

// Re-export public types
pub use memory::InMemoryCache;
pub use stats::CacheStats;

// == Cache Trait ==
/// The public cache contract.
///
/// This is the sole surface other code depends on; the in-memory cache
/// and the distributed adapter are substitutable behind it. The contract
/// is async because the distributed variant performs remote I/O; the
/// in-memory variant completes without awaiting.
///
/// A miss is a normal outcome (`Ok(None)`), never an error.
#[async_trait]
pub trait Cache<K, V>: Send + Sync
where
    K: Send + Sync,
    V: Send + Sync,
{
    /// Retrieves the value for a key, recording the access.
    async fn get(&self, key: &K) -> Result<Option<V>>;

    /// Stores a key-value pair, evicting if needed to stay within bounds.
    async fn put(&self, key: K, value: V) -> Result<()>;

    /// Removes an entry; no-op if the key is absent.
    async fn remove(&self, key: &K) -> Result<()>;

    /// Returns the current entry count.
    async fn len(&self) -> usize;
}
