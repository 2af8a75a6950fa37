//! Cache Engine - a bounded key-value cache with pluggable eviction
//!
//! Provides an in-memory cache with interchangeable eviction policies
//! (FIFO, LFU, LRU), a distributed adapter over a remote key-value store,
//! and read-through/write-through loading strategies.

pub mod cache;
pub mod config;
pub mod error;
pub mod policy;
pub mod remote;
pub mod strategy;

pub use cache::{Cache, CacheStats, InMemoryCache};
pub use config::CacheConfig;
pub use error::{CacheError, Result, SourceError, StoreError};
pub use policy::{EvictionPolicy, FifoPolicy, LfuPolicy, LruPolicy, PolicyKind};
pub use remote::{DistributedCache, MemoryStoreClient, RemoteStoreClient};
pub use strategy::{DataSource, LoadingCache, LoadingMode};
