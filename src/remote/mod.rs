//! Remote Module
//!
//! Distributed-cache adapter: a minimal byte-level client contract for a
//! remote key-value store, plus a cache implementation that delegates all
//! storage to it.

mod cache;
mod client;

// Re-export public types
pub use cache::DistributedCache;
pub use client::{MemoryStoreClient, RemoteStoreClient};
