//! Remote Store Client Module
//!
//! Byte-level contract for a remote key-value service, and an in-memory
//! fake for exercising the distributed cache without a network.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::StoreError;

// == Remote Store Client Trait ==
/// Minimal get/set/delete contract over a remote key-value service.
///
/// Keys and values are opaque bytes; the transport and wire protocol are
/// the client's concern. Implementations must be safe for concurrent use
/// (one client is shared across all cache operations in a process), and
/// must report an unreachable store as `StoreError::Unavailable` rather
/// than an absent key.
#[async_trait]
pub trait RemoteStoreClient: Send + Sync {
    /// Fetches the value for a key; `None` means the key is absent.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError>;

    /// Stores a key-value pair.
    async fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;

    /// Deletes a key. Absence of the key is not an error.
    async fn delete(&self, key: &[u8]) -> Result<(), StoreError>;
}

// == Memory Store Client ==
/// In-memory fake of a remote store.
///
/// Backs the distributed cache in tests and local development. Can be
/// switched into an unavailable state to exercise transport-failure
/// handling.
#[derive(Debug, Default)]
pub struct MemoryStoreClient {
    entries: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
    unavailable: AtomicBool,
}

impl MemoryStoreClient {
    // == Constructor ==
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    // == Availability Toggle ==
    /// Makes every subsequent call fail with `StoreError::Unavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(StoreError::Unavailable(
                "memory store marked unavailable".to_string(),
            ))
        } else {
            Ok(())
        }
    }

    // == Length ==
    /// Returns the number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Returns true if the store holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl RemoteStoreClient for MemoryStoreClient {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_available()?;
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.check_available()?;
        self.entries
            .write()
            .await
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn delete(&self, key: &[u8]) -> Result<(), StoreError> {
        self.check_available()?;
        self.entries.write().await.remove(key);
        Ok(())
    }
}
