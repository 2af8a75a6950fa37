//! Distributed Cache Module
//!
//! Implements the cache contract on top of a remote key-value store.
//! Storage is authoritative at the remote; this adapter owns key/value
//! serialization, error translation and call timeouts.

use std::future::Future;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::cache::Cache;
use crate::error::{CacheError, Result, StoreError};
use crate::policy::EvictionPolicy;
use crate::remote::RemoteStoreClient;

// == Distributed Cache ==
/// Cache backed by a remote key-value store.
///
/// Keys and values cross the wire as JSON. Transport failures and timed
/// out calls surface as `StoreUnavailable`, never as a miss.
///
/// An optional local eviction policy can be attached for observability:
/// it mirrors which keys this process has touched. The remote store owns
/// the authoritative eviction/expiry behavior; the local policy never
/// deletes remote entries.
pub struct DistributedCache<K, V, C> {
    /// Remote store client, shared across all operations
    client: C,
    /// Per-call timeout; elapse is treated as the store being unavailable
    call_timeout: Duration,
    /// Local access bookkeeping, observability only
    local_policy: Option<Box<dyn EvictionPolicy<K>>>,
    _value: PhantomData<fn() -> V>,
}

impl<K, V, C> DistributedCache<K, V, C>
where
    K: Serialize + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
    C: RemoteStoreClient,
{
    // == Constructor ==
    /// Creates a distributed cache over the given client.
    ///
    /// # Arguments
    /// * `client` - Remote store client; must be safe for concurrent use
    /// * `call_timeout` - Upper bound on each remote call
    pub fn new(client: C, call_timeout: Duration) -> Self {
        Self {
            client,
            call_timeout,
            local_policy: None,
            _value: PhantomData,
        }
    }

    // == Local Policy ==
    /// Attaches a local eviction policy used purely for observability.
    pub fn with_local_policy(mut self, policy: Box<dyn EvictionPolicy<K>>) -> Self {
        self.local_policy = Some(policy);
        self
    }

    // == Get ==
    /// Fetches and deserializes the value for a key.
    ///
    /// An absent key is `Ok(None)`; an unreachable or timed out store is
    /// `StoreUnavailable`.
    pub async fn get(&self, key: &K) -> Result<Option<V>> {
        let key_bytes = serde_json::to_vec(key)?;

        match self.call(self.client.get(&key_bytes)).await? {
            Some(value_bytes) => {
                let value = serde_json::from_slice(&value_bytes)?;
                if let Some(policy) = &self.local_policy {
                    policy.record_access(key);
                }
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    // == Put ==
    /// Serializes and stores a key-value pair at the remote.
    ///
    /// A timed-out put leaves the remote state undefined: the write may or
    /// may not have been applied. The store remains recoverable; a later
    /// put or explicit remove settles the key.
    pub async fn put(&self, key: K, value: V) -> Result<()> {
        let key_bytes = serde_json::to_vec(&key)?;
        let value_bytes = serde_json::to_vec(&value)?;

        self.call(self.client.set(&key_bytes, &value_bytes)).await?;

        if let Some(policy) = &self.local_policy {
            policy.record_access(&key);
        }
        Ok(())
    }

    // == Remove ==
    /// Deletes a key at the remote. Absence of the key is not an error.
    pub async fn remove(&self, key: &K) -> Result<()> {
        let key_bytes = serde_json::to_vec(key)?;

        self.call(self.client.delete(&key_bytes)).await?;

        if let Some(policy) = &self.local_policy {
            policy.remove(key);
        }
        Ok(())
    }

    // == Length ==
    /// Returns the number of keys this process has observed.
    ///
    /// This is a local view: the remote store owns the authoritative
    /// entry set. Without a local policy the count is always 0.
    pub fn len(&self) -> usize {
        self.local_policy.as_ref().map_or(0, |p| p.len())
    }

    // == Call Wrapper ==
    /// Runs a remote call under the configured timeout.
    async fn call<T>(
        &self,
        fut: impl Future<Output = std::result::Result<T, StoreError>> + Send,
    ) -> Result<T> {
        match tokio::time::timeout(self.call_timeout, fut).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => {
                debug!(timeout = ?self.call_timeout, "remote call timed out");
                Err(CacheError::StoreUnavailable(format!(
                    "Remote call timed out after {:?}",
                    self.call_timeout
                )))
            }
        }
    }
}

// == Cache Trait Implementation ==
#[async_trait]
impl<K, V, C> Cache<K, V> for DistributedCache<K, V, C>
where
    K: Serialize + Send + Sync,
    V: Serialize + DeserializeOwned + Send + Sync,
    C: RemoteStoreClient,
{
    async fn get(&self, key: &K) -> Result<Option<V>> {
        DistributedCache::get(self, key).await
    }

    async fn put(&self, key: K, value: V) -> Result<()> {
        DistributedCache::put(self, key, value).await
    }

    async fn remove(&self, key: &K) -> Result<()> {
        DistributedCache::remove(self, key).await
    }

    async fn len(&self) -> usize {
        DistributedCache::len(self)
    }
}
