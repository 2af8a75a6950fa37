//! Error types for the cache engine
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Source Error ==
/// Failure reported by a backing data source (load or persist).
#[derive(Error, Debug)]
#[error("Source error: {0}")]
pub struct SourceError(pub String);

// == Store Error ==
/// Failure reported by a remote store client.
///
/// The remote contract distinguishes "key absent" (a normal outcome,
/// modeled as `Ok(None)`) from "store unreachable" (this error).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The remote store could not be reached or timed out
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

// == Cache Error Enum ==
/// Unified error type for the cache engine.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid argument (zero capacity, malformed configuration)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The remote store could not be reached or timed out.
    /// Never downgraded to a cache miss.
    #[error("Remote store unavailable: {0}")]
    StoreUnavailable(String),

    /// The backing data source failed to load or persist a value
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Key or value could not cross the wire format
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Policy/map desynchronization detected. A programming defect,
    /// not a recoverable runtime condition.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl From<StoreError> for CacheError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => CacheError::StoreUnavailable(msg),
        }
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache engine.
pub type Result<T> = std::result::Result<T, CacheError>;
