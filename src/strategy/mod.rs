//! Strategy Module
//!
//! Composition layer coordinating a cache with a backing data source
//! (read-through / write-through loading).

mod loading;

// Re-export public types
pub use loading::{DataSource, LoadingCache, LoadingMode};
