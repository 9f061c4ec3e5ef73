//! Storage Module
//!
//! Durable persistence beneath the cache facade. The `Storage` trait is
//! the pluggable seam between the facade and whatever holds the bytes;
//! `FileStorage` is the durable backend and `MemoryStorage` a
//! non-durable drop-in.

mod file;
mod memory;

// Re-export public types
pub use file::FileStorage;
pub use memory::MemoryStorage;

use async_trait::async_trait;

use crate::cache::CacheEntry;
use crate::error::Result;

// == Storage Trait ==
/// Durable key-value persistence for cache entries.
///
/// All operations are idempotent under retry, and `put` is atomic per
/// key: a concurrent `get` observes the old entry, the new entry, or
/// absence, never a torn write. The trait imposes no cross-key locking;
/// operations on different keys are fully independent.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Stores an entry, replacing any existing value for the key.
    ///
    /// # Arguments
    /// * `key` - The key to store under
    /// * `entry` - The envelope to persist
    async fn put(&self, key: &str, entry: CacheEntry) -> Result<()>;

    /// Looks up the entry stored for a key.
    ///
    /// # Returns
    /// * `Ok(Some(entry))` if the key holds a decodable entry
    /// * `Ok(None)` if the key is absent
    /// * `Err(StorageError)` on I/O failure or a corrupt entry
    async fn get(&self, key: &str) -> Result<Option<CacheEntry>>;

    /// Removes the entry if present; absence is not an error.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Removes every entry in this store's namespace.
    async fn clear(&self) -> Result<()>;
}
