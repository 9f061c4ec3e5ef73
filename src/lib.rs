//! Agecache - a durable, age-bounded key-value cache
//!
//! Wraps a pluggable storage adapter with write timestamps and a max-age
//! policy enforced lazily at read time. Storage failures never reach
//! callers: a broken cache degrades to "always miss".

pub mod cache;
pub mod config;
pub mod error;
pub mod storage;

pub use cache::{AgeBoundedCache, CacheEntry, CacheKey, CacheStats};
pub use config::CacheConfig;
pub use error::StorageError;
pub use storage::{FileStorage, MemoryStorage, Storage};
