//! Cache Facade Module
//!
//! Translates application-level cache semantics onto a storage adapter:
//! envelope wrapping, the max-age check, lazy deletion of expired
//! entries, and the fail-open error policy. The cache is strictly an
//! optimization layer over a source of truth that remains independently
//! queryable, so a storage failure must never become an application
//! error; every failure is logged and mapped to a safe default.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::entry::CacheEntry;
use crate::cache::{CacheStats, StatsCounters};
use crate::config::CacheConfig;
use crate::error::StorageError;
use crate::storage::Storage;

// == Age-Bounded Cache ==
/// Durable key-value cache with lazy age-based expiry.
///
/// All operations are `&self` and async; a single instance can be shared
/// across concurrent callers via `Arc`. Expiry is checked only at read
/// time: a stale entry persists until it is read or explicitly cleared.
#[derive(Debug)]
pub struct AgeBoundedCache<S> {
    /// Storage adapter beneath the facade
    store: S,
    /// Instance configuration (namespace, default max age)
    config: CacheConfig,
    /// Hit/miss/expiry/failure counters
    stats: StatsCounters,
}

impl<S: Storage> AgeBoundedCache<S> {
    // == Constructor ==
    /// Creates a cache over the given adapter.
    ///
    /// # Arguments
    /// * `store` - Storage adapter providing durable persistence
    /// * `config` - Instance configuration (namespace, default max age)
    pub fn new(store: S, config: CacheConfig) -> Self {
        Self {
            store,
            config,
            stats: StatsCounters::default(),
        }
    }

    /// The configuration this instance was built with.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Set ==
    /// Stores a value under `key`, stamping it with the current time.
    ///
    /// Overwrites any prior entry at the key. A storage failure is logged
    /// and swallowed: cache writes are best-effort and must never abort
    /// or alter the caller's primary data path.
    ///
    /// # Arguments
    /// * `key` - One of the namespace constants, or a key derived from one
    /// * `value` - The value to cache (must implement Serialize)
    pub async fn set<T: Serialize>(&self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(value) => value,
            Err(err) => {
                self.stats.record_failure();
                warn!(key, error = %err, "failed to serialize value for cache");
                return;
            }
        };

        if let Err(err) = self.store.put(key, CacheEntry::new(value)).await {
            self.stats.record_failure();
            warn!(key, error = %err, "cache write failed");
        }
    }

    // == Get ==
    /// Retrieves the value under `key` if it is no older than `max_age`
    /// (the configured default when `None`).
    ///
    /// An entry found past its max age is deleted as a side effect and
    /// reported as `None`. A storage failure during the read is logged
    /// and also reported as `None`, identically to a miss; a corrupt or
    /// type-mismatched entry is additionally deleted if possible.
    ///
    /// # Arguments
    /// * `key` - The cache key to read
    /// * `max_age` - Freshness bound for this read (default when `None`)
    ///
    /// # Returns
    /// * `Some(value)` if a fresh entry exists and decodes as `T`
    /// * `None` for absent, expired, corrupt, or unreadable entries
    pub async fn get<T: DeserializeOwned>(
        &self,
        key: &str,
        max_age: Option<Duration>,
    ) -> Option<T> {
        let max_age = max_age.unwrap_or(self.config.default_max_age);

        let entry = match self.store.get(key).await {
            Ok(Some(entry)) => entry,
            Ok(None) => {
                self.stats.record_miss();
                debug!(key, "cache miss");
                return None;
            }
            Err(err) => {
                self.stats.record_failure();
                self.stats.record_miss();
                warn!(key, error = %err, "cache read failed, treating as miss");
                if matches!(err, StorageError::Corrupt(_)) {
                    self.delete_best_effort(key).await;
                }
                return None;
            }
        };

        if entry.is_expired(max_age) {
            self.stats.record_expiration();
            self.stats.record_miss();
            debug!(
                key,
                age_ms = entry.age().as_millis() as u64,
                "cache entry expired, deleting"
            );
            self.delete_best_effort(key).await;
            return None;
        }

        match serde_json::from_value(entry.value) {
            Ok(value) => {
                self.stats.record_hit();
                debug!(key, "cache hit");
                Some(value)
            }
            Err(err) => {
                // Envelope decoded but the payload does not match the
                // requested type; same treatment as a corrupt entry.
                self.stats.record_failure();
                self.stats.record_miss();
                warn!(key, error = %err, "cached value undecodable, deleting");
                self.delete_best_effort(key).await;
                None
            }
        }
    }

    // == Remove ==
    /// Deletes the entry under `key`.
    ///
    /// Absence is not an error; storage failures are logged, not
    /// propagated.
    ///
    /// # Arguments
    /// * `key` - The cache key to delete
    pub async fn remove(&self, key: &str) {
        if let Err(err) = self.store.delete(key).await {
            self.stats.record_failure();
            warn!(key, error = %err, "cache delete failed");
        }
    }

    // == Clear ==
    /// Deletes every entry in this cache's namespace.
    ///
    /// Storage failures are logged, not propagated.
    pub async fn clear(&self) {
        if let Err(err) = self.store.clear().await {
            self.stats.record_failure();
            warn!(error = %err, "cache clear failed");
        }
    }

    // == Stats ==
    /// Snapshot of the hit/miss/expiry/failure counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }

    /// Best-effort delete used on the expiry and corruption paths.
    async fn delete_best_effort(&self, key: &str) {
        if let Err(err) = self.store.delete(key).await {
            self.stats.record_failure();
            warn!(key, error = %err, "failed to delete stale cache entry");
        }
    }
}
