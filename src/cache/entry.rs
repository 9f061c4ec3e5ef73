//! Cache Entry Module
//!
//! Defines the envelope written to storage: the serialized value plus
//! the moment it was written.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A stored value together with its write timestamp.
///
/// `written_at` is set exactly once, by the facade at write time, and
/// never mutated afterward. Whether an entry is "expired" is computed at
/// read time against a caller-supplied max age; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The serialized payload
    pub value: Value,
    /// When the value was written
    pub written_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Wraps a serialized value with the current time.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            written_at: Utc::now(),
        }
    }

    /// Builds an entry with an explicit timestamp.
    ///
    /// Lets tests backdate entries instead of waiting out a real TTL.
    pub fn with_written_at(value: Value, written_at: DateTime<Utc>) -> Self {
        Self { value, written_at }
    }

    // == Age ==
    /// Time elapsed since the entry was written.
    ///
    /// Clamps to zero if the clock moved backwards between write and read.
    pub fn age(&self) -> Duration {
        Utc::now()
            .signed_duration_since(self.written_at)
            .to_std()
            .unwrap_or(Duration::ZERO)
    }

    // == Is Expired ==
    /// Checks whether the entry has outlived `max_age`.
    ///
    /// Boundary condition: an entry is still fresh when its age equals
    /// `max_age` exactly, and expired strictly after.
    pub fn is_expired(&self, max_age: Duration) -> bool {
        self.age() > max_age
    }
}
