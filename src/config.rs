//! Configuration Module
//!
//! Holds per-instance cache configuration. A cache is constructed once
//! with its configuration and passed by handle to call sites; there is
//! no global state and no environment lookup.

use std::time::Duration;

/// Cache instance configuration.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Namespace isolating this cache's entries from other persisted state
    pub namespace: String,
    /// Max age applied when a `get` does not override it
    pub default_max_age: Duration,
}

impl CacheConfig {
    /// Creates a config with the given namespace and the default max age.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Self::default()
        }
    }

    /// Overrides the default max age.
    pub fn with_default_max_age(mut self, max_age: Duration) -> Self {
        self.default_max_age = max_age;
        self
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            namespace: "agecache".to_string(),
            default_max_age: Duration::from_secs(60 * 60),
        }
    }
}
