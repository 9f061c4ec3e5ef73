//! Cache Module
//!
//! Provides the age-bounded cache facade: every stored value carries a
//! write timestamp and expiry is enforced lazily at read time.

mod entry;
mod facade;
mod keys;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use facade::AgeBoundedCache;
pub use keys::CacheKey;
pub use stats::CacheStats;

pub(crate) use stats::StatsCounters;
