//! Key Namespace Module
//!
//! The closed set of logical cache domains. Callers address the cache
//! through one of these constants, or a key derived from one, so
//! independent cached data sets never collide.

use std::fmt;

// == Cache Key ==
/// Logical cache domains.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Marketplace listings
    Listings,
    /// Profile data for the signed-in user
    UserData,
    /// Listing categories
    Categories,
    /// The user's favorited listings
    Favorites,
}

impl CacheKey {
    // == As Str ==
    /// Returns the stable string constant for this domain.
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheKey::Listings => "listings",
            CacheKey::UserData => "user_data",
            CacheKey::Categories => "categories",
            CacheKey::Favorites => "favorites",
        }
    }

    // == Item ==
    /// Derives a per-resource key within this domain.
    ///
    /// `CacheKey::Listings.item(42)` yields `"listings:42"`.
    pub fn item(&self, id: impl fmt::Display) -> String {
        format!("{}:{}", self.as_str(), id)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
