//! Integration Tests for the Cache over File Storage
//!
//! Exercises the full facade/adapter stack against a real filesystem,
//! including durability across instances, lazy expiry, and fail-open
//! behavior on corruption.

use std::time::Duration;

use agecache::{AgeBoundedCache, CacheConfig, CacheEntry, CacheKey, FileStorage, Storage};
use chrono::{Duration as ChronoDuration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Listing {
    id: u64,
    title: String,
}

// == Helper Functions ==

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "agecache=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn create_test_cache() -> (AgeBoundedCache<FileStorage>, FileStorage, TempDir) {
    init_tracing();
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let store = FileStorage::with_dir(temp_dir.path().join("agecache"));
    let cache = AgeBoundedCache::new(store.clone(), CacheConfig::new("agecache"));
    (cache, store, temp_dir)
}

fn sample_listings() -> Vec<Listing> {
    vec![
        Listing {
            id: 1,
            title: "Road bike".to_string(),
        },
        Listing {
            id: 2,
            title: "Bookshelf".to_string(),
        },
    ]
}

// == Fresh Read Scenario ==

#[tokio::test]
async fn test_listings_roundtrip_through_disk() {
    let (cache, _store, _temp_dir) = create_test_cache();

    cache.set(CacheKey::Listings.as_str(), &sample_listings()).await;

    let listings: Option<Vec<Listing>> = cache
        .get(CacheKey::Listings.as_str(), Some(Duration::from_millis(3_600_000)))
        .await;

    assert_eq!(listings, Some(sample_listings()));
    assert_eq!(cache.stats().hits, 1);
}

// == Expiry Scenario ==
// set at t=0; a read within the hour hits; a read past the hour misses
// and physically removes the entry. The hour is simulated by backdating
// the stored timestamp through the adapter.

#[tokio::test]
async fn test_listings_expire_after_max_age() {
    let (cache, store, _temp_dir) = create_test_cache();
    let max_age = Duration::from_millis(3_600_000);

    cache.set(CacheKey::Listings.as_str(), &sample_listings()).await;

    // t = 1000: still fresh
    let listings: Option<Vec<Listing>> = cache.get(CacheKey::Listings.as_str(), Some(max_age)).await;
    assert_eq!(listings, Some(sample_listings()));

    // Rewind the write timestamp to t = -3,700,000ms relative to now
    let written_at = Utc::now() - ChronoDuration::milliseconds(3_700_000);
    store
        .put(
            CacheKey::Listings.as_str(),
            CacheEntry::with_written_at(json!(sample_listings()), written_at),
        )
        .await
        .unwrap();

    // Past the max age: miss, and the entry is deleted from disk
    let listings: Option<Vec<Listing>> = cache.get(CacheKey::Listings.as_str(), Some(max_age)).await;
    assert!(listings.is_none());
    assert!(store.get(CacheKey::Listings.as_str()).await.unwrap().is_none());

    // Even an enormous max age no longer finds it
    let listings: Option<Vec<Listing>> = cache
        .get(CacheKey::Listings.as_str(), Some(Duration::from_secs(u32::MAX as u64)))
        .await;
    assert!(listings.is_none());

    let stats = cache.stats();
    assert_eq!(stats.expirations, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
}

#[tokio::test]
async fn test_short_max_age_expires_in_real_time() {
    let (cache, _store, _temp_dir) = create_test_cache();

    cache.set("ephemeral", &"value").await;
    tokio::time::sleep(Duration::from_millis(100)).await;

    let value: Option<String> = cache.get("ephemeral", Some(Duration::from_millis(50))).await;
    assert!(value.is_none());
}

// == Durability ==

#[tokio::test]
async fn test_entries_survive_cache_reconstruction() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let dir = temp_dir.path().join("agecache");

    {
        let cache = AgeBoundedCache::new(
            FileStorage::with_dir(dir.clone()),
            CacheConfig::new("agecache"),
        );
        cache.set(CacheKey::UserData.as_str(), &json!({"name": "sam"})).await;
    }

    // A fresh instance over the same directory sees the entry
    let cache = AgeBoundedCache::new(FileStorage::with_dir(dir), CacheConfig::new("agecache"));
    let user: Option<serde_json::Value> = cache.get(CacheKey::UserData.as_str(), None).await;
    assert_eq!(user, Some(json!({"name": "sam"})));
}

// == Remove and Clear ==

#[tokio::test]
async fn test_remove_deletes_only_that_key() {
    let (cache, _store, _temp_dir) = create_test_cache();

    cache.set(&CacheKey::Listings.item(1), &"one").await;
    cache.set(&CacheKey::Listings.item(2), &"two").await;

    cache.remove(&CacheKey::Listings.item(1)).await;

    let one: Option<String> = cache.get(&CacheKey::Listings.item(1), None).await;
    let two: Option<String> = cache.get(&CacheKey::Listings.item(2), None).await;
    assert!(one.is_none());
    assert_eq!(two, Some("two".to_string()));
}

#[tokio::test]
async fn test_clear_removes_every_domain() {
    let (cache, _store, _temp_dir) = create_test_cache();

    cache.set(CacheKey::Listings.as_str(), &vec![1, 2, 3]).await;
    cache.set(CacheKey::Categories.as_str(), &vec!["bikes"]).await;
    cache.set(CacheKey::Favorites.as_str(), &vec![7]).await;

    cache.clear().await;

    let listings: Option<Vec<i64>> = cache.get(CacheKey::Listings.as_str(), None).await;
    let categories: Option<Vec<String>> = cache.get(CacheKey::Categories.as_str(), None).await;
    let favorites: Option<Vec<i64>> = cache.get(CacheKey::Favorites.as_str(), None).await;
    assert!(listings.is_none());
    assert!(categories.is_none());
    assert!(favorites.is_none());
}

#[tokio::test]
async fn test_cache_usable_after_clear() {
    let (cache, _store, _temp_dir) = create_test_cache();

    cache.set("key", &1).await;
    cache.clear().await;
    cache.set("key", &2).await;

    let value: Option<i64> = cache.get("key", None).await;
    assert_eq!(value, Some(2));
}

// == Corruption ==

#[tokio::test]
async fn test_corrupt_entry_degrades_to_miss_and_is_deleted() {
    let (cache, store, temp_dir) = create_test_cache();

    cache.set("damaged", &"value").await;

    // Scribble over the stored file
    let path = temp_dir.path().join("agecache").join("damaged.json");
    std::fs::write(&path, "{ not json").unwrap();

    let value: Option<String> = cache.get("damaged", None).await;
    assert!(value.is_none());

    // The corrupt file was removed, so the next read is a clean miss
    assert!(!path.exists());
    assert!(store.get("damaged").await.unwrap().is_none());
    assert!(cache.stats().failures >= 1);
}

// == Concurrency ==

#[tokio::test]
async fn test_concurrent_writers_on_independent_keys() {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    let store = FileStorage::with_dir(temp_dir.path().join("agecache"));
    let cache = std::sync::Arc::new(AgeBoundedCache::new(store, CacheConfig::new("agecache")));

    let mut handles = vec![];
    for id in 0..16u64 {
        let cache = std::sync::Arc::clone(&cache);
        handles.push(tokio::spawn(async move {
            let key = CacheKey::Listings.item(id);
            cache.set(&key, &Listing { id, title: format!("item {id}") }).await;
            cache.get::<Listing>(&key, None).await
        }));
    }

    for (id, handle) in handles.into_iter().enumerate() {
        let listing = handle.await.unwrap();
        assert_eq!(
            listing,
            Some(Listing {
                id: id as u64,
                title: format!("item {id}"),
            })
        );
    }
}
