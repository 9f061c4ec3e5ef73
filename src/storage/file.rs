//! File Storage Module
//!
//! Durable adapter storing one JSON file per key inside a namespace
//! directory. Writes go through a temp file followed by a rename, so a
//! concurrent read observes either the old entry or the new one, never
//! a torn file.

use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::cache::CacheEntry;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::storage::Storage;

/// Sequence for per-write temp file names. Two writers racing on the
/// same key must never share a temp path, or their bytes interleave.
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

// == File Storage ==
/// Durable `Storage` implementation over per-key JSON files.
///
/// Entries live under a directory dedicated to the cache namespace,
/// isolating cache keys from any other persisted application state.
#[derive(Debug, Clone)]
pub struct FileStorage {
    /// Directory holding this namespace's entries
    dir: PathBuf,
}

impl FileStorage {
    // == Constructor ==
    /// Creates a store under the platform cache directory
    /// (`~/.cache/<app>/<namespace>/` on Linux).
    ///
    /// # Arguments
    /// * `app` - Application name, forming the top-level cache directory
    /// * `namespace` - Sub-directory isolating this cache's entries
    ///
    /// # Returns
    /// `None` if the cache directory cannot be determined (e.g. no home
    /// directory).
    pub fn new(app: &str, namespace: &str) -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", app)?;
        let dir = project_dirs.cache_dir().join(namespace);
        Some(Self { dir })
    }

    /// Creates a store whose namespace directory comes from the cache
    /// configuration, so the adapter and facade cannot disagree about
    /// where entries live.
    ///
    /// # Arguments
    /// * `app` - Application name, forming the top-level cache directory
    /// * `config` - The configuration the cache will be built with
    pub fn from_config(app: &str, config: &CacheConfig) -> Option<Self> {
        Self::new(app, &config.namespace)
    }

    /// Creates a store rooted at an explicit directory.
    ///
    /// Useful for testing or when a specific cache location is needed.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Returns the path of the file holding `key`.
    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize(key)))
    }

    /// Returns a temp path unique to this write. Concurrent `put`s on
    /// the same key each get their own file, so the rename step always
    /// installs one writer's complete bytes.
    fn temp_path(&self, key: &str) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!("{}.{}.{}.tmp", sanitize(key), std::process::id(), seq))
    }

    /// Ensures the namespace directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }
}

/// Maps a cache key to a safe file stem. Keys are expected to come from
/// the fixed namespace (`listings`, `listings:42`, ...), but anything
/// that could escape the namespace directory is replaced.
fn sanitize(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | ':' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[async_trait]
impl Storage for FileStorage {
    async fn put(&self, key: &str, entry: CacheEntry) -> Result<()> {
        self.ensure_dir().await?;

        let json = serde_json::to_string_pretty(&entry)?;
        let path = self.entry_path(key);

        // Write atomically via a per-write temp file + rename
        let temp_path = self.temp_path(key);
        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(json.as_bytes()).await?;
        file.sync_all().await?;
        fs::rename(&temp_path, &path).await?;

        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<CacheEntry>> {
        let contents = match fs::read_to_string(self.entry_path(key)).await {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let entry = serde_json::from_str(&contents)?;
        Ok(Some(entry))
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.entry_path(key)).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    async fn clear(&self) -> Result<()> {
        // Dropping the whole namespace directory removes every entry
        // (and any leftover temp files); `put` recreates it on demand.
        match fs::remove_dir_all(&self.dir).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
