//! File system and in-memory caching utilities
//!
//! - Default locations under the user cache directory
//! - Whole-file atomic writes (temp file in the same directory, then rename)
//! - A small LRU of fetched page bodies with a per-read TTL

use dirs;
use lru::LruCache;
use std::{
    fs,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
    time::{Duration, Instant},
};

pub const APP_DIR: &str = "value-scout";
pub const CACHE_FILE: &str = "player-cache.json";
pub const DATASET_FILE: &str = "minutes-value.json";

/// Path: ~/.cache/value-scout
pub fn app_cache_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(APP_DIR)
}

/// Path: ~/.cache/value-scout/player-cache.json
pub fn default_cache_path() -> PathBuf {
    app_cache_dir().join(CACHE_FILE)
}

/// Path: ~/.cache/value-scout/data
pub fn default_data_dir() -> PathBuf {
    app_cache_dir().join("data")
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Replace `path` with `contents` in one step.
///
/// The data is written and synced to a temp file next to the target, then
/// renamed over it, so readers see either the old file or the new one.
pub fn write_string_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

struct CachedBody {
    body: String,
    stored_at: Instant,
}

/// Bounded in-memory cache of page bodies keyed by URL.
///
/// Freshness is decided by the caller's TTL at read time, so the same entry
/// can serve a long-TTL caller and be refused to a short-TTL one.
pub struct ResponseCache {
    entries: Mutex<LruCache<String, CachedBody>>,
    capacity: usize,
}

impl ResponseCache {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let size = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(size)),
            capacity,
        }
    }

    /// Body for `url` if stored less than `ttl` ago. Expired entries are dropped.
    pub fn get(&self, url: &str, ttl: Duration) -> Option<String> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        let fresh = entries.get(url).map(|c| c.stored_at.elapsed() < ttl)?;
        if fresh {
            entries.get(url).map(|c| c.body.clone())
        } else {
            entries.pop(url);
            None
        }
    }

    pub fn put(&self, url: &str, body: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .put(
                url.to_string(),
                CachedBody {
                    body,
                    stored_at: Instant::now(),
                },
            );
    }

    /// (entries, capacity)
    pub fn stats(&self) -> (usize, usize) {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        (entries.len(), self.capacity)
    }
}

impl Default for ResponseCache {
    fn default() -> Self {
        Self::new(256)
    }
}
