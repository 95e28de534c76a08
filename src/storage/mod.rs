//! Durable player stats cache
//!
//! One JSON object mapping player id to its last successfully fetched
//! [`PlayerStatsResult`]. The file is only ever replaced whole (see
//! [`write_string_atomic`]), so any read of it parses.

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{
    cli::types::PlayerId,
    core::{try_read_to_string, write_string_atomic},
    error::{Result, ScoutError},
    models::PlayerStatsResult,
};


/// Ordered so the serialized file is stable for identical contents.
pub type PlayerCache = BTreeMap<PlayerId, PlayerStatsResult>;

#[derive(Debug, Clone)]
pub struct PlayerCacheStore {
    path: PathBuf,
    entries: PlayerCache,
}

impl PlayerCacheStore {
    /// An empty store that will checkpoint to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: PlayerCache::new(),
        }
    }

    /// Load the store at `path`, using whatever it holds as the merge base.
    ///
    /// A missing file is an empty store. An unreadable or corrupt file is
    /// logged and also treated as empty; the next checkpoint replaces it.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match try_read_to_string(&path) {
            None => {
                debug!(path = %path.display(), "no player cache yet; starting empty");
                PlayerCache::new()
            }
            Some(contents) => match serde_json::from_str::<PlayerCache>(&contents) {
                Ok(entries) => {
                    debug!(path = %path.display(), entries = entries.len(), "loaded player cache");
                    entries
                }
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "player cache is not valid JSON; starting empty");
                    PlayerCache::new()
                }
            },
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: &PlayerId) -> Option<&PlayerStatsResult> {
        self.entries.get(id)
    }

    pub fn entries(&self) -> &PlayerCache {
        &self.entries
    }

    pub fn into_entries(self) -> PlayerCache {
        self.entries
    }

    /// Replace the entry for `id` wholesale.
    pub fn insert(&mut self, id: PlayerId, result: PlayerStatsResult) {
        self.entries.insert(id, result);
    }

    /// Overlay `results` onto the store; returns how many entries were written.
    pub fn merge<I>(&mut self, results: I) -> usize
    where
        I: IntoIterator<Item = (PlayerId, PlayerStatsResult)>,
    {
        let mut written = 0;
        for (id, result) in results {
            self.entries.insert(id, result);
            written += 1;
        }
        written
    }

    /// Serialized form of the whole map.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.entries)?)
    }

    /// Checkpoint the full map to disk. Any failure here is fatal to a run.
    pub fn save(&self) -> Result<()> {
        let json = self.to_json()?;
        write_string_atomic(&self.path, &json).map_err(|source| ScoutError::Persistence {
            path: self.path.clone(),
            source,
        })
    }
}
