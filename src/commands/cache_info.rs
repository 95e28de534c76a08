//! Cache-info command: summarize what the player cache currently holds.

use std::path::{Path, PathBuf};

use crate::{storage::PlayerCacheStore, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheSummary {
    pub path: PathBuf,
    pub exists: bool,
    pub entries: usize,
    pub with_minutes: usize,
    pub on_loan: usize,
    pub new_signings: usize,
}

pub fn summarize_cache(path: &Path) -> CacheSummary {
    let store = PlayerCacheStore::load(path.to_path_buf());
    let entries = store.entries().values();
    CacheSummary {
        path: path.to_path_buf(),
        exists: path.exists(),
        entries: store.len(),
        with_minutes: entries.clone().filter(|r| r.minutes > 0).count(),
        on_loan: entries.clone().filter(|r| r.is_on_loan).count(),
        new_signings: entries.filter(|r| r.is_new_signing).count(),
    }
}

pub fn handle_cache_info(path: PathBuf) -> Result<()> {
    let summary = summarize_cache(&path);
    println!("Cache: {}", summary.path.display());
    if !summary.exists {
        println!("  (not created yet)");
        return Ok(());
    }
    println!("  players:      {}", summary.entries);
    println!("  with minutes: {}", summary.with_minutes);
    println!("  on loan:      {}", summary.on_loan);
    println!("  new signings: {}", summary.new_signings);
    Ok(())
}
