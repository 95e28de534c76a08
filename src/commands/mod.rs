//! Command implementations for the value-scout CLI
//!
//! Each command takes a params struct built by `main` from the parsed CLI
//! and prints its results to stdout. The file helpers below are shared
//! between them.

pub mod analyze;
pub mod cache_info;
pub mod refresh;


use std::path::Path;

use serde::Serialize;

use crate::{
    core::{try_read_to_string, write_string_atomic},
    error::{Result, ScoutError},
    models::{PlayerRecord, PlayerStats},
};

/// Read a roster file: a JSON array of player records.
pub fn load_roster(path: &Path) -> Result<Vec<PlayerRecord>> {
    let contents = try_read_to_string(path).ok_or_else(|| ScoutError::Roster {
        path: path.to_path_buf(),
        message: "file is missing or unreadable".to_string(),
    })?;
    serde_json::from_str(&contents).map_err(|e| ScoutError::Roster {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read the merged dataset written by `refresh`.
pub fn load_dataset(path: &Path) -> Result<Vec<PlayerStats>> {
    let contents = try_read_to_string(path).ok_or_else(|| {
        ScoutError::invalid_input(format!(
            "no dataset at {}; run `value-scout refresh` first",
            path.display()
        ))
    })?;
    Ok(serde_json::from_str(&contents)?)
}

/// Pretty-print `value` and replace `path` with it atomically.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_string_atomic(path, &json).map_err(|source| ScoutError::Persistence {
        path: path.to_path_buf(),
        source,
    })
}

/// "€45.00m" style display of whole euros.
pub fn format_market_value(value: u64) -> String {
    match value {
        v if v >= 1_000_000_000 => format!("€{:.2}bn", v as f64 / 1e9),
        v if v >= 1_000_000 => format!("€{:.2}m", v as f64 / 1e6),
        v if v >= 1_000 => format!("€{}k", v / 1_000),
        0 => "-".to_string(),
        v => format!("€{v}"),
    }
}
