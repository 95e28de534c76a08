//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::{
    analysis::{Metric, MIN_COMPARISON_COUNT},
    core::{default_cache_path, default_data_dir},
    pipeline::{DEFAULT_BATCH_DELAY, DEFAULT_CONCURRENCY},
    scrape::{http::DEFAULT_TIMEOUT, DEFAULT_BASE_URL},
};

pub const CACHE_ENV_VAR: &str = "VALUE_SCOUT_CACHE";
pub const DATA_DIR_ENV_VAR: &str = "VALUE_SCOUT_DATA_DIR";
pub const BASE_URL_ENV_VAR: &str = "VALUE_SCOUT_BASE_URL";
pub const CONCURRENCY_ENV_VAR: &str = "VALUE_SCOUT_CONCURRENCY";

/// File locations shared between commands.
#[derive(Debug, Args)]
pub struct Locations {
    /// Player cache file (or set `VALUE_SCOUT_CACHE`).
    #[clap(long, env = CACHE_ENV_VAR)]
    pub cache: Option<PathBuf>,

    /// Directory holding the merged dataset (or set `VALUE_SCOUT_DATA_DIR`).
    #[clap(long, env = DATA_DIR_ENV_VAR)]
    pub data_dir: Option<PathBuf>,
}

impl Locations {
    pub fn cache_path(&self) -> PathBuf {
        self.cache.clone().unwrap_or_else(default_cache_path)
    }

    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch current-season stats for every player in a roster file.
    ///
    /// The player cache is checkpointed after every batch; the merged
    /// dataset is written when the run completes.
    Refresh {
        /// Roster file: JSON array of player records.
        #[clap(long, short)]
        roster: PathBuf,

        /// Secondary roster (e.g. top scorers) merged in by player id.
        #[clap(long)]
        extra_roster: Option<PathBuf>,

        #[clap(flatten)]
        locations: Locations,

        /// Upstream site root (or set `VALUE_SCOUT_BASE_URL`).
        #[clap(long, env = BASE_URL_ENV_VAR, default_value = DEFAULT_BASE_URL)]
        base_url: String,

        /// Players fetched concurrently per batch (or set `VALUE_SCOUT_CONCURRENCY`).
        #[clap(long, short, env = CONCURRENCY_ENV_VAR, default_value_t = DEFAULT_CONCURRENCY)]
        concurrency: usize,

        /// Pause between batches, in milliseconds.
        #[clap(long, default_value_t = DEFAULT_BATCH_DELAY.as_millis() as u64)]
        delay_ms: u64,

        /// Per-request timeout, in seconds.
        #[clap(long, default_value_t = DEFAULT_TIMEOUT.as_secs())]
        timeout_secs: u64,

        /// Start from an empty cache instead of merging into the existing one.
        #[clap(long)]
        fresh: bool,
    },

    /// Find bargain (default) or overpriced players in the merged dataset.
    Analyze {
        #[clap(flatten)]
        locations: Locations,

        /// Look for players beaten by cheaper peers instead.
        #[clap(long)]
        overpriced: bool,

        /// Output measure: ga, minutes or points.
        #[clap(long, short, default_value = "ga")]
        metric: Metric,

        /// Only consider players with at least this many minutes.
        #[clap(long)]
        min_minutes: Option<u32>,

        /// Peers a player must be compared against to qualify.
        #[clap(long, default_value_t = MIN_COMPARISON_COUNT)]
        min_comparisons: usize,

        /// Also require the better player to have played at least as many minutes.
        #[clap(long)]
        minutes_dominance: bool,

        /// League to show (exact name), or `all`.
        #[clap(long, short, default_value = "all")]
        league: String,

        /// Club name substring (case-insensitive).
        #[clap(long, default_value = "")]
        club: String,

        /// Only show players from the top five leagues.
        #[clap(long)]
        top5: bool,

        /// Show at most this many players.
        #[clap(long, short = 'n')]
        limit: Option<usize>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Show what the player cache currently holds.
    CacheInfo {
        #[clap(flatten)]
        locations: Locations,
    },
}

#[derive(Debug, Parser)]
#[clap(
    name = "value-scout",
    about = "Find football players whose output doesn't match their market value"
)]
pub struct ValueScout {
    /// Debug-level logging (overridden by `RUST_LOG`).
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}
