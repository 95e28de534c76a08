//! Football player value scouting library
//!
//! Collects current-season output for a roster of players from the upstream
//! site and finds the players whose output doesn't match their market value.
//!
//! ## Features
//!
//! - **Batched acquisition**: Bounded-concurrency per-player fetches where one
//!   failure never sinks a batch
//! - **Crash-safe cache**: The player cache is checkpointed atomically after
//!   every batch
//! - **Position hierarchy**: Role-classes that decide which players may be
//!   compared against each other
//! - **Dominance engine**: Bargain and overpriced candidates reduced to the
//!   undominated frontier
//!
//! ## Quick Start
//!
//! ```rust
//! use value_scout::{analysis::{find_candidates, FindOptions}, models::{PlayerRecord, PlayerStats}, PlayerId};
//!
//! let striker = |id: &str, market_value: u64, goals: u32| {
//!     let mut p = PlayerStats::from_record(PlayerRecord {
//!         player_id: PlayerId::new(id),
//!         name: id.to_string(),
//!         position: "Centre-Forward".to_string(),
//!         played_position: None,
//!         club: String::new(),
//!         league: String::new(),
//!         nationality: String::new(),
//!         age: None,
//!         market_value,
//!         is_new_signing: false,
//!         is_on_loan: false,
//!         total_matches: None,
//!     });
//!     p.minutes = Some(900);
//!     p.goals = goals;
//!     p
//! };
//! let players = vec![striker("a", 50, 10), striker("b", 80, 4), striker("c", 60, 3)];
//!
//! let bargains = find_candidates(&players, &FindOptions::bargains().with_min_comparisons(1));
//! assert_eq!(bargains[0].player.id().as_str(), "a");
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export VALUE_SCOUT_CACHE=~/.cache/value-scout/player-cache.json
//! export VALUE_SCOUT_CONCURRENCY=10
//! ```

pub mod analysis;
pub mod cli;
pub mod commands;
pub mod core;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod scrape;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{PlayerId, PositionClass, SeasonId};
pub use error::{FetchError, Result, ScoutError};
pub use models::{Candidate, DutyStats, PlayerRecord, PlayerStats, PlayerStatsResult};
