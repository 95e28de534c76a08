//! League and club filters applied before analysis or display.

use crate::models::{Candidate, PlayerRecord, PlayerStats};

pub const TOP_5_LEAGUES: [&str; 5] = ["Premier League", "LaLiga", "Bundesliga", "Serie A", "Ligue 1"];

/// League filter value meaning "no league filter".
pub const ALL_LEAGUES: &str = "all";

/// Anything that belongs to a club in a league.
pub trait Affiliation {
    fn league(&self) -> &str;
    fn club(&self) -> &str;
}

impl Affiliation for PlayerRecord {
    fn league(&self) -> &str {
        &self.league
    }

    fn club(&self) -> &str {
        &self.club
    }
}

impl Affiliation for PlayerStats {
    fn league(&self) -> &str {
        &self.record.league
    }

    fn club(&self) -> &str {
        &self.record.club
    }
}

impl Affiliation for Candidate {
    fn league(&self) -> &str {
        self.player.league()
    }

    fn club(&self) -> &str {
        self.player.club()
    }
}

/// Exact league match (unless `"all"`) and case-insensitive club substring
/// match (unless blank).
pub fn filter_by_league_and_club<T: Affiliation + Clone>(
    players: &[T],
    league: &str,
    club: &str,
) -> Vec<T> {
    let club = club.trim().to_lowercase();
    players
        .iter()
        .filter(|p| league == ALL_LEAGUES || p.league() == league)
        .filter(|p| club.is_empty() || p.club().to_lowercase().contains(&club))
        .cloned()
        .collect()
}

pub fn filter_top5<T: Affiliation + Clone>(players: &[T]) -> Vec<T> {
    players
        .iter()
        .filter(|p| TOP_5_LEAGUES.contains(&p.league()))
        .cloned()
        .collect()
}
