//! Player entities shared by the pipeline, the cache and the analysis engine.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{cli::types::PlayerId, scrape::compute::parse_market_value};

/// Market values show up either as integers or as display strings
/// ("€45.00m") depending on which scraper produced the roster.
fn de_market_value<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(u64),
        Float(f64),
        Text(String),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Int(v) => v,
        Raw::Float(v) if v.is_finite() && v > 0.0 => v.round() as u64,
        Raw::Float(_) => 0,
        Raw::Text(s) => parse_market_value(&s),
    })
}

/// Identity and static attributes of a player, as produced by roster discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub position: String,
    /// Most-played position this season, when it differs from `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub played_position: Option<String>,
    #[serde(default)]
    pub club: String,
    #[serde(default)]
    pub league: String,
    #[serde(default)]
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    /// Whole euros.
    #[serde(default, deserialize_with = "de_market_value")]
    pub market_value: u64,
    #[serde(default)]
    pub is_new_signing: bool,
    #[serde(default)]
    pub is_on_loan: bool,
    /// Appearances known from roster discovery, used until a fetch reports any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_matches: Option<u32>,
}

/// Totals for a subset of a season's fixtures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DutyStats {
    pub minutes: u32,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
}

/// Per-player result of one stats fetch. This is the cache entry type.
///
/// The four core counters and the club fields are always serialized so the
/// cache file has a fixed shape; the extras are omitted when unknown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayerStatsResult {
    pub minutes: u32,
    pub appearances: u32,
    pub goals: u32,
    pub assists: u32,
    pub club: String,
    pub league: String,
    pub is_new_signing: bool,
    pub is_on_loan: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub international: Option<DutyStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_goals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_misses: Option<u32>,
}

/// Analysis-ready player: roster record plus this season's output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    #[serde(flatten)]
    pub record: PlayerRecord,
    /// `None` when no stats were ever fetched for the player.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default)]
    pub appearances: u32,
    #[serde(default)]
    pub goals: u32,
    #[serde(default)]
    pub assists: u32,
    /// Generic output score for the points metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub international: Option<DutyStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_goals: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalty_misses: Option<u32>,
}

impl PlayerStats {
    /// A player with no stats yet.
    pub fn from_record(record: PlayerRecord) -> Self {
        Self {
            appearances: record.total_matches.unwrap_or(0),
            record,
            minutes: None,
            goals: 0,
            assists: 0,
            points: None,
            international: None,
            penalty_goals: None,
            penalty_misses: None,
        }
    }

    /// Layer a fetched result onto the record. Non-empty club/league from the
    /// fetch win over the roster's values, as do non-zero appearances. A loan
    /// flag already on the roster is never cleared.
    pub fn with_result(record: PlayerRecord, result: &PlayerStatsResult) -> Self {
        let mut stats = Self::from_record(record);
        stats.minutes = Some(result.minutes);
        if result.appearances > 0 {
            stats.appearances = result.appearances;
        }
        stats.goals = result.goals;
        stats.assists = result.assists;
        stats.international = result.international;
        stats.penalty_goals = result.penalty_goals;
        stats.penalty_misses = result.penalty_misses;
        if !result.club.is_empty() {
            stats.record.club = result.club.clone();
        }
        if !result.league.is_empty() {
            stats.record.league = result.league.clone();
        }
        stats.record.is_new_signing = result.is_new_signing;
        stats.record.is_on_loan |= result.is_on_loan;
        stats
    }

    pub fn id(&self) -> &PlayerId {
        &self.record.player_id
    }

    pub fn market_value(&self) -> u64 {
        self.record.market_value
    }

    /// Most-played position when known, else the nominal one.
    pub fn effective_position(&self) -> &str {
        match self.record.played_position.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => &self.record.position,
        }
    }

    pub fn goal_contributions(&self) -> u32 {
        self.goals.saturating_add(self.assists)
    }
}

/// A player that passed the comparison-count threshold, with that count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    #[serde(flatten)]
    pub player: PlayerStats,
    pub count: usize,
}
