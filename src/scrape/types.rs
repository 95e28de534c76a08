//! Wire types for the per-player performance feed.

use serde::Deserialize;

/// Top-level envelope of `/ceapi/performance-game/{id}`.
#[derive(Debug, Default, Deserialize)]
pub struct PerformanceFeed {
    #[serde(default)]
    pub data: Option<PerformanceData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PerformanceData {
    #[serde(default)]
    pub performance: Vec<GamePerformance>,
}

impl PerformanceFeed {
    pub fn into_games(self) -> Vec<GamePerformance> {
        self.data.map(|d| d.performance).unwrap_or_default()
    }
}

/// One fixture the player was involved in.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePerformance {
    pub game_information: GameInformation,
    #[serde(default)]
    pub statistics: GameStatistics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInformation {
    pub season_id: i32,
    #[serde(default)]
    pub competition_type_id: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStatistics {
    pub goal_statistics: GoalStatistics,
    pub playing_time_statistics: PlayingTimeStatistics,
}

/// Upstream sends `null` for counters it has no value for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GoalStatistics {
    pub goals_scored_total: Option<u32>,
    pub assists: Option<u32>,
    pub penalty_goals: Option<u32>,
    pub penalty_misses: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlayingTimeStatistics {
    pub played_minutes: Option<u32>,
}
