use crate::{
    cli::types::SeasonId,
    models::DutyStats,
    scrape::types::GamePerformance,
};


/// Competition type id the feed uses for national-team fixtures.
pub const INTERNATIONAL_COMPETITION_TYPE: u32 = 4;

/// Season totals extracted from the performance feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeasonAggregate {
    /// Every fixture of the season, national-team games included.
    pub totals: DutyStats,
    /// The national-team share of `totals`, when the player had any.
    pub international: Option<DutyStats>,
    pub penalty_goals: Option<u32>,
    pub penalty_misses: Option<u32>,
}

/// Counters saturate; a hostile feed can't wrap them.
fn add_game(into: &mut DutyStats, minutes: u32, goals: u32, assists: u32) {
    into.minutes = into.minutes.saturating_add(minutes);
    into.goals = into.goals.saturating_add(goals);
    into.assists = into.assists.saturating_add(assists);
    if minutes > 0 {
        into.appearances = into.appearances.saturating_add(1);
    }
}

fn add_opt(acc: &mut Option<u32>, value: Option<u32>) {
    if let Some(v) = value {
        *acc = Some(acc.unwrap_or(0).saturating_add(v));
    }
}

/// Sum the fixtures of `season`. A fixture counts as an appearance only when
/// the player got minutes in it; goals and assists are summed regardless.
pub fn aggregate_season_stats(games: &[GamePerformance], season: SeasonId) -> SeasonAggregate {
    let mut agg = SeasonAggregate::default();
    let mut international = DutyStats::default();
    let mut saw_international = false;

    for game in games
        .iter()
        .filter(|g| g.game_information.season_id == season.as_i32())
    {
        let goal_stats = &game.statistics.goal_statistics;
        let minutes = game
            .statistics
            .playing_time_statistics
            .played_minutes
            .unwrap_or(0);
        let goals = goal_stats.goals_scored_total.unwrap_or(0);
        let assists = goal_stats.assists.unwrap_or(0);

        add_game(&mut agg.totals, minutes, goals, assists);
        if game.game_information.competition_type_id == Some(INTERNATIONAL_COMPETITION_TYPE) {
            saw_international = true;
            add_game(&mut international, minutes, goals, assists);
        }
        add_opt(&mut agg.penalty_goals, goal_stats.penalty_goals);
        add_opt(&mut agg.penalty_misses, goal_stats.penalty_misses);
    }

    if saw_international {
        agg.international = Some(international);
    }
    agg
}

/// Parse a display market value ("€1.5bn", "€45.00m", "€500k") into whole
/// euros. Missing or unrecognised values are 0.
pub fn parse_market_value(value: &str) -> u64 {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '€' && *c != ',')
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() || cleaned == "-" {
        return 0;
    }

    let Some(start) = cleaned.find(|c: char| c.is_ascii_digit() || c == '.') else {
        return 0;
    };
    let rest = &cleaned[start..];
    let end = rest
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(rest.len());
    let Ok(num) = rest[..end].parse::<f64>() else {
        return 0;
    };

    let unit = rest[end..].trim_start().to_ascii_lowercase();
    let multiplier = if unit.starts_with("bn") {
        1_000_000_000.0
    } else if unit.starts_with('m') {
        1_000_000.0
    } else if unit.starts_with('k') {
        1_000.0
    } else {
        1.0
    };

    (num * multiplier).round() as u64
}
