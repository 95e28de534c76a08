//! Analyze command: bargains or overpriced players from the merged dataset.

use std::path::PathBuf;

use tracing::debug;

use crate::{
    analysis::{filter_by_league_and_club, filter_top5, find_candidates, FindOptions, Metric},
    core::DATASET_FILE,
    models::{Candidate, PlayerStats},
    Result,
};

use super::{format_market_value, load_dataset};

#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    pub data_dir: PathBuf,
    pub overpriced: bool,
    pub metric: Metric,
    pub min_minutes: Option<u32>,
    pub min_comparisons: usize,
    pub minutes_dominance: bool,
    /// League name, or `all`.
    pub league: String,
    /// Case-insensitive club substring; empty means any club.
    pub club: String,
    pub top5: bool,
    pub limit: Option<usize>,
    pub as_json: bool,
}

impl AnalyzeParams {
    pub fn find_options(&self) -> FindOptions {
        let base = if self.overpriced {
            FindOptions::overpriced()
        } else {
            FindOptions::bargains()
        };
        base.with_metric(self.metric)
            .with_min_minutes(self.min_minutes)
            .with_min_comparisons(self.min_comparisons)
            .with_minutes_dominance(self.minutes_dominance)
    }
}

/// Run the engine over the whole dataset, then narrow the frontier to the
/// requested league/club. Peers outside the filter still count.
pub fn analyze_players(players: &[PlayerStats], params: &AnalyzeParams) -> Vec<Candidate> {
    let options = params.find_options();
    debug!(?options, players = players.len(), "running dominance engine");
    let frontier = find_candidates(players, &options);

    let mut shown = filter_by_league_and_club(&frontier, &params.league, &params.club);
    if params.top5 {
        shown = filter_top5(&shown);
    }
    if let Some(limit) = params.limit {
        shown.truncate(limit);
    }
    shown
}

pub fn handle_analyze(params: AnalyzeParams) -> Result<()> {
    let players = load_dataset(&params.data_dir.join(DATASET_FILE))?;
    let candidates = analyze_players(&players, &params);

    if params.as_json {
        println!("{}", serde_json::to_string_pretty(&candidates)?);
        return Ok(());
    }

    let label = if params.overpriced { "Overpriced" } else { "Bargain" };
    if candidates.is_empty() {
        println!("No {} players found.", label.to_lowercase());
        return Ok(());
    }

    println!(
        "{} players by {} ({} of {} in dataset):",
        label,
        params.metric,
        candidates.len(),
        players.len()
    );
    for c in &candidates {
        println!("{}", format_candidate(c, &params.metric));
    }
    Ok(())
}

fn format_candidate(c: &Candidate, metric: &Metric) -> String {
    let p = &c.player;
    format!(
        "{:<28} {:<20} {:<24} {:>10}  {}={:<6} mins={:<5} vs={}",
        p.record.name,
        p.effective_position(),
        p.record.club,
        format_market_value(p.market_value()),
        metric,
        metric.value(p),
        p.minutes.unwrap_or(0),
        c.count
    )
}
