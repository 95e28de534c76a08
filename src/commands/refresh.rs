//! Refresh command: fetch stats for a roster and rebuild the dataset.
//!
//! The player cache is checkpointed after every batch by the pipeline, so an
//! interrupted refresh keeps everything fetched up to its last completed
//! batch. The dataset file is only written once the run finishes.

use std::path::PathBuf;

use tracing::info;

use crate::{
    cli::types::SeasonId,
    core::DATASET_FILE,
    pipeline::{self, merge_rosters, merge_stats, roster_ids, PipelineConfig, RunReport},
    scrape::{http::{DEFAULT_PAGE_TTL, DEFAULT_TIMEOUT}, Endpoints, HeaderParser, HttpFetcher, PlayerStatsFetcher, StatsProvider},
    storage::PlayerCacheStore,
    Result,
};

use super::{load_roster, write_json_atomic};

#[derive(Debug, Clone)]
pub struct RefreshParams {
    pub roster: PathBuf,
    /// Secondary roster (e.g. top scorers); only players not already in
    /// `roster` are added.
    pub extra_roster: Option<PathBuf>,
    pub cache_path: PathBuf,
    pub data_dir: PathBuf,
    pub base_url: String,
    pub pipeline: PipelineConfig,
    /// Ignore the existing cache as merge base.
    pub fresh: bool,
}

/// What a refresh did, for printing.
#[derive(Debug)]
pub struct RefreshSummary {
    pub report: RunReport,
    pub players: usize,
    pub with_stats: usize,
    pub added_from_extra: usize,
    pub dataset_path: PathBuf,
}

/// Run the pipeline for the roster against `provider` and write the merged
/// dataset. Separated from [`handle_refresh`] so any provider can drive it.
pub async fn refresh_dataset<S>(params: &RefreshParams, provider: &S) -> Result<RefreshSummary>
where
    S: StatsProvider + ?Sized,
{
    let mut roster = load_roster(&params.roster)?;
    let added_from_extra = match &params.extra_roster {
        Some(path) => {
            let added = merge_rosters(&mut roster, load_roster(path)?);
            info!(added, path = %path.display(), "merged extra roster");
            added
        }
        None => 0,
    };

    let ids = roster_ids(&roster);
    let mut store = if params.fresh {
        PlayerCacheStore::new(params.cache_path.clone())
    } else {
        PlayerCacheStore::load(params.cache_path.clone())
    };
    info!(players = ids.len(), cached = store.len(), "starting refresh");

    let report = pipeline::run(&ids, provider, &mut store, &params.pipeline).await?;

    let players = merge_stats(roster, store.entries());
    let with_stats = players.iter().filter(|p| p.minutes.is_some()).count();
    let dataset_path = params.data_dir.join(DATASET_FILE);
    write_json_atomic(&dataset_path, &players)?;
    info!(path = %dataset_path.display(), players = players.len(), "dataset written");

    Ok(RefreshSummary {
        report,
        players: players.len(),
        with_stats,
        added_from_extra,
        dataset_path,
    })
}

pub async fn handle_refresh(params: RefreshParams) -> Result<()> {
    let timeout = params.pipeline.fetch_timeout.unwrap_or(DEFAULT_TIMEOUT);
    let season = SeasonId::current();
    let provider = PlayerStatsFetcher::new(
        HttpFetcher::new(timeout)?,
        HeaderParser,
        Endpoints::new(params.base_url.clone()),
        season,
    )
    .with_cache_ttl(DEFAULT_PAGE_TTL);

    println!("Refreshing player stats for the {} season...", season);
    let summary = refresh_dataset(&params, &provider).await?;
    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &RefreshSummary) {
    let report = &summary.report;
    println!(
        "✓ {} of {} players fetched in {} batches ({} failed)",
        report.succeeded, report.attempted, report.batches, report.failed
    );
    if summary.added_from_extra > 0 {
        println!("  {} players added from the extra roster", summary.added_from_extra);
    }
    for failure in &report.failures {
        println!("  ✗ {}: {}", failure.player_id, failure.reason);
    }
    println!(
        "✓ Dataset: {} players ({} with stats) -> {}",
        summary.players,
        summary.with_stats,
        summary.dataset_path.display()
    );
}
