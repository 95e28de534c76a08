//! Batched acquisition of per-player stats.
//!
//! Identifiers are processed in consecutive batches of `concurrency`. Every
//! fetch in a batch runs concurrently and the batch is a barrier: nothing
//! from the next batch starts until all of the current one has settled.
//! Successes are written into the [`PlayerCacheStore`], failures are logged
//! and skipped (the previous cache entry, if any, stays), and the whole map
//! is checkpointed to disk before the next batch begins.

use std::{collections::HashSet, time::Duration};

use futures::future::join_all;
use tracing::{info, warn};

use crate::{
    cli::types::PlayerId,
    error::{FetchError, Result, ScoutError},
    models::{PlayerRecord, PlayerStats, PlayerStatsResult},
    scrape::StatsProvider,
    storage::{PlayerCache, PlayerCacheStore},
};


pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Fetches in flight per batch.
    pub concurrency: usize,
    /// Pause between batches; not applied after the last one.
    pub batch_delay: Duration,
    /// Upper bound on a single player's fetch, on top of any HTTP timeout.
    pub fetch_timeout: Option<Duration>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            batch_delay: DEFAULT_BATCH_DELAY,
            fetch_timeout: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedFetch {
    pub player_id: PlayerId,
    pub reason: String,
}

/// Settled results of one batch.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub index: usize,
    pub succeeded: Vec<(PlayerId, PlayerStatsResult)>,
    pub failed: Vec<(PlayerId, FetchError)>,
}

/// Counts for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub batches: usize,
    pub failures: Vec<FailedFetch>,
}

async fn fetch_one<S>(
    provider: &S,
    id: &PlayerId,
    timeout: Option<Duration>,
) -> std::result::Result<PlayerStatsResult, FetchError>
where
    S: StatsProvider + ?Sized,
{
    match timeout {
        Some(limit) => tokio::time::timeout(limit, provider.fetch_stats(id))
            .await
            .unwrap_or_else(|_| {
                Err(FetchError::Timeout {
                    url: format!("player {id}"),
                })
            }),
        None => provider.fetch_stats(id).await,
    }
}

/// Fetch every id in `batch` concurrently and wait for all of them.
pub async fn run_batch<S>(
    index: usize,
    batch: &[PlayerId],
    provider: &S,
    fetch_timeout: Option<Duration>,
) -> BatchOutcome
where
    S: StatsProvider + ?Sized,
{
    let settled = join_all(batch.iter().map(|id| async move {
        (id.clone(), fetch_one(provider, id, fetch_timeout).await)
    }))
    .await;

    let mut outcome = BatchOutcome {
        index,
        ..Default::default()
    };
    for (id, result) in settled {
        match result {
            Ok(stats) => outcome.succeeded.push((id, stats)),
            Err(e) => outcome.failed.push((id, e)),
        }
    }
    outcome
}

/// Run the pipeline over `ids`, checkpointing `store` after every batch.
///
/// Returns an error only for bad parameters (before any work) or when a
/// checkpoint cannot be written; in the latter case every earlier batch is
/// already on disk.
pub async fn run<S>(
    ids: &[PlayerId],
    provider: &S,
    store: &mut PlayerCacheStore,
    config: &PipelineConfig,
) -> Result<RunReport>
where
    S: StatsProvider + ?Sized,
{
    if config.concurrency == 0 {
        return Err(ScoutError::invalid_input("concurrency must be at least 1"));
    }

    let total_batches = ids.len().div_ceil(config.concurrency);
    let mut report = RunReport {
        attempted: ids.len(),
        ..Default::default()
    };

    info!(
        players = ids.len(),
        batches = total_batches,
        concurrency = config.concurrency,
        "starting stats refresh"
    );

    for (index, batch) in ids.chunks(config.concurrency).enumerate() {
        let outcome = run_batch(index, batch, provider, config.fetch_timeout).await;

        let batch_ok = outcome.succeeded.len();
        let batch_failed = outcome.failed.len();
        for (id, err) in outcome.failed {
            warn!(player_id = %id, error = %err, "stats fetch failed; keeping previous cache entry");
            report.failures.push(FailedFetch {
                player_id: id,
                reason: err.to_string(),
            });
        }
        store.merge(outcome.succeeded);

        store.save()?;
        report.batches += 1;
        report.succeeded += batch_ok;
        report.failed += batch_failed;
        info!(
            batch = index + 1,
            of = total_batches,
            succeeded = batch_ok,
            failed = batch_failed,
            "checkpoint written"
        );

        if index + 1 < total_batches && !config.batch_delay.is_zero() {
            tokio::time::sleep(config.batch_delay).await;
        }
    }

    Ok(report)
}

/// Ids of `roster` in order, first occurrence wins.
pub fn roster_ids(roster: &[PlayerRecord]) -> Vec<PlayerId> {
    let mut seen = HashSet::new();
    roster
        .iter()
        .filter(|p| seen.insert(p.player_id.clone()))
        .map(|p| p.player_id.clone())
        .collect()
}

/// Append players from `extra` that `roster` doesn't already have.
/// Returns how many were added.
pub fn merge_rosters(roster: &mut Vec<PlayerRecord>, extra: Vec<PlayerRecord>) -> usize {
    let mut known: HashSet<PlayerId> = roster.iter().map(|p| p.player_id.clone()).collect();
    let before = roster.len();
    for player in extra {
        if known.insert(player.player_id.clone()) {
            roster.push(player);
        }
    }
    roster.len() - before
}

/// Layer cached stats onto roster records. Players without a cache entry
/// keep `minutes: None` and are skipped by the analysis.
pub fn merge_stats(roster: Vec<PlayerRecord>, cache: &PlayerCache) -> Vec<PlayerStats> {
    roster
        .into_iter()
        .map(|record| match cache.get(&record.player_id) {
            Some(entry) => PlayerStats::with_result(record, entry),
            None => PlayerStats::from_record(record),
        })
        .collect()
}
