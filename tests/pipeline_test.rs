//! End-to-end acquisition: fake upstream pages through the real parser,
//! pipeline and cache store.

use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use serde_json::json;
use tempfile::TempDir;
use value_scout::{
    analysis::{find_candidates, FindOptions},
    pipeline::{self, merge_stats, roster_ids, PipelineConfig},
    scrape::{Endpoints, HeaderParser, PageFetcher, PlayerStatsFetcher},
    storage::PlayerCacheStore,
    FetchError, PlayerId, PlayerRecord, SeasonId,
};

const BASE: &str = "https://tm.test";

/// Serves canned bodies by URL; anything else is a 404.
struct CannedPages(HashMap<String, String>);

#[async_trait]
impl PageFetcher for CannedPages {
    async fn fetch(&self, url: &str, _cache_ttl: Option<Duration>) -> Result<String, FetchError> {
        self.0.get(url).cloned().ok_or_else(|| FetchError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

fn profile(club: &str, ribbon: &str) -> String {
    format!(
        r#"<html><body><header class="data-header">
             <div class="data-header__ribbon"><span>{ribbon}</span></div>
             <div class="data-header__club-info">
               <span class="data-header__club"><a href="/c">{club}</a></span>
               <span class="data-header__league"><a href="/l">Premier League</a></span>
             </div>
           </header></body></html>"#
    )
}

fn feed(games: &[(i32, u32, u32, u32)]) -> String {
    let performance: Vec<_> = games
        .iter()
        .map(|(season, minutes, goals, assists)| {
            json!({
                "gameInformation": { "seasonId": season, "competitionTypeId": 1 },
                "statistics": {
                    "goalStatistics": { "goalsScoredTotal": goals, "assists": assists },
                    "playingTimeStatistics": { "playedMinutes": minutes }
                }
            })
        })
        .collect();
    json!({ "data": { "performance": performance } }).to_string()
}

fn record(id: &str, market_value: u64) -> PlayerRecord {
    PlayerRecord {
        player_id: PlayerId::new(id),
        name: format!("Player {id}"),
        position: "Centre-Forward".to_string(),
        played_position: None,
        club: "Unknown".to_string(),
        league: String::new(),
        nationality: String::new(),
        age: None,
        market_value,
        is_new_signing: false,
        is_on_loan: false,
        total_matches: None,
    }
}

fn upstream() -> CannedPages {
    let endpoints = Endpoints::new(BASE);
    let mut pages = HashMap::new();
    let mut add = |id: &str, club: &str, ribbon: &str, games: &[(i32, u32, u32, u32)]| {
        let id = PlayerId::new(id);
        pages.insert(endpoints.profile_url(&id), profile(club, ribbon));
        pages.insert(endpoints.performance_url(&id), feed(games));
    };
    add("10", "Alpha FC", "", &[(2025, 90, 2, 1), (2025, 80, 1, 0), (2024, 90, 5, 5)]);
    add("20", "Beta FC", "New arrival", &[(2025, 90, 1, 0), (2025, 0, 0, 0)]);
    add("30", "Gamma FC", "On loan", &[(2025, 45, 0, 0)]);
    // "40" has no pages at all.
    CannedPages(pages)
}

#[tokio::test]
async fn test_roster_to_frontier() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let provider = PlayerStatsFetcher::new(
        upstream(),
        HeaderParser,
        Endpoints::new(BASE),
        SeasonId::new(2025),
    );
    let roster = vec![
        record("10", 20_000_000),
        record("20", 40_000_000),
        record("30", 60_000_000),
        record("40", 80_000_000),
    ];

    let mut store = PlayerCacheStore::load(cache_path.clone());
    let config = PipelineConfig {
        concurrency: 3,
        batch_delay: Duration::ZERO,
        fetch_timeout: Some(Duration::from_secs(5)),
    };
    let report = pipeline::run(&roster_ids(&roster), &provider, &mut store, &config)
        .await
        .unwrap();

    assert_eq!(report.attempted, 4);
    assert_eq!(report.succeeded, 3);
    assert_eq!(report.failed, 1);
    assert_eq!(report.batches, 2);
    assert_eq!(report.failures[0].player_id, PlayerId::new("40"));

    let on_disk = PlayerCacheStore::load(cache_path);
    assert_eq!(on_disk.entries(), store.entries());

    let alpha = on_disk.get(&PlayerId::new("10")).unwrap();
    assert_eq!(alpha.minutes, 170);
    assert_eq!(alpha.appearances, 2);
    assert_eq!((alpha.goals, alpha.assists), (3, 1));
    assert_eq!(alpha.club, "Alpha FC");
    assert_eq!(alpha.league, "Premier League");

    let beta = on_disk.get(&PlayerId::new("20")).unwrap();
    assert_eq!(beta.appearances, 1);
    assert!(beta.is_new_signing && !beta.is_on_loan);

    let gamma = on_disk.get(&PlayerId::new("30")).unwrap();
    assert!(gamma.is_new_signing && gamma.is_on_loan);

    let players = merge_stats(roster, on_disk.entries());
    assert_eq!(players[0].record.club, "Alpha FC");
    assert_eq!(players[3].minutes, None);

    let bargains = find_candidates(&players, &FindOptions::bargains().with_min_comparisons(2));
    assert_eq!(bargains.len(), 1);
    assert_eq!(bargains[0].player.id(), &PlayerId::new("10"));
    assert_eq!(bargains[0].count, 3);

    let overpriced = find_candidates(&players, &FindOptions::overpriced().with_min_comparisons(2));
    assert_eq!(overpriced.len(), 1);
    assert_eq!(overpriced[0].player.id(), &PlayerId::new("30"));
}

#[tokio::test]
async fn test_rerun_produces_identical_cache_file() {
    let dir = TempDir::new().unwrap();
    let cache_path = dir.path().join("cache.json");
    let provider = PlayerStatsFetcher::new(
        upstream(),
        HeaderParser,
        Endpoints::new(BASE),
        SeasonId::new(2025),
    );
    let ids: Vec<PlayerId> = ["30", "10", "20"].into_iter().map(PlayerId::new).collect();
    let config = PipelineConfig {
        concurrency: 2,
        batch_delay: Duration::ZERO,
        fetch_timeout: None,
    };

    let mut store = PlayerCacheStore::load(cache_path.clone());
    pipeline::run(&ids, &provider, &mut store, &config).await.unwrap();
    let first = std::fs::read(&cache_path).unwrap();

    let mut store = PlayerCacheStore::load(cache_path.clone());
    pipeline::run(&ids, &provider, &mut store, &config).await.unwrap();
    let second = std::fs::read(&cache_path).unwrap();

    assert_eq!(first, second);
}
