//! Per-player stats acquisition from the upstream site.
//!
//! - `http`: the [`PageFetcher`] seam and its reqwest implementation
//! - `parse`: profile header extraction
//! - `types`: performance feed wire types
//! - `compute`: season aggregation and value parsing

pub mod compute;
pub mod http;
pub mod parse;
pub mod types;

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::{
    cli::types::{PlayerId, SeasonId},
    error::FetchError,
    models::PlayerStatsResult,
};

pub use http::{HttpFetcher, PageFetcher};
pub use parse::{HeaderParser, ProfileHeader, ProfileParser};

use compute::aggregate_season_stats;
use types::PerformanceFeed;

pub const DEFAULT_BASE_URL: &str = "https://www.transfermarkt.com";

/// Produces one player's stats. The pipeline only sees this trait.
#[async_trait]
pub trait StatsProvider: Send + Sync {
    async fn fetch_stats(&self, id: &PlayerId) -> Result<PlayerStatsResult, FetchError>;
}

/// URL layout of the upstream site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base_url: String,
}

impl Endpoints {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn profile_url(&self, id: &PlayerId) -> String {
        format!("{}/x/leistungsdaten/spieler/{}", self.base_url, id)
    }

    pub fn performance_url(&self, id: &PlayerId) -> String {
        format!("{}/ceapi/performance-game/{}", self.base_url, id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Fetches the profile page and the performance feed for a player and folds
/// them into a [`PlayerStatsResult`].
pub struct PlayerStatsFetcher<F, P> {
    fetcher: F,
    parser: P,
    endpoints: Endpoints,
    season: SeasonId,
    cache_ttl: Option<Duration>,
}

impl<F: PageFetcher, P: ProfileParser> PlayerStatsFetcher<F, P> {
    pub fn new(fetcher: F, parser: P, endpoints: Endpoints, season: SeasonId) -> Self {
        Self {
            fetcher,
            parser,
            endpoints,
            season,
            cache_ttl: None,
        }
    }

    /// Let the page fetcher answer from bodies younger than `ttl`.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = Some(ttl);
        self
    }

    pub fn season(&self) -> SeasonId {
        self.season
    }
}

#[async_trait]
impl<F: PageFetcher, P: ProfileParser> StatsProvider for PlayerStatsFetcher<F, P> {
    /// The profile page is required. A missing or malformed feed only zeroes
    /// the counters; club and signing status from the profile are kept.
    async fn fetch_stats(&self, id: &PlayerId) -> Result<PlayerStatsResult, FetchError> {
        if id.is_empty() {
            return Err(FetchError::EmptyId);
        }

        let profile_url = self.endpoints.profile_url(id);
        let feed_url = self.endpoints.performance_url(id);
        let (page, feed) = tokio::join!(
            self.fetcher.fetch(&profile_url, self.cache_ttl),
            self.fetcher.fetch(&feed_url, self.cache_ttl)
        );

        let header = self
            .parser
            .parse_profile(&page?)
            .ok_or(FetchError::Unparseable { url: profile_url })?;

        let mut result = PlayerStatsResult {
            club: header.club,
            league: header.league,
            is_new_signing: header.is_new_signing,
            is_on_loan: header.is_on_loan,
            ..Default::default()
        };

        let games = match feed {
            Ok(body) => match serde_json::from_str::<PerformanceFeed>(&body) {
                Ok(feed) => feed.into_games(),
                Err(e) => {
                    debug!(player_id = %id, error = %e, "performance feed not decodable; stats default to zero");
                    return Ok(result);
                }
            },
            Err(e) => {
                debug!(player_id = %id, error = %e, "performance feed unavailable; stats default to zero");
                return Ok(result);
            }
        };

        let agg = aggregate_season_stats(&games, self.season);
        result.minutes = agg.totals.minutes;
        result.appearances = agg.totals.appearances;
        result.goals = agg.totals.goals;
        result.assists = agg.totals.assists;
        result.international = agg.international;
        result.penalty_goals = agg.penalty_goals;
        result.penalty_misses = agg.penalty_misses;
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::{collections::HashMap, sync::Mutex};

    const PROFILE: &str = r#"<header class="data-header">
        <div class="data-header__ribbon"><span>New arrival</span></div>
        <div class="data-header__club-info">
          <span class="data-header__club"><a>Brentford FC</a></span>
          <span class="data-header__league"><a>Premier League</a></span>
        </div></header>"#;

    /// Serves canned bodies by URL; anything else is a 404.
    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(
            &self,
            url: &str,
            _cache_ttl: Option<Duration>,
        ) -> Result<String, FetchError> {
            self.0.get(url).cloned().ok_or(FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
        }
    }

    /// Serves the same canned pages while noting the TTL of every request.
    struct TtlRecorder {
        pages: MapFetcher,
        ttls: Mutex<Vec<Option<Duration>>>,
    }

    #[async_trait]
    impl PageFetcher for TtlRecorder {
        async fn fetch(
            &self,
            url: &str,
            cache_ttl: Option<Duration>,
        ) -> Result<String, FetchError> {
            self.ttls.lock().unwrap().push(cache_ttl);
            self.pages.fetch(url, cache_ttl).await
        }
    }

    fn stats_fetcher(pages: Vec<(String, String)>) -> PlayerStatsFetcher<MapFetcher, HeaderParser> {
        PlayerStatsFetcher::new(
            MapFetcher(pages.into_iter().collect()),
            HeaderParser,
            Endpoints::new("https://tm.test/"),
            SeasonId::new(2025),
        )
    }

    fn feed_body() -> String {
        json!({
            "data": { "performance": [
                {
                    "gameInformation": { "seasonId": 2025, "competitionTypeId": 1 },
                    "statistics": {
                        "goalStatistics": { "goalsScoredTotal": 1, "assists": 1 },
                        "playingTimeStatistics": { "playedMinutes": 90 }
                    }
                },
                {
                    "gameInformation": { "seasonId": 2025, "competitionTypeId": 1 },
                    "statistics": {
                        "goalStatistics": { "goalsScoredTotal": 0, "assists": null },
                        "playingTimeStatistics": { "playedMinutes": 0 }
                    }
                },
                {
                    "gameInformation": { "seasonId": 2024, "competitionTypeId": 1 },
                    "statistics": {
                        "goalStatistics": { "goalsScoredTotal": 9, "assists": 9 },
                        "playingTimeStatistics": { "playedMinutes": 900 }
                    }
                }
            ]}
        })
        .to_string()
    }

    #[test]
    fn test_endpoints_strip_trailing_slash() {
        let endpoints = Endpoints::new("https://tm.test/");
        let id = PlayerId::new("42");
        assert_eq!(
            endpoints.profile_url(&id),
            "https://tm.test/x/leistungsdaten/spieler/42"
        );
        assert_eq!(
            endpoints.performance_url(&id),
            "https://tm.test/ceapi/performance-game/42"
        );
    }

    #[tokio::test]
    async fn test_fetch_stats_combines_profile_and_feed() {
        let fetcher = stats_fetcher(vec![
            (
                "https://tm.test/x/leistungsdaten/spieler/42".to_string(),
                PROFILE.to_string(),
            ),
            ("https://tm.test/ceapi/performance-game/42".to_string(), feed_body()),
        ]);

        let result = fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap();
        assert_eq!(result.minutes, 90);
        assert_eq!(result.appearances, 1);
        assert_eq!(result.goals, 1);
        assert_eq!(result.assists, 1);
        assert_eq!(result.club, "Brentford FC");
        assert_eq!(result.league, "Premier League");
        assert!(result.is_new_signing);
        assert!(!result.is_on_loan);
    }

    #[tokio::test]
    async fn test_cache_ttl_reaches_both_page_requests() {
        let pages = vec![
            (
                "https://tm.test/x/leistungsdaten/spieler/42".to_string(),
                PROFILE.to_string(),
            ),
            ("https://tm.test/ceapi/performance-game/42".to_string(), feed_body()),
        ];
        let recorder = TtlRecorder {
            pages: MapFetcher(pages.into_iter().collect()),
            ttls: Mutex::new(Vec::new()),
        };
        let ttl = Duration::from_secs(60);
        let fetcher = PlayerStatsFetcher::new(
            recorder,
            HeaderParser,
            Endpoints::new("https://tm.test"),
            SeasonId::new(2025),
        )
        .with_cache_ttl(ttl);

        fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap();
        assert_eq!(*fetcher.fetcher.ttls.lock().unwrap(), vec![Some(ttl), Some(ttl)]);

        let uncached = stats_fetcher(vec![]);
        assert_eq!(uncached.cache_ttl, None);
    }

    #[tokio::test]
    async fn test_missing_feed_keeps_profile_fields() {
        let fetcher = stats_fetcher(vec![(
            "https://tm.test/x/leistungsdaten/spieler/42".to_string(),
            PROFILE.to_string(),
        )]);

        let result = fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap();
        assert_eq!(result.minutes, 0);
        assert_eq!(result.goals, 0);
        assert_eq!(result.club, "Brentford FC");
        assert!(result.is_new_signing);
    }

    #[tokio::test]
    async fn test_garbage_feed_keeps_profile_fields() {
        let fetcher = stats_fetcher(vec![
            (
                "https://tm.test/x/leistungsdaten/spieler/42".to_string(),
                PROFILE.to_string(),
            ),
            (
                "https://tm.test/ceapi/performance-game/42".to_string(),
                "<html>rate limited</html>".to_string(),
            ),
        ]);

        let result = fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap();
        assert_eq!(result.minutes, 0);
        assert_eq!(result.league, "Premier League");
    }

    #[tokio::test]
    async fn test_missing_profile_is_failure() {
        let fetcher = stats_fetcher(vec![(
            "https://tm.test/ceapi/performance-game/42".to_string(),
            feed_body(),
        )]);

        let err = fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_unrecognized_profile_is_failure() {
        let fetcher = stats_fetcher(vec![(
            "https://tm.test/x/leistungsdaten/spieler/42".to_string(),
            "<html>captcha</html>".to_string(),
        )]);

        let err = fetcher.fetch_stats(&PlayerId::new("42")).await.unwrap_err();
        assert!(matches!(err, FetchError::Unparseable { .. }));
    }

    #[tokio::test]
    async fn test_empty_id_is_rejected() {
        let fetcher = stats_fetcher(vec![]);
        let err = fetcher.fetch_stats(&PlayerId::new("")).await.unwrap_err();
        assert!(matches!(err, FetchError::EmptyId));
    }
}
