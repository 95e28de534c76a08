//! Page fetching over HTTP.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT},
    Client,
};
use std::time::Duration;
use tracing::debug;

use crate::{core::ResponseCache, error::FetchError, Result};

const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";
const ACCEPT_ANY: &str =
    "text/html,application/xhtml+xml,application/json;q=0.9,*/*;q=0.8";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// How long a fetched page may be reused within one process.
pub const DEFAULT_PAGE_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Source of raw page content.
///
/// `cache_ttl` lets a caller accept a previously fetched body that is younger
/// than the TTL instead of hitting the network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        cache_ttl: Option<Duration>,
    ) -> std::result::Result<String, FetchError>;
}

/// reqwest-backed fetcher. The client timeout bounds every request.
pub struct HttpFetcher {
    client: Client,
    responses: ResponseCache,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_ANY));

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .timeout(timeout)
            .build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            responses: ResponseCache::default(),
        }
    }

    pub fn response_cache(&self) -> &ResponseCache {
        &self.responses
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        cache_ttl: Option<Duration>,
    ) -> std::result::Result<String, FetchError> {
        if let Some(ttl) = cache_ttl {
            if let Some(body) = self.responses.get(url, ttl) {
                debug!(url, "page served from memory cache");
                return Ok(body);
            }
        }

        let body = self
            .client
            .get(url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| FetchError::from_reqwest(url, e))?
            .text()
            .await
            .map_err(|e| FetchError::from_reqwest(url, e))?;

        if cache_ttl.is_some() {
            self.responses.put(url, body.clone());
        }
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_fetcher_builds_with_timeout() {
        let fetcher = HttpFetcher::new(Duration::from_secs(5)).unwrap();
        assert_eq!(fetcher.response_cache().stats().0, 0);
    }

    #[tokio::test]
    async fn test_fresh_cached_body_skips_network() {
        let fetcher = HttpFetcher::new(Duration::from_secs(1)).unwrap();
        // Unroutable URL: only the memory cache can answer it.
        let url = "http://invalid.invalid/profile/1";
        fetcher.response_cache().put(url, "<html></html>".to_string());

        let body = fetcher
            .fetch(url, Some(Duration::from_secs(3600)))
            .await
            .unwrap();
        assert_eq!(body, "<html></html>");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let fetcher = HttpFetcher::new(Duration::from_secs(2)).unwrap();
        let result = fetcher.fetch("http://invalid.invalid/profile/1", None).await;
        assert!(result.is_err());
    }
}
