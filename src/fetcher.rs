use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

use crate::config::CONFIG;

/// Capability seam for retrieving rendered search-result markup, so the
/// pipeline can be exercised against fixture markup without any network.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Plain HTTP fetcher against the search engine's html endpoint. The client
/// is built and torn down inside `fetch`, so every exit path releases it.
pub struct HttpPageFetcher {
    timeout: Option<Duration>,
}

impl HttpPageFetcher {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    pub fn from_config() -> Self {
        Self::new(CONFIG.fetch_timeout_secs.map(Duration::from_secs))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut builder = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (compatible; Newshound/0.1)");
        // no enforced bound unless configured
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("failed to build http client")?;

        let response = client
            .get(url)
            .send()
            .await
            .context("failed to fetch search results page")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("search page fetch failed with status: {status}");
        }

        let body = response
            .text()
            .await
            .context("failed to read search results body")?;
        log::info!("fetched {} bytes of search markup", body.len());
        Ok(body)
    }
}

/// Search-engine URL for a news query: spaces become `+`, locale and
/// freshness ride along as `kl` / `df`, and `ia=news` selects the news
/// category.
pub fn build_search_url(base: &str, query: &str, location: &str, time_filter: &str) -> String {
    format!(
        "{}?q={}&kl={}&df={}&ia=news",
        base,
        query.replace(' ', "+"),
        location,
        time_filter
    )
}
