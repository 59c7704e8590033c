//! Monthly feed retrieval.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::constants::FEED_URL;

/// A source of monthly feed payloads.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the raw response body for one (year, month) query.
    async fn fetch_month(&self, year: i32, month: u32) -> Result<String>;
}

/// The production source: the museum's HTTP API.
pub struct HttpFeed {
    client: Client,
}

impl HttpFeed {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

/// The upstream expects unpadded month numbers.
fn month_url(year: i32, month: u32) -> String {
    format!("{}?year={}&month={}", FEED_URL, year, month)
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_month(&self, year: i32, month: u32) -> Result<String> {
        let url = month_url(year, month);
        debug!(%url, "fetching month");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to reach the feed for {}-{:02}", year, month))?;
        response
            .text()
            .await
            .with_context(|| format!("Failed to read the feed body for {}-{:02}", year, month))
    }
}
