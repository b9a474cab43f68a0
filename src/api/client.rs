//! HTTP score feed client.

use super::{DataConverter, ScoreFeed};
use crate::betting::ScoreSnapshot;
use crate::config::FeedConfig;
use crate::error::{Error, FeedError, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::time::Duration;
use tracing::debug;

/// Builder for creating a score feed client.
pub struct ScoreFeedClientBuilder {
    config: FeedConfig,
}

impl ScoreFeedClientBuilder {
    /// Create a new builder with default config.
    pub fn new() -> Self {
        Self {
            config: FeedConfig::default(),
        }
    }

    /// Set the feed configuration.
    pub fn config(mut self, config: FeedConfig) -> Self {
        self.config = config;
        self
    }

    /// Override the scores endpoint.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = url.into();
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<ScoreFeedClient> {
        ScoreFeedClient::new(self.config)
    }
}

impl Default for ScoreFeedClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches score snapshots from the live scores endpoint.
#[derive(Debug, Clone)]
pub struct ScoreFeedClient {
    base_url: Url,
    http: reqwest::Client,
}

impl ScoreFeedClient {
    /// Create a new client.
    pub fn new(config: FeedConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| Error::config(format!("feed base_url '{}': {}", config.base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(Error::config(format!(
                "feed base_url '{}' cannot take a path",
                config.base_url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::config(e.to_string()))?;

        Ok(Self { base_url, http })
    }

    pub fn builder() -> ScoreFeedClientBuilder {
        ScoreFeedClientBuilder::new()
    }

    /// URL of the snapshot for `event_id`. The id is percent-encoded as one path segment.
    pub fn snapshot_url(&self, event_id: &str) -> std::result::Result<Url, FeedError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FeedError::transport("feed base URL cannot take a path"))?
            .pop_if_empty()
            .push(event_id);
        Ok(url)
    }
}

#[async_trait]
impl ScoreFeed for ScoreFeedClient {
    async fn fetch_snapshot(&self, event_id: &str) -> std::result::Result<ScoreSnapshot, FeedError> {
        let url = self.snapshot_url(event_id)?;
        debug!(%url, "fetching score snapshot");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| FeedError::transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::transport(format!("HTTP {}", status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::transport(e.to_string()))?;

        DataConverter::decode_snapshot(&body)
    }
}
