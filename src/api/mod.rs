//! Live score feed integration.
//!
//! This module provides the [`ScoreFeed`] seam used by bet monitors, an HTTP
//! implementation of it, and the conversion from the feed's wire format into
//! [`ScoreSnapshot`](crate::betting::ScoreSnapshot).

mod client;
mod converter;

pub use client::{ScoreFeedClient, ScoreFeedClientBuilder};
pub use converter::{DataConverter, ScoreResponse};

use crate::betting::ScoreSnapshot;
use crate::error::FeedError;
use async_trait::async_trait;

/// Source of score snapshots, one request per call.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ScoreFeed: Send + Sync {
    /// Fetch the latest snapshot for an event. No caching, no retry.
    async fn fetch_snapshot(&self, event_id: &str) -> Result<ScoreSnapshot, FeedError>;
}
