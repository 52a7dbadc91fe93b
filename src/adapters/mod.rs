//! Adapter interfaces for external systems.
//!
//! The pipeline talks to the video platform through the `VideoPlatform`
//! trait so the stages can be exercised against an in-memory fake.

pub mod youtube;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::ChannelId;

// Re-export the YouTube adapter
pub use youtube::YouTubeClient;

/// One page of channel search results.
#[derive(Debug, Clone, Default)]
pub struct ChannelSearchPage {
    /// Channel ids in result order
    pub channel_ids: Vec<ChannelId>,

    /// Continuation token for the next page, absent on the last page
    pub next_page_token: Option<String>,
}

/// Channel metadata and lifetime statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelStats {
    pub title: String,
    pub subscribers: u64,
    pub total_views: u64,
    pub video_count: u64,
}

/// Errors surfaced by a platform adapter.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed count field {field}: {value:?}")]
    MalformedCount { field: &'static str, value: String },
}

/// Trait for video platform APIs
#[async_trait]
pub trait VideoPlatform: Send + Sync {
    /// One page of a keyword channel search.
    async fn search_channels(
        &self,
        query: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ChannelSearchPage, PlatformError>;

    /// Metadata and statistics for one channel, `None` if the id resolves
    /// to nothing.
    async fn channel_stats(&self, id: &ChannelId) -> Result<Option<ChannelStats>, PlatformError>;

    /// Ids of the channel's most recent videos, newest first, at most `max`.
    async fn recent_video_ids(
        &self,
        id: &ChannelId,
        max: u32,
    ) -> Result<Vec<String>, PlatformError>;

    /// View counts for a batch of video ids; entries the API does not
    /// return statistics for are omitted.
    async fn video_view_counts(&self, ids: &[String]) -> Result<Vec<u64>, PlatformError>;
}
