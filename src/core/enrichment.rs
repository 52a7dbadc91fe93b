//! Per-channel enrichment.
//!
//! Each channel id is expanded into a ChannelRecord through three API
//! calls: channel statistics, recent-video search, and one batched video
//! statistics fetch. A failure anywhere in that sequence skips the channel
//! and records a typed reason; the remaining channels proceed.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::adapters::{PlatformError, VideoPlatform};
use crate::domain::{ChannelId, ChannelRecord, ChannelTable};

/// What to do with a channel whose recent-video search returns nothing.
///
/// The original analysis crashed on this case; the behavior is now an
/// explicit policy choice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum ZeroVideoPolicy {
    /// Treat the channel as an enrichment failure and drop it
    #[default]
    Exclude,

    /// Keep the channel with avg_recent_views = 0
    Zero,
}

/// Why one channel was dropped during enrichment.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error("Channel id resolved to no channel")]
    ChannelNotFound,

    #[error("Channel has no recent videos")]
    NoRecentVideos,
}

/// One skipped channel with its reason.
#[derive(Debug)]
pub struct EnrichmentFailure {
    pub channel_id: ChannelId,
    pub reason: EnrichError,
}

/// Result of enriching a whole discovery batch.
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    /// Records in discovery order, minus skipped channels
    pub table: ChannelTable,

    /// Skipped channels with typed reasons, in discovery order
    pub failures: Vec<EnrichmentFailure>,
}

/// Build a ChannelRecord for one channel id.
pub async fn enrich_channel(
    platform: &dyn VideoPlatform,
    id: &ChannelId,
    recent_videos: u32,
    policy: ZeroVideoPolicy,
) -> Result<ChannelRecord, EnrichError> {
    let stats = platform
        .channel_stats(id)
        .await?
        .ok_or(EnrichError::ChannelNotFound)?;

    let video_ids = platform.recent_video_ids(id, recent_videos).await?;
    let view_counts = platform.video_view_counts(&video_ids).await?;

    let avg_recent_views = match (view_counts.is_empty(), policy) {
        (true, ZeroVideoPolicy::Exclude) => return Err(EnrichError::NoRecentVideos),
        (true, ZeroVideoPolicy::Zero) => 0.0,
        (false, _) => mean(&view_counts),
    };

    Ok(ChannelRecord {
        title: stats.title,
        subscribers: stats.subscribers,
        total_views: stats.total_views,
        video_count: stats.video_count,
        avg_recent_views,
    })
}

/// Enrich every discovered channel, isolating failures per channel.
pub async fn enrich_all(
    platform: &dyn VideoPlatform,
    ids: &[ChannelId],
    recent_videos: u32,
    policy: ZeroVideoPolicy,
) -> EnrichmentOutcome {
    let mut outcome = EnrichmentOutcome::default();

    for id in ids {
        match enrich_channel(platform, id, recent_videos, policy).await {
            Ok(record) => {
                debug!(channel = %id, title = %record.title, "channel enriched");
                outcome.table.push(record);
            }
            Err(reason) => {
                warn!(channel = %id, %reason, "channel skipped");
                outcome.failures.push(EnrichmentFailure {
                    channel_id: id.clone(),
                    reason,
                });
            }
        }
    }

    outcome
}

fn mean(values: &[u64]) -> f64 {
    values.iter().sum::<u64>() as f64 / values.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_is_arithmetic_mean() {
        assert_eq!(mean(&[10, 20, 30]), 20.0);
        assert_eq!(mean(&[7]), 7.0);
        assert_eq!(mean(&[1, 2]), 1.5);
    }

    #[test]
    fn test_zero_video_policy_default_is_exclude() {
        assert_eq!(ZeroVideoPolicy::default(), ZeroVideoPolicy::Exclude);
    }

    #[test]
    fn test_zero_video_policy_yaml_names() {
        let policy: ZeroVideoPolicy = serde_yaml::from_str("exclude").unwrap();
        assert_eq!(policy, ZeroVideoPolicy::Exclude);

        let policy: ZeroVideoPolicy = serde_yaml::from_str("zero").unwrap();
        assert_eq!(policy, ZeroVideoPolicy::Zero);
    }
}
