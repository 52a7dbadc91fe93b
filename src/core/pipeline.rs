//! Stage orchestration for one run.

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::adapters::VideoPlatform;
use crate::config::ResolvedConfig;
use crate::domain::{RunSummary, SkippedChannel};
use crate::report;

use super::{discover_channels, enrich_all};

/// Run the full discovery → enrichment → reporting pipeline.
///
/// Each stage completes before the next begins. Discovery errors are
/// fatal; enrichment failures are isolated per channel; rendering errors
/// are fatal again.
pub async fn run_pipeline(
    platform: &dyn VideoPlatform,
    config: &ResolvedConfig,
) -> Result<RunSummary> {
    info!(query = %config.query, max_pages = config.max_pages, "starting discovery");
    let ids = discover_channels(platform, &config.query, config.page_size, config.max_pages)
        .await
        .context("Channel discovery failed")?;
    info!(channels = ids.len(), "discovery complete");

    let outcome = enrich_all(platform, &ids, config.recent_videos, config.zero_video_policy).await;
    info!(
        enriched = outcome.table.len(),
        skipped = outcome.failures.len(),
        "enrichment complete"
    );

    let charts = if outcome.table.is_empty() {
        warn!("no channels enriched, skipping chart rendering");
        Vec::new()
    } else {
        report::render_all(&outcome.table, &config.out_dir)
            .context("Chart rendering failed")?
    };

    let failures = outcome
        .failures
        .into_iter()
        .map(|f| SkippedChannel {
            channel_id: f.channel_id,
            reason: f.reason.to_string(),
        })
        .collect();

    Ok(RunSummary {
        discovered: ids.len(),
        enriched: outcome.table.len(),
        failures,
        charts,
    })
}
