//! Chart rendering over the enriched channel table.
//!
//! Three independent renders, each an order-insensitive aggregate of the
//! table, written as PNGs with fixed filenames.

pub mod charts;
pub mod density;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::domain::ChannelTable;

pub use charts::{subscriber_distribution, top_channels, views_vs_videos};

/// Fixed output filenames.
pub const SUBSCRIBER_DISTRIBUTION_FILE: &str = "subscriber_distribution.png";
pub const VIEWS_VS_VIDEOS_FILE: &str = "views_vs_videos.png";
pub const TOP_CHANNELS_FILE: &str = "top_10_channels.png";

/// Render all three charts into `out_dir`, returning the written paths.
pub fn render_all(table: &ChannelTable, out_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    let distribution = out_dir.join(SUBSCRIBER_DISTRIBUTION_FILE);
    subscriber_distribution(table, &distribution)?;

    let correlation = out_dir.join(VIEWS_VS_VIDEOS_FILE);
    views_vs_videos(table, &correlation)?;

    let leaderboard = out_dir.join(TOP_CHANNELS_FILE);
    top_channels(table, &leaderboard)?;

    Ok(vec![distribution, correlation, leaderboard])
}
