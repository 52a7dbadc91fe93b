//! The three chart renders.

use std::path::Path;

use anyhow::{Context, Result};
use plotters::prelude::*;

use crate::domain::ChannelTable;

use super::density::{gaussian_kde, histogram_bins, linspace};

const CHART_SIZE: (u32, u32) = (1000, 600);
const HISTOGRAM_BINS: usize = 20;
const LEADERBOARD_SIZE: usize = 10;

/// Histogram of subscriber counts with a Gaussian density overlay.
pub fn subscriber_distribution(table: &ChannelTable, path: &Path) -> Result<()> {
    let values: Vec<f64> = table.iter().map(|r| r.subscribers as f64).collect();
    let bins = histogram_bins(&values, HISTOGRAM_BINS);
    if bins.is_empty() {
        anyhow::bail!("Cannot render a distribution over an empty table");
    }

    let x_lo = bins[0].lo;
    let x_hi = bins[bins.len() - 1].hi;
    let bin_width = bins[0].hi - bins[0].lo;

    // Density scaled to expected bin counts so the curve overlays the bars
    let grid = linspace(x_lo, x_hi, 200);
    let density = gaussian_kde(&values, &grid);
    let scale = values.len() as f64 * bin_width;
    let curve: Vec<(f64, f64)> = grid.iter().zip(&density).map(|(x, d)| (*x, d * scale)).collect();

    let max_count = bins.iter().map(|b| b.count).max().unwrap_or(0) as f64;
    let max_curve = curve.iter().map(|&(_, y)| y).fold(0.0, f64::max);
    let y_hi = (max_count.max(max_curve) * 1.1).max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Distribution of Subscribers", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(64)
        .build_cartesian_2d(x_lo..x_hi, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Number of Subscribers")
        .y_desc("Count")
        .draw()?;

    chart.draw_series(bins.iter().map(|bin| {
        Rectangle::new(
            [(bin.lo, 0.0), (bin.hi, bin.count as f64)],
            BLUE.mix(0.4).filled(),
        )
    }))?;

    chart.draw_series(LineSeries::new(curve, RED.stroke_width(2)))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}

/// Scatter of video count against lifetime views.
pub fn views_vs_videos(table: &ChannelTable, path: &Path) -> Result<()> {
    let points: Vec<(f64, f64)> = table
        .iter()
        .map(|r| (r.video_count as f64, r.total_views as f64))
        .collect();

    let x_hi = points.iter().map(|&(x, _)| x).fold(0.0, f64::max).max(1.0) * 1.05;
    let y_hi = points.iter().map(|&(_, y)| y).fold(0.0, f64::max).max(1.0) * 1.05;

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Correlation between Total Views and Video Count", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(48)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..x_hi, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Number of Videos")
        .y_desc("Total Views")
        .draw()?;

    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y), 4, BLUE.filled())),
    )?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}

/// Bar chart of the top channels by subscribers, labeled by title.
pub fn top_channels(table: &ChannelTable, path: &Path) -> Result<()> {
    let top = table.top_by_subscribers(LEADERBOARD_SIZE);
    if top.is_empty() {
        anyhow::bail!("Cannot render a leaderboard over an empty table");
    }

    let titles: Vec<String> = top.iter().map(|r| r.title.clone()).collect();
    let n = top.len();
    let y_hi = (top.iter().map(|r| r.subscribers).max().unwrap_or(0) as f64 * 1.1).max(1.0);

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Top Channels by Subscribers", ("sans-serif", 28))
        .margin(12)
        .x_label_area_size(140)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..n as f64, 0f64..y_hi)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&|x: &f64| {
            titles
                .get(x.floor() as usize)
                .cloned()
                .unwrap_or_default()
        })
        .x_label_style(("sans-serif", 13).into_font().transform(FontTransform::Rotate90))
        .x_desc("Channel Title")
        .y_desc("Number of Subscribers")
        .draw()?;

    chart.draw_series(top.iter().enumerate().map(|(i, record)| {
        Rectangle::new(
            [
                (i as f64 + 0.15, 0.0),
                (i as f64 + 0.85, record.subscribers as f64),
            ],
            GREEN.mix(0.6).filled(),
        )
    }))?;

    root.present()
        .with_context(|| format!("Failed to write chart: {}", path.display()))?;
    Ok(())
}
