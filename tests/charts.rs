//! Chart Rendering Tests
//!
//! Smoke tests that the three renders produce non-empty PNG files.

use tubelens::domain::{ChannelRecord, ChannelTable};
use tubelens::report;

fn record(title: &str, subscribers: u64, total_views: u64, video_count: u64) -> ChannelRecord {
    ChannelRecord {
        title: title.to_string(),
        subscribers,
        total_views,
        video_count,
        avg_recent_views: 123.4,
    }
}

fn sample_table() -> ChannelTable {
    (0..15)
        .map(|i| {
            record(
                &format!("Channel {i}"),
                1_000 + i * 700,
                50_000 + i * 9_000,
                5 + i,
            )
        })
        .collect()
}

#[test]
fn test_render_all_writes_three_pngs() {
    let out_dir = tempfile::tempdir().unwrap();

    let charts = report::render_all(&sample_table(), out_dir.path()).unwrap();

    assert_eq!(charts.len(), 3);
    let names: Vec<String> = charts
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "subscriber_distribution.png",
            "views_vs_videos.png",
            "top_10_channels.png"
        ]
    );

    for chart in &charts {
        let metadata = std::fs::metadata(chart).unwrap();
        assert!(metadata.len() > 0, "empty chart {}", chart.display());
    }
}

#[test]
fn test_render_all_creates_missing_out_dir() {
    let out_dir = tempfile::tempdir().unwrap();
    let nested = out_dir.path().join("reports").join("charts");

    let charts = report::render_all(&sample_table(), &nested).unwrap();
    assert!(charts.iter().all(|p| p.exists()));
}

#[test]
fn test_single_channel_table_still_renders() {
    // One record means a degenerate histogram range and a short leaderboard
    let out_dir = tempfile::tempdir().unwrap();
    let table: ChannelTable = [record("Only", 42, 1000, 3)].into_iter().collect();

    let charts = report::render_all(&table, out_dir.path()).unwrap();
    assert_eq!(charts.len(), 3);
}
