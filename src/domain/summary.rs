//! End-of-run accounting.

use std::fmt;
use std::path::PathBuf;

use super::channel::ChannelId;

/// One channel dropped during enrichment, with its rendered reason.
#[derive(Debug, Clone)]
pub struct SkippedChannel {
    pub channel_id: ChannelId,
    pub reason: String,
}

/// What one pipeline run discovered, kept, and produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    /// Channel ids returned by discovery
    pub discovered: usize,

    /// Channels that produced a record in the table
    pub enriched: usize,

    /// Channels dropped during enrichment, with reasons, in discovery order
    pub failures: Vec<SkippedChannel>,

    /// Chart files written by the reporting stage
    pub charts: Vec<PathBuf>,
}

impl RunSummary {
    /// Number of channels dropped during enrichment.
    pub fn skipped(&self) -> usize {
        self.failures.len()
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Discovered {} channels, enriched {}, skipped {}",
            self.discovered,
            self.enriched,
            self.skipped()
        )?;
        for failure in &self.failures {
            writeln!(f, "  skipped {}: {}", failure.channel_id, failure.reason)?;
        }
        for chart in &self.charts {
            writeln!(f, "  wrote {}", chart.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_display_lists_failures_and_charts() {
        let summary = RunSummary {
            discovered: 12,
            enriched: 10,
            failures: vec![
                SkippedChannel {
                    channel_id: ChannelId::new("UCdead"),
                    reason: "Channel has no recent videos".to_string(),
                },
                SkippedChannel {
                    channel_id: ChannelId::new("UCgone"),
                    reason: "Channel id resolved to no channel".to_string(),
                },
            ],
            charts: vec![PathBuf::from("a.png"), PathBuf::from("b.png")],
        };

        assert_eq!(summary.skipped(), 2);

        let text = summary.to_string();
        assert!(text.contains("Discovered 12 channels, enriched 10, skipped 2"));
        assert!(text.contains("skipped UCdead: Channel has no recent videos"));
        assert!(text.contains("skipped UCgone: Channel id resolved to no channel"));
        assert!(text.contains("wrote a.png"));
        assert!(text.contains("wrote b.png"));
    }
}
