//! Channel identifiers and enriched channel statistics.
//!
//! A ChannelRecord is built once per successfully enriched channel and is
//! immutable afterwards. The ChannelTable preserves discovery order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque channel identifier as returned by the platform's search API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChannelId(pub String);

impl ChannelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Statistics for one enriched channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    /// Channel display title
    pub title: String,

    /// Subscriber count at fetch time
    pub subscribers: u64,

    /// Lifetime view count across the whole channel
    pub total_views: u64,

    /// Number of public videos on the channel
    pub video_count: u64,

    /// Arithmetic mean of view counts over the most recent uploads
    /// (up to 10) that returned statistics
    pub avg_recent_views: f64,
}

/// Ordered collection of enriched channels.
///
/// Insertion order equals discovery order minus skipped failures. This is
/// the sole input to the reporting stage.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelTable {
    records: Vec<ChannelRecord>,
}

impl ChannelTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ChannelRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChannelRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[ChannelRecord] {
        &self.records
    }

    /// The `k` records with the largest subscriber counts, descending.
    ///
    /// Ties keep their original table order (stable sort), so two channels
    /// with equal subscribers appear in discovery order.
    pub fn top_by_subscribers(&self, k: usize) -> Vec<&ChannelRecord> {
        let mut by_subs: Vec<&ChannelRecord> = self.records.iter().collect();
        by_subs.sort_by(|a, b| b.subscribers.cmp(&a.subscribers));
        by_subs.truncate(k);
        by_subs
    }
}

impl FromIterator<ChannelRecord> for ChannelTable {
    fn from_iter<T: IntoIterator<Item = ChannelRecord>>(iter: T) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, subscribers: u64) -> ChannelRecord {
        ChannelRecord {
            title: title.to_string(),
            subscribers,
            total_views: subscribers * 100,
            video_count: 10,
            avg_recent_views: 1.0,
        }
    }

    #[test]
    fn test_top_by_subscribers_orders_descending() {
        let table: ChannelTable =
            [record("A", 100), record("B", 500), record("C", 10)].into_iter().collect();

        let top = table.top_by_subscribers(2);
        let titles: Vec<&str> = top.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
    }

    #[test]
    fn test_top_by_subscribers_handles_short_table() {
        let table: ChannelTable = [record("A", 100)].into_iter().collect();

        let top = table.top_by_subscribers(10);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].title, "A");
    }

    #[test]
    fn test_top_by_subscribers_ties_keep_table_order() {
        let table: ChannelTable = [
            record("first", 50),
            record("second", 50),
            record("third", 50),
        ]
        .into_iter()
        .collect();

        let top = table.top_by_subscribers(3);
        let titles: Vec<&str> = top.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_table_preserves_insertion_order() {
        let mut table = ChannelTable::new();
        table.push(record("one", 3));
        table.push(record("two", 1));
        table.push(record("three", 2));

        let titles: Vec<&str> = table.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_channel_id_display() {
        let id = ChannelId::new("UC123");
        assert_eq!(id.to_string(), "UC123");
        assert_eq!(id.as_str(), "UC123");
    }
}
