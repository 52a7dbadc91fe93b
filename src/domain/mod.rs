//! Domain types for the tubelens pipeline.
//!
//! This module contains the core data structures:
//! - ChannelId: opaque channel identifier from discovery
//! - ChannelRecord / ChannelTable: enriched per-channel statistics
//! - RunSummary: end-of-run accounting

pub mod channel;
pub mod summary;

// Re-export commonly used types
pub use channel::{ChannelId, ChannelRecord, ChannelTable};
pub use summary::{RunSummary, SkippedChannel};
