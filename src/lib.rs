//! tubelens - YouTube channel statistics reporter
//!
//! Discovers channels matching a keyword on the YouTube Data API v3,
//! enriches each one with subscriber/view/video statistics plus the mean
//! view count over its most recent uploads, and renders three PNG charts.
//!
//! # Architecture
//!
//! The run is a linear pipeline of three stages, each a pure function of
//! the previous stage's output:
//! - Discovery: paginated keyword search yielding channel ids
//! - Enrichment: per-channel statistics fetches, failures skipped and
//!   collected per channel
//! - Reporting: three independent chart renders over the result table
//!
//! # Modules
//!
//! - `adapters`: External API integrations (YouTube Data API)
//! - `auth`: OAuth installed-app consent flow
//! - `core`: Pipeline stages (discovery, enrichment, orchestration)
//! - `domain`: Data structures (ChannelRecord, ChannelTable, RunSummary)
//! - `report`: Chart rendering
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Run the full pipeline (opens a browser consent page)
//! tubelens run --query "Kenya" --max-pages 5
//!
//! # Show the resolved configuration
//! tubelens config
//! ```

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod report;

// Re-export main types at crate root for convenience
pub use crate::adapters::{ChannelStats, PlatformError, VideoPlatform, YouTubeClient};
pub use crate::core::{EnrichError, EnrichmentFailure, ZeroVideoPolicy};
pub use crate::domain::{ChannelId, ChannelRecord, ChannelTable, RunSummary};
