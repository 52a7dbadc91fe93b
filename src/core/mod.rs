//! Pipeline stages.
//!
//! This module contains:
//! - discovery: paginated keyword search for channel ids
//! - enrichment: per-channel statistics fetches with typed failures
//! - pipeline: stage orchestration for one run

pub mod discovery;
pub mod enrichment;
pub mod pipeline;

// Re-export commonly used types
pub use discovery::discover_channels;
pub use enrichment::{
    enrich_all, enrich_channel, EnrichError, EnrichmentFailure, EnrichmentOutcome,
    ZeroVideoPolicy,
};
pub use pipeline::run_pipeline;
