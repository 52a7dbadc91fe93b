//! Configuration for a tubelens run.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags (applied by the `cli` module)
//! 2. Config file (tubelens.yaml in the current directory, or --config)
//! 3. Defaults
//!
//! All settings are carried on a `ResolvedConfig` value passed into the
//! pipeline; nothing here mutates process-wide state.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::ZeroVideoPolicy;

/// Default search keyword, matching the original analysis run.
pub const DEFAULT_QUERY: &str = "Kenya";

/// Search page size (API maximum).
pub const PAGE_SIZE: u32 = 50;

/// Default cap on search pages per run.
pub const DEFAULT_MAX_PAGES: u32 = 20;

/// How many recent videos feed the per-channel view average.
pub const RECENT_VIDEO_SAMPLE: u32 = 10;

const CONFIG_FILE_NAME: &str = "tubelens.yaml";

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub query: Option<String>,
    pub max_pages: Option<u32>,
    pub out_dir: Option<PathBuf>,
    pub client_secret: Option<PathBuf>,
    pub zero_video_policy: Option<ZeroVideoPolicy>,
    pub allow_insecure_transport: Option<bool>,
}

/// Resolved configuration for one run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Search keyword for channel discovery
    pub query: String,

    /// Search page size
    pub page_size: u32,

    /// Upper bound on search pages (discovery stops early at this bound)
    pub max_pages: u32,

    /// Recent videos sampled per channel for the view average
    pub recent_videos: u32,

    /// Directory the chart PNGs are written to
    pub out_dir: PathBuf,

    /// Path to the OAuth client secret JSON file
    pub client_secret: PathBuf,

    /// What to do with channels whose recent-video search comes back empty
    pub zero_video_policy: ZeroVideoPolicy,

    /// Permit non-HTTPS OAuth endpoints (local development only)
    pub allow_insecure_transport: bool,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            page_size: PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            recent_videos: RECENT_VIDEO_SAMPLE,
            out_dir: PathBuf::from("."),
            client_secret: PathBuf::from("client_secret.json"),
            zero_video_policy: ZeroVideoPolicy::default(),
            allow_insecure_transport: false,
        }
    }
}

impl ResolvedConfig {
    /// Load configuration, layering an optional config file over defaults.
    ///
    /// An explicitly passed path must exist; the implicit tubelens.yaml in
    /// the working directory is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let file = match config_path {
            Some(path) => Some(load_config_file(path)?),
            None => {
                let implicit = PathBuf::from(CONFIG_FILE_NAME);
                if implicit.exists() {
                    Some(load_config_file(&implicit)?)
                } else {
                    None
                }
            }
        };

        let mut resolved = Self::default();
        if let Some(file) = file {
            resolved.apply_file(file);
        }
        Ok(resolved)
    }

    fn apply_file(&mut self, file: ConfigFile) {
        if let Some(query) = file.query {
            self.query = query;
        }
        if let Some(max_pages) = file.max_pages {
            self.max_pages = max_pages;
        }
        if let Some(out_dir) = file.out_dir {
            self.out_dir = out_dir;
        }
        if let Some(client_secret) = file.client_secret {
            self.client_secret = client_secret;
        }
        if let Some(policy) = file.zero_video_policy {
            self.zero_video_policy = policy;
        }
        if let Some(allow) = file.allow_insecure_transport {
            self.allow_insecure_transport = allow;
        }
    }
}

/// Load and parse a config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = ResolvedConfig::default();

        assert_eq!(config.query, "Kenya");
        assert_eq!(config.page_size, 50);
        assert_eq!(config.max_pages, 20);
        assert_eq!(config.recent_videos, 10);
        assert_eq!(config.client_secret, PathBuf::from("client_secret.json"));
        assert_eq!(config.zero_video_policy, ZeroVideoPolicy::Exclude);
        assert!(!config.allow_insecure_transport);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("tubelens.yaml");

        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(
            file,
            r#"
query: "Nairobi tech"
max_pages: 3
out_dir: charts
zero_video_policy: zero
allow_insecure_transport: true
"#
        )
        .unwrap();

        let config = ResolvedConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config.query, "Nairobi tech");
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.out_dir, PathBuf::from("charts"));
        assert_eq!(config.zero_video_policy, ZeroVideoPolicy::Zero);
        assert!(config.allow_insecure_transport);
        // Untouched keys keep defaults
        assert_eq!(config.page_size, 50);
        assert_eq!(config.client_secret, PathBuf::from("client_secret.json"));
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.yaml");

        assert!(ResolvedConfig::load(Some(&missing)).is_err());
    }
}
