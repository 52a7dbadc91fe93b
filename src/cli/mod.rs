//! Command-line interface for tubelens.
//!
//! Provides commands for running the report pipeline and inspecting the
//! resolved configuration.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::adapters::YouTubeClient;
use crate::auth::InstalledFlow;
use crate::config::ResolvedConfig;
use crate::core::{run_pipeline, ZeroVideoPolicy};

/// tubelens - YouTube channel statistics reporter
#[derive(Parser, Debug)]
#[command(name = "tubelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover channels, fetch statistics, and render the charts
    Run {
        /// Search keyword for channel discovery
        #[arg(short, long)]
        query: Option<String>,

        /// Maximum number of search pages to fetch
        #[arg(long)]
        max_pages: Option<u32>,

        /// Directory to write the chart PNGs to
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Policy for channels with no recent videos
        #[arg(long, value_enum)]
        zero_video_policy: Option<ZeroVideoPolicy>,

        /// Config file (defaults to ./tubelens.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// OAuth client secret file
        #[arg(long)]
        client_secret: Option<PathBuf>,

        /// Reuse an existing access token instead of running the consent flow
        #[arg(long, env = "TUBELENS_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
    },

    /// Show resolved configuration (debug)
    Config {
        /// Config file (defaults to ./tubelens.yaml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        match self.command {
            Commands::Run {
                query,
                max_pages,
                out_dir,
                zero_video_policy,
                config,
                client_secret,
                access_token,
            } => {
                let mut resolved = ResolvedConfig::load(config.as_deref())?;
                if let Some(query) = query {
                    resolved.query = query;
                }
                if let Some(max_pages) = max_pages {
                    resolved.max_pages = max_pages;
                }
                if let Some(out_dir) = out_dir {
                    resolved.out_dir = out_dir;
                }
                if let Some(policy) = zero_video_policy {
                    resolved.zero_video_policy = policy;
                }
                if let Some(client_secret) = client_secret {
                    resolved.client_secret = client_secret;
                }

                run_report(resolved, access_token).await
            }
            Commands::Config { config } => show_config(config).await,
        }
    }
}

/// Authenticate and run the full pipeline
async fn run_report(config: ResolvedConfig, access_token: Option<String>) -> Result<()> {
    let token = match access_token {
        Some(token) => token,
        None => {
            let flow = InstalledFlow::from_secret_file(
                &config.client_secret,
                config.allow_insecure_transport,
            )?;
            flow.obtain_access_token().await?
        }
    };

    let platform = YouTubeClient::new(token);
    let summary = run_pipeline(&platform, &config).await?;

    print!("{summary}");
    Ok(())
}

/// Print the resolved configuration
async fn show_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = ResolvedConfig::load(config_path.as_deref())?;

    println!("Query: {}", config.query);
    println!("Page size: {}", config.page_size);
    println!("Max pages: {}", config.max_pages);
    println!("Recent video sample: {}", config.recent_videos);
    println!("Output directory: {}", config.out_dir.display());
    println!("Client secret: {}", config.client_secret.display());
    println!("Zero-video policy: {:?}", config.zero_video_policy);
    println!(
        "Allow insecure transport: {}",
        config.allow_insecure_transport
    );

    Ok(())
}
