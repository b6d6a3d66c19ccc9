//! Command-line arguments.

use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments; set values override the configuration file.
#[derive(Debug, Parser)]
#[command(
    name = "handyhelpers",
    version,
    about = "Terminal storefront for the Handy Helpers shop",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Shop API base URL.
    #[arg(long, value_name = "URL", env = "HANDYHELPERS_API_URL")]
    pub api_url: Option<String>,

    /// Enable mouse support.
    #[arg(long)]
    pub mouse: Option<bool>,

    /// Seconds between home banner slides.
    #[arg(long, value_name = "SECS")]
    pub carousel_interval: Option<u64>,

    /// Drop responses superseded by a newer request of the same action.
    #[arg(long)]
    pub discard_stale_responses: Option<bool>,
}
