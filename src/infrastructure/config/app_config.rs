//! Application configuration.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use super::args::CliArgs;
use crate::application::store::ResponseOrdering;
use crate::infrastructure::shop::DEFAULT_API_BASE;

pub(super) const APP_NAME: &str = "handyhelpers";
pub(super) const APP_QUALIFIER: &str = "com";
pub(super) const APP_ORGANIZATION: &str = "handyhelpers";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Converts to tracing level.
    #[must_use]
    pub const fn to_tracing_level(self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Application configuration, from the TOML file and CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Minimum level written to the log file.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Shop backend.
    #[serde(default)]
    pub api: ApiConfig,

    /// Terminal interface.
    #[serde(default)]
    pub ui: UiConfig,

    /// Store behaviour.
    #[serde(default)]
    pub store: StoreConfig,
}

/// Shop backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ApiConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// UI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Seconds between banner slides on the home view.
    #[serde(default = "default_carousel_interval_secs")]
    pub carousel_interval_secs: u64,

    /// Enable mouse support.
    #[serde(default = "default_true")]
    pub mouse: bool,
}

impl UiConfig {
    /// Banner interval, never shorter than one second.
    #[must_use]
    pub fn carousel_interval(&self) -> Duration {
        Duration::from_secs(self.carousel_interval_secs.max(1))
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            carousel_interval_secs: default_carousel_interval_secs(),
            mouse: true,
        }
    }
}

/// Store behaviour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Drop responses to requests superseded by a newer one of the same
    /// action. Off by default: the last response to resolve wins.
    #[serde(default)]
    pub discard_stale_responses: bool,
}

impl StoreConfig {
    /// How slices treat out-of-order responses.
    #[must_use]
    pub const fn response_ordering(&self) -> ResponseOrdering {
        ResponseOrdering::from_discard_stale(self.discard_stale_responses)
    }
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_carousel_interval_secs() -> u64 {
    15
}

const fn default_true() -> bool {
    true
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: CliArgs) {
        if let Some(config_path) = args.config {
            self.config = Some(config_path);
        }
        if let Some(log_path) = args.log_path {
            self.log_path = Some(log_path);
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(api_url) = args.api_url {
            self.api.base_url = api_url;
        }
        if let Some(mouse) = args.mouse {
            self.ui.mouse = mouse;
        }
        if let Some(interval) = args.carousel_interval {
            self.ui.carousel_interval_secs = interval;
        }
        if let Some(discard) = args.discard_stale_responses {
            self.store.discard_stale_responses = discard;
        }
    }

    /// Returns default config directory.
    #[must_use]
    pub fn default_config_dir() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("handyhelpers.log"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            config: None,
            log_path: None,
            log_level: LogLevel::Info,
            api: ApiConfig::default(),
            ui: UiConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
            log_level = "debug"

            [api]
            base_url = "http://localhost:5000/api"

            [store]
            discard_stale_responses = true
        "#;

        let config: AppConfig = toml::from_str(toml_content).expect("Failed to parse config");

        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.api.base_url, "http://localhost:5000/api");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.ui.carousel_interval_secs, 15);
        assert!(config.ui.mouse);
        assert_eq!(config.store.response_ordering(), ResponseOrdering::LatestIssued);
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE);
        assert_eq!(config.ui.carousel_interval(), Duration::from_secs(15));
        assert_eq!(config.store.response_ordering(), ResponseOrdering::LastResolved);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut config: AppConfig = toml::from_str("[ui]\nmouse = false\ncarousel_interval_secs = 20").unwrap();
        let args = CliArgs::parse_from([
            "handyhelpers",
            "--api-url",
            "http://127.0.0.1:5000/api",
            "--carousel-interval",
            "5",
            "--discard-stale-responses",
            "true",
        ]);

        config.merge_with_args(args);

        assert_eq!(config.api.base_url, "http://127.0.0.1:5000/api");
        assert_eq!(config.ui.carousel_interval_secs, 5);
        assert!(!config.ui.mouse);
        assert!(config.store.discard_stale_responses);
    }

    #[test]
    fn test_zero_interval_clamped() {
        let ui = UiConfig {
            carousel_interval_secs: 0,
            mouse: true,
        };
        assert_eq!(ui.carousel_interval(), Duration::from_secs(1));
    }
}
