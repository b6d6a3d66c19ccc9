//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Shop REST API client.
pub mod shop;

pub use config::{AppConfig, CliArgs, LogLevel, StorageManager};
pub use shop::ShopClient;
