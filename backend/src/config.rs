//! Configuration management for the IntelliStock server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with INTELLISTOCK_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::Thresholds;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Where inventory, sales and order snapshots come from
    pub data_source: DataSourceConfig,

    /// Stock alerting thresholds
    pub thresholds: ThresholdConfig,

    /// Chat webhook configuration
    #[serde(default)]
    pub chat: ChatConfig,

    /// Optional frozen clock
    #[serde(default)]
    pub clock: ClockConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

/// Data source backends
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataSourceKind {
    /// Upstream inventory REST API
    Http,
    /// Fixed fixtures, for demos and tests
    Fixture,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataSourceConfig {
    pub kind: DataSourceKind,

    /// Base URL of the upstream inventory API
    pub base_url: String,

    /// Optional JSON fixture file; built-in fixtures are used when absent
    pub fixture_path: Option<String>,

    /// Upstream request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ThresholdConfig {
    /// Quantity below which an item is low on stock
    pub low_stock: u32,

    /// Days before expiration at which an item becomes critical
    pub expiration_proximity_days: i64,
}

impl ThresholdConfig {
    pub fn to_thresholds(&self) -> Thresholds {
        Thresholds::new(self.low_stock, self.expiration_proximity_days)
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ChatConfig {
    /// Automation webhook receiving chat messages; chat is disabled when unset
    pub webhook_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ClockConfig {
    /// Timestamp every request treats as "now"; wall-clock time when unset
    pub fixed_now: Option<String>,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("INTELLISTOCK_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("data_source.kind", "fixture")?
            .set_default("data_source.base_url", "http://localhost:5000")?
            .set_default("data_source.timeout_secs", 30)?
            .set_default("thresholds.low_stock", 10)?
            .set_default("thresholds.expiration_proximity_days", 3)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (INTELLISTOCK_ prefix)
            .add_source(
                Environment::with_prefix("INTELLISTOCK")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
