//! Application configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Market Feed ===
    /// Milliseconds between market ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Seed for the market entropy source. Random when unset.
    #[serde(default)]
    pub market_seed: Option<u64>,

    // === Signals ===
    /// JSON file of ingested pull requests for `analyze` and `search`.
    #[serde(default = "default_signals_path")]
    pub signals_path: PathBuf,

    // === Server Configuration ===
    /// HTTP server port for the page and metrics endpoints.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Install the Prometheus recorder and expose `/metrics`.
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Enable verbose logging.
    #[serde(default)]
    pub verbose: bool,
}

fn default_tick_interval_ms() -> u64 {
    1500
}

fn default_signals_path() -> PathBuf {
    PathBuf::from("ingested_data.json")
}

fn default_port() -> u16 {
    8080
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            market_seed: None,
            signals_path: default_signals_path(),
            port: default_port(),
            metrics_enabled: default_true(),
            rust_log: default_log_level(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        envy::from_env()
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tick_interval_ms == 0 {
            return Err("TICK_INTERVAL_MS must be greater than 0".to_string());
        }

        Ok(())
    }

    /// Tick period as a `Duration`.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}
