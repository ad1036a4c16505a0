//! Unified error types for the talent exchange.

use thiserror::Error;

/// Unified error type for the talent exchange.
#[derive(Error, Debug)]
pub enum ExchangeError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Invalid configuration values.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Market entity error.
    #[error("market error: {0}")]
    Market(#[from] MarketError),

    /// Market feed lifecycle error.
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// JSON serialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Market entity construction errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketError {
    /// Entity name is empty.
    #[error("entity name must not be empty")]
    EmptyName,

    /// Two entities share a name.
    #[error("duplicate entity name: {name}")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },

    /// Hype is NaN or infinite.
    #[error("hype for {name} is not finite: {hype}")]
    NonFiniteHype {
        /// Entity name.
        name: String,
        /// Offending value.
        hype: f64,
    },

    /// Growth outside `[0, 1]` or not finite.
    #[error("growth for {name} must be within [0, 1], got {growth}")]
    InvalidGrowth {
        /// Entity name.
        name: String,
        /// Offending value.
        growth: f64,
    },
}

/// Market feed lifecycle errors.
#[derive(Error, Debug)]
pub enum FeedError {
    /// Tick period of zero.
    #[error("tick period must be greater than zero")]
    ZeroPeriod,

    /// Entity list rejected.
    #[error("invalid entity set: {0}")]
    InvalidEntities(#[from] MarketError),

    /// The feed task panicked or was cancelled before it could be joined.
    #[error("feed task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ExchangeError>;
