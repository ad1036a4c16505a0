//! Prometheus metrics for the market feed and profile gate.
//!
//! This module provides metrics for:
//! - Tick count and tick latency
//! - Per-entity hype levels
//! - Feed lifecycle (starts and stops)
//! - Profile unlocks

use std::time::Instant;

use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

use crate::market::MarketEntity;

// === Metric Name Constants ===

/// Tick latency metric name.
pub const METRIC_TICK_LATENCY: &str = "market_tick_latency_ms";
/// Ticks applied counter metric name.
pub const METRIC_TICKS: &str = "market_ticks_total";
/// Per-entity hype gauge metric name.
pub const METRIC_ENTITY_HYPE: &str = "market_entity_hype";
/// Degenerate samples counter metric name.
pub const METRIC_DEGENERATE_SAMPLES: &str = "market_degenerate_samples_total";
/// Feed starts counter metric name.
pub const METRIC_FEED_STARTS: &str = "market_feed_starts_total";
/// Feed stops counter metric name.
pub const METRIC_FEED_STOPS: &str = "market_feed_stops_total";
/// Profile unlocks counter metric name.
pub const METRIC_PROFILE_UNLOCKS: &str = "profile_unlocks_total";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(METRIC_TICK_LATENCY, "Time to apply one market tick in milliseconds");
    describe_gauge!(METRIC_ENTITY_HYPE, "Current hype level per market entity");

    describe_counter!(METRIC_TICKS, "Total number of market ticks applied");
    describe_counter!(
        METRIC_DEGENERATE_SAMPLES,
        "Total number of non-finite samples discarded by the walk"
    );
    describe_counter!(METRIC_FEED_STARTS, "Total number of market feeds started");
    describe_counter!(METRIC_FEED_STOPS, "Total number of market feeds stopped");
    describe_counter!(
        METRIC_PROFILE_UNLOCKS,
        "Total number of locked to unlocked profile transitions"
    );

    debug!("Metrics initialized");
}

/// Install the Prometheus recorder and describe all metrics.
pub fn install_prometheus() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Increment ticks counter.
pub fn inc_ticks() {
    counter!(METRIC_TICKS).increment(1);
}

/// Increment degenerate samples counter.
pub fn inc_degenerate_samples() {
    counter!(METRIC_DEGENERATE_SAMPLES).increment(1);
}

/// Increment feed starts counter.
pub fn inc_feed_starts() {
    counter!(METRIC_FEED_STARTS).increment(1);
}

/// Increment feed stops counter.
pub fn inc_feed_stops() {
    counter!(METRIC_FEED_STOPS).increment(1);
}

/// Increment profile unlocks counter.
pub fn inc_profile_unlocks() {
    counter!(METRIC_PROFILE_UNLOCKS).increment(1);
}

/// Publish the hype of every entity.
pub fn record_hype(entities: &[MarketEntity]) {
    for entity in entities {
        gauge!(METRIC_ENTITY_HYPE, "entity" => entity.name().to_string()).set(entity.hype());
    }
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for a market tick.
pub fn timer_tick() -> LatencyTimer {
    LatencyTimer::new(METRIC_TICK_LATENCY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn latency_timer_measures_time() {
        let timer = timer_tick();
        sleep(Duration::from_millis(10));
        assert!(timer.elapsed_ms() >= 9.0);
    }

    #[test]
    fn recording_without_recorder_is_noop() {
        record_hype(&crate::market::initialize());
        inc_ticks();
        inc_profile_unlocks();
    }
}
