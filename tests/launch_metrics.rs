//! Metrics wiring at launch.
//!
//! Kept in its own test binary: it installs the process-wide Prometheus
//! recorder and asserts exact counter values.

use talent_exchange::api::AppState;
use talent_exchange::Config;

fn counter_value(rendered: &str, name: &str) -> Option<u64> {
    rendered
        .lines()
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(' ')?.trim().parse().ok())
}

#[tokio::test(start_paused = true)]
async fn test_launch_records_feed_start() {
    let config = Config {
        market_seed: Some(3),
        ..Config::default()
    };

    let (state, feed) = AppState::launch(&config).unwrap();
    let handle = state.prometheus.clone().expect("metrics enabled by default");

    let rendered = handle.render();
    assert_eq!(
        counter_value(&rendered, "market_feed_starts_total"),
        Some(1),
        "feed start missing from:\n{}",
        rendered
    );

    let mut rx = feed.subscribe();
    rx.changed().await.unwrap();
    assert_eq!(counter_value(&handle.render(), "market_ticks_total"), Some(1));

    feed.stop().await.unwrap();
    assert_eq!(counter_value(&handle.render(), "market_feed_stops_total"), Some(1));
}
