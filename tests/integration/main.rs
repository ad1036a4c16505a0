//! Integration tests for the talent exchange.
//!
//! These run entirely in-process on a paused tokio clock.

use std::time::Duration;

use talent_exchange::error::{ExchangeError, FeedError, MarketError};
use talent_exchange::market::types::{cost_for_hype, HYPE_CEILING, HYPE_FLOOR};
use talent_exchange::market::{initialize, tick, ConstantEntropy, MarketFeed, RngEntropy};
use talent_exchange::profile::{PageView, ProfileGate, ProfileView};
use talent_exchange::render;
use talent_exchange::signals::{analyze, load_records, SearchIndex, Verdict, DEFAULT_TOP_K};

const PERIOD: Duration = Duration::from_millis(1500);

/// A full viewing session: watch the market, unlock the profile, leave.
#[tokio::test(start_paused = true)]
async fn test_viewing_session() {
    let gate = ProfileGate::new();
    let feed = MarketFeed::start(initialize(), PERIOD, RngEntropy::seeded(11)).unwrap();
    let mut rx = feed.subscribe();

    let opening = PageView::compose(&rx.borrow_and_update(), gate.view());
    assert_eq!(opening.view, ProfileView::Locked);
    assert!(opening.company_teaser.is_some());

    for expected in 1..=5u64 {
        rx.changed().await.unwrap();
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.tick, expected);
        assert_eq!(snapshot.entities.len(), 5);

        for entity in &snapshot.entities {
            assert!((HYPE_FLOOR..=HYPE_CEILING).contains(&entity.hype()));
            assert_eq!(entity.cost(), cost_for_hype(entity.hype()));
        }
    }

    assert!(gate.unlock());
    assert!(!gate.unlock());

    let page = PageView::compose(&feed.snapshot(), gate.view());
    assert_eq!(page.tick, 5);
    assert!(page.company_teaser.is_none());
    assert!(render::page(&page).contains("GLOBAL RANK"));

    assert_eq!(feed.stop().await.unwrap(), 5);
    assert!(rx.changed().await.is_err());
}

/// Same seed, same market.
#[tokio::test(start_paused = true)]
async fn test_seeded_feeds_agree() {
    let a = MarketFeed::start(initialize(), PERIOD, RngEntropy::seeded(99)).unwrap();
    let b = MarketFeed::start(initialize(), PERIOD, RngEntropy::seeded(99)).unwrap();
    let (mut ra, mut rb) = (a.subscribe(), b.subscribe());

    for _ in 0..3 {
        ra.changed().await.unwrap();
        rb.changed().await.unwrap();
    }

    let (sa, sb) = (a.snapshot(), b.snapshot());
    assert_eq!(sa.tick, sb.tick);
    assert_eq!(sa.entities, sb.entities);

    a.stop().await.unwrap();
    b.stop().await.unwrap();
}

/// The synchronous walk matches what the feed publishes for a fixed source.
#[tokio::test(start_paused = true)]
async fn test_feed_matches_direct_ticks() {
    let feed = MarketFeed::start(initialize(), PERIOD, ConstantEntropy(0.9)).unwrap();
    let mut rx = feed.subscribe();
    rx.changed().await.unwrap();
    rx.changed().await.unwrap();

    let mut source = ConstantEntropy(0.9);
    let expected = tick(&tick(&initialize(), &mut source), &mut source);

    assert_eq!(feed.snapshot().entities, expected);
    feed.stop().await.unwrap();
}

/// Error messages carry their context.
#[test]
fn test_error_display() {
    let err = ExchangeError::from(MarketError::DuplicateName {
        name: "IBM".to_string(),
    });
    assert_eq!(err.to_string(), "market error: duplicate entity name: IBM");

    let err = ExchangeError::from(FeedError::ZeroPeriod);
    assert_eq!(err.to_string(), "feed error: tick period must be greater than zero");
}

/// The feed can be stopped from a plain blocking context.
#[test]
fn test_stop_from_blocking_runtime() {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    let ticks = runtime.block_on(async {
        let feed = MarketFeed::start(initialize(), Duration::from_millis(5), RngEntropy::seeded(3)).unwrap();
        let mut rx = feed.subscribe();
        rx.changed().await.unwrap();
        rx.changed().await.unwrap();
        feed.stop().await
    });

    tokio_test::assert_ok!(&ticks);
    assert!(ticks.unwrap() >= 2);
}

/// Records on disk flow through both analysis and search.
#[test]
fn test_signals_from_file() {
    let path = std::env::temp_dir().join(format!("talent_exchange_signals_{}.json", std::process::id()));
    let json = r##"[
        {"author": "ana", "skill_signal": "Fix race in scheduler", "context": "The scheduler could deadlock on shutdown.", "merged_at": "2024-05-01T10:00:00Z", "proof_url": "https://example.com/1.diff"},
        {"author": "bo", "skill_signal": "Add support for ARM", "context": "# build\n# test\n# ship", "merged_at": null, "proof_url": "https://example.com/2.diff"},
        {"author": "cy", "skill_signal": "Optimization of hot loop", "context": "Cuts allocations.", "proof_url": "https://example.com/3.diff"}
    ]"##;
    std::fs::write(&path, json).unwrap();

    let records = load_records(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(records.len(), 3);

    let report: Vec<_> = records.iter().map(analyze).collect();
    assert_eq!(report[1].verdict, Verdict::LikelyAi);
    for row in &report {
        assert!((0.0..=1.0).contains(&row.score));
    }
    assert_eq!(render::forensics_table(&report).lines().count(), 2 + 3);

    let index = SearchIndex::build(&records);
    let hits = index.search("scheduler", DEFAULT_TOP_K);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].record.author, "ana");
}
