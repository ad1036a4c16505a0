//! Periodic market feed.
//!
//! A [`MarketFeed`] owns exactly one background task that applies
//! [`tick`](super::simulator::tick) on a fixed period and publishes each new
//! snapshot through a `watch` channel. The task lives as long as the feed:
//! [`MarketFeed::stop`] cancels and joins it, and dropping the feed aborts it.

use std::time::Duration;

use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use super::entropy::EntropySource;
use super::simulator::{tick, validate_entities};
use super::types::{MarketEntity, MarketSnapshot};
use crate::error::FeedError;
use crate::metrics;

/// Handle to a running market feed.
#[derive(Debug)]
pub struct MarketFeed {
    snapshots: watch::Receiver<MarketSnapshot>,
    stop_tx: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<u64>>,
    period: Duration,
}

impl MarketFeed {
    /// Start ticking `entities` every `period`.
    ///
    /// The seed list is published immediately as tick `0`; the first update
    /// lands one full period later. Must be called within a tokio runtime.
    pub fn start<S>(entities: Vec<MarketEntity>, period: Duration, source: S) -> Result<Self, FeedError>
    where
        S: EntropySource + Send + 'static,
    {
        if period.is_zero() {
            return Err(FeedError::ZeroPeriod);
        }
        validate_entities(&entities)?;

        let (snapshot_tx, snapshots) = watch::channel(MarketSnapshot::new(0, entities.clone()));
        let (stop_tx, stop_rx) = oneshot::channel();

        info!(
            entities = entities.len(),
            period_ms = period.as_millis() as u64,
            "Market feed started"
        );
        metrics::inc_feed_starts();

        let task = tokio::spawn(run_feed(entities, period, source, snapshot_tx, stop_rx));

        Ok(Self {
            snapshots,
            stop_tx: Some(stop_tx),
            task: Some(task),
            period,
        })
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> MarketSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified on every tick. Closes once the feed stops.
    pub fn subscribe(&self) -> watch::Receiver<MarketSnapshot> {
        self.snapshots.clone()
    }

    /// Tick period.
    pub fn period(&self) -> Duration {
        self.period
    }

    /// Whether the background task is still running.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Cancel the periodic task and wait for it to exit.
    ///
    /// Returns the number of ticks applied. No snapshot is published after
    /// this returns.
    pub async fn stop(mut self) -> Result<u64, FeedError> {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }

        let ticks = match self.task.take() {
            Some(task) => task.await?,
            None => 0,
        };

        info!(ticks, "Market feed stopped");
        metrics::inc_feed_stops();
        Ok(ticks)
    }
}

impl Drop for MarketFeed {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            debug!("Market feed dropped without stop; aborting task");
            task.abort();
            metrics::inc_feed_stops();
        }
    }
}

async fn run_feed<S: EntropySource>(
    mut entities: Vec<MarketEntity>,
    period: Duration,
    mut source: S,
    snapshot_tx: watch::Sender<MarketSnapshot>,
    mut stop_rx: oneshot::Receiver<()>,
) -> u64 {
    let mut interval = time::interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut ticks = 0u64;

    loop {
        tokio::select! {
            biased;

            // Fires on an explicit stop or when the handle is dropped.
            _ = &mut stop_rx => break,

            _ = interval.tick() => {
                let _timer = metrics::timer_tick();
                entities = tick(&entities, &mut source);
                ticks += 1;

                metrics::inc_ticks();
                metrics::record_hype(&entities);
                debug!(tick = ticks, "Market tick applied");

                snapshot_tx.send_replace(MarketSnapshot::new(ticks, entities.clone()));
            }
        }
    }

    ticks
}
