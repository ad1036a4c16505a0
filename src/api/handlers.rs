//! HTTP API handlers.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::Result;
use crate::market::{initialize, MarketFeed, MarketSnapshot, Quote, RngEntropy};
use crate::metrics;
use crate::profile::{PageView, ProfileGate, ProfilePanel, ProfileView};

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Whether the market feed is running.
    pub ready: Arc<AtomicBool>,
    /// Latest market snapshot.
    pub snapshots: watch::Receiver<MarketSnapshot>,
    /// Profile unlock gate.
    pub gate: Arc<ProfileGate>,
    /// Prometheus handle, when the recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state reading from the given feed receiver.
    pub fn new(snapshots: watch::Receiver<MarketSnapshot>) -> Self {
        Self {
            ready: Arc::new(AtomicBool::new(false)),
            snapshots,
            gate: Arc::new(ProfileGate::new()),
            prometheus: None,
        }
    }

    /// Install metrics, start the market feed and build state that reads it.
    ///
    /// The recorder is installed before the feed starts, so the start itself
    /// is counted. Must be called within a tokio runtime.
    pub fn launch(config: &Config) -> Result<(Self, MarketFeed)> {
        let prometheus = if config.metrics_enabled {
            Some(metrics::install_prometheus()?)
        } else {
            metrics::init_metrics();
            None
        };

        let feed = MarketFeed::start(
            initialize(),
            config.tick_interval(),
            RngEntropy::from_optional_seed(config.market_seed),
        )?;

        let state = Self::new(feed.subscribe());
        let state = match prometheus {
            Some(handle) => state.with_prometheus(handle),
            None => state,
        };
        Ok((state, feed))
    }

    /// Attach a Prometheus handle for `/metrics`.
    pub fn with_prometheus(mut self, handle: PrometheusHandle) -> Self {
        self.prometheus = Some(handle);
        self
    }

    /// Set ready state.
    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    /// Check if ready.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    /// Clone of the latest snapshot.
    pub fn snapshot(&self) -> MarketSnapshot {
        self.snapshots.borrow().clone()
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Whether the feed is running.
    pub ready: bool,
    /// Latest tick.
    pub tick: u64,
}

/// Market response.
#[derive(Debug, Serialize)]
pub struct MarketResponse {
    /// Tick the quotes belong to.
    pub tick: u64,
    /// RFC 3339 timestamp of the snapshot.
    pub updated_at: Option<String>,
    /// Quotes in seed order.
    pub quotes: Vec<Quote>,
}

/// Profile response.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// Current view.
    pub view: ProfileView,
    /// Panel for that view.
    pub panel: ProfilePanel,
}

/// Unlock response.
#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    /// View after the call; always unlocked.
    pub view: ProfileView,
    /// Whether this call performed the transition.
    pub changed: bool,
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Readiness check handler - returns 200 if the feed is running, 503 otherwise.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    let is_ready = state.is_ready();
    let response = ReadyResponse {
        ready: is_ready,
        tick: state.snapshots.borrow().tick,
    };

    if is_ready {
        (StatusCode::OK, Json(response))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response))
    }
}

/// Market handler - latest quotes.
pub async fn market(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.snapshot();

    Json(MarketResponse {
        tick: snapshot.tick,
        updated_at: snapshot.updated_at.format(&Rfc3339).ok(),
        quotes: snapshot.quotes(),
    })
}

/// Profile handler - current view and its panel.
pub async fn profile(State(state): State<AppState>) -> impl IntoResponse {
    let view = state.gate.view();
    Json(ProfileResponse {
        view,
        panel: ProfilePanel::for_view(view),
    })
}

/// Unlock handler - one-way, idempotent.
pub async fn unlock(State(state): State<AppState>) -> impl IntoResponse {
    let changed = state.gate.unlock();
    Json(UnlockResponse {
        view: state.gate.view(),
        changed,
    })
}

/// Page handler - market, profile and teaser composed.
pub async fn page(State(state): State<AppState>) -> impl IntoResponse {
    Json(PageView::compose(&state.snapshot(), state.gate.view()))
}

/// Metrics handler - Prometheus text format, 404 without a recorder.
pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    match &state.prometheus {
        Some(handle) => (StatusCode::OK, handle.render()),
        None => (StatusCode::NOT_FOUND, "metrics disabled".to_string()),
    }
}
