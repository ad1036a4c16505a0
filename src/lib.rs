//! The Talent Exchange: a simulated talent marketplace.
//!
//! A small fixed set of companies trade on "hype". Every tick each company's
//! hype takes one step of a biased random walk, and its token cost follows
//! from the new hype:
//!
//! ```text
//! delta = (r - 0.3) * 5 * growth      r uniform in [0, 1)
//! hype  = clamp(hype + delta, 10, 100)
//! cost  = floor(10 + hype^1.5 / 10)
//! ```
//!
//! Alongside the ticker sits a gated talent profile that unlocks exactly once.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`market`]: Entities, the random walk and the periodic feed
//! - [`profile`]: Unlock gate and static profile content
//! - [`signals`]: Forensics and search over ingested pull requests
//! - [`render`]: Plain-text board and panel rendering
//! - [`api`]: HTTP API for the page, health and metrics
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod market;
pub mod metrics;
pub mod profile;
pub mod render;
pub mod signals;
pub mod utils;

pub use config::Config;
pub use error::{ExchangeError, Result};
