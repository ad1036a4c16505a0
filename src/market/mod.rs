//! Simulated talent market.
//!
//! This module handles:
//! - Market entity types and quotes
//! - The hype random walk and seed list
//! - Injectable entropy sources
//! - The periodic feed task

pub mod entropy;
pub mod feed;
pub mod mock;
pub mod simulator;
pub mod types;

pub use entropy::{EntropySource, RngEntropy};
pub use feed::MarketFeed;
pub use mock::{ConstantEntropy, SequenceEntropy};
pub use simulator::{initialize, tick};
pub use types::{Heat, MarketEntity, MarketSnapshot, Quote};
