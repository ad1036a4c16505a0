//! Deterministic entropy sources for tests and demos.

use std::collections::VecDeque;

use super::entropy::EntropySource;

/// Always returns the same sample.
#[derive(Debug, Clone, Copy)]
pub struct ConstantEntropy(pub f64);

impl EntropySource for ConstantEntropy {
    fn sample(&mut self) -> f64 {
        self.0
    }
}

/// Replays a fixed sequence of samples, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct SequenceEntropy {
    samples: VecDeque<f64>,
}

impl SequenceEntropy {
    /// Create a source from the given samples. An empty list yields `0.3`,
    /// the neutral sample that leaves hype unchanged.
    pub fn new(samples: impl IntoIterator<Item = f64>) -> Self {
        Self {
            samples: samples.into_iter().collect(),
        }
    }
}

impl EntropySource for SequenceEntropy {
    fn sample(&mut self) -> f64 {
        match self.samples.pop_front() {
            Some(r) => {
                self.samples.push_back(r);
                r
            }
            None => 0.3,
        }
    }
}
