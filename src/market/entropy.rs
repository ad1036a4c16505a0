//! Random sources for the market walk.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Supplies the uniform samples that drive hype movement.
///
/// The default source draws from `[0, 1)`. Other sources may return any
/// value; non-finite samples are discarded by the tick.
pub trait EntropySource {
    /// Draw the next sample.
    fn sample(&mut self) -> f64;
}

impl<T: EntropySource + ?Sized> EntropySource for &mut T {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

impl<T: EntropySource + ?Sized> EntropySource for Box<T> {
    fn sample(&mut self) -> f64 {
        (**self).sample()
    }
}

/// Uniform `[0, 1)` source backed by a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngEntropy<R = StdRng> {
    rng: R,
}

impl RngEntropy<StdRng> {
    /// Seeded source for reproducible runs.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, OS-seeded otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> EntropySource for RngEntropy<R> {
    fn sample(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}
