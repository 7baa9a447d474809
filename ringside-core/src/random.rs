//! Randomness sources for fight resolution
//!
//! The fight draw is the only non-deterministic input in the engine, so it
//! sits behind [`RandomSource`] and tests supply a [`FixedDraw`].

use std::sync::Mutex;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Supplies uniform draws in [0, 1)
pub trait RandomSource: Send + Sync {
    fn draw(&self) -> f64;
}

/// ChaCha8-backed source, seeded for reproducible runs or from entropy
pub struct SeededRandom {
    rng: Mutex<ChaCha8Rng>,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(ChaCha8Rng::from_entropy()),
        }
    }

    /// Seeded when a seed is given, entropy otherwise
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::from_seed(s),
            None => Self::from_entropy(),
        }
    }
}

impl RandomSource for SeededRandom {
    fn draw(&self) -> f64 {
        let mut rng = self
            .rng
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        rng.gen::<f64>()
    }
}

/// Always returns the same draw
#[derive(Clone, Copy, Debug)]
pub struct FixedDraw(pub f64);

impl RandomSource for FixedDraw {
    fn draw(&self) -> f64 {
        self.0
    }
}
