//! Random number generator abstraction for determinism.
//!
//! Track selection picks uniformly among search candidates by design, so
//! tests inject a seeded or scripted implementation instead of a real RNG.

use rand::Rng;

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by the thread-local generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngAdapter;

impl DeterministicRng for ThreadRngAdapter {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        rand::rng().random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        rand::rng().random()
    }
}
