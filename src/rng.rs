//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single random stream of an evolutionary run.
//! Selection, crossover and mutation draw from it sequentially, so a run started from a
//! fixed seed replays identically. Fitness evaluation never touches it.
//!
//! ## Example
//!
//! ```rust
//! use genforge::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let draws: Vec<f64> = (0..5).map(|_| rng.next_f64()).collect();
//! assert!(draws.iter().all(|x| (0.0..1.0).contains(x)));
//!
//! let heads = (0..10).filter(|_| rng.coin(0.5)).count();
//! println!("heads: {}", heads);
//! ```

use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    seq::SliceRandom,
    Rng, SeedableRng,
};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws used by the
/// genetic operators.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generates a random value in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Returns a uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Returns `true` with the given probability.
    ///
    /// Probabilities at or below 0 never succeed and at or above 1 always do; exactly one
    /// value is drawn either way.
    pub fn coin(&mut self, probability: f64) -> bool {
        self.next_f64() < probability
    }

    /// Returns a uniform index in `0..len`. `len` must be positive.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Picks each index of `0..len` independently with the given probability.
    ///
    /// The result is in ascending order.
    pub fn indices(&mut self, probability: f64, len: usize) -> Vec<usize> {
        (0..len).filter(|_| self.coin(probability)).collect()
    }

    /// Shuffles the slice in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}
