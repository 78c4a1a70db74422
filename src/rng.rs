//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps a seeded `StdRng` and exposes the
//! handful of draws the engine needs: indices, bounded integers, percentages
//! and values inside a gene's `[min, max)` range.
//!
//! Every generation step builds its own generator from the seed the caller
//! passes in, so identical seed sequences replay identical trajectories.
//!
//! ## Example
//!
//! ```rust
//! use vitae::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.gen_index(100), b.gen_index(100));
//! assert_eq!(a.gen_value(0u8, 8u8), b.gen_value(0u8, 8u8));
//! ```

use rand::{distributions::uniform::SampleUniform, rngs::StdRng, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` with the draws used by the engine.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// Two generators built from the same seed produce the same sequence of draws.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Returns a uniformly drawn index in `[0, len)`.
    ///
    /// `len` must be non-zero; callers check emptiness before drawing.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Returns a uniformly drawn integer in `[0, modulus)`.
    pub fn gen_below(&mut self, modulus: u64) -> u64 {
        self.rng.gen_range(0..modulus)
    }

    /// Returns a uniformly drawn count in `[1, max]`.
    pub fn gen_count(&mut self, max: usize) -> usize {
        self.rng.gen_range(1..=max)
    }

    /// Returns `true` with a probability of `percent / 100`.
    ///
    /// A value of 0 never fires, 100 or more always fires.
    pub fn chance(&mut self, percent: u8) -> bool {
        self.rng.gen_range(0..100u8) < percent
    }

    /// Returns a value drawn uniformly from `[min, max)`.
    ///
    /// The range must pass `gene::check_bounds`.
    pub fn gen_value<T>(&mut self, min: T, max: T) -> T
    where
        T: SampleUniform + PartialOrd,
    {
        self.rng.gen_range(min..max)
    }
}
