//! RNG module - the injectable random source shared by all simulations
//!
//! Randomness drives spawn rates, colors, turns and branch decisions. The host
//! owns one [`SimRng`] and lends it to the active simulation every tick, so
//! tests can seed it and get repeatable runs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seedable random source with the small helper surface simulations need.
#[derive(Debug, Clone)]
pub struct SimRng {
    inner: StdRng,
}

impl SimRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an RNG seeded from operating system entropy
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Uniform float in `[0, 1)`
    pub fn unit(&mut self) -> f32 {
        self.inner.gen::<f32>()
    }

    /// Returns true with probability `p`
    pub fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Fair coin flip
    pub fn coin(&mut self) -> bool {
        self.chance(0.5)
    }

    /// `1` or `-1` with equal probability
    pub fn sign(&mut self) -> i32 {
        if self.coin() {
            1
        } else {
            -1
        }
    }

    /// Uniform float in `[lo, hi)`; returns `lo` for empty ranges
    pub fn range_f32(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        lo + self.unit() * (hi - lo)
    }

    /// Uniform integer in `[0, n)`; returns 0 when `n == 0`
    pub fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        self.inner.gen_range(0..n)
    }

    /// Uniform integer in `[lo, hi]`
    pub fn between(&mut self, lo: i32, hi: i32) -> i32 {
        if hi <= lo {
            return lo;
        }
        self.inner.gen_range(lo..=hi)
    }

    /// Pick one element uniformly
    ///
    /// # Panics
    ///
    /// Panics if `items` is empty. Callers only pass fixed, non-empty tables.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }
}

impl Default for SimRng {
    fn default() -> Self {
        Self::new(1)
    }
}
