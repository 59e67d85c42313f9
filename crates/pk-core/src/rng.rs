//! Deterministic simulation RNG.
//!
//! # Determinism strategy
//!
//! A session owns exactly one `SimRng`, seeded from `LotConfig::seed`, and
//! draws every arrival gap and dwell duration from it in a fixed order.  The
//! same seed therefore reproduces an entire episode bit-for-bit.  Anything
//! else that needs randomness (a decision policy, a test harness) derives its
//! own stream with [`SimRng::child`] so it never perturbs the kernel stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Seedable simulation RNG.
///
/// Used only in single-threaded contexts; a session is never shared between
/// threads.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Sample an exponentially distributed value with the given `mean`.
    ///
    /// Inverse-CDF: `-mean * ln(1 - u)` with `u` uniform in `[0, 1)`, so the
    /// logarithm argument is in `(0, 1]` and the result is finite and `>= 0`.
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let u: f64 = self.0.r#gen();
        -mean * (1.0 - u).ln()
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
