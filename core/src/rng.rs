//! Random number generation for the uniform sampling path.
//!
//! RULE: Generator state is never shared across calls. Each generation
//! request owns its own DrawRng, so concurrent requests over one shared
//! snapshot need no coordination. Tests seed explicitly for
//! reproducibility; production callers use `from_entropy`.

use crate::types::Number;
use rand::{RngCore, SeedableRng};
use rand_pcg::Pcg64Mcg;

pub struct DrawRng {
    inner: Pcg64Mcg,
}

impl DrawRng {
    /// Fresh OS-entropy-seeded generator for one call.
    pub fn from_entropy() -> Self {
        Self {
            inner: Pcg64Mcg::from_entropy(),
        }
    }

    /// Deterministic generator for tests and reproducible runs.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            inner: Pcg64Mcg::seed_from_u64(seed),
        }
    }

    fn next_below(&mut self, n: u64) -> u64 {
        assert!(n > 0, "n must be > 0");
        self.inner.next_u64() % n
    }

    /// Uniform pick in `[1, max]`.
    pub fn pick_in_range(&mut self, max: Number) -> Number {
        1 + self.next_below(max as u64) as Number
    }

    /// `k` distinct numbers uniformly from `[1, max]`, via partial
    /// Fisher-Yates over the full pool. Order is unspecified.
    pub fn sample_distinct(&mut self, max: Number, k: usize) -> Vec<Number> {
        debug_assert!(k <= max as usize);
        let mut pool: Vec<Number> = (1..=max).collect();
        for i in 0..k {
            let j = i + self.next_below((pool.len() - i) as u64) as usize;
            pool.swap(i, j);
        }
        pool.truncate(k);
        pool
    }
}
