//! Seeded pseudo-random number generation.
//!
//! A linear congruential generator with 32-bit state. The whole engine is
//! reproducible from integer seeds: two generators created with the same
//! seed produce identical streams forever, across runs and across threads.
//! Each call site owns its own instance; there is no shared RNG state.

/// Deterministic LCG producing floats in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    /// Create a generator from an integer seed.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Next float in `[0, 1)`.
    ///
    /// Recurrence: `state = state * 1664525 + 1013904223 (mod 2^32)`,
    /// output `state / 2^32`.
    #[inline]
    pub fn next(&mut self) -> f64 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        self.state as f64 / 4_294_967_296.0
    }
}
