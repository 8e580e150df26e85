//! Injectable sources of randomness for the decision systems.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of the random choices made while planning.
pub trait RandomSource {
    /// Returns an index drawn from `0..upper`.
    ///
    /// An `upper` bound of zero yields zero.
    fn next_index(&mut self, upper: usize) -> usize;

    /// Returns `true` for one half of the outcomes.
    fn coin_flip(&mut self) -> bool {
        self.next_index(2) == 0
    }
}

/// Deterministic pseudo-random source seeded from a single integer.
#[derive(Clone, Debug)]
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Creates a new source whose sequence is fully determined by `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn next_index(&mut self, upper: usize) -> usize {
        if upper == 0 {
            return 0;
        }
        self.rng.gen_range(0..upper)
    }
}

/// Source that replays a fixed script of choices, cycling when exhausted.
///
/// Each scripted value is reduced modulo the requested bound.
#[cfg(any(test, feature = "test_support"))]
#[derive(Clone, Debug, Default)]
pub struct ScriptedSource {
    values: Vec<usize>,
    cursor: usize,
}

#[cfg(any(test, feature = "test_support"))]
impl ScriptedSource {
    /// Creates a source that answers with the provided values in order.
    #[must_use]
    pub fn new(values: impl Into<Vec<usize>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of choices answered so far.
    #[must_use]
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

#[cfg(any(test, feature = "test_support"))]
impl RandomSource for ScriptedSource {
    fn next_index(&mut self, upper: usize) -> usize {
        let value = if self.values.is_empty() {
            0
        } else {
            self.values[self.cursor % self.values.len()]
        };
        self.cursor += 1;
        if upper == 0 {
            0
        } else {
            value % upper
        }
    }
}
