//! Seeded synthetic workload: random string keys, random values, and the
//! sampling decision that picks which keys get queried later.

use std::num::NonZeroUsize;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha12Rng;

/// Length of every generated key.
pub const KEY_LEN: usize = 255;

/// Values are drawn uniformly from `[0, VALUE_RANGE)`.
pub const VALUE_RANGE: f64 = 90.0;

/// Symbols a key is made of.
pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// One population step: a key, its value, and whether it joins the sample.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedEntry {
    pub key: String,
    pub value: f64,
    pub sampled: bool,
}

/// Workload generator owning its random source.
#[derive(Debug, Clone)]
pub struct Workload<R> {
    rng: R,
}

impl Workload<ChaCha12Rng> {
    /// Reproducible generator: the same seed yields the same keys, values
    /// and sampling decisions, independent of the `rand` release.
    pub fn seeded(seed: u64) -> Self {
        Self::new(ChaCha12Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Workload<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn next_value(&mut self) -> f64 {
        self.rng.gen::<f64>() * VALUE_RANGE
    }

    pub fn next_key(&mut self) -> String {
        (0..KEY_LEN)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }

    /// True with probability `1 / selectivity`.
    pub fn sample(&mut self, selectivity: NonZeroUsize) -> bool {
        self.rng.gen_range(0..selectivity.get()) == 0
    }

    /// Draw key, value and sampling decision, in that order.
    pub fn next_entry(&mut self, selectivity: NonZeroUsize) -> GeneratedEntry {
        let key = self.next_key();
        let value = self.next_value();
        let sampled = self.sample(selectivity);
        GeneratedEntry {
            key,
            value,
            sampled,
        }
    }
}
