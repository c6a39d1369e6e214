use std::num::NonZeroUsize;

use crate::window::WindowPolicy;

/// Number of generated entries inserted before querying.
pub const POPULATION: usize = 3_800_000;

/// Root slots in the store.
pub const CAPACITY: NonZeroUsize = match NonZeroUsize::new(3_800_000) {
    Some(n) => n,
    None => panic!("capacity must be non-zero"),
};

/// Seed for the workload generator.
pub const RNG_SEED: u64 = 20_170_404;

/// Parameters of one benchmark run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Entries generated and inserted during populate
    pub population: usize,
    /// Root slots of the store
    pub capacity: NonZeroUsize,
    /// Workload generator seed
    pub seed: u64,
    /// About one in `selectivity` inserted keys is sampled for querying
    pub selectivity: NonZeroUsize,
    /// Keys fetched per window
    pub buffer_size: NonZeroUsize,
    /// Aggregation of the final partial window
    pub policy: WindowPolicy,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            population: POPULATION,
            capacity: CAPACITY,
            seed: RNG_SEED,
            selectivity: NonZeroUsize::MIN,
            buffer_size: NonZeroUsize::MIN,
            policy: WindowPolicy::default(),
        }
    }
}
