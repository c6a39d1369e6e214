//! Populate, execute, report.
//!
//! The phases run once each and in order: [`populate`] builds the store and
//! the key sample, [`Populated::execute`] consumes that state to run the
//! timed window loop and returns the [`Report`].

use std::time::Instant;

use chainmap::FixedCapacityHashStore;
use log::{debug, info};
use rand::Rng;

use crate::config::BenchConfig;
use crate::report::Report;
use crate::window::WindowLoop;
use crate::workload::Workload;
use crate::HarnessError;

/// A populated store and the keys sampled while filling it.
pub struct Populated {
    store: FixedCapacityHashStore<f64>,
    sample: Vec<String>,
    config: BenchConfig,
}

/// Build the store from a generator seeded with `config.seed`.
pub fn populate(config: BenchConfig) -> Populated {
    let workload = Workload::seeded(config.seed);
    populate_with(config, workload)
}

/// Build the store from an explicit generator.
pub fn populate_with<R: Rng>(config: BenchConfig, mut workload: Workload<R>) -> Populated {
    let mut store = FixedCapacityHashStore::new(config.capacity);
    let mut sample = Vec::with_capacity(config.population / config.selectivity.get());

    let start = Instant::now();
    for _ in 0..config.population {
        let entry = workload.next_entry(config.selectivity);
        store.put(&entry.key, entry.value);
        if entry.sampled {
            sample.push(entry.key);
        }
    }
    let populate_time = start.elapsed();

    info!(
        "populated {} entries ({} distinct) into {} slots in {:?}; sampled {} keys",
        config.population,
        store.len(),
        store.capacity(),
        populate_time,
        sample.len()
    );
    debug!("chain stats: {:?}", store.chain_stats());
    debug!(
        "store memory: {:.1} MB",
        store.memory_usage() as f64 / 1e6
    );

    Populated {
        store,
        sample,
        config,
    }
}

impl Populated {
    pub fn store(&self) -> &FixedCapacityHashStore<f64> {
        &self.store
    }

    /// Keys that will be queried, in insertion order.
    pub fn sample(&self) -> &[String] {
        &self.sample
    }

    /// Run the timed fetch/aggregate loop over the sample.
    pub fn execute(self) -> Result<Report, HarnessError> {
        let mut window = WindowLoop::new(self.config.buffer_size, self.config.policy);
        let store = &self.store;

        let start = Instant::now();
        let sum = window.run(&self.sample, |key| store.get(key).copied())?;
        let duration = start.elapsed();

        let report = Report::new(sum, self.sample.len(), window.buffer_size(), duration);
        info!(
            "executed {} lookups in windows of {} ({:?} policy) in {:?} ({:.0} lookups/s)",
            report.n_strings,
            report.buffer_size,
            window.policy(),
            duration,
            report.throughput()
        );
        Ok(report)
    }
}

/// Populate and execute with `config`.
pub fn run(config: BenchConfig) -> Result<Report, HarnessError> {
    populate(config).execute()
}
