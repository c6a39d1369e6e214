//! # omnifetch
//!
//! Lookup micro-benchmark over [`chainmap::FixedCapacityHashStore`].
//!
//! A seeded generator fills the store with random 255-character keys and
//! samples roughly one key in `selectivity`. The sampled keys are then read
//! back in windows of `buffer_size`: every window first fetches all of its
//! values into a scratch buffer and only then sums the buffer. Only that
//! loop is timed.
//!
//! ## Example
//!
//! ```rust
//! use omnifetch::{harness, BenchConfig};
//! use std::num::NonZeroUsize;
//!
//! let config = BenchConfig {
//!     population: 1_000,
//!     capacity: NonZeroUsize::new(1_000).unwrap(),
//!     selectivity: NonZeroUsize::new(10).unwrap(),
//!     buffer_size: NonZeroUsize::new(4).unwrap(),
//!     ..BenchConfig::default()
//! };
//! let report = harness::run(config).unwrap();
//! assert_eq!(report.average, report.sum / report.n_strings as f64);
//! ```

#![warn(clippy::all)]

pub mod config;
mod err;
pub mod harness;
pub mod report;
pub mod window;
pub mod workload;

pub use config::BenchConfig;
pub use err::HarnessError;
pub use report::Report;
pub use window::{WindowLoop, WindowPolicy};
pub use workload::Workload;
