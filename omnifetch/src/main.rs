//! Run the lookup benchmark and print the JSON report.
//!
//! Usage: `omnifetch <SELECTIVITY> <BUFFER_SIZE>`
//!
//! Logs go to stderr; only warnings unless `RUST_LOG` asks for more.

use std::io;
use std::num::NonZeroUsize;

use clap::Parser;
use omnifetch::{harness, BenchConfig, HarnessError};

#[derive(Parser, Debug)]
#[command(name = "omnifetch")]
#[command(about = "Measure windowed fetch-then-aggregate lookups over a fixed-capacity chained hash table")]
#[command(version)]
struct Args {
    /// Sampling denominator: about one in SELECTIVITY inserted keys is queried
    selectivity: NonZeroUsize,

    /// Keys fetched per window before the window is summed
    buffer_size: NonZeroUsize,
}

/// Phase logs are opt-in through `RUST_LOG`; stdout and stderr stay quiet otherwise.
const DEFAULT_LOG_FILTER: &str = "warn";

fn main() -> Result<(), HarnessError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let args = Args::parse();
    let config = BenchConfig {
        selectivity: args.selectivity,
        buffer_size: args.buffer_size,
        ..BenchConfig::default()
    };

    let report = harness::run(config)?;
    report.write_to(io::stdout().lock())
}
