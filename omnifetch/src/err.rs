//! Error types for the `omnifetch` crate

use chainmap::StoreError;

/// Errors that can end a benchmark run.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum HarnessError {
    /// A sampled key could not be read back from the store.
    #[error("lookup failed during fetch: {0}")]
    Store(#[from] StoreError),

    /// The report could not be serialized.
    #[error("failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    /// Writing the report failed.
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
