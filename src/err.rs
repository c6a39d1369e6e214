//! Error types for the `chainmap` crate

/// Errors returned by [`crate::FixedCapacityHashStore`] lookups.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// The key was never inserted. The store has no deletion, so this
    /// always means the caller asked for something it did not put.
    #[error("key not found in store: {key:?}")]
    KeyNotFound {
        /// The key that was looked up.
        key: String,
    },
}
