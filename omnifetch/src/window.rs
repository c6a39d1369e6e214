//! The windowed fetch-then-aggregate loop.
//!
//! Each window first fetches up to `buffer_size` values into a scratch
//! buffer, then folds the buffer into a running sum. The buffer is allocated
//! once, starts zeroed, and is never cleared between windows.

use std::num::NonZeroUsize;

/// Which buffer slots the aggregate step reads in each window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Sum every slot. In a final partial window the unfilled slots still
    /// hold values from the previous window (or `0.0` if none was written).
    #[default]
    Stale,
    /// Sum only the slots fetched in the current window.
    ValidOnly,
}

/// Scratch buffer plus the policy used to aggregate it.
#[derive(Debug, Clone)]
pub struct WindowLoop {
    buffer: Vec<f64>,
    policy: WindowPolicy,
}

impl WindowLoop {
    pub fn new(buffer_size: NonZeroUsize, policy: WindowPolicy) -> Self {
        Self {
            buffer: vec![0.0; buffer_size.get()],
            policy,
        }
    }

    #[inline]
    pub fn buffer_size(&self) -> usize {
        self.buffer.len()
    }

    pub fn policy(&self) -> WindowPolicy {
        self.policy
    }

    /// Current buffer contents.
    pub fn buffer(&self) -> &[f64] {
        &self.buffer
    }

    /// Run every window over `keys` and return the accumulated sum.
    ///
    /// The first failed fetch aborts the loop.
    pub fn run<K, E, F>(&mut self, keys: &[K], mut fetch: F) -> Result<f64, E>
    where
        F: FnMut(&K) -> Result<f64, E>,
    {
        let mut sum = 0.0;
        for window in keys.chunks(self.buffer.len()) {
            for (slot, key) in self.buffer.iter_mut().zip(window) {
                *slot = fetch(key)?;
            }

            let filled = match self.policy {
                WindowPolicy::Stale => self.buffer.len(),
                WindowPolicy::ValidOnly => window.len(),
            };
            for value in &self.buffer[..filled] {
                sum += *value;
            }
        }
        Ok(sum)
    }
}
