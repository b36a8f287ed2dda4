//! Value-occurrence counter cache.

use std::collections::HashMap;

/// A cache mapping each value to the number of keys currently holding it.
///
/// Absence represents "no keys have this value": when a count reaches zero
/// the entry is removed entirely, never stored as `0`. All operations are
/// O(1).
///
/// The cache is a standalone component; the owning engine is responsible
/// for calling [`increment`](Self::increment) and
/// [`decrement`](Self::decrement) exactly once per net value gain or loss,
/// including during rollback-driven writes.
#[derive(Debug, Default)]
pub struct ValueCounters {
    counts: HashMap<String, usize>,
}

impl ValueCounters {
    /// Creates an empty counter cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of keys currently holding `value`.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Increases the count for `value` by one, creating the entry if absent.
    pub fn increment(&mut self, value: &str) {
        *self.counts.entry(value.to_owned()).or_insert(0) += 1;
    }

    /// Decreases the count for `value` by one, removing the entry when it
    /// reaches zero. No-op if there is no entry.
    pub fn decrement(&mut self, value: &str) {
        if let Some(count) = self.counts.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.counts.remove(value);
            }
        }
    }
}
