//! Change-log engine: one backing map plus per-transaction undo logs.

use crate::counters::ValueCounters;
use crate::error::{EngineError, EngineResult};
use crate::store::TransactionalStore;
use std::collections::HashMap;
use tracing::{debug, trace};

/// Undo log for one open transaction.
///
/// Maps each touched key to the value it held before this transaction first
/// wrote it (`None` when the key did not exist). Recording is
/// first-write-wins: later writes to an already-recorded key must not
/// overwrite the undo value, so each key carries at most one entry and
/// replay order is immaterial.
type UndoLog = HashMap<String, Option<String>>;

/// An in-memory transactional key-value store backed by a single map,
/// a stack of per-transaction undo logs, and a value counter cache.
///
/// - `get`, `set`, `delete` and `count` are O(1)
/// - `begin`, `commit` and `rollback` cost O(changes in the transaction)
///
/// Nested transactions are supported; parallel transactions are not.
/// The store is not thread-safe.
#[derive(Debug, Default)]
pub struct ChangeLogStore {
    /// The main key-value map, mutated in place. Always the tip of the
    /// currently visible transaction state.
    main: HashMap<String, String>,
    /// Value counters kept exactly in sync with `main` through every
    /// mutation path, including rollback replay.
    counters: ValueCounters,
    /// Undo logs for open transactions, innermost last.
    transactions: Vec<UndoLog>,
}

impl ChangeLogStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes `value` for `key`, updating counters and optionally the
    /// innermost undo log. Every set funnels through here so counters are
    /// adjusted exactly once per logical change, whether the write comes
    /// from a user command or from rollback replay.
    fn handle_set(&mut self, key: &str, value: &str, log: bool) -> Option<String> {
        let previous = self.main.insert(key.to_owned(), value.to_owned());
        if previous.as_deref() != Some(value) {
            self.track_change(key, previous.as_deref(), Some(value), log);
        }
        previous
    }

    /// Removes `key`, updating counters and optionally the innermost
    /// undo log.
    fn handle_delete(&mut self, key: &str, log: bool) -> Option<String> {
        let previous = self.main.remove(key);
        if let Some(prev) = previous.as_deref() {
            self.track_change(key, Some(prev), None, log);
        }
        previous
    }

    /// Records the undo entry for a change and adjusts the counters.
    ///
    /// `previous` is the value the key held before the change, `value` the
    /// one it holds after; either side may be absent. The undo entry lands
    /// in the innermost open log only, and only if that log has not already
    /// recorded this key (the first write in a transaction captures the
    /// pre-transaction value; later writes must not clobber it).
    fn track_change(
        &mut self,
        key: &str,
        previous: Option<&str>,
        value: Option<&str>,
        log: bool,
    ) {
        if log {
            if let Some(current) = self.transactions.last_mut() {
                current
                    .entry(key.to_owned())
                    .or_insert_with(|| previous.map(ToOwned::to_owned));
            }
        }
        if let Some(value) = value {
            self.counters.increment(value);
        }
        if let Some(previous) = previous {
            self.counters.decrement(previous);
        }
        trace!(key, ?previous, ?value, "applied change");
    }
}

impl TransactionalStore for ChangeLogStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.main.get(key).map(String::as_str)
    }

    /// O(1) via the counter cache.
    fn count(&self, value: &str) -> usize {
        self.counters.count(value)
    }

    fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.handle_set(key, value, true)
    }

    fn delete(&mut self, key: &str) -> Option<String> {
        self.handle_delete(key, true)
    }

    fn begin(&mut self) {
        self.transactions.push(UndoLog::new());
        debug!(level = self.transactions.len(), "transaction started");
    }

    fn commit(&mut self) -> EngineResult<()> {
        // All changes are already applied to the main map; closing the
        // transaction only disposes of its undo log.
        let current = self
            .transactions
            .pop()
            .ok_or(EngineError::NoActiveTransaction)?;
        if let Some(parent) = self.transactions.last_mut() {
            // Fold the undo log into the parent so an outer rollback
            // reverts the committed inner changes too. Where both levels
            // touched a key the parent's earlier undo value wins.
            for (key, previous) in current {
                parent.entry(key).or_insert(previous);
            }
        }
        debug!(level = self.transactions.len(), "transaction committed");
        Ok(())
    }

    fn rollback(&mut self) -> EngineResult<()> {
        let current = self
            .transactions
            .pop()
            .ok_or(EngineError::NoActiveTransaction)?;
        // Re-apply recorded previous values as unlogged writes: the log
        // being undone is already popped, so replay cannot recurse into it,
        // and counters are reversed exactly once per restored key.
        for (key, previous) in current {
            match previous {
                Some(value) => self.handle_set(&key, &value, false),
                None => self.handle_delete(&key, false),
            };
        }
        debug!(level = self.transactions.len(), "transaction rolled back");
        Ok(())
    }

    fn transaction_level(&self) -> usize {
        self.transactions.len()
    }
}
