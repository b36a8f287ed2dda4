//! The shared store contract and engine strategy selection.

use crate::change_log::ChangeLogStore;
use crate::error::EngineResult;
use crate::snapshot::SnapshotStackStore;

/// An in-memory transactional key-value store.
///
/// Stores map text keys to text values, support arbitrarily nested
/// transactions, and count how many keys currently hold a given value.
///
/// # Invariants
///
/// - `transaction_level` equals the number of open (unclosed) transactions;
///   `0` means no transaction.
/// - `commit` and `rollback` fail with
///   [`EngineError::NoActiveTransaction`](crate::EngineError::NoActiveTransaction)
///   when the level is `0`, leaving the level unchanged.
/// - After `begin(); <ops>; rollback()` the observable state (all pairs and
///   all counts) equals the state immediately before `begin()`.
/// - `begin(); <ops>; commit()` is transparent to the parent level: a
///   subsequent parent `rollback` reverts `<ops>` as if issued flat.
///
/// # Implementors
///
/// - [`ChangeLogStore`] - O(1) `count` via a counter cache
/// - [`SnapshotStackStore`] - O(n) `count`, correctness by construction
pub trait TransactionalStore {
    /// Returns the current value for `key`, or `None` if it is not set.
    fn get(&self, key: &str) -> Option<&str>;

    /// Returns the number of keys that currently hold `value`.
    fn count(&self, value: &str) -> usize;

    /// Stores `value` for `key`.
    ///
    /// Returns the previous value for `key`, or `None` if it was not set.
    fn set(&mut self, key: &str, value: &str) -> Option<String>;

    /// Removes the entry for `key`.
    ///
    /// Returns the previous value for `key`, or `None` if it was not set.
    fn delete(&mut self, key: &str) -> Option<String>;

    /// Starts a new transaction.
    fn begin(&mut self);

    /// Completes the current transaction, folding its changes into the
    /// parent transaction if one is open.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no open transaction.
    fn commit(&mut self) -> EngineResult<()>;

    /// Reverts to the state prior to the matching `begin` call.
    ///
    /// # Errors
    ///
    /// Returns an error if there is no open transaction.
    fn rollback(&mut self) -> EngineResult<()>;

    /// Returns the current transaction level.
    ///
    /// `0` means there are no open transactions.
    fn transaction_level(&self) -> usize;
}

/// Engine implementation strategy, chosen at construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Single map plus per-transaction undo logs; O(1) `count`.
    #[default]
    ChangeLog,
    /// Stack of full map snapshots; O(n) `count` and `begin`.
    SnapshotStack,
}

impl Strategy {
    /// Creates an empty store using this strategy.
    #[must_use]
    pub fn new_store(self) -> Box<dyn TransactionalStore> {
        match self {
            Strategy::ChangeLog => Box::new(ChangeLogStore::new()),
            Strategy::SnapshotStack => Box::new(SnapshotStackStore::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_constructs_working_store() {
        for strategy in [Strategy::ChangeLog, Strategy::SnapshotStack] {
            let mut store = strategy.new_store();
            assert_eq!(store.set("key", "value"), None);
            assert_eq!(store.get("key"), Some("value"));
            assert_eq!(store.count("value"), 1);
            assert_eq!(store.transaction_level(), 0);
        }
    }

    #[test]
    fn default_strategy_is_change_log() {
        assert_eq!(Strategy::default(), Strategy::ChangeLog);
    }
}
