//! Snapshot-stack engine: a stack of full map copies, one per level.

use crate::error::{EngineError, EngineResult};
use crate::store::TransactionalStore;
use std::collections::HashMap;
use tracing::debug;

/// An in-memory transactional key-value store backed by a stack of full
/// map snapshots.
///
/// The stack always holds at least one map: level 0 is the committed
/// baseline and is never popped. `begin` clones the top map, so every
/// transaction level is correct by construction and `rollback` is a plain
/// pop. The trade-offs against [`ChangeLogStore`](crate::ChangeLogStore):
/// `begin` costs O(n) in the number of entries and `count` is an O(n) scan
/// instead of a cached lookup.
///
/// Nested transactions are supported; parallel transactions are not.
/// The store is not thread-safe.
#[derive(Debug)]
pub struct SnapshotStackStore {
    /// Snapshot per transaction level, baseline first, current last.
    stack: Vec<HashMap<String, String>>,
}

impl SnapshotStackStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![HashMap::new()],
        }
    }

    fn top(&self) -> &HashMap<String, String> {
        // The baseline map is never popped, so the stack is never empty.
        self.stack.last().expect("baseline map always present")
    }

    fn top_mut(&mut self) -> &mut HashMap<String, String> {
        self.stack.last_mut().expect("baseline map always present")
    }
}

impl Default for SnapshotStackStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionalStore for SnapshotStackStore {
    fn get(&self, key: &str) -> Option<&str> {
        self.top().get(key).map(String::as_str)
    }

    /// O(n) scan over the current snapshot.
    fn count(&self, value: &str) -> usize {
        self.top().values().filter(|v| v.as_str() == value).count()
    }

    fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.top_mut().insert(key.to_owned(), value.to_owned())
    }

    fn delete(&mut self, key: &str) -> Option<String> {
        self.top_mut().remove(key)
    }

    /// Pushes a full copy of the current snapshot, O(n).
    fn begin(&mut self) {
        let snapshot = self.top().clone();
        self.stack.push(snapshot);
        debug!(level = self.stack.len() - 1, "transaction started");
    }

    fn commit(&mut self) -> EngineResult<()> {
        if self.stack.len() <= 1 {
            return Err(EngineError::NoActiveTransaction);
        }
        // The top snapshot replaces its parent: the inner transaction's
        // state folds into the enclosing level wholesale.
        let current = self.stack.pop().expect("baseline map always present");
        self.stack.pop();
        self.stack.push(current);
        debug!(level = self.stack.len() - 1, "transaction committed");
        Ok(())
    }

    fn rollback(&mut self) -> EngineResult<()> {
        if self.stack.len() <= 1 {
            return Err(EngineError::NoActiveTransaction);
        }
        self.stack.pop();
        debug!(level = self.stack.len() - 1, "transaction rolled back");
        Ok(())
    }

    fn transaction_level(&self) -> usize {
        self.stack.len() - 1
    }
}
