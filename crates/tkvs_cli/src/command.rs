//! Structured commands produced by the line parser.

/// One parsed store command.
///
/// The dispatcher maps each variant to exactly one engine operation,
/// never combining calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Return the current value for `key`.
    Get {
        /// Key to look up.
        key: String,
    },
    /// Return the number of keys that hold `value`.
    Count {
        /// Value to count occurrences of.
        value: String,
    },
    /// Store `value` for `key`.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove the entry for `key`.
    Delete {
        /// Key to remove.
        key: String,
    },
    /// Start a new transaction.
    Begin,
    /// Complete the current transaction.
    Commit,
    /// Revert to the state prior to the matching `BEGIN`.
    Rollback,
}
