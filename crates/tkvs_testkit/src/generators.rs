//! Property-based test generators using proptest.
//!
//! Keys and values are drawn from deliberately small alphabets so that
//! random sequences collide on keys and values often enough to exercise
//! counter maintenance and undo-log merging.

use proptest::prelude::*;

/// One store operation, as generated for property tests.
#[derive(Debug, Clone)]
pub enum StoreOp {
    /// Store a value for a key.
    Set {
        /// Key to write.
        key: String,
        /// Value to store.
        value: String,
    },
    /// Remove a key.
    Delete {
        /// Key to remove.
        key: String,
    },
    /// Start a transaction.
    Begin,
    /// Commit the innermost transaction.
    Commit,
    /// Roll back the innermost transaction.
    Rollback,
}

/// Strategy for generating keys from a small colliding domain.
pub fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,2}").expect("valid regex")
}

/// Strategy for generating values from a small colliding domain.
pub fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[x-z]{1,2}").expect("valid regex")
}

/// Strategy for generating one store operation.
///
/// Writes dominate so sequences mutate real state; transaction operations
/// appear often enough to nest several levels deep. Unbalanced
/// `Commit`/`Rollback` are generated on purpose to exercise the
/// no-transaction error path.
pub fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        2 => key_strategy().prop_map(|key| StoreOp::Delete { key }),
        2 => Just(StoreOp::Begin),
        1 => Just(StoreOp::Commit),
        1 => Just(StoreOp::Rollback),
    ]
}

/// Strategy for generating a sequence of operations.
pub fn op_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    prop::collection::vec(store_op_strategy(), min_ops..max_ops)
}

/// Strategy for generating a sequence of writes only (no transaction ops).
///
/// Useful for setting up a baseline state before opening a transaction.
pub fn write_sequence_strategy(
    min_ops: usize,
    max_ops: usize,
) -> impl Strategy<Value = Vec<StoreOp>> {
    let write = prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| StoreOp::Set { key, value }),
        1 => key_strategy().prop_map(|key| StoreOp::Delete { key }),
    ];
    prop::collection::vec(write, min_ops..max_ops)
}

/// Configuration for property tests.
#[derive(Debug, Clone)]
pub struct PropTestConfig {
    /// Number of test cases to run.
    pub cases: u32,
    /// Maximum shrink iterations.
    pub max_shrink_iters: u32,
}

impl Default for PropTestConfig {
    fn default() -> Self {
        Self {
            cases: 256,
            max_shrink_iters: 1000,
        }
    }
}

impl PropTestConfig {
    /// Creates a configuration for quick tests.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            cases: 32,
            max_shrink_iters: 100,
        }
    }

    /// Converts to proptest config.
    #[must_use]
    pub fn to_proptest_config(&self) -> ProptestConfig {
        ProptestConfig {
            cases: self.cases,
            max_shrink_iters: self.max_shrink_iters,
            ..ProptestConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(PropTestConfig::quick().to_proptest_config())]

        #[test]
        fn keys_are_nonempty_and_short(key in key_strategy()) {
            prop_assert!(!key.is_empty());
            prop_assert!(key.len() <= 2);
        }

        #[test]
        fn values_are_nonempty_and_short(value in value_strategy()) {
            prop_assert!(!value.is_empty());
            prop_assert!(value.len() <= 2);
        }

        #[test]
        fn sequences_respect_bounds(ops in op_sequence_strategy(1, 20)) {
            prop_assert!(!ops.is_empty());
            prop_assert!(ops.len() < 20);
        }

        #[test]
        fn write_sequences_contain_no_transaction_ops(ops in write_sequence_strategy(0, 20)) {
            let all_writes = ops.iter().all(|op| matches!(
                op,
                StoreOp::Set { .. } | StoreOp::Delete { .. }
            ));
            prop_assert!(all_writes);
        }
    }
}
