//! Counter cache invariants checked against a naive scan.
//!
//! `ValueCounters` is a standalone component: the owning engine calls
//! increment/decrement once per net value gain or loss. These tests drive
//! it exactly the way an engine does, against a plain map, and assert the
//! cached counts always equal a scan-and-group of that map.

use proptest::prelude::*;
use std::collections::HashMap;
use tkvs_core::{ChangeLogStore, TransactionalStore, ValueCounters};

/// One key-value write, as an engine would apply it.
#[derive(Debug, Clone)]
enum WriteOp {
    Set { key: String, value: String },
    Delete { key: String },
}

fn key_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-d]{1,2}").expect("valid regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[x-z]{1,2}").expect("valid regex")
}

fn write_op_strategy() -> impl Strategy<Value = WriteOp> {
    prop_oneof![
        3 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| WriteOp::Set { key, value }),
        1 => key_strategy().prop_map(|key| WriteOp::Delete { key }),
    ]
}

/// Number of keys in `map` currently holding `value`.
fn scan(map: &HashMap<String, String>, value: &str) -> usize {
    map.values().filter(|v| v.as_str() == value).count()
}

proptest! {
    /// Composing `ValueCounters` with a plain map the way an engine does
    /// keeps every cached count equal to a scan of the map, after every
    /// write.
    #[test]
    fn composed_counters_match_a_scan(ops in prop::collection::vec(write_op_strategy(), 1..60)) {
        let mut map = HashMap::new();
        let mut counters = ValueCounters::new();
        let mut seen = Vec::new();
        for op in ops {
            match op {
                WriteOp::Set { key, value } => {
                    seen.push(value.clone());
                    let previous = map.insert(key, value.clone());
                    if previous.as_deref() != Some(value.as_str()) {
                        counters.increment(&value);
                        if let Some(prev) = &previous {
                            counters.decrement(prev);
                        }
                    }
                }
                WriteOp::Delete { key } => {
                    if let Some(previous) = map.remove(&key) {
                        counters.decrement(&previous);
                    }
                }
            }
            for value in &seen {
                prop_assert_eq!(counters.count(value), scan(&map, value));
            }
        }
    }

    /// The change-log engine's cached counts equal a scan of a mirror map
    /// after every top-level write.
    #[test]
    fn engine_counts_match_a_scan(ops in prop::collection::vec(write_op_strategy(), 1..60)) {
        let mut store = ChangeLogStore::new();
        let mut mirror = HashMap::new();
        let mut seen = Vec::new();
        for op in ops {
            match op {
                WriteOp::Set { key, value } => {
                    seen.push(value.clone());
                    store.set(&key, &value);
                    mirror.insert(key, value);
                }
                WriteOp::Delete { key } => {
                    store.delete(&key);
                    mirror.remove(&key);
                }
            }
            for value in &seen {
                prop_assert_eq!(store.count(value), scan(&mirror, value));
            }
        }
    }
}
