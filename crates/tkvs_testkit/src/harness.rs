//! Differential harness: runs engines against the reference model.

use crate::generators::StoreOp;
use crate::model::ReferenceModel;
use tkvs_core::TransactionalStore;

/// Observable store state over a fixed key and value universe.
///
/// Two stores with equal snapshots over the universe touched by a test are
/// externally indistinguishable for that test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSnapshot {
    /// Value per universe key, in universe order.
    pub values: Vec<Option<String>>,
    /// Occurrence count per universe value, in universe order.
    pub counts: Vec<usize>,
    /// Current transaction level.
    pub transaction_level: usize,
}

/// Captures the observable state of a store over the given universe.
#[must_use]
pub fn snapshot_state(
    store: &dyn TransactionalStore,
    keys: &[String],
    values: &[String],
) -> StoreSnapshot {
    StoreSnapshot {
        values: keys
            .iter()
            .map(|key| store.get(key).map(ToOwned::to_owned))
            .collect(),
        counts: values.iter().map(|value| store.count(value)).collect(),
        transaction_level: store.transaction_level(),
    }
}

/// Extracts the sorted, deduplicated key and value universe of a sequence.
#[must_use]
pub fn op_universe(ops: &[StoreOp]) -> (Vec<String>, Vec<String>) {
    let mut keys = Vec::new();
    let mut values = Vec::new();
    for op in ops {
        match op {
            StoreOp::Set { key, value } => {
                keys.push(key.clone());
                values.push(value.clone());
            }
            StoreOp::Delete { key } => keys.push(key.clone()),
            StoreOp::Begin | StoreOp::Commit | StoreOp::Rollback => {}
        }
    }
    keys.sort();
    keys.dedup();
    values.sort();
    values.dedup();
    (keys, values)
}

/// Applies one operation to a store under test.
///
/// Returns `false` when a `Commit`/`Rollback` failed for lack of an open
/// transaction, `true` otherwise.
pub fn apply_to_store(store: &mut dyn TransactionalStore, op: &StoreOp) -> bool {
    match op {
        StoreOp::Set { key, value } => {
            store.set(key, value);
            true
        }
        StoreOp::Delete { key } => {
            store.delete(key);
            true
        }
        StoreOp::Begin => {
            store.begin();
            true
        }
        StoreOp::Commit => store.commit().is_ok(),
        StoreOp::Rollback => store.rollback().is_ok(),
    }
}

/// Applies one operation to the reference model.
///
/// Returns `false` when a `Commit`/`Rollback` had no open transaction,
/// `true` otherwise, mirroring [`apply_to_store`].
pub fn apply_to_model(model: &mut ReferenceModel, op: &StoreOp) -> bool {
    match op {
        StoreOp::Set { key, value } => {
            model.set(key, value);
            true
        }
        StoreOp::Delete { key } => {
            model.delete(key);
            true
        }
        StoreOp::Begin => {
            model.begin();
            true
        }
        StoreOp::Commit => model.commit(),
        StoreOp::Rollback => model.rollback(),
    }
}

/// Asserts that a store agrees with the model over the given universe.
///
/// Checks every universe key's value, every universe value's count, every
/// live model entry, and the transaction level.
///
/// # Panics
///
/// Panics on any disagreement.
pub fn assert_agrees_with_model(
    store: &dyn TransactionalStore,
    model: &ReferenceModel,
    keys: &[String],
    values: &[String],
) {
    assert_eq!(
        store.transaction_level(),
        model.transaction_level(),
        "transaction level diverged"
    );
    for key in keys {
        assert_eq!(store.get(key), model.get(key), "value diverged for key {key:?}");
    }
    for value in values {
        assert_eq!(
            store.count(value),
            model.count(value),
            "count diverged for value {value:?}"
        );
    }
    for (key, value) in model.entries() {
        assert_eq!(
            store.get(&key),
            Some(value.as_str()),
            "store lost entry for key {key:?}"
        );
    }
}

/// Runs an operation sequence against a store and the reference model,
/// asserting equal observable state after every step.
///
/// # Panics
///
/// Panics when the store and the model diverge, including on whether a
/// `Commit`/`Rollback` succeeded.
pub fn check_against_model(store: &mut dyn TransactionalStore, ops: &[StoreOp]) {
    let (keys, values) = op_universe(ops);
    let mut model = ReferenceModel::new();
    for (step, op) in ops.iter().enumerate() {
        let store_ok = apply_to_store(store, op);
        let model_ok = apply_to_model(&mut model, op);
        assert_eq!(store_ok, model_ok, "outcome diverged at step {step} ({op:?})");
        assert_agrees_with_model(store, &model, &keys, &values);
    }
}
