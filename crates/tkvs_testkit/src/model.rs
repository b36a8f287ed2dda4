//! Naive reference model used as a differential oracle.

use std::collections::HashMap;

/// The simplest correct transactional key-value store.
///
/// A stack of full map copies with every count recomputed by scan. Nothing
/// is cached and nothing is logged, so there is no state to drift out of
/// sync; engines under test are compared against this model step by step.
#[derive(Debug, Clone)]
pub struct ReferenceModel {
    stack: Vec<HashMap<String, String>>,
}

impl ReferenceModel {
    /// Creates an empty model.
    #[must_use]
    pub fn new() -> Self {
        Self {
            stack: vec![HashMap::new()],
        }
    }

    fn top(&self) -> &HashMap<String, String> {
        self.stack.last().expect("baseline map always present")
    }

    /// Returns the current value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.top().get(key).map(String::as_str)
    }

    /// Returns the number of keys holding `value`, by scan.
    #[must_use]
    pub fn count(&self, value: &str) -> usize {
        self.top().values().filter(|v| v.as_str() == value).count()
    }

    /// Stores `value` for `key`, returning the previous value.
    pub fn set(&mut self, key: &str, value: &str) -> Option<String> {
        self.stack
            .last_mut()
            .expect("baseline map always present")
            .insert(key.to_owned(), value.to_owned())
    }

    /// Removes `key`, returning the previous value.
    pub fn delete(&mut self, key: &str) -> Option<String> {
        self.stack
            .last_mut()
            .expect("baseline map always present")
            .remove(key)
    }

    /// Starts a transaction by copying the current state.
    pub fn begin(&mut self) {
        let snapshot = self.top().clone();
        self.stack.push(snapshot);
    }

    /// Commits the innermost transaction.
    ///
    /// Returns `false` when no transaction is open.
    pub fn commit(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        let current = self.stack.pop().expect("checked above");
        self.stack.pop();
        self.stack.push(current);
        true
    }

    /// Rolls back the innermost transaction.
    ///
    /// Returns `false` when no transaction is open.
    pub fn rollback(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }

    /// Returns the current transaction level.
    #[must_use]
    pub fn transaction_level(&self) -> usize {
        self.stack.len() - 1
    }

    /// Returns all live key-value pairs at the current level.
    #[must_use]
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut entries: Vec<_> = self
            .top()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        entries.sort();
        entries
    }
}

impl Default for ReferenceModel {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_round_trip() {
        let mut model = ReferenceModel::new();
        assert_eq!(model.set("key", "value"), None);
        assert_eq!(model.get("key"), Some("value"));
        assert_eq!(model.count("value"), 1);
        assert_eq!(model.delete("key"), Some("value".to_owned()));
        assert_eq!(model.get("key"), None);
    }

    #[test]
    fn model_nested_rollback() {
        let mut model = ReferenceModel::new();
        model.set("key", "v1");
        model.begin();
        model.set("key", "v2");
        model.begin();
        model.delete("key");
        assert!(model.rollback());
        assert_eq!(model.get("key"), Some("v2"));
        assert!(model.rollback());
        assert_eq!(model.get("key"), Some("v1"));
        assert_eq!(model.transaction_level(), 0);
    }

    #[test]
    fn model_reports_unbalanced_close() {
        let mut model = ReferenceModel::new();
        assert!(!model.commit());
        assert!(!model.rollback());
        model.begin();
        assert!(model.commit());
        assert!(!model.commit());
    }

    #[test]
    fn entries_are_sorted() {
        let mut model = ReferenceModel::new();
        model.set("b", "2");
        model.set("a", "1");
        assert_eq!(
            model.entries(),
            vec![
                ("a".to_owned(), "1".to_owned()),
                ("b".to_owned(), "2".to_owned()),
            ]
        );
    }
}
