// File: src/core/progress.rs
use crate::core::types::ProgressKey;
use crate::error::Result;
use crate::persistence::ProgressPort;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Completion flags keyed by progress key. Entries appear lazily on first
/// toggle; an absent key means "not completed".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressMap {
    entries: BTreeMap<String, bool>,
}

impl ProgressMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from an arbitrary JSON payload. Anything that is not an
    /// object yields an empty map; non-boolean values are dropped.
    pub fn from_json_value(value: Value) -> Self {
        let Value::Object(object) = value else {
            log::warn!("Progress payload is not an object, starting empty");
            return Self::new();
        };
        let mut entries = BTreeMap::new();
        for (key, value) in object {
            match value {
                Value::Bool(done) => {
                    entries.insert(key, done);
                }
                other => log::debug!("Dropping non-boolean progress entry '{}': {}", key, other),
            }
        }
        Self { entries }
    }

    /// Flips the flag for `key`, returning the new value.
    pub fn toggle(&mut self, key: &ProgressKey) -> bool {
        let flag = self.entries.entry(key.as_str().to_string()).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn set(&mut self, key: &ProgressKey, done: bool) {
        self.entries.insert(key.as_str().to_string(), done);
    }

    pub fn is_completed(&self, key: &ProgressKey) -> bool {
        self.entries.get(key.as_str()).copied().unwrap_or(false)
    }

    /// Number of `true` entries, whether or not they name an existing item.
    pub fn completed_count(&self) -> usize {
        self.entries.values().filter(|&&done| done).count()
    }

    /// Number of stored entries, `false` ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(k, &v)| (k.as_str(), v))
    }
}

// Absent and explicit `false` are the same state.
impl PartialEq for ProgressMap {
    fn eq(&self, other: &Self) -> bool {
        let completed = |m: &Self| {
            m.entries
                .iter()
                .filter(|&(_, &done)| done)
                .map(|(k, _)| k.clone())
                .collect::<Vec<_>>()
        };
        completed(self) == completed(other)
    }
}

impl Eq for ProgressMap {}

impl<K: Into<String>> FromIterator<(K, bool)> for ProgressMap {
    fn from_iter<I: IntoIterator<Item = (K, bool)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// The process-wide progress map plus the port it is mirrored into.
pub struct ProgressStore<P: ProgressPort> {
    map: ProgressMap,
    port: P,
}

impl<P: ProgressPort> ProgressStore<P> {
    /// Loads the persisted map through `port`. Never fails.
    pub fn open(port: P) -> Self {
        let map = port.load();
        log::info!("Loaded progress with {} completed items", map.completed_count());
        Self { map, port }
    }

    /// Flips the flag in memory and writes the whole map back. The in-memory
    /// toggle stands even when the write fails.
    pub fn toggle(&mut self, key: &ProgressKey) -> Result<bool> {
        let done = self.map.toggle(key);
        log::debug!("Toggled '{}' -> {}", key, done);
        self.port.save(&self.map)?;
        Ok(done)
    }

    pub fn is_completed(&self, key: &ProgressKey) -> bool {
        self.map.is_completed(key)
    }

    pub fn map(&self) -> &ProgressMap {
        &self.map
    }

    pub fn port(&self) -> &P {
        &self.port
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use serde_json::json;

    #[test]
    fn first_toggle_sets_true() {
        let mut map = ProgressMap::new();
        let key = ProgressKey::from("oop-0");
        assert!(!map.is_completed(&key));
        assert!(map.toggle(&key));
        assert!(map.is_completed(&key));
    }

    #[test]
    fn explicit_false_equals_absent() {
        let explicit: ProgressMap = [("oop-0", false)].into_iter().collect();
        assert_eq!(explicit, ProgressMap::new());
        assert!(!explicit.is_completed(&ProgressKey::from("oop-0")));
    }

    #[test]
    fn completed_count_includes_stale_keys() {
        let map: ProgressMap = [("gone-7", true), ("oop-0", true), ("orm-0", false)]
            .into_iter()
            .collect();
        assert_eq!(map.completed_count(), 2);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn from_json_value_keeps_only_booleans() {
        let map = ProgressMap::from_json_value(json!({"a-0": true, "b-0": 1, "c-0": false}));
        assert_eq!(map.len(), 2);
        assert!(map.is_completed(&ProgressKey::from("a-0")));
    }

    #[test]
    fn from_json_value_rejects_non_objects() {
        assert!(ProgressMap::from_json_value(json!([true, false])).is_empty());
        assert!(ProgressMap::from_json_value(json!("oop-0")).is_empty());
    }

    #[test]
    fn store_mirrors_every_toggle() {
        let mut store = ProgressStore::open(MemoryStore::new());
        let key = ProgressKey::from("orm-0");
        assert!(store.toggle(&key).unwrap());
        assert_eq!(store.port().saved(), Some(store.map()));
        assert_eq!(store.port().save_count(), 1);
    }
}
