//! Instance cache: the single source of truth for "does this already exist".
//!
//! Two-level structure: an outer map from type name to an exclusively-owned
//! inner map from identity value to instance. Inner maps are created lazily
//! on first access and never cleared or recreated within a scenario, and
//! they preserve insertion order so the getter can expose instances in
//! construction sequence.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::value::{KeyValue, Value};

#[derive(Debug, Default, Clone)]
pub struct FixtureCache {
    instances: HashMap<String, IndexMap<KeyValue, Value>>,
}

impl FixtureCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached instance for `(name, key)`, treating a stored
    /// `Nil` as absent.
    pub fn get(&self, name: &str, key: &KeyValue) -> Option<&Value> {
        self.instances
            .get(name)?
            .get(key)
            .filter(|instance| !instance.is_nil())
    }

    /// Inserts an instance. Once a non-nil value is stored for a key it is
    /// the permanent answer; later inserts for the same key are ignored.
    pub fn insert(&mut self, name: &str, key: KeyValue, instance: Value) {
        self.instances
            .entry(name.to_string())
            .or_default()
            .entry(key)
            .or_insert(instance);
    }

    /// All cached instances for a type, in insertion order.
    pub fn instances(&self, name: &str) -> impl Iterator<Item = &Value> {
        self.instances.get(name).into_iter().flat_map(|m| m.values())
    }

    /// Number of distinct identities cached for a type.
    pub fn len(&self, name: &str) -> usize {
        self.instances.get(name).map_or(0, IndexMap::len)
    }

    pub fn is_empty(&self, name: &str) -> bool {
        self.len(name) == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_are_never_overwritten() {
        let mut cache = FixtureCache::new();
        cache.insert("user", KeyValue::Int(0), Value::Str("first".into()));
        cache.insert("user", KeyValue::Int(0), Value::Str("second".into()));
        assert_eq!(
            cache.get("user", &KeyValue::Int(0)),
            Some(&Value::Str("first".into()))
        );
        assert_eq!(cache.len("user"), 1);
    }

    #[test]
    fn nil_entries_are_absent() {
        let mut cache = FixtureCache::new();
        cache.insert("user", KeyValue::Int(0), Value::Nil);
        assert_eq!(cache.get("user", &KeyValue::Int(0)), None);
    }

    #[test]
    fn identity_values_are_scoped_per_type() {
        let mut cache = FixtureCache::new();
        cache.insert("user", KeyValue::Int(0), Value::Str("a user".into()));
        assert_eq!(cache.get("message", &KeyValue::Int(0)), None);
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut cache = FixtureCache::new();
        cache.insert("user", KeyValue::Str("b".into()), Value::Int(1));
        cache.insert("user", KeyValue::Str("a".into()), Value::Int(2));
        let values: Vec<_> = cache.instances("user").cloned().collect();
        assert_eq!(values, vec![Value::Int(1), Value::Int(2)]);
    }
}
