//! Read-only projection over the cache for bulk and keyed retrieval.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Index;
use std::rc::Rc;

use crate::cache::FixtureCache;
use crate::errors::FixtureError;
use crate::options::INDEX_FIELD;
use crate::registry::FixtureRegistry;
use crate::value::{KeyValue, Value};

/// Dual-mode view of one type's constructed instances: an insertion-ordered
/// sequence that, for custom-keyed types, also supports lookup by the
/// identity key's runtime value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixtureSet {
    items: Vec<Value>,
    by_key: HashMap<KeyValue, usize>,
}

impl FixtureSet {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Positional access, in cache insertion order.
    pub fn get(&self, position: usize) -> Option<&Value> {
        self.items.get(position)
    }

    /// Keyed access by the identity key's runtime value. Empty for
    /// index-keyed types.
    pub fn by_key(&self, key: impl Into<KeyValue>) -> Option<&Value> {
        self.items.get(*self.by_key.get(&key.into())?)
    }

    /// The ordered instances as a slice, for destructuring.
    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }
}

impl Index<usize> for FixtureSet {
    type Output = Value;

    fn index(&self, position: usize) -> &Value {
        &self.items[position]
    }
}

impl<'a> IntoIterator for &'a FixtureSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Read side of a scenario: projects accumulated cache contents into
/// `FixtureSet`s. Results are recomputed on every call, so sets observed
/// after further construction always reflect the current cache.
pub struct FixtureGetter {
    registry: Rc<FixtureRegistry>,
    cache: Rc<RefCell<FixtureCache>>,
}

impl FixtureGetter {
    pub(crate) fn new(registry: Rc<FixtureRegistry>, cache: Rc<RefCell<FixtureCache>>) -> Self {
        Self { registry, cache }
    }

    /// All cached instances for a type name, in insertion order.
    ///
    /// For types with a custom identity key the set additionally indexes
    /// each instance by the key's value read from the instance itself, so
    /// keyed and positional retrieval return the same values. Unknown type
    /// names fail; registered-but-never-built types yield an empty set.
    pub fn get(&self, name: &str) -> Result<FixtureSet, FixtureError> {
        let definition = self.registry.definition(name)?;
        let cache = self.cache.borrow();
        let items: Vec<Value> = cache.instances(name).cloned().collect();

        let mut by_key = HashMap::new();
        if definition.key() != INDEX_FIELD {
            for (position, instance) in items.iter().enumerate() {
                if let Some(key) = instance
                    .get_path(definition.key())
                    .and_then(Value::as_key_value)
                {
                    by_key.insert(key, position);
                }
            }
        }

        Ok(FixtureSet { items, by_key })
    }
}
