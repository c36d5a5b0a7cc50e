//! Fixture registry: maps type names to factories and identity keys.
//!
//! The registry is the single source of truth for what can be built. It is
//! populated once during test setup and then shared immutably (via `Rc`)
//! across the whole requester tree; all construction paths look factories
//! up here and fail with `UnknownType` for names that were never defined.

use std::fmt;
use std::rc::Rc;

use im::HashMap;

use crate::errors::FixtureError;
use crate::options::{Options, INDEX_FIELD};
use crate::requester::FixtureRequester;
use crate::value::Value;

/// Factory signature shared by all fixture types.
///
/// Factories receive the (index-stamped) options and a nested requester for
/// dependency construction. They must be deterministic given identical
/// options; their only legitimate side effect is requesting other fixtures
/// through the provided requester.
pub type FactoryFn =
    Rc<dyn Fn(&Options, &mut FixtureRequester) -> Result<Value, FixtureError>>;

/// One registered fixture type: a factory plus the identity-key path used
/// for deduplication. Immutable after registration.
#[derive(Clone)]
pub struct FixtureDefinition {
    factory: FactoryFn,
    key: String,
}

impl FixtureDefinition {
    /// Defines a type deduplicated by the default positional `index` key.
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn(&Options, &mut FixtureRequester) -> Result<Value, FixtureError> + 'static,
    {
        Self {
            factory: Rc::new(factory),
            key: INDEX_FIELD.to_string(),
        }
    }

    /// Sets a natural identity key (a field name, or a dotted path into
    /// nested option maps) used for deduplication instead of the index.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub(crate) fn factory(&self) -> &FactoryFn {
        &self.factory
    }
}

impl fmt::Debug for FixtureDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FixtureDefinition")
            .field("key", &self.key)
            .field("factory", &"<factory>")
            .finish()
    }
}

/// Registry of all fixture definitions, inspectable at runtime.
#[derive(Default, Clone)]
pub struct FixtureRegistry {
    definitions: HashMap<String, FixtureDefinition>,
}

impl FixtureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a definition under a type name. Re-registration silently
    /// overwrites the prior definition.
    pub fn define(&mut self, name: &str, definition: FixtureDefinition) {
        self.definitions.insert(name.to_string(), definition);
    }

    /// Looks up a definition, failing for names that were never defined.
    pub fn definition(&self, name: &str) -> Result<&FixtureDefinition, FixtureError> {
        self.definitions
            .get(name)
            .ok_or_else(|| FixtureError::unknown_type(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.definitions.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
