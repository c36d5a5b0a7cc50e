//! Open option maps passed to fixture factories.
//!
//! An `Options` value carries arbitrary caller-defined fields plus one
//! reserved field, [`INDEX_FIELD`], stamped by the index counters before a
//! factory ever sees the options. The nested dependency requester is passed
//! to factories as an explicit parameter, not as an option field.

use im::HashMap;

use crate::value::Value;

/// Reserved option field holding the default positional identity.
pub const INDEX_FIELD: &str = "index";

/// Structural, open configuration value handed to a factory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    fields: HashMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field insertion, for inline option literals.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Sets a field, replacing any prior value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(name.into(), value.into());
    }

    /// Inserts a field only if it is currently absent.
    pub fn set_default(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.fields.entry(name.into()).or_insert_with(|| value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// Looks up a (possibly dotted) field path through nested maps.
    ///
    /// The first segment addresses a top-level field; remaining segments
    /// descend through `Value::Map` children, mirroring
    /// [`Value::get_path`].
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        match path.split_once('.') {
            None => self.fields.get(path),
            Some((head, rest)) => self.fields.get(head)?.get_path(rest),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// The stamped default index, if present.
    pub fn index(&self) -> Option<i64> {
        self.fields.get(INDEX_FIELD).and_then(Value::as_int)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Builds options from a `serde_json` object literal.
    ///
    /// Non-object values yield empty options; there is no meaningful field
    /// map to derive from them.
    pub fn from_json(json: serde_json::Value) -> Self {
        match Value::from(json) {
            Value::Map(fields) => Self { fields },
            _ => Self::default(),
        }
    }

    /// Consumes the options into a plain map value.
    pub fn into_value(self) -> Value {
        Value::Map(self.fields)
    }
}

impl From<HashMap<String, Value>> for Options {
    fn from(fields: HashMap<String, Value>) -> Self {
        Self { fields }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_default_never_overwrites() {
        let mut opts = Options::new().field(INDEX_FIELD, 7i64);
        opts.set_default(INDEX_FIELD, 0i64);
        assert_eq!(opts.index(), Some(7));
    }

    #[test]
    fn dotted_path_descends_nested_maps() {
        let opts = Options::from_json(json!({"profile": {"email": "a@b.c"}, "plain": 1}));
        assert_eq!(
            opts.get_path("profile.email").and_then(Value::as_str),
            Some("a@b.c")
        );
        assert_eq!(opts.get_path("plain").and_then(Value::as_int), Some(1));
        assert_eq!(opts.get_path("profile.phone"), None);
    }

    #[test]
    fn from_json_ignores_non_objects() {
        assert!(Options::from_json(json!([1, 2, 3])).is_empty());
        assert!(Options::from_json(json!("scalar")).is_empty());
    }
}
