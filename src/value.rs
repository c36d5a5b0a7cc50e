//! Runtime values for fixture instances and factory options.
//!
//! Every constructed fixture instance and every option field is a `Value`.
//! Values are deeply compositional: lists and maps can contain any other
//! value. `Nil` means absence; a `Nil` slot is never treated as a cached
//! instance or a usable identity value.

use std::fmt;

use im::HashMap;
use serde::{Deserialize, Serialize};

/// Canonical runtime value for fixture construction.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Absence of a value; default for unset slots.
    #[default]
    Nil,
    /// Boolean value.
    Bool(bool),
    /// Integer value (indices, counts, natural keys).
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// String value.
    Str(String),
    /// Ordered list of values.
    List(Vec<Value>),
    /// Map from field names to values (deeply compositional).
    Map(HashMap<String, Value>),
}

impl Value {
    /// Returns the type name of the value as a string (for diagnostics).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    /// Returns true if the value is Nil (absence semantics).
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained integer if this is an Int value, else None.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value, else None.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns a reference to the contained string if this is a Str value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns a reference to the contained map if this is a Map value.
    pub fn as_map(&self) -> Option<&HashMap<String, Value>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Returns the list as a slice if this is a List value.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Walks a dotted field path (`"profile.email"`) through nested maps.
    ///
    /// Returns None as soon as a segment is missing or a non-map value is
    /// reached before the path is exhausted.
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        let mut current = self;
        for segment in path.split('.') {
            let Value::Map(map) = current else { return None };
            let Some(next) = map.get(segment) else { return None };
            current = next;
        }
        Some(current)
    }

    /// Projects the value onto the hashable subset usable as an identity
    /// value. Non-scalar values (and Nil/Float) have no key form.
    pub fn as_key_value(&self) -> Option<KeyValue> {
        match self {
            Value::Int(i) => Some(KeyValue::Int(*i)),
            Value::Str(s) => Some(KeyValue::Str(s.clone())),
            Value::Bool(b) => Some(KeyValue::Bool(*b)),
            _ => None,
        }
    }

    /// Converts a `serde_json::Value` into a fixture value.
    pub fn from_json(json: serde_json::Value) -> Self {
        Value::from(json)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::List(items) => {
                write!(f, "[")?;
                let mut first = true;
                for item in items {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                    first = false;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                let mut first = true;
                for (k, v) in map.iter() {
                    if !first {
                        write!(f, ", ")?;
                    }
                    write!(f, "{k}: {v}")?;
                    first = false;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(0.0))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(entries) => Value::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

// ============================================================================
// KEY VALUES: the Eq + Hash subset usable for identity deduplication
// ============================================================================

/// An identity value: the scalar projection of a `Value` that can key a
/// cache map. Key values are scoped within a single type name, so values of
/// different fixture types never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Int(i64),
    Str(String),
    Bool(bool),
}

impl fmt::Display for KeyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyValue::Int(i) => write!(f, "{i}"),
            KeyValue::Str(s) => write!(f, "{s}"),
            KeyValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<i64> for KeyValue {
    fn from(i: i64) -> Self {
        KeyValue::Int(i)
    }
}

impl From<&str> for KeyValue {
    fn from(s: &str) -> Self {
        KeyValue::Str(s.to_string())
    }
}

impl From<String> for KeyValue {
    fn from(s: String) -> Self {
        KeyValue::Str(s)
    }
}

impl From<bool> for KeyValue {
    fn from(b: bool) -> Self {
        KeyValue::Bool(b)
    }
}

impl From<KeyValue> for Value {
    fn from(key: KeyValue) -> Self {
        match key {
            KeyValue::Int(i) => Value::Int(i),
            KeyValue::Str(s) => Value::Str(s),
            KeyValue::Bool(b) => Value::Bool(b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nil_is_absent_and_has_no_key_form() {
        assert!(Value::Nil.is_nil());
        assert_eq!(Value::Nil.as_key_value(), None);
    }

    #[test]
    fn scalar_key_projection() {
        assert_eq!(Value::Int(3).as_key_value(), Some(KeyValue::Int(3)));
        assert_eq!(
            Value::Str("username0".into()).as_key_value(),
            Some(KeyValue::Str("username0".into()))
        );
        assert_eq!(Value::List(vec![]).as_key_value(), None);
        assert_eq!(Value::Float(1.5).as_key_value(), None);
    }

    #[test]
    fn get_path_walks_nested_maps() {
        let v = Value::from_json(json!({"profile": {"email": "a@b.c"}}));
        assert_eq!(
            v.get_path("profile.email").and_then(Value::as_str),
            Some("a@b.c")
        );
        assert_eq!(v.get_path("profile.missing"), None);
        assert_eq!(v.get_path("profile.email.deeper"), None);
    }

    #[test]
    fn json_conversion_preserves_shape() {
        let v = Value::from_json(json!({"n": 1, "f": 1.5, "s": "x", "l": [true, null]}));
        let map = v.as_map().unwrap();
        assert_eq!(map.get("n"), Some(&Value::Int(1)));
        assert_eq!(map.get("f"), Some(&Value::Float(1.5)));
        assert_eq!(map.get("s"), Some(&Value::Str("x".into())));
        assert_eq!(
            map.get("l"),
            Some(&Value::List(vec![Value::Bool(true), Value::Nil]))
        );
    }
}
