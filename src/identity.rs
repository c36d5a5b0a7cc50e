//! Identity resolution: which (key, value) pair deduplicates a request.
//!
//! Two-tier resolution: a type's configured natural key wins when the
//! options carry a scalar value at that path; otherwise the stamped default
//! index identifies the instance. This lets callers dedupe by e.g. a
//! username while index-only types still get positional identity.

use crate::errors::FixtureError;
use crate::options::{Options, INDEX_FIELD};
use crate::registry::FixtureDefinition;
use crate::value::{KeyValue, Value};

/// A resolved identity: the key name that matched and its scalar value.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub key: String,
    pub value: KeyValue,
}

/// Resolves the identity of a request against a type's definition.
///
/// Values at the key path that have no scalar key form (maps, lists, nil)
/// are treated as absent and fall through to the index tier. The index is
/// stamped by the counters before any construction-path resolution, so
/// `MissingIndex` only surfaces if that contract is bypassed.
pub fn resolve(
    name: &str,
    definition: &FixtureDefinition,
    options: &Options,
) -> Result<Identity, FixtureError> {
    if let Some(value) = options
        .get_path(definition.key())
        .and_then(Value::as_key_value)
    {
        return Ok(Identity {
            key: definition.key().to_string(),
            value,
        });
    }

    let index = options.index().ok_or_else(|| FixtureError::MissingIndex {
        name: name.to_string(),
    })?;
    Ok(Identity {
        key: INDEX_FIELD.to_string(),
        value: KeyValue::Int(index),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(key: &str) -> FixtureDefinition {
        FixtureDefinition::new(|_, _| Ok(Value::Nil)).with_key(key)
    }

    #[test]
    fn natural_key_wins_over_index() {
        let options = Options::from_json(json!({"username": "alice", "index": 4}));
        let identity = resolve("user", &keyed("username"), &options).unwrap();
        assert_eq!(identity.key, "username");
        assert_eq!(identity.value, KeyValue::Str("alice".into()));
    }

    #[test]
    fn absent_key_falls_back_to_index() {
        let options = Options::from_json(json!({"index": 2}));
        let identity = resolve("user", &keyed("username"), &options).unwrap();
        assert_eq!(identity.key, INDEX_FIELD);
        assert_eq!(identity.value, KeyValue::Int(2));
    }

    #[test]
    fn non_scalar_key_value_falls_back_to_index() {
        let options = Options::from_json(json!({"username": {"nested": true}, "index": 0}));
        let identity = resolve("user", &keyed("username"), &options).unwrap();
        assert_eq!(identity.key, INDEX_FIELD);
    }

    #[test]
    fn dotted_key_path_resolves_through_nested_maps() {
        let options = Options::from_json(json!({"profile": {"email": "a@b.c"}, "index": 0}));
        let identity = resolve("user", &keyed("profile.email"), &options).unwrap();
        assert_eq!(identity.key, "profile.email");
        assert_eq!(identity.value, KeyValue::Str("a@b.c".into()));
    }

    #[test]
    fn missing_index_is_reported() {
        let options = Options::new();
        let err = resolve("user", &keyed("username"), &options).unwrap_err();
        assert_eq!(
            err,
            FixtureError::MissingIndex {
                name: "user".into()
            }
        );
    }
}
