//! fixtura: a declarative test-data fixture builder.
//!
//! Callers register named factories (optionally deduplicated by a natural
//! identity key) in a [`FixtureRegistry`], then request concrete instances
//! through a [`Scenario`]. Factories may request other fixtures inline via
//! the nested requester they receive, and the scenario tracks the actual
//! construction order in a [`BuildLedger`] while a per-type cache
//! guarantees at most one instance per identity.
//!
//! ```rust
//! use fixtura::{FixtureDefinition, FixtureRegistry, Options, Scenario, Value};
//! use serde_json::json;
//!
//! let mut registry = FixtureRegistry::new();
//! registry.define(
//!     "user",
//!     FixtureDefinition::new(|options, _fixtures| {
//!         let index = options.index().unwrap_or(0);
//!         Ok(Value::from_json(json!({ "username": format!("username{index}") })))
//!     })
//!     .with_key("username"),
//! );
//!
//! let mut scenario = Scenario::new(registry);
//! let user = scenario.with("user", Options::new()).unwrap();
//! assert_eq!(
//!     user.get_path("username").and_then(Value::as_str),
//!     Some("username0")
//! );
//! ```

pub use crate::errors::FixtureError;

pub mod cache;
pub mod counter;
pub mod errors;
pub mod getter;
pub mod identity;
pub mod ledger;
pub mod options;
pub mod registry;
pub mod requester;
pub mod scenario;
pub mod value;

pub use crate::getter::{FixtureGetter, FixtureSet};
pub use crate::ledger::{BuildLedger, BuildRecord};
pub use crate::options::{Options, INDEX_FIELD};
pub use crate::registry::{FactoryFn, FixtureDefinition, FixtureRegistry};
pub use crate::requester::FixtureRequester;
pub use crate::scenario::Scenario;
pub use crate::value::{KeyValue, Value};

/// Wraps a numbering function into a closure yielding `f(0), f(1), ...` on
/// successive calls. Handy for factories that generate numbered field
/// values.
///
/// ```rust
/// let mut next = fixtura::sequence(|i| format!("user{i}"));
/// assert_eq!(next(), "user0");
/// assert_eq!(next(), "user1");
/// ```
pub fn sequence<F>(mut f: F) -> impl FnMut() -> String
where
    F: FnMut(i64) -> String,
{
    let mut next = 0;
    move || {
        let value = f(next);
        next += 1;
        value
    }
}
