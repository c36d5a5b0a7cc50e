//! Fixture error taxonomy.
//!
//! Everything here is fatal: requesting before defining, exceeding the
//! dependency depth limit, or a factory refusing to construct. Nothing is
//! retried or swallowed; errors propagate synchronously out of `with` /
//! `create` and out of any enclosing factory call.

use miette::Diagnostic;
use thiserror::Error;

/// The single error type for all fixture operations.
#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
pub enum FixtureError {
    /// Requested type name was never registered.
    #[error("unknown fixture type `{name}`")]
    #[diagnostic(
        code(fixtura::registry::unknown_type),
        help("define the type with `FixtureRegistry::define` before requesting it")
    )]
    UnknownType { name: String },

    /// Nested dependency construction exceeded the depth limit, which in
    /// practice means mutually dependent factories form a cycle.
    #[error("dependency depth limit of {max_depth} exceeded while building `{name}`")]
    #[diagnostic(
        code(fixtura::requester::depth_exceeded),
        help("factories that request each other recurse forever; break the cycle or raise the limit with `Scenario::with_max_depth`")
    )]
    DepthExceeded { name: String, max_depth: usize },

    /// Identity resolution ran on options that were never stamped with a
    /// default index. The requester always stamps before resolving, so
    /// seeing this indicates a bypassed construction path.
    #[error("no default index stamped for `{name}` before identity resolution")]
    #[diagnostic(code(fixtura::identity::missing_index))]
    MissingIndex { name: String },

    /// A caller-supplied factory reported a domain failure.
    #[error("factory for `{name}` failed: {message}")]
    #[diagnostic(code(fixtura::requester::factory_failed))]
    FactoryFailure { name: String, message: String },
}

impl FixtureError {
    pub fn unknown_type(name: impl Into<String>) -> Self {
        FixtureError::UnknownType { name: name.into() }
    }

    /// Convenience constructor for factories reporting their own failures.
    pub fn factory_failure(name: impl Into<String>, message: impl Into<String>) -> Self {
        FixtureError::FactoryFailure {
            name: name.into(),
            message: message.into(),
        }
    }
}
