//! Fixture requester: the construction core.
//!
//! A requester orchestrates factory invocation, recursive dependency
//! requests, and cache population. Every requester in a tree shares the
//! same registry, cache, ledger, and global counter by reference; each one
//! owns a fresh local counter, so request-local default numbering restarts
//! inside every factory while global ordering stays monotonic.
//!
//! The construction routine for a request:
//!
//! 1. Resolve the identity (natural key or stamped index).
//! 2. Cache fast path: a hit returns the cached instance with no factory
//!    call, no ledger entry, and no global slot consumed.
//! 3. Stamp the global default index (always consumes a slot).
//! 4. Invoke the factory with a nested requester; dependency requests made
//!    by the factory resolve fully before the outer instance exists.
//! 5. Append the instance to the ledger, then insert it into the cache.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cache::FixtureCache;
use crate::counter::IndexCounter;
use crate::errors::FixtureError;
use crate::identity;
use crate::ledger::BuildLedger;
use crate::options::Options;
use crate::registry::FixtureRegistry;
use crate::value::Value;

/// Default limit on nested dependency construction. Deep enough for any
/// sane fixture graph; cyclic factory graphs hit it instead of blowing the
/// stack.
pub const DEFAULT_MAX_DEPTH: usize = 64;

pub struct FixtureRequester {
    registry: Rc<FixtureRegistry>,
    local_counter: IndexCounter,
    global_counter: Rc<RefCell<IndexCounter>>,
    cache: Rc<RefCell<FixtureCache>>,
    ledger: Rc<RefCell<BuildLedger>>,
    depth: usize,
    max_depth: usize,
}

impl FixtureRequester {
    /// Root requester for a scenario. Its local counter persists across all
    /// top-level `with` calls.
    pub(crate) fn root(
        registry: Rc<FixtureRegistry>,
        global_counter: Rc<RefCell<IndexCounter>>,
        cache: Rc<RefCell<FixtureCache>>,
        ledger: Rc<RefCell<BuildLedger>>,
        max_depth: usize,
    ) -> Self {
        Self {
            registry,
            local_counter: IndexCounter::new(),
            global_counter,
            cache,
            ledger,
            depth: 0,
            max_depth,
        }
    }

    /// Requester handed to a factory: same shared state, fresh local
    /// counter, one level deeper.
    fn nested(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
            local_counter: IndexCounter::new(),
            global_counter: Rc::clone(&self.global_counter),
            cache: Rc::clone(&self.cache),
            ledger: Rc::clone(&self.ledger),
            depth: self.depth + 1,
            max_depth: self.max_depth,
        }
    }

    /// Requests a fixture, stamping a request-local default index first.
    ///
    /// This is the common path for both top-level requests and dependency
    /// requests issued from inside a factory. The local stamp supplies the
    /// index-tier identity; it is discarded when the options carry an
    /// explicit natural key.
    pub fn with(&mut self, name: &str, options: Options) -> Result<Value, FixtureError> {
        let mut options = options;
        self.local_counter.stamp_default_index(name, &mut options);
        self.add_fixture(name, options)
    }

    /// Requests a fixture numbered by the global counter directly.
    ///
    /// Use this to append an instance at the current global order position,
    /// after earlier fixtures already consumed global indices.
    pub fn create(&mut self, name: &str, options: Options) -> Result<Value, FixtureError> {
        let mut options = options;
        self.global_counter
            .borrow_mut()
            .stamp_default_index(name, &mut options);
        self.add_fixture(name, options)
    }

    fn add_fixture(&self, name: &str, mut options: Options) -> Result<Value, FixtureError> {
        if self.depth >= self.max_depth {
            return Err(FixtureError::DepthExceeded {
                name: name.to_string(),
                max_depth: self.max_depth,
            });
        }

        let definition = self.registry.definition(name)?.clone();
        let resolved = identity::resolve(name, &definition, &options)?;

        // Dedup fast path: checked before any side effect.
        if let Some(cached) = self.cache.borrow().get(name, &resolved.value) {
            return Ok(cached.clone());
        }

        // Every construction consumes exactly one global slot for its type,
        // whether the request arrived via `with` or `create`.
        self.global_counter
            .borrow_mut()
            .stamp_default_index(name, &mut options);

        let mut nested = self.nested();
        let instance = (definition.factory())(&options, &mut nested)?;

        self.ledger.borrow_mut().append(name, instance.clone());
        self.cache
            .borrow_mut()
            .insert(name, resolved.value, instance.clone());
        Ok(instance)
    }
}
