//! Scenario wiring: one logical test scenario's worth of shared state.
//!
//! A `Scenario` owns the registry, cache, ledger, and global counter for a
//! single requester tree, plus the persistent root requester. Scenarios are
//! created fresh per test and never persist; running several scenarios side
//! by side cannot cross-contaminate because nothing here is process-global.

use std::cell::RefCell;
use std::rc::Rc;

use crate::cache::FixtureCache;
use crate::counter::IndexCounter;
use crate::errors::FixtureError;
use crate::getter::FixtureGetter;
use crate::ledger::BuildLedger;
use crate::options::Options;
use crate::registry::FixtureRegistry;
use crate::requester::{FixtureRequester, DEFAULT_MAX_DEPTH};
use crate::value::Value;

pub struct Scenario {
    registry: Rc<FixtureRegistry>,
    cache: Rc<RefCell<FixtureCache>>,
    ledger: Rc<RefCell<BuildLedger>>,
    root: FixtureRequester,
}

impl Scenario {
    /// Builds a scenario over a fully populated registry. The registry is
    /// immutable from here on; define every type before constructing the
    /// scenario.
    pub fn new(registry: FixtureRegistry) -> Self {
        Self::with_max_depth(registry, DEFAULT_MAX_DEPTH)
    }

    /// Same, with a custom dependency depth limit.
    pub fn with_max_depth(registry: FixtureRegistry, max_depth: usize) -> Self {
        let registry = Rc::new(registry);
        let global_counter = Rc::new(RefCell::new(IndexCounter::new()));
        let cache = Rc::new(RefCell::new(FixtureCache::new()));
        let ledger = Rc::new(RefCell::new(BuildLedger::new()));
        let root = FixtureRequester::root(
            Rc::clone(&registry),
            global_counter,
            Rc::clone(&cache),
            Rc::clone(&ledger),
            max_depth,
        );
        Self {
            registry,
            cache,
            ledger,
            root,
        }
    }

    /// Requests a fixture through the root requester's local numbering.
    pub fn with(&mut self, name: &str, options: Options) -> Result<Value, FixtureError> {
        self.root.with(name, options)
    }

    /// Requests a fixture numbered at the current global order position.
    pub fn create(&mut self, name: &str, options: Options) -> Result<Value, FixtureError> {
        self.root.create(name, options)
    }

    /// The persistent root requester, for callers that want to hold it
    /// directly.
    pub fn requester(&mut self) -> &mut FixtureRequester {
        &mut self.root
    }

    /// Read-side projection over everything built so far.
    pub fn getter(&self) -> FixtureGetter {
        FixtureGetter::new(Rc::clone(&self.registry), Rc::clone(&self.cache))
    }

    /// Snapshot of the construction ledger.
    pub fn ledger(&self) -> BuildLedger {
        self.ledger.borrow().clone()
    }

    /// Construction order as owned type names, for assertions.
    pub fn ledger_names(&self) -> Vec<String> {
        self.ledger
            .borrow()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }
}
