//! Per-type-name monotonic index counters.

use std::collections::HashMap;

use crate::options::{Options, INDEX_FIELD};
use crate::value::Value;

/// Produces a monotonically increasing integer per type name, starting at
/// zero. Two counter scopes exist at runtime: one global counter shared by
/// an entire requester tree and one local counter owned by each requester
/// instance; both are plain `IndexCounter`s, the scoping lives in who holds
/// them.
#[derive(Debug, Clone, Default)]
pub struct IndexCounter {
    counts: HashMap<String, i64>,
}

impl IndexCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current count for `name`, then increments it.
    pub fn next_index(&mut self, name: &str) -> i64 {
        let count = self.counts.entry(name.to_string()).or_insert(0);
        let index = *count;
        *count += 1;
        index
    }

    /// Stamps the default `index` option.
    ///
    /// A slot is consumed unconditionally; the stamp itself only lands when
    /// no explicit index was supplied. Ordering of later `create` calls
    /// depends on the unconditional consumption: every pass through a
    /// stamping point advances the sequence whether or not the stamp took.
    pub fn stamp_default_index(&mut self, name: &str, options: &mut Options) {
        let index = self.next_index(name);
        if !options.contains(INDEX_FIELD) {
            options.set(INDEX_FIELD, Value::Int(index));
        }
    }

    /// Current count for a type name without consuming a slot.
    pub fn current(&self, name: &str) -> i64 {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_start_at_zero_per_type() {
        let mut counter = IndexCounter::new();
        assert_eq!(counter.next_index("user"), 0);
        assert_eq!(counter.next_index("user"), 1);
        assert_eq!(counter.next_index("message"), 0);
        assert_eq!(counter.next_index("user"), 2);
    }

    #[test]
    fn stamp_sets_only_when_absent() {
        let mut counter = IndexCounter::new();
        let mut opts = Options::new();
        counter.stamp_default_index("user", &mut opts);
        assert_eq!(opts.index(), Some(0));

        let mut explicit = Options::new().field(INDEX_FIELD, 9i64);
        counter.stamp_default_index("user", &mut explicit);
        assert_eq!(explicit.index(), Some(9));
    }

    #[test]
    fn stamp_consumes_a_slot_even_when_it_does_not_land() {
        let mut counter = IndexCounter::new();
        let mut explicit = Options::new().field(INDEX_FIELD, 9i64);
        counter.stamp_default_index("user", &mut explicit);
        // The skipped stamp still advanced the sequence.
        assert_eq!(counter.current("user"), 1);
        let mut opts = Options::new();
        counter.stamp_default_index("user", &mut opts);
        assert_eq!(opts.index(), Some(1));
    }
}
