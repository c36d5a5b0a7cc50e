//! Build ledger: append-only record of actual construction order.
//!
//! One entry per newly constructed instance; cache hits never append. The
//! order reflects when instances were built, not when they were requested,
//! so dependencies constructed inside a factory appear before the instance
//! that needed them. This is the primary observable for ordering
//! assertions.

use crate::value::Value;

/// One construction event: the type name and the instance it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildRecord {
    pub name: String,
    pub instance: Value,
}

#[derive(Debug, Default, Clone)]
pub struct BuildLedger {
    records: Vec<BuildRecord>,
}

impl BuildLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, name: &str, instance: Value) {
        self.records.push(BuildRecord {
            name: name.to_string(),
            instance,
        });
    }

    /// The full ordered construction sequence.
    pub fn records(&self) -> &[BuildRecord] {
        &self.records
    }

    /// Just the type names, in construction order.
    pub fn names(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BuildRecord> {
        self.records.iter()
    }
}

impl<'a> IntoIterator for &'a BuildLedger {
    type Item = &'a BuildRecord;
    type IntoIter = std::slice::Iter<'a, BuildRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
