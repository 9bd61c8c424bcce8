//! Phase 1-2: bucket passed records by (city, operation, property_type, colony).
//!
//! Groups hold indices into the run's record slice, never copies.

use casa_core::types::collections::{BTreeMap, FxHashMap};
use casa_core::types::{GroupKey, Record};

/// One partition of the run's records.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub key: GroupKey,
    /// Indices into the record slice the arena was built from, ascending.
    pub members: Vec<usize>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn records<'a>(&'a self, records: &'a [Record]) -> impl Iterator<Item = &'a Record> + 'a {
        self.members.iter().filter_map(move |&i| records.get(i))
    }
}

/// All groups of a run, in key order.
#[derive(Debug, Clone, Default)]
pub struct GroupArena {
    groups: Vec<Group>,
}

impl GroupArena {
    pub fn build(records: &[Record]) -> Self {
        let mut buckets: FxHashMap<GroupKey, Vec<usize>> = FxHashMap::default();

        // Phase 1: bucket by key
        for (i, record) in records.iter().enumerate() {
            buckets.entry(record.group_key()).or_default().push(i);
        }

        // Phase 2: deterministic order
        let ordered: BTreeMap<GroupKey, Vec<usize>> = buckets.into_iter().collect();
        let groups = ordered
            .into_iter()
            .map(|(key, members)| Group { key, members })
            .collect();

        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &GroupKey) -> Option<&Group> {
        self.groups
            .binary_search_by(|g| g.key.cmp(key))
            .ok()
            .map(|i| &self.groups[i])
    }
}
