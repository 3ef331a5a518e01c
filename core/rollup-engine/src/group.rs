//! FILENAME: core/rollup-engine/src/group.rs
//! Grouping primitives shared by the roll-ups.
//!
//! Keys are borrowed from the input records, so a pass over the ledger
//! allocates one accumulator per group and nothing per row.

use std::cmp::Ordering;
use std::hash::Hash;

use rustc_hash::{FxHashMap, FxHashSet};

// ============================================================================
// GROUP INDEX
// ============================================================================

/// Maps each distinct key to an accumulator, remembering the order in which
/// keys were first seen (group-discovery order).
#[derive(Debug)]
pub(crate) struct GroupIndex<K, A> {
    slots: FxHashMap<K, usize>,
    groups: Vec<(K, A)>,
}

impl<K, A> GroupIndex<K, A>
where
    K: Copy + Eq + Hash,
    A: Default,
{
    pub(crate) fn new() -> Self {
        GroupIndex {
            slots: FxHashMap::default(),
            groups: Vec::new(),
        }
    }

    /// Returns the accumulator for `key`, creating it on first sight.
    pub(crate) fn entry(&mut self, key: K) -> &mut A {
        let next = self.groups.len();
        let slot = *self.slots.entry(key).or_insert(next);
        if slot == next {
            self.groups.push((key, A::default()));
        }
        &mut self.groups[slot].1
    }

    /// Consumes the index, yielding groups in discovery order.
    pub(crate) fn into_groups(self) -> Vec<(K, A)> {
        self.groups
    }
}

// ============================================================================
// ACCUMULATORS
// ============================================================================

/// Distinct members seen for one group (orders per day, customers per city).
#[derive(Debug)]
pub(crate) struct DistinctSet<'a> {
    members: FxHashSet<&'a str>,
}

impl<'a> Default for DistinctSet<'a> {
    fn default() -> Self {
        DistinctSet {
            members: FxHashSet::default(),
        }
    }
}

impl<'a> DistinctSet<'a> {
    pub(crate) fn insert(&mut self, member: &'a str) {
        self.members.insert(member);
    }

    pub(crate) fn count(&self) -> u64 {
        self.members.len() as u64
    }
}

/// Counts rows per string key.
pub(crate) fn count_rows<'a, I>(keys: I) -> GroupIndex<&'a str, u64>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: GroupIndex<&'a str, u64> = GroupIndex::new();
    for key in keys {
        *index.entry(key) += 1;
    }
    index
}

/// Counts distinct members per string key.
pub(crate) fn count_distinct<'a, I>(pairs: I) -> GroupIndex<&'a str, DistinctSet<'a>>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut index: GroupIndex<&'a str, DistinctSet<'a>> = GroupIndex::new();
    for (key, member) in pairs {
        index.entry(key).insert(member);
    }
    index
}

// ============================================================================
// RANKING
// ============================================================================

/// Ranking order for count tables: count descending, then key ascending.
/// The key tie-break makes the order total, so equal counts always come out
/// the same way regardless of input order or hash seed.
pub(crate) fn by_count_desc(a: (&str, u64), b: (&str, u64)) -> Ordering {
    b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Ascending counterpart of `by_count_desc`: count ascending, then key
/// ascending.
pub(crate) fn by_count_asc(a: (&str, u64), b: (&str, u64)) -> Ordering {
    a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0))
}
