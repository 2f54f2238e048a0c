use std::collections::BTreeMap;

use crate::ids::EdgeKey;

/// Occurrence count and frozen weight of one canonical edge key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Number of parallel copies of the edge (at least 1).
    pub count: usize,
    /// Weight drawn when the key was first inserted.
    pub weight: i64,
}

/// Multiset of edges keyed by [`EdgeKey`].
///
/// Every generator writes into a store. The weight of a key is drawn once on
/// its first insertion; later insertions of the same key only bump the count,
/// so all parallel copies of a multi-edge share one weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeStore {
    directed: bool,
    entries: BTreeMap<EdgeKey, EdgeRecord>,
    total: usize,
}

impl EdgeStore {
    /// Creates an empty store that normalizes keys to `u <= v`.
    pub fn undirected() -> Self {
        Self::new(false)
    }

    /// Creates an empty store that keeps keys in insertion orientation.
    pub fn directed() -> Self {
        Self::new(true)
    }

    fn new(directed: bool) -> Self {
        Self {
            directed,
            entries: BTreeMap::new(),
            total: 0,
        }
    }

    /// Returns whether keys keep their orientation.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Builds the key under which `(u, v)` is stored.
    pub fn key(&self, u: usize, v: usize) -> EdgeKey {
        if self.directed {
            EdgeKey::directed(u, v)
        } else {
            EdgeKey::undirected(u, v)
        }
    }

    /// Inserts one occurrence of `(u, v)`.
    ///
    /// `weight` is only invoked when the key is new. Duplicates are accepted and
    /// counted; callers that forbid multi-edges must check [`Self::contains`]
    /// first.
    pub fn add_edge(&mut self, u: usize, v: usize, weight: impl FnOnce() -> i64) -> EdgeKey {
        let key = self.key(u, v);
        self.entries
            .entry(key)
            .and_modify(|record| record.count += 1)
            .or_insert_with(|| EdgeRecord {
                count: 1,
                weight: weight(),
            });
        self.total += 1;
        key
    }

    /// Removes one occurrence of `key`, deleting the entry when it reaches zero.
    ///
    /// Returns `false` when the key is not present.
    pub fn remove_one(&mut self, key: &EdgeKey) -> bool {
        let Some(record) = self.entries.get_mut(key) else {
            return false;
        };
        record.count -= 1;
        if record.count == 0 {
            self.entries.remove(key);
        }
        self.total -= 1;
        true
    }

    /// Returns whether `(u, v)` is present under this store's normalization.
    pub fn contains(&self, u: usize, v: usize) -> bool {
        self.entries.contains_key(&self.key(u, v))
    }

    /// Returns how many copies of `(u, v)` are stored.
    pub fn multiplicity(&self, u: usize, v: usize) -> usize {
        self.entries
            .get(&self.key(u, v))
            .map_or(0, |record| record.count)
    }

    /// Returns the record of `key`, if present.
    pub fn get(&self, key: &EdgeKey) -> Option<&EdgeRecord> {
        self.entries.get(key)
    }

    /// Number of distinct keys.
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }

    /// Number of edges counting multiplicity.
    pub fn total_len(&self) -> usize {
        self.total
    }

    /// Returns whether the store holds no edges.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over distinct keys in key order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey, &EdgeRecord)> + '_ {
        self.entries.iter().map(|(key, record)| (*key, record))
    }

    /// Lists every key once per stored occurrence, in key order.
    pub fn expanded(&self) -> Vec<EdgeKey> {
        let mut keys = Vec::with_capacity(self.total);
        for (key, record) in &self.entries {
            keys.extend(std::iter::repeat(*key).take(record.count));
        }
        keys
    }

    /// Restores a previously serialized record verbatim.
    pub(crate) fn insert_record(&mut self, key: EdgeKey, record: EdgeRecord) {
        if let Some(previous) = self.entries.insert(key, record) {
            self.total -= previous.count;
        }
        self.total += record.count;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undirected_keys_are_normalized() {
        let mut store = EdgeStore::undirected();
        let key = store.add_edge(5, 2, || 7);
        assert_eq!(key, EdgeKey { u: 2, v: 5 });
        assert!(store.contains(2, 5));
        assert!(store.contains(5, 2));
    }

    #[test]
    fn directed_keys_keep_orientation() {
        let mut store = EdgeStore::directed();
        store.add_edge(5, 2, || 1);
        assert!(store.contains(5, 2));
        assert!(!store.contains(2, 5));
    }

    #[test]
    fn weight_is_frozen_at_first_insertion() {
        let mut store = EdgeStore::undirected();
        let mut draws = 0;
        store.add_edge(1, 2, || {
            draws += 1;
            10
        });
        store.add_edge(2, 1, || {
            draws += 1;
            20
        });
        assert_eq!(draws, 1);
        assert_eq!(store.multiplicity(1, 2), 2);
        assert_eq!(store.get(&EdgeKey::undirected(1, 2)).unwrap().weight, 10);
        assert_eq!(store.total_len(), 2);
        assert_eq!(store.distinct_len(), 1);
    }

    #[test]
    fn remove_one_respects_multiplicity() {
        let mut store = EdgeStore::undirected();
        store.add_edge(1, 2, || 1);
        store.add_edge(1, 2, || 1);
        let key = EdgeKey::undirected(1, 2);
        assert!(store.remove_one(&key));
        assert_eq!(store.multiplicity(1, 2), 1);
        assert!(store.remove_one(&key));
        assert!(store.is_empty());
        assert!(!store.remove_one(&key));
        assert_eq!(store.total_len(), 0);
    }

    #[test]
    fn expanded_repeats_parallel_edges() {
        let mut store = EdgeStore::undirected();
        store.add_edge(3, 3, || 1);
        store.add_edge(1, 2, || 1);
        store.add_edge(1, 2, || 1);
        assert_eq!(
            store.expanded(),
            vec![
                EdgeKey::undirected(1, 2),
                EdgeKey::undirected(1, 2),
                EdgeKey::undirected(3, 3)
            ]
        );
    }
}
