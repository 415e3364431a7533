//! Inter-cluster distance records and the closest-pair cache.
//!
//! The engine needs two things from its cache: *pop the globally closest
//! pair* and *drop every pair touching cluster C*. [`DistanceCache`] is a
//! binary min-heap with lazy deletion:
//!
//! - every live cluster carries a version;
//! - an entry remembers the versions of both clusters at insertion time;
//! - invalidating a cluster bumps its version, so all of its entries go stale
//!   at once and are skipped when they reach the top of the heap.
//!
//! Stale entries are compacted away once they outnumber the live ones, which
//! keeps memory at `O(N²)` for `N` live clusters.
//!
//! Ordering is `(distance, insertion sequence)`: among equal distances, the
//! older entry pops first. That is the order a stable sort of an append-only
//! list would produce.

use core::cmp::Ordering;
use core::fmt;
use std::collections::{BinaryHeap, HashMap};

/// Identifier the engine assigns to each cluster it allocates.
///
/// Allocated monotonically and never reused within one engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw id value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Cached distance between two clusters.
///
/// When the pair is merged, `first` survives and absorbs `second`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusterDistance {
    first: ClusterId,
    second: ClusterId,
    distance: f64,
}

impl ClusterDistance {
    /// Pair `first` and `second` at `distance`.
    pub fn new(first: ClusterId, second: ClusterId, distance: f64) -> Self {
        Self {
            first,
            second,
            distance,
        }
    }

    /// Cluster that survives a merge of this pair.
    pub fn first(&self) -> ClusterId {
        self.first
    }

    /// Cluster that is absorbed by a merge of this pair.
    pub fn second(&self) -> ClusterId {
        self.second
    }

    /// Kernel distance between the two centers.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Whether `id` is one side of the pair.
    pub fn involves(&self, id: ClusterId) -> bool {
        self.first == id || self.second == id
    }

    /// Ascending order on distance alone.
    pub fn cmp_distance(&self, other: &Self) -> Ordering {
        self.distance.total_cmp(&other.distance)
    }
}

impl fmt::Display for ClusterDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dist({})", self.distance)
    }
}

#[derive(Debug, Clone)]
struct Entry {
    pair: ClusterDistance,
    seq: u64,
    first_version: u64,
    second_version: u64,
}

impl Entry {
    fn is_live(&self, versions: &HashMap<ClusterId, u64>) -> bool {
        versions.get(&self.pair.first) == Some(&self.first_version)
            && versions.get(&self.pair.second) == Some(&self.second_version)
    }
}

// Reversed: `BinaryHeap` is a max-heap and we want the smallest distance,
// then the oldest entry, on top.
impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .pair
            .cmp_distance(&self.pair)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Entry {}

/// Stale entries tolerated on top of the live ones before compacting.
const COMPACT_SLACK: usize = 16;

/// Closest-pair cache over the live clusters.
#[derive(Debug, Clone, Default)]
pub(crate) struct DistanceCache {
    heap: BinaryHeap<Entry>,
    versions: HashMap<ClusterId, u64>,
    next_seq: u64,
}

impl DistanceCache {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Start tracking `id`.
    pub(crate) fn register(&mut self, id: ClusterId) {
        let _ = self.versions.insert(id, 0);
    }

    /// Every entry touching `id` goes stale; `id` stays tracked.
    pub(crate) fn invalidate(&mut self, id: ClusterId) {
        if let Some(v) = self.versions.get_mut(&id) {
            *v += 1;
        }
    }

    /// Stop tracking `id`; its entries go stale.
    pub(crate) fn forget(&mut self, id: ClusterId) {
        let _ = self.versions.remove(&id);
    }

    /// Cache the distance between two tracked clusters.
    ///
    /// Untracked ids are ignored.
    pub(crate) fn insert(&mut self, first: ClusterId, second: ClusterId, distance: f64) {
        let (Some(&first_version), Some(&second_version)) =
            (self.versions.get(&first), self.versions.get(&second))
        else {
            return;
        };
        self.heap.push(Entry {
            pair: ClusterDistance::new(first, second, distance),
            seq: self.next_seq,
            first_version,
            second_version,
        });
        self.next_seq += 1;
        self.maybe_compact();
    }

    /// Remove and return the closest live pair.
    pub(crate) fn pop_min(&mut self) -> Option<ClusterDistance> {
        while let Some(entry) = self.heap.pop() {
            if entry.is_live(&self.versions) {
                return Some(entry.pair);
            }
        }
        None
    }

    /// Closest live pair, without removing it.
    pub(crate) fn peek_min(&self) -> Option<ClusterDistance> {
        self.heap
            .iter()
            .filter(|e| e.is_live(&self.versions))
            .max()
            .map(|e| e.pair)
    }

    /// Number of live entries.
    pub(crate) fn len(&self) -> usize {
        self.heap
            .iter()
            .filter(|e| e.is_live(&self.versions))
            .count()
    }

    /// Live entries, in no particular order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = ClusterDistance> + '_ {
        self.heap
            .iter()
            .filter(|e| e.is_live(&self.versions))
            .map(|e| e.pair)
    }

    /// Entries held, stale ones included.
    #[cfg(test)]
    pub(crate) fn footprint(&self) -> usize {
        self.heap.len()
    }

    pub(crate) fn clear(&mut self) {
        self.heap.clear();
        self.versions.clear();
        self.next_seq = 0;
    }

    fn maybe_compact(&mut self) {
        let n = self.versions.len();
        let pairs = n * n.saturating_sub(1) / 2;
        if self.heap.len() <= 2 * pairs + COMPACT_SLACK {
            return;
        }
        let before = self.heap.len();
        let versions = &self.versions;
        self.heap.retain(|e| e.is_live(versions));
        log::debug!(
            "compacted distance cache: {} -> {} entries ({} live clusters)",
            before,
            self.heap.len(),
            n
        );
    }
}
