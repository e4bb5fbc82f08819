//! Open set for best-first search.
//!
//! A `BinaryHeap` keyed by [`FrontierKey`] gives O(log n) push and pop, so a
//! full A* run costs O(E log V) instead of the O(V²) of scanning a flat open
//! list for its minimum on every expansion.
//!
//! The heap never updates an entry in place. When a node's cost improves it
//! is pushed again with a fresh key, and the superseded entry is dropped when
//! it surfaces (lazy deletion). The caller decides what "superseded" means
//! through the predicate given to [`OpenSet::pop_best`].

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, NodeId};

/// A heap entry: the key a node was pushed with plus the cost it had then.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node_id: NodeId,
    g_cost: f64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Min-heap of node references with lazy deletion.
#[derive(Debug, Default)]
pub struct OpenSet {
    heap: BinaryHeap<FrontierEntry>,
    next_order: u64,
    high_water: u64,
    stale_discarded: u64,
}

impl OpenSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next insertion counter for a [`FrontierKey`].
    pub fn next_creation_order(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    /// Push `node_id` with its current key and cost.
    pub fn push(&mut self, node_id: NodeId, key: FrontierKey, g_cost: f64) {
        self.heap.push(FrontierEntry {
            key: Reverse(key),
            node_id,
            g_cost,
        });
        let size = self.heap.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Pop the best entry still considered current.
    ///
    /// `is_current(node_id, g_cost_at_push)` decides whether an entry is live;
    /// entries for which it returns `false` are discarded and counted.
    pub fn pop_best(&mut self, mut is_current: impl FnMut(NodeId, f64) -> bool) -> Option<NodeId> {
        while let Some(entry) = self.heap.pop() {
            if is_current(entry.node_id, entry.g_cost) {
                return Some(entry.node_id);
            }
            self.stale_discarded += 1;
        }
        None
    }

    /// Entries on the heap, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// High-water mark of heap size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Superseded entries dropped so far.
    #[must_use]
    pub fn stale_discarded(&self) -> u64 {
        self.stale_discarded
    }
}
