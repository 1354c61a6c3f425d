//! Best-first frontier (Open) with the Closed state set.
//!
//! Closed holds the packed fact keys of every state ever generated, so
//! identity is full fact-set equality rather than node identity. A state
//! enters Closed when first generated and is never reopened.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashSet};

use relplan_kernel::carrier::state::State;

use crate::node::{FrontierKey, SearchNode};

/// `BinaryHeap` is a max-heap, so entries order by `Reverse<FrontierKey>`.
#[derive(Debug)]
struct FrontierEntry {
    key: Reverse<FrontierKey>,
    node: SearchNode,
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

#[derive(Debug, Default)]
pub struct BestFirstFrontier {
    heap: BinaryHeap<FrontierEntry>,
    closed: HashSet<Vec<u64>>,
    high_water: usize,
}

impl BestFirstFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `state` closed. Returns `false` if it already was.
    pub fn close(&mut self, state: &State) -> bool {
        self.closed.insert(state.fact_keys())
    }

    #[must_use]
    pub fn is_closed(&self, state: &State) -> bool {
        self.closed.contains(&state.fact_keys())
    }

    pub fn push(&mut self, node: SearchNode) {
        self.heap.push(FrontierEntry {
            key: Reverse(FrontierKey::from(&node)),
            node,
        });
        self.high_water = self.high_water.max(self.heap.len());
    }

    /// Pop the node with the lowest key.
    #[must_use]
    pub fn pop(&mut self) -> Option<SearchNode> {
        self.heap.pop().map(|e| e.node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    #[must_use]
    pub fn closed_len(&self) -> usize {
        self.closed.len()
    }

    /// Largest Open size observed.
    #[must_use]
    pub fn high_water(&self) -> usize {
        self.high_water
    }
}
