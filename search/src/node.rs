//! Search node and frontier ordering key.

use relplan_kernel::carrier::state::State;

/// A state waiting in (or popped from) the frontier.
///
/// Nodes own their state. Provenance (parent and producing action) lives in
/// the search loop's trail, indexed by `node_id`, so a node can be dropped
/// once expanded.
#[derive(Debug, Clone)]
pub struct SearchNode {
    /// Index into the trail. Assigned in creation order; root = 0.
    pub node_id: usize,
    pub parent_id: Option<usize>,
    pub state: State,
    /// Tree depth (root = 0).
    pub depth: u32,
    /// Path cost (+1 per applied action).
    pub g_cost: i64,
    /// Heuristic score of `state`.
    pub h_cost: i64,
    /// Frontier priority: `h_cost + weight * g_cost`.
    pub f_cost: i64,
}

impl SearchNode {
    /// The root node for `state`, scored `h_cost`.
    #[must_use]
    pub fn root(state: State, h_cost: i64) -> Self {
        Self {
            node_id: 0,
            parent_id: None,
            state,
            depth: 0,
            g_cost: 0,
            h_cost,
            f_cost: h_cost,
        }
    }

    /// A successor of `self` reached by one action.
    #[must_use]
    pub fn child(&self, node_id: usize, state: State, h_cost: i64, path_cost_weight: i64) -> Self {
        let g_cost = self.g_cost.saturating_add(1);
        Self {
            node_id,
            parent_id: Some(self.node_id),
            state,
            depth: self.depth.saturating_add(1),
            g_cost,
            h_cost,
            f_cost: h_cost.saturating_add(path_cost_weight.saturating_mul(g_cost)),
        }
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first, then shallower depth, then older node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct FrontierKey {
    pub f_cost: i64,
    pub depth: u32,
    pub creation_order: usize,
}

impl From<&SearchNode> for FrontierKey {
    fn from(node: &SearchNode) -> Self {
        Self {
            f_cost: node.f_cost,
            depth: node.depth,
            creation_order: node.node_id,
        }
    }
}
