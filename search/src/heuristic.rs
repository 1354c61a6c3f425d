//! Backward-chaining dependency-graph heuristic.
//!
//! # Construction
//!
//! Built once per search run from the goal and the schema library. Every
//! goal fact becomes a root [`DependencyNode::Relation`] targeting that exact
//! fully-bound relation (negated for `truth = false` goal facts).
//!
//! - A relation node with remaining depth `d > 0` looks for every schema
//!   effect that can produce its target: positive effects for an asserted
//!   target, negative effects for a negated one. Each match pins the
//!   schema's Free slots the target fixes to literals
//!   ([`ActionSchema::bind_variables`]) and links an action node at depth
//!   `d - 1`.
//! - An action node with remaining depth `d > 0` links one relation node per
//!   precondition (positive and negative) at depth `d - 1`.
//!
//! # Memoization
//!
//! Relation nodes are keyed by target template, action nodes by schema
//! content. A memo hit reuses the existing node. A hit on a node still under
//! construction is not linked, which keeps the graph acyclic. Memo tables
//! belong to one graph and are dropped with it.
//!
//! # Scoring
//!
//! - relation: 0 if the target is fully bound and its presence in the state
//!   matches the required truth; otherwise `1 + sum(dependents)` (1 with no
//!   dependents)
//! - action: `sum(dependents)`
//!
//! A state's score is the sum over the roots.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt::Write as _;
use std::sync::Arc;

use relplan_kernel::carrier::ident::Ident;
use relplan_kernel::carrier::relation::{RelationTemplate, Variable};
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::NameLookup;
use relplan_kernel::operators::schema::ActionSchema;

use crate::scorer::StateScorer;

/// Arena index of a [`DependencyNode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub usize);

#[derive(Debug, Clone)]
pub enum DependencyNode {
    /// A relation that must hold, with the actions that could make it hold.
    Relation {
        target: RelationTemplate,
        dependents: Vec<NodeId>,
    },
    /// A (possibly partially bound) schema, with its preconditions.
    Action {
        schema: Arc<ActionSchema>,
        dependents: Vec<NodeId>,
    },
}

impl DependencyNode {
    #[must_use]
    pub fn dependents(&self) -> &[NodeId] {
        match self {
            Self::Relation { dependents, .. } | Self::Action { dependents, .. } => dependents,
        }
    }

    fn dependents_mut(&mut self) -> &mut Vec<NodeId> {
        match self {
            Self::Relation { dependents, .. } | Self::Action { dependents, .. } => dependents,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DependencyGraph {
    nodes: Vec<DependencyNode>,
    roots: Vec<NodeId>,
}

impl DependencyGraph {
    /// Build the graph for `goal` over `schemas` with expansion budget
    /// `depth`. `names` only affects the derived names of bound schemas.
    #[must_use]
    pub fn build(goal: &State, schemas: &[Arc<ActionSchema>], depth: u32, names: &dyn NameLookup) -> Self {
        let mut builder = GraphBuilder {
            schemas,
            names,
            nodes: Vec::new(),
            relation_memo: HashMap::new(),
            action_memo: HashMap::new(),
            in_progress: HashSet::new(),
        };
        let roots = goal
            .facts()
            .map(|fact| builder.relation(RelationTemplate::from_fact(fact), depth))
            .collect();
        let graph = Self {
            nodes: builder.nodes,
            roots,
        };
        tracing::debug!(
            roots = graph.roots.len(),
            relations = graph.relation_count(),
            actions = graph.action_count(),
            depth,
            "dependency graph built"
        );
        tracing::trace!(tree = %graph.render(names), "dependency graph");
        graph
    }

    #[must_use]
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    #[must_use]
    pub fn node(&self, id: NodeId) -> Option<&DependencyNode> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn relation_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, DependencyNode::Relation { .. }))
            .count()
    }

    #[must_use]
    pub fn action_count(&self) -> usize {
        self.nodes.len() - self.relation_count()
    }

    /// Sum of root scores against `state`.
    #[must_use]
    pub fn score(&self, state: &State) -> i64 {
        let mut cache: Vec<Option<i64>> = vec![None; self.nodes.len()];
        self.roots.iter().map(|&root| self.score_node(root, state, &mut cache)).sum()
    }

    fn score_node(&self, id: NodeId, state: &State, cache: &mut Vec<Option<i64>>) -> i64 {
        if let Some(score) = cache[id.0] {
            return score;
        }
        let score = match &self.nodes[id.0] {
            DependencyNode::Relation { target, dependents } => {
                // Free slots make `substitute(&[])` fail, so partially bound
                // targets are never met.
                let met = target
                    .substitute(&[])
                    .is_some_and(|fact| state.contains(&fact) != target.negated);
                if met {
                    0
                } else {
                    let below: i64 = dependents.iter().map(|&d| self.score_node(d, state, cache)).sum();
                    1 + below
                }
            }
            DependencyNode::Action { dependents, .. } => {
                dependents.iter().map(|&d| self.score_node(d, state, cache)).sum()
            }
        };
        cache[id.0] = Some(score);
        score
    }

    /// Indented tree, one node per line. A node reached a second time is
    /// printed with `(shared)` and not descended into again.
    #[must_use]
    pub fn render(&self, names: &dyn NameLookup) -> String {
        let mut out = String::new();
        let mut seen = HashSet::new();
        for &root in &self.roots {
            self.render_node(root, 0, names, &mut seen, &mut out);
        }
        out
    }

    fn render_node(
        &self,
        id: NodeId,
        indent: usize,
        names: &dyn NameLookup,
        seen: &mut HashSet<NodeId>,
        out: &mut String,
    ) {
        let label = match &self.nodes[id.0] {
            DependencyNode::Relation { target, .. } => target.render(names),
            DependencyNode::Action { schema, .. } => schema.signature(names),
        };
        let first = seen.insert(id);
        let _ = writeln!(
            out,
            "{:indent$}{label}{}",
            "",
            if first { "" } else { " (shared)" },
            indent = indent * 2
        );
        if first {
            for &child in self.nodes[id.0].dependents() {
                self.render_node(child, indent + 1, names, seen, out);
            }
        }
    }
}

struct GraphBuilder<'a> {
    schemas: &'a [Arc<ActionSchema>],
    names: &'a dyn NameLookup,
    nodes: Vec<DependencyNode>,
    relation_memo: HashMap<RelationTemplate, NodeId>,
    action_memo: HashMap<Arc<ActionSchema>, NodeId>,
    in_progress: HashSet<NodeId>,
}

impl GraphBuilder<'_> {
    fn push(&mut self, node: DependencyNode) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    fn link(&mut self, parent: NodeId, child: NodeId) {
        if self.in_progress.contains(&child) {
            return;
        }
        let dependents = self.nodes[parent.0].dependents_mut();
        if !dependents.contains(&child) {
            dependents.push(child);
        }
    }

    fn relation(&mut self, target: RelationTemplate, depth: u32) -> NodeId {
        if let Some(&id) = self.relation_memo.get(&target) {
            return id;
        }
        let id = self.push(DependencyNode::Relation {
            target: target.clone(),
            dependents: Vec::new(),
        });
        self.relation_memo.insert(target.clone(), id);
        if depth > 0 {
            self.in_progress.insert(id);
            let schemas = self.schemas;
            for schema in schemas {
                let effects = if target.negated { schema.neg_eff() } else { schema.pos_eff() };
                for effect in effects {
                    let Some(bindings) = producer_bindings(effect, &target) else {
                        continue;
                    };
                    match schema.bind_variables(&bindings, self.names) {
                        Ok(bound) => {
                            let child = self.action(bound, depth - 1);
                            self.link(id, child);
                        }
                        Err(e) => {
                            tracing::debug!(schema = schema.name(), error = %e, "skipping unbindable producer");
                        }
                    }
                }
            }
            self.in_progress.remove(&id);
        }
        id
    }

    fn action(&mut self, schema: ActionSchema, depth: u32) -> NodeId {
        let schema = Arc::new(schema);
        if let Some(&id) = self.action_memo.get(&schema) {
            return id;
        }
        let id = self.push(DependencyNode::Action {
            schema: Arc::clone(&schema),
            dependents: Vec::new(),
        });
        self.action_memo.insert(Arc::clone(&schema), id);
        if depth > 0 {
            self.in_progress.insert(id);
            for pre in schema.pos_pre().iter().chain(schema.neg_pre()) {
                let child = self.relation(pre.clone(), depth - 1);
                self.link(id, child);
            }
            self.in_progress.remove(&id);
        }
        id
    }
}

/// If `effect` can produce `target`, the literals the target pins onto the
/// effect's Free slots.
///
/// A slot matches when the effect slot is Free, or both are Bound to the
/// same identifier. A Bound effect slot never matches a Free target slot. A
/// Free effect variable pinned to two different literals does not match.
fn producer_bindings(effect: &RelationTemplate, target: &RelationTemplate) -> Option<BTreeMap<usize, Ident>> {
    if effect.negated != target.negated {
        return None;
    }
    let mut bindings = BTreeMap::new();
    for (e, t) in effect.slots().into_iter().zip(target.slots()) {
        match (e, t) {
            (Variable::Bound(x), Variable::Bound(y)) if x == y => {}
            (Variable::Bound(_), _) => return None,
            (Variable::Free { index, .. }, Variable::Bound(y)) => {
                if let Some(prev) = bindings.insert(*index, *y) {
                    if prev != *y {
                        return None;
                    }
                }
            }
            (Variable::Free { .. }, Variable::Free { .. }) => {}
        }
    }
    Some(bindings)
}

/// [`StateScorer`] over a [`DependencyGraph`].
#[derive(Debug, Clone)]
pub struct DependencyGraphScorer {
    graph: DependencyGraph,
}

impl DependencyGraphScorer {
    #[must_use]
    pub fn new(goal: &State, schemas: &[Arc<ActionSchema>], depth: u32, names: &dyn NameLookup) -> Self {
        Self {
            graph: DependencyGraph::build(goal, schemas, depth, names),
        }
    }

    #[must_use]
    pub fn graph(&self) -> &DependencyGraph {
        &self.graph
    }
}

impl StateScorer for DependencyGraphScorer {
    fn score(&self, state: &State) -> i64 {
        self.graph.score(state)
    }
}
