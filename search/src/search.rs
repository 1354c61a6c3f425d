//! Search entry point and expansion loop.

use std::fmt;
use std::sync::Arc;

use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::NumericNames;
use relplan_kernel::operators::apply::apply;
use relplan_kernel::operators::ground::ground_all;
use relplan_kernel::operators::instance::ActionInstance;
use relplan_kernel::operators::schema::ActionSchema;

use crate::error::SearchError;
use crate::frontier::BestFirstFrontier;
use crate::heuristic::DependencyGraphScorer;
use crate::node::SearchNode;
use crate::policy::SearchPolicy;
use crate::scorer::StateScorer;

/// Why the search loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A generated successor satisfied the goal.
    GoalReached { node_id: usize },
    /// The initial state already satisfied the goal; nothing was expanded.
    GoalSatisfiedAtRoot,
    /// Open emptied without reaching the goal.
    FrontierExhausted,
    /// `max_expansions` nodes were expanded without reaching the goal.
    ExpansionBudgetExceeded,
}

impl TerminationReason {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::GoalSatisfiedAtRoot => "goal_satisfied_at_root",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::ExpansionBudgetExceeded => "expansion_budget_exceeded",
        }
    }

    #[must_use]
    pub const fn is_goal(&self) -> bool {
        matches!(self, Self::GoalReached { .. } | Self::GoalSatisfiedAtRoot)
    }
}

impl fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counters collected over one search run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from Open and grounded.
    pub expansions: u64,
    /// Ground action instances produced across all expansions.
    pub generated: u64,
    /// Successors dropped because their state was already closed.
    pub duplicates: u64,
    /// Nodes popped at `max_depth` and not expanded.
    pub depth_skips: u64,
    pub frontier_high_water: usize,
    /// Nodes created, root included.
    pub nodes_created: usize,
}

#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Actions in execution order; `None` unless the goal was reached.
    pub plan: Option<Vec<ActionInstance>>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
}

impl SearchResult {
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        self.termination.is_goal()
    }
}

/// Parent pointer for one created node, indexed by node id.
struct PathLink {
    parent: Option<usize>,
    action: Option<ActionInstance>,
}

/// Best-first search from `initial` toward `goal`.
///
/// Every state is closed when it is first generated, so no state is
/// expanded twice and a later, cheaper path to it is ignored. Ties on
/// `f_cost` break by depth, then creation order.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] only for pre-flight policy
/// validation failures. Exhaustion and budget limits are reported through
/// [`SearchResult::termination`].
pub fn search(
    initial: &State,
    goal: &State,
    schemas: &[Arc<ActionSchema>],
    policy: &SearchPolicy,
    scorer: &dyn StateScorer,
) -> Result<SearchResult, SearchError> {
    policy.validate()?;

    let mut stats = SearchStats {
        nodes_created: 1,
        ..SearchStats::default()
    };

    if initial.satisfies(goal) {
        tracing::info!(reason = "goal_satisfied_at_root", "search finished");
        return Ok(SearchResult {
            plan: Some(Vec::new()),
            termination: TerminationReason::GoalSatisfiedAtRoot,
            stats,
        });
    }

    let mut frontier = BestFirstFrontier::new();
    frontier.close(initial);
    frontier.push(SearchNode::root(initial.clone(), scorer.score(initial)));
    let mut trail = vec![PathLink {
        parent: None,
        action: None,
    }];

    let termination = 'search: loop {
        if stats.expansions >= policy.max_expansions {
            break TerminationReason::ExpansionBudgetExceeded;
        }
        let Some(current) = frontier.pop() else {
            break TerminationReason::FrontierExhausted;
        };
        if current.depth >= policy.max_depth {
            stats.depth_skips += 1;
            continue;
        }

        stats.expansions += 1;
        let instances = ground_all(schemas, &current.state);
        stats.generated += instances.len() as u64;
        tracing::debug!(
            node_id = current.node_id,
            f_cost = current.f_cost,
            depth = current.depth,
            successors = instances.len(),
            "expand"
        );

        for instance in instances {
            let next = apply(&current.state, &instance);
            if !frontier.close(&next) {
                stats.duplicates += 1;
                continue;
            }
            let node_id = trail.len();
            trail.push(PathLink {
                parent: Some(current.node_id),
                action: Some(instance),
            });
            stats.nodes_created += 1;
            if next.satisfies(goal) {
                break 'search TerminationReason::GoalReached { node_id };
            }
            let h_cost = scorer.score(&next);
            frontier.push(current.child(node_id, next, h_cost, policy.path_cost_weight));
        }
    };

    stats.frontier_high_water = frontier.high_water();
    let plan = match termination {
        TerminationReason::GoalReached { node_id } => Some(reconstruct_path(&trail, node_id)),
        _ => None,
    };
    tracing::info!(
        reason = termination.as_str(),
        expansions = stats.expansions,
        generated = stats.generated,
        duplicates = stats.duplicates,
        nodes = stats.nodes_created,
        plan_len = plan.as_ref().map(Vec::len),
        "search finished"
    );
    Ok(SearchResult {
        plan,
        termination,
        stats,
    })
}

/// Follow parent links from `node_id` to the root; actions in execution order.
fn reconstruct_path(trail: &[PathLink], node_id: usize) -> Vec<ActionInstance> {
    let mut plan = Vec::new();
    let mut cursor = Some(node_id);
    while let Some(id) = cursor {
        let link = &trail[id];
        if let Some(action) = &link.action {
            plan.push(action.clone());
        }
        cursor = link.parent;
    }
    plan.reverse();
    plan
}

/// Plan with the dependency-graph heuristic.
///
/// `Some(vec![])` when `initial` already satisfies `goal`; `None` when Open
/// is exhausted or the expansion budget runs out.
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] if `policy` fails validation.
pub fn find_plan(
    initial: &State,
    goal: &State,
    schemas: &[Arc<ActionSchema>],
    policy: &SearchPolicy,
) -> Result<Option<Vec<ActionInstance>>, SearchError> {
    let scorer = DependencyGraphScorer::new(goal, schemas, policy.heuristic_depth, &NumericNames);
    Ok(search(initial, goal, schemas, policy, &scorer)?.plan)
}
