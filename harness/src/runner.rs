//! Harness runner: plans a world and packages the result as a run report.
//!
//! The runner uses ONLY kernel and search APIs. It does not implement any
//! planning logic itself.
//!
//! # Pipeline
//!
//! ```text
//! world.build() → build_policy()
//!   → DependencyGraphScorer::new() → search()
//!   → replay_plan() [apply_checked × N, goal check]
//!   → plan digest → canonical report bytes → report digest
//! ```
//!
//! Fail-closed: a plan that does not replay cleanly is an error, never a
//! report.

use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::apply::apply_checked;
use relplan_kernel::operators::instance::ActionInstance;
use relplan_kernel::proof::canon::{canonical_json_bytes, CanonError};
use relplan_kernel::proof::hash::{canonical_hash, ContentHash};
use relplan_kernel::proof::hash_domain::HashDomain;
use relplan_kernel::KernelError;
use relplan_search::error::SearchError;
use relplan_search::heuristic::DependencyGraphScorer;
use relplan_search::search::{search, SearchStats, TerminationReason};
use thiserror::Error;

use crate::contract::{PlanningWorld, WorldError};
use crate::policy::{build_policy, PolicyBuildError, PolicyConfig};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("world build failed: {0}")]
    World(#[from] WorldError),
    #[error(transparent)]
    Policy(#[from] PolicyBuildError),
    #[error("search rejected: {0}")]
    Search(#[from] SearchError),
    /// A plan step was not applicable during replay.
    #[error("replay failed at step {step} ({action}): {source}")]
    ReplayFailed {
        step: usize,
        action: String,
        #[source]
        source: KernelError,
    },
    /// The replayed plan ends in a state that misses the goal.
    #[error("replayed plan leaves goals unmet: {unmet}")]
    GoalNotSatisfied { unmet: String },
    #[error("canonical JSON failed: {0}")]
    Canon(#[from] CanonError),
}

/// Outcome of one harness run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub world_id: String,
    /// Rendered plan steps; `None` when no plan was found.
    pub plan_lines: Option<Vec<String>>,
    pub termination: TerminationReason,
    pub stats: SearchStats,
    pub plan_digest: Option<ContentHash>,
    pub policy_digest: ContentHash,
    /// Fingerprint of the replayed final state, when a plan was found.
    pub final_fingerprint: Option<ContentHash>,
    /// Canonical JSON bytes of the whole report.
    pub report_bytes: Vec<u8>,
    pub report_digest: ContentHash,
}

impl RunReport {
    #[must_use]
    pub fn found_plan(&self) -> bool {
        self.plan_lines.is_some()
    }
}

/// Run a world with the default policy.
///
/// # Errors
///
/// Returns [`RunError`] at any pipeline step.
pub fn run(world: &dyn PlanningWorld) -> Result<RunReport, RunError> {
    run_world(world, &PolicyConfig::default())
}

/// Run a world through the full pipeline with explicit policy overrides.
///
/// # Errors
///
/// Returns [`RunError`] if the world fails to build, the policy is invalid,
/// or the returned plan fails checked replay.
pub fn run_world(world: &dyn PlanningWorld, config: &PolicyConfig) -> Result<RunReport, RunError> {
    let world_id = world.world_id().to_string();
    let problem = world.build()?;
    let snapshot = build_policy(&world_id, config)?;

    let schemas = problem.library.searchable();
    let scorer = DependencyGraphScorer::new(
        &problem.goal,
        &schemas,
        snapshot.policy.heuristic_depth,
        &problem.table,
    );
    let result = search(&problem.initial, &problem.goal, &schemas, &snapshot.policy, &scorer)?;

    let (plan_lines, plan_digest, final_fingerprint) = match &result.plan {
        Some(plan) => {
            let final_state = replay_plan(&problem.initial, &problem.goal, plan, &problem.table)?;
            let lines: Vec<String> = plan.iter().map(|a| a.render(&problem.table)).collect();
            let digest = digest_plan(&lines)?;
            (Some(lines), Some(digest), Some(final_state.fingerprint()))
        }
        None => (None, None, None),
    };

    let report_value = serde_json::json!({
        "final_fingerprint": final_fingerprint.as_ref().map(ContentHash::as_str),
        "initial_fingerprint": problem.initial.fingerprint().as_str(),
        "plan": plan_lines,
        "plan_digest": plan_digest.as_ref().map(ContentHash::as_str),
        "policy_digest": snapshot.digest.as_str(),
        "schema_version": "run_report.v1",
        "stats": stats_json(&result.stats),
        "symbol_table_digest": problem.table.digest()?.as_str(),
        "termination": result.termination.as_str(),
        "world_id": world_id,
    });
    let report_bytes = canonical_json_bytes(&report_value)?;
    let report_digest = canonical_hash(HashDomain::RunReport, &report_bytes);

    tracing::info!(
        world = %world_id,
        termination = result.termination.as_str(),
        steps = plan_lines.as_ref().map(Vec::len),
        report = %report_digest,
        "run complete"
    );

    Ok(RunReport {
        world_id,
        plan_lines,
        termination: result.termination,
        stats: result.stats,
        plan_digest,
        policy_digest: snapshot.digest,
        final_fingerprint,
        report_bytes,
        report_digest,
    })
}

/// Apply `plan` step by step with precondition checks and confirm the end
/// state satisfies `goal`. Returns the end state.
///
/// # Errors
///
/// Returns [`RunError::ReplayFailed`] at the first inapplicable step and
/// [`RunError::GoalNotSatisfied`] if the final state misses a goal fact.
pub fn replay_plan(
    initial: &State,
    goal: &State,
    plan: &[ActionInstance],
    names: &SymbolTable,
) -> Result<State, RunError> {
    let mut state = initial.clone();
    for (step, action) in plan.iter().enumerate() {
        state = apply_checked(&state, action, names).map_err(|source| RunError::ReplayFailed {
            step,
            action: action.render(names),
            source,
        })?;
    }
    let unmet = state.unmet_goals(goal);
    if !unmet.is_empty() {
        let unmet: Vec<String> = unmet.iter().map(|f| f.render(names)).collect();
        return Err(RunError::GoalNotSatisfied {
            unmet: unmet.join(", "),
        });
    }
    Ok(state)
}

fn digest_plan(lines: &[String]) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&serde_json::json!(lines))?;
    Ok(canonical_hash(HashDomain::PlanDigest, &bytes))
}

fn stats_json(stats: &SearchStats) -> serde_json::Value {
    serde_json::json!({
        "depth_skips": stats.depth_skips,
        "duplicates": stats.duplicates,
        "expansions": stats.expansions,
        "frontier_high_water": stats.frontier_high_water,
        "generated": stats.generated,
        "nodes_created": stats.nodes_created,
    })
}
