//! State scoring seam.

use relplan_kernel::carrier::state::State;

/// Priority estimate for a state: lower is closer to the goal.
///
/// Scores order the frontier only; they are not required to be admissible.
/// Implementations must be pure functions of the state.
pub trait StateScorer: Send + Sync {
    fn score(&self, state: &State) -> i64;
}

/// Scores every state 0, so the frontier degrades to breadth-first order.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformScorer;

impl StateScorer for UniformScorer {
    fn score(&self, _state: &State) -> i64 {
        0
    }
}
