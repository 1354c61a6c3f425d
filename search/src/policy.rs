//! Search policy: budgets and cost weighting.

use crate::error::SearchError;

/// Budgets and priority weighting for one search run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions.
    pub max_expansions: u64,
    /// Nodes at this depth are not expanded.
    pub max_depth: u32,
    /// Dependency-graph expansion budget.
    pub heuristic_depth: u32,
    /// `f = h + path_cost_weight * g`. Zero is greedy best-first.
    pub path_cost_weight: i64,
}

impl SearchPolicy {
    /// Pre-flight check.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] when `max_expansions` is zero or
    /// `path_cost_weight` is negative.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == 0 {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.path_cost_weight < 0 {
            return Err(SearchError::InvalidPolicy {
                detail: format!("path_cost_weight must be non-negative, got {}", self.path_cost_weight),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            max_expansions: 100_000,
            max_depth: 1_000,
            heuristic_depth: 25,
            path_cost_weight: 0,
        }
    }
}
