//! Policy snapshot: auditable declaration of the search budgets a run used.
//!
//! The runner resolves a [`PolicyConfig`] against [`SearchPolicy::default`]
//! and records the resolved values as canonical JSON. Worlds do NOT declare
//! policy.
//!
//! The snapshot digest is committed into every run report, binding the
//! report to the budgets that produced it.

use relplan_kernel::proof::canon::{canonical_json_bytes, CanonError};
use relplan_kernel::proof::hash::{canonical_hash, ContentHash};
use relplan_kernel::proof::hash_domain::HashDomain;
use relplan_search::policy::SearchPolicy;
use thiserror::Error;

/// Domain prefix for policy snapshot hashing.
pub const DOMAIN_POLICY_SNAPSHOT: HashDomain = HashDomain::PolicySnapshot;

/// Overrides for the default search policy. `None` keeps the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PolicyConfig {
    pub max_expansions: Option<u64>,
    pub max_depth: Option<u32>,
    pub heuristic_depth: Option<u32>,
    pub path_cost_weight: Option<i64>,
}

impl PolicyConfig {
    /// Apply the overrides to [`SearchPolicy::default`].
    #[must_use]
    pub fn resolve(&self) -> SearchPolicy {
        let defaults = SearchPolicy::default();
        SearchPolicy {
            max_expansions: self.max_expansions.unwrap_or(defaults.max_expansions),
            max_depth: self.max_depth.unwrap_or(defaults.max_depth),
            heuristic_depth: self.heuristic_depth.unwrap_or(defaults.heuristic_depth),
            path_cost_weight: self.path_cost_weight.unwrap_or(defaults.path_cost_weight),
        }
    }
}

/// A resolved policy with its canonical bytes and digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySnapshot {
    pub policy: SearchPolicy,
    /// Canonical JSON bytes of the snapshot.
    pub bytes: Vec<u8>,
    pub digest: ContentHash,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyBuildError {
    #[error("policy snapshot serialization failed: {0}")]
    Canon(#[from] CanonError),
}

/// Resolve `config` and snapshot it for `world_id`.
///
/// # Errors
///
/// Returns [`PolicyBuildError`] if canonical JSON serialization fails.
pub fn build_policy(world_id: &str, config: &PolicyConfig) -> Result<PolicySnapshot, PolicyBuildError> {
    let policy = config.resolve();
    let value = serde_json::json!({
        "schema_version": "policy.v1",
        "search": {
            "heuristic_depth": policy.heuristic_depth,
            "max_depth": policy.max_depth,
            "max_expansions": policy.max_expansions,
            "path_cost_weight": policy.path_cost_weight,
        },
        "world_id": world_id,
    });
    let bytes = canonical_json_bytes(&value)?;
    let digest = canonical_hash(DOMAIN_POLICY_SNAPSHOT, &bytes);
    Ok(PolicySnapshot { policy, bytes, digest })
}
