//! Domain separators for canonical hashing.
//!
//! Each digest kind the planner emits hashes a distinct null-terminated
//! prefix first, so a state fingerprint can never collide with a plan or
//! report digest over the same bytes.

use std::fmt;

/// Which artifact a [`super::hash::canonical_hash`] call is digesting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HashDomain {
    /// `State` fingerprint over its sorted fact keys.
    StateFingerprint,
    /// Symbol table allocations.
    SymbolTable,
    /// Rendered plan lines.
    PlanDigest,
    /// Resolved search policy.
    PolicySnapshot,
    /// Harness run report.
    RunReport,
}

impl HashDomain {
    /// Every domain, in declaration order.
    pub const ALL: &'static [HashDomain] = &[
        Self::StateFingerprint,
        Self::SymbolTable,
        Self::PlanDigest,
        Self::PolicySnapshot,
        Self::RunReport,
    ];

    /// Prefix bytes fed to the hasher ahead of the payload.
    #[must_use]
    pub const fn as_bytes(&self) -> &'static [u8] {
        match self {
            Self::StateFingerprint => b"RELPLAN::STATE_FINGERPRINT::V1\0",
            Self::SymbolTable => b"RELPLAN::SYMBOL_TABLE::V1\0",
            Self::PlanDigest => b"RELPLAN::PLAN_DIGEST::V1\0",
            Self::PolicySnapshot => b"RELPLAN::POLICY_SNAPSHOT::V1\0",
            Self::RunReport => b"RELPLAN::RUN_REPORT::V1\0",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::StateFingerprint => "state_fingerprint",
            Self::SymbolTable => "symbol_table",
            Self::PlanDigest => "plan_digest",
            Self::PolicySnapshot => "policy_snapshot",
            Self::RunReport => "run_report",
        }
    }
}

impl fmt::Display for HashDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
