//! Relplan Search: heuristic-guided forward state-space search.
//!
//! This crate depends only on `relplan_kernel`. It does NOT depend on
//! `relplan_harness`.
//!
//! # Crate dependency graph
//!
//! ```text
//! relplan_kernel  ←  relplan_search  ←  relplan_harness
//! (facts, schemas,   (frontier, heuristic,  (worlds, runner,
//!  grounding)         search loop)           reports)
//! ```
//!
//! # Key types
//!
//! - [`SearchNode`] -- a state in the frontier with its costs
//! - [`BestFirstFrontier`] -- Open (priority heap) and Closed (state set)
//! - [`DependencyGraph`] -- backward-chaining goal dependency heuristic
//! - [`StateScorer`] -- the scoring seam the search loop calls
//! - [`SearchPolicy`] -- budgets and cost weighting
//! - [`search()`] / [`find_plan`] -- entry points

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod scorer;
pub mod search;

pub use error::SearchError;
pub use frontier::BestFirstFrontier;
pub use heuristic::{DependencyGraph, DependencyGraphScorer, DependencyNode, NodeId};
pub use node::{FrontierKey, SearchNode};
pub use policy::SearchPolicy;
pub use scorer::{StateScorer, UniformScorer};
pub use search::{find_plan, search, SearchResult, SearchStats, TerminationReason};
