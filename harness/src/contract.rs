//! World contract: the minimal trait a world must implement.
//!
//! Worlds provide symbols, schemas, and the initial and goal states. Worlds
//! may NOT run search, replay plans, or hash reports: those are runner
//! concerns.

use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::library::SchemaLibrary;
use relplan_kernel::KernelError;
use thiserror::Error;

/// Everything the runner needs to plan in one world.
#[derive(Debug, Clone)]
pub struct PlanningProblem {
    /// Name table for every identifier the schemas and states use.
    pub table: SymbolTable,
    /// Searchable schemas plus the helpers they were composed from.
    pub library: SchemaLibrary,
    pub initial: State,
    pub goal: State,
}

/// Typed failure for world construction.
#[derive(Debug, Error)]
pub enum WorldError {
    /// A schema, symbol, or library registration was rejected.
    #[error(transparent)]
    Kernel(#[from] KernelError),
    /// The world's own parameters are inconsistent.
    #[error("invalid world configuration: {detail}")]
    InvalidConfiguration { detail: String },
}

/// The contract a world must implement to be run by the harness runner.
pub trait PlanningWorld {
    /// Unique world identifier (e.g., `"ball_rooms"`).
    fn world_id(&self) -> &str;

    /// Build a fresh planning problem.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError`] if a schema is malformed or the world's
    /// configuration names something it does not define.
    fn build(&self) -> Result<PlanningProblem, WorldError>;
}
