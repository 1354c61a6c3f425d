//! Transition: precondition checks and effect application.
//!
//! [`apply`] is the search-path transition: it trusts that the instance came
//! from grounding. [`apply_checked`] is the fail-closed entry for direct
//! callers: it verifies preconditions first and either returns a complete
//! successor or an error. No partial effect set is ever applied.
//!
//! Effects apply adds first, then deletes. A fact both added and deleted by
//! one instance is absent afterwards.

use crate::carrier::state::State;
use crate::carrier::symbol::NameLookup;
use crate::error::{KernelError, KernelResult};
use crate::operators::instance::ActionInstance;

/// Every positive precondition present, every negative one absent.
#[must_use]
pub fn satisfies_precondition(state: &State, instance: &ActionInstance) -> bool {
    instance.positive_preconditions().all(|f| state.contains(&f))
        && instance.negative_preconditions().all(|f| !state.contains(&f))
}

/// Apply `instance` to `state`, producing a new state. `state` is unchanged.
#[must_use]
pub fn apply(state: &State, instance: &ActionInstance) -> State {
    state.successor(instance.add_effects(), instance.delete_effects())
}

/// Apply after verifying preconditions.
///
/// # Errors
///
/// Returns [`KernelError::PreconditionNotMet`] naming the first violated
/// precondition.
pub fn apply_checked(state: &State, instance: &ActionInstance, names: &dyn NameLookup) -> KernelResult<State> {
    let action = || instance.render(names);
    if let Some(missing) = instance.positive_preconditions().find(|f| !state.contains(f)) {
        return Err(KernelError::PreconditionNotMet {
            action: action(),
            detail: format!("requires '{}'", missing.render(names)),
        });
    }
    if let Some(present) = instance.negative_preconditions().find(|f| state.contains(f)) {
        return Err(KernelError::PreconditionNotMet {
            action: action(),
            detail: format!("forbids '{}'", present.render(names)),
        });
    }
    Ok(apply(state, instance))
}
