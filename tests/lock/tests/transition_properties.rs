//! State transition properties: determinism, immutability of the input
//! state, no-op idempotence, and add-before-delete ordering.

use std::sync::Arc;

use proptest::prelude::*;
use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::ident::Ident;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::apply::{apply, apply_checked};
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::ground::ground;
use relplan_kernel::operators::instance::ActionInstance;
use relplan_kernel::operators::schema::ActionSchema;
use relplan_kernel::KernelError;

struct Fixture {
    table: SymbolTable,
    objects: Vec<Ident>,
    near: Ident,
    shift: Arc<ActionSchema>,
    noop: Arc<ActionSchema>,
    churn: Arc<ActionSchema>,
}

fn fixture() -> Fixture {
    let mut table = SymbolTable::new();
    let objects: Vec<Ident> = ["p", "q", "r", "s"]
        .iter()
        .map(|n| table.intern(n).unwrap())
        .collect();
    let near = table.intern("near").unwrap();
    let shift = SchemaBuilder::new("shift", &["x", "y", "z"], &mut table)
        .precondition("x", "near", "y")
        .effect("x", "near", "z")
        .negative_effect("x", "near", "y")
        .build()
        .unwrap();
    let noop = SchemaBuilder::new("look", &["x", "y"], &mut table)
        .precondition("x", "near", "y")
        .build()
        .unwrap();
    // adds and deletes the same fact
    let churn = SchemaBuilder::new("churn", &["x", "y"], &mut table)
        .precondition("x", "near", "y")
        .effect("y", "near", "x")
        .negative_effect("y", "near", "x")
        .build()
        .unwrap();
    Fixture {
        table,
        objects,
        near,
        shift: Arc::new(shift),
        noop: Arc::new(noop),
        churn: Arc::new(churn),
    }
}

fn state_from(fx: &Fixture, pairs: &[(usize, usize)]) -> State {
    State::with_objects(
        pairs
            .iter()
            .map(|&(a, b)| Fact::new(fx.objects[a], fx.near, fx.objects[b])),
        fx.objects.iter().copied(),
    )
}

fn pairs() -> impl Strategy<Value = Vec<(usize, usize)>> {
    prop::collection::vec((0..4usize, 0..4usize), 1..8)
}

proptest! {
    #[test]
    fn apply_is_deterministic_and_pure(pairs in pairs()) {
        let fx = fixture();
        let state = state_from(&fx, &pairs);
        let copy = state_from(&fx, &pairs);
        let before = state.clone();
        for instance in ground(&fx.shift, &state) {
            let a = apply(&state, &instance);
            let b = apply(&copy, &instance);
            prop_assert_eq!(&a, &b);
            prop_assert_eq!(a.fingerprint(), b.fingerprint());
        }
        prop_assert_eq!(state, before);
    }

    #[test]
    fn no_effect_instance_is_identity(pairs in pairs()) {
        let fx = fixture();
        let state = state_from(&fx, &pairs);
        for instance in ground(&fx.noop, &state) {
            prop_assert_eq!(apply(&state, &instance), state.clone());
        }
    }

    #[test]
    fn delete_wins_over_add(pairs in pairs()) {
        let fx = fixture();
        let state = state_from(&fx, &pairs);
        for instance in ground(&fx.churn, &state) {
            let next = apply(&state, &instance);
            let p = instance.params();
            prop_assert!(!next.contains(&Fact::new(p[1], fx.near, p[0])));
        }
    }

    #[test]
    fn checked_apply_agrees_on_applicable_instances(pairs in pairs()) {
        let fx = fixture();
        let state = state_from(&fx, &pairs);
        for instance in ground(&fx.shift, &state) {
            prop_assert_eq!(apply_checked(&state, &instance, &fx.table).unwrap(), apply(&state, &instance));
        }
    }
}

#[test]
fn checked_apply_rejects_without_partial_effects() {
    let fx = fixture();
    let state = state_from(&fx, &[(0, 1)]);
    let [p, q, r, _] = [fx.objects[0], fx.objects[1], fx.objects[2], fx.objects[3]];
    let bad = ActionInstance::new(Arc::clone(&fx.shift), vec![q, p, r]).unwrap();
    let err = apply_checked(&state, &bad, &fx.table).unwrap_err();
    assert!(matches!(err, KernelError::PreconditionNotMet { .. }));
    assert_eq!(state, state_from(&fx, &[(0, 1)]));
}

#[test]
fn successor_keeps_object_universe() {
    let fx = fixture();
    let state = state_from(&fx, &[(0, 1)]);
    let instance = ground(&fx.shift, &state).into_iter().next().unwrap();
    let next = apply(&state, &instance);
    assert_eq!(next.declared_objects(), state.declared_objects());
}
