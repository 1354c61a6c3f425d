//! Grounding soundness and completeness against a brute-force oracle over
//! randomly generated states.

use std::collections::BTreeSet;
use std::sync::Arc;

use lock_tests::fixtures::brute_force_ground;
use proptest::prelude::*;
use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::ident::Ident;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::apply::satisfies_precondition;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::ground::ground;
use relplan_kernel::operators::schema::ActionSchema;

const OBJECTS: [&str; 5] = ["o1", "o2", "o3", "o4", "o5"];
const RELATIONS: [&str; 2] = ["near", "holds"];

struct Universe {
    objects: Vec<Ident>,
    relations: Vec<Ident>,
    schemas: Vec<Arc<ActionSchema>>,
}

fn universe() -> Universe {
    let mut table = SymbolTable::new();
    let objects = OBJECTS.iter().map(|n| table.intern(n).unwrap()).collect();
    let relations = RELATIONS.iter().map(|n| table.intern(n).unwrap()).collect();
    let schemas = vec![
        // single precondition, one effect-only parameter
        SchemaBuilder::new("toss", &["x", "y", "z"], &mut table)
            .precondition("x", "holds", "y")
            .effect("y", "near", "z")
            .build()
            .unwrap(),
        // join on a shared parameter with a negative precondition
        SchemaBuilder::new("relay", &["x", "y", "z"], &mut table)
            .precondition("x", "near", "y")
            .precondition("y", "holds", "z")
            .negative_precondition("x", "holds", "z")
            .effect("x", "holds", "z")
            .build()
            .unwrap(),
        // repeated parameter inside one template
        SchemaBuilder::new("selfish", &["x", "y"], &mut table)
            .precondition("x", "holds", "x")
            .negative_precondition("y", "near", "x")
            .effect("y", "near", "x")
            .build()
            .unwrap(),
        // literal in a template
        SchemaBuilder::new("fetch", &["x"], &mut table)
            .precondition("x", "near", "o1")
            .negative_precondition("o1", "holds", "x")
            .effect("o1", "holds", "x")
            .build()
            .unwrap(),
    ];
    Universe {
        objects,
        relations,
        schemas: schemas.into_iter().map(Arc::new).collect(),
    }
}

fn state_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
    prop::collection::vec((0..OBJECTS.len(), 0..RELATIONS.len(), 0..OBJECTS.len()), 0..14)
}

fn build_state(u: &Universe, triples: &[(usize, usize, usize)]) -> State {
    State::with_objects(
        triples
            .iter()
            .map(|&(a, r, b)| Fact::new(u.objects[a], u.relations[r], u.objects[b])),
        u.objects.iter().copied(),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn every_grounded_instance_is_applicable(triples in state_strategy()) {
        let u = universe();
        let state = build_state(&u, &triples);
        for schema in &u.schemas {
            for instance in ground(schema, &state) {
                prop_assert!(
                    satisfies_precondition(&state, &instance),
                    "{} {:?} not applicable", instance.name(), instance.params()
                );
            }
        }
    }

    #[test]
    fn grounding_matches_brute_force(triples in state_strategy()) {
        let u = universe();
        let state = build_state(&u, &triples);
        for schema in &u.schemas {
            let grounded: BTreeSet<Vec<Ident>> =
                ground(schema, &state).iter().map(|i| i.params().to_vec()).collect();
            prop_assert_eq!(grounded, brute_force_ground(schema, &state), "schema {}", schema.name());
        }
    }

    #[test]
    fn grounding_is_sorted_and_unique(triples in state_strategy()) {
        let u = universe();
        let state = build_state(&u, &triples);
        for schema in &u.schemas {
            let params: Vec<Vec<Ident>> =
                ground(schema, &state).iter().map(|i| i.params().to_vec()).collect();
            prop_assert!(params.windows(2).all(|w| w[0] < w[1]));
        }
    }
}

#[test]
fn unindexed_literal_yields_nothing() {
    let u = universe();
    // no fact mentions o1 in the `near` relation
    let state = build_state(&u, &[(1, 1, 2)]);
    let fetch = u.schemas.iter().find(|s| s.name() == "fetch").unwrap();
    assert!(ground(fetch, &state).is_empty());
}
