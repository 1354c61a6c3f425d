//! Shared helpers for relplan benchmark suites.

use std::sync::Arc;

use relplan_harness::contract::{PlanningProblem, PlanningWorld};
use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::library::SchemaLibrary;
use relplan_kernel::operators::schema::ActionSchema;

/// A built problem with its searchable schemas extracted once.
pub struct Prepared {
    pub problem: PlanningProblem,
    pub schemas: Vec<Arc<ActionSchema>>,
}

/// Build `world` and extract its searchable schemas.
///
/// # Panics
///
/// Panics if the world fails to build. Benchmark setup failures are fatal.
pub fn prepare(world: &dyn PlanningWorld) -> Prepared {
    let problem = world.build().expect("world builds");
    let schemas = problem.library.searchable();
    Prepared { problem, schemas }
}

/// `balls` balls in `room0` of a one-way corridor of `rooms` rooms; the
/// goal puts every ball in the last room.
///
/// `walk(obj, from, to)` requires `(obj at from)` and `(from next to)`.
///
/// # Panics
///
/// Panics if `rooms` is zero or the symbol table overflows.
pub fn corridor(rooms: usize, balls: usize) -> Prepared {
    assert!(rooms > 0, "corridor needs at least one room");
    let mut table = SymbolTable::new();
    let mut library = SchemaLibrary::new();
    library
        .insert(
            SchemaBuilder::new("walk", &["obj", "from", "to"], &mut table)
                .precondition("obj", "at", "from")
                .precondition("from", "next", "to")
                .effect("obj", "at", "to")
                .negative_effect("obj", "at", "from")
                .build()
                .expect("walk schema is well formed"),
        )
        .expect("fresh library");
    let at = table.require("at").expect("interned by walk");
    let next = table.require("next").expect("interned by walk");

    let room_ids: Vec<_> = (0..rooms)
        .map(|i| table.intern(&format!("room{i}")).expect("room fits"))
        .collect();
    let ball_ids: Vec<_> = (0..balls)
        .map(|i| table.intern(&format!("ball{i}")).expect("ball fits"))
        .collect();

    let mut facts: Vec<Fact> = room_ids
        .windows(2)
        .map(|w| Fact::new(w[0], next, w[1]))
        .collect();
    facts.extend(ball_ids.iter().map(|&b| Fact::new(b, at, room_ids[0])));
    let last = room_ids[rooms - 1];
    let goal = State::new(ball_ids.iter().map(|&b| Fact::new(b, at, last)));

    let problem = PlanningProblem {
        table,
        library,
        initial: State::new(facts),
        goal,
    };
    let schemas = problem.library.searchable();
    Prepared { problem, schemas }
}
