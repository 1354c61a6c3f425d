//! Small hand-built worlds and a brute-force grounding oracle.
//!
//! Fixture constructors panic on kernel errors: they only ever build
//! known-good schemas.

use std::collections::BTreeSet;
use std::sync::Arc;

use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::ident::Ident;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::apply::satisfies_precondition;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::instance::ActionInstance;
use relplan_kernel::operators::schema::ActionSchema;

/// The ball-and-rooms world: one `move(obj, from, to)` schema.
pub struct Rooms {
    pub table: SymbolTable,
    pub schemas: Vec<Arc<ActionSchema>>,
}

impl Rooms {
    /// # Panics
    ///
    /// Never for this fixed schema.
    #[must_use]
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let schema = SchemaBuilder::new("move", &["obj", "from", "to"], &mut table)
            .precondition("obj", "at", "from")
            .effect("obj", "at", "to")
            .negative_effect("obj", "at", "from")
            .build()
            .expect("move schema is well formed");
        Self {
            table,
            schemas: vec![Arc::new(schema)],
        }
    }

    /// # Panics
    ///
    /// Panics if the symbol table is full.
    pub fn id(&mut self, name: &str) -> Ident {
        self.table.intern(name).expect("symbol table has room")
    }

    pub fn fact(&mut self, a: &str, rel: &str, b: &str) -> Fact {
        Fact::new(self.id(a), self.id(rel), self.id(b))
    }

    /// `{(ball at room1)}` with `ball`, `room1`, `room2` declared.
    pub fn initial(&mut self) -> State {
        let objects = ["ball", "room1", "room2"].map(|n| self.id(n));
        State::with_objects([self.fact("ball", "at", "room1")], objects)
    }

    #[must_use]
    pub fn render(&self, plan: &[ActionInstance]) -> Vec<String> {
        plan.iter().map(|a| a.render(&self.table)).collect()
    }
}

impl Default for Rooms {
    fn default() -> Self {
        Self::new()
    }
}

/// Every parameter vector of `schema` whose instance is applicable in
/// `state`, found by exhaustive enumeration.
///
/// Candidates range over [`State::object_domain`] with no identifier
/// repeated across parameters.
///
/// # Panics
///
/// Panics if the schema's arity does not match an enumerated vector, which
/// cannot happen.
#[must_use]
pub fn brute_force_ground(schema: &Arc<ActionSchema>, state: &State) -> BTreeSet<Vec<Ident>> {
    let domain: Vec<Ident> = state.object_domain().into_iter().collect();
    let mut found = BTreeSet::new();
    let mut stack: Vec<Vec<Ident>> = vec![Vec::new()];
    while let Some(prefix) = stack.pop() {
        if prefix.len() == schema.arity() {
            let instance =
                ActionInstance::new(Arc::clone(schema), prefix.clone()).expect("arity matches");
            if satisfies_precondition(state, &instance) {
                found.insert(prefix);
            }
            continue;
        }
        for &object in &domain {
            if !prefix.contains(&object) {
                let mut next = prefix.clone();
                next.push(object);
                stack.push(next);
            }
        }
    }
    found
}
