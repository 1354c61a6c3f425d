//! `BlocksWorld`: three blocks and a table, starting from the Sussman
//! anomaly.
//!
//! Facts are `(x on y)` and `(x is clear)`. Two schemas:
//!
//! - `unstack(x, from)`: take a clear block off another block and put it on
//!   the table. The negative precondition `not (x on table)` rules out
//!   "unstacking" a block from the table itself.
//! - `stack(x, to)`: put a clear block from the table onto another clear
//!   block.

use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::library::SchemaLibrary;

use crate::contract::{PlanningProblem, PlanningWorld, WorldError};

#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksWorld;

impl PlanningWorld for BlocksWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "blocks_world"
    }

    fn build(&self) -> Result<PlanningProblem, WorldError> {
        let mut table = SymbolTable::new();
        let mut library = SchemaLibrary::new();
        library.insert(
            SchemaBuilder::new("unstack", &["x", "from"], &mut table)
                .precondition("x", "on", "from")
                .precondition("x", "is", "clear")
                .negative_precondition("x", "on", "table")
                .effect("x", "on", "table")
                .effect("from", "is", "clear")
                .negative_effect("x", "on", "from")
                .build()?,
        )?;
        library.insert(
            SchemaBuilder::new("stack", &["x", "to"], &mut table)
                .precondition("x", "on", "table")
                .precondition("x", "is", "clear")
                .precondition("to", "is", "clear")
                .effect("x", "on", "to")
                .negative_effect("x", "on", "table")
                .negative_effect("to", "is", "clear")
                .build()?,
        )?;

        let on = table.require("on")?;
        let is = table.require("is")?;
        let clear = table.require("clear")?;
        let floor = table.require("table")?;
        let a = table.intern("a")?;
        let b = table.intern("b")?;
        let c = table.intern("c")?;

        let initial = State::new([
            Fact::new(a, on, floor),
            Fact::new(b, on, floor),
            Fact::new(c, on, a),
            Fact::new(b, is, clear),
            Fact::new(c, is, clear),
        ]);
        let goal = State::new([Fact::new(a, on, b), Fact::new(b, on, c)]);
        Ok(PlanningProblem {
            table,
            library,
            initial,
            goal,
        })
    }
}
