//! `BallRooms`: one ball, a row of rooms, and a single `move` schema.
//!
//! `move(obj, from, to)` requires `(obj at from)`, adds `(obj at to)`, and
//! deletes `(obj at from)`. Since `to` appears in no precondition, grounding
//! expands it over the declared rooms.

use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::library::SchemaLibrary;

use crate::contract::{PlanningProblem, PlanningWorld, WorldError};

#[derive(Debug, Clone)]
pub struct BallRooms {
    rooms: Vec<String>,
    start: String,
    goal: String,
}

impl BallRooms {
    /// Two rooms; the ball starts in `room1` and must reach `room2`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rooms(&["room1", "room2"], "room1", "room2")
    }

    #[must_use]
    pub fn with_rooms(rooms: &[&str], start: &str, goal: &str) -> Self {
        Self {
            rooms: rooms.iter().map(ToString::to_string).collect(),
            start: start.to_string(),
            goal: goal.to_string(),
        }
    }

    /// Same rooms, different goal room.
    #[must_use]
    pub fn with_goal(mut self, goal: &str) -> Self {
        self.goal = goal.to_string();
        self
    }

    fn check_room(&self, room: &str) -> Result<(), WorldError> {
        if self.rooms.iter().any(|r| r == room) {
            Ok(())
        } else {
            Err(WorldError::InvalidConfiguration {
                detail: format!("room '{room}' is not one of {:?}", self.rooms),
            })
        }
    }
}

impl Default for BallRooms {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanningWorld for BallRooms {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "ball_rooms"
    }

    fn build(&self) -> Result<PlanningProblem, WorldError> {
        self.check_room(&self.start)?;
        self.check_room(&self.goal)?;

        let mut table = SymbolTable::new();
        let mut library = SchemaLibrary::new();
        library.insert(
            SchemaBuilder::new("move", &["obj", "from", "to"], &mut table)
                .precondition("obj", "at", "from")
                .effect("obj", "at", "to")
                .negative_effect("obj", "at", "from")
                .build()?,
        )?;

        let ball = table.intern("ball")?;
        let at = table.require("at")?;
        let mut objects = vec![ball];
        for room in &self.rooms {
            objects.push(table.intern(room)?);
        }
        let start = table.require(&self.start)?;
        let goal = table.require(&self.goal)?;

        Ok(PlanningProblem {
            initial: State::with_objects([Fact::new(ball, at, start)], objects),
            goal: State::new([Fact::new(ball, at, goal)]),
            table,
            library,
        })
    }
}
