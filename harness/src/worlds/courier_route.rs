//! `CourierRoute`: a truck carries a parcel along a road network.
//!
//! `drive` is composed from two helper schemas, `depart` and `arrive`, and
//! adds its own precondition `(truck is vehicle)` with the literal
//! `vehicle`, so parcels can never drive themselves. Helpers are
//! registered with [`SchemaLibrary::insert_helper`] and are never grounded
//! by search.

use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::state::State;
use relplan_kernel::carrier::symbol::SymbolTable;
use relplan_kernel::operators::compose::SchemaBuilder;
use relplan_kernel::operators::library::SchemaLibrary;

use crate::contract::{PlanningProblem, PlanningWorld, WorldError};

/// Roads are two-way. The parcel starts at `depot` with the truck.
#[derive(Debug, Clone)]
pub struct CourierRoute {
    roads: Vec<(String, String)>,
    destination: String,
}

impl CourierRoute {
    /// `depot - north - south`, delivering to `south`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_roads(&[("depot", "north"), ("north", "south")], "south")
    }

    #[must_use]
    pub fn with_roads(roads: &[(&str, &str)], destination: &str) -> Self {
        Self {
            roads: roads
                .iter()
                .map(|(a, b)| ((*a).to_string(), (*b).to_string()))
                .collect(),
            destination: destination.to_string(),
        }
    }
}

impl Default for CourierRoute {
    fn default() -> Self {
        Self::new()
    }
}

fn schemas(table: &mut SymbolTable) -> Result<SchemaLibrary, WorldError> {
    let mut library = SchemaLibrary::new();
    library.insert_helper(
        SchemaBuilder::new("depart", &["agent", "place"], table)
            .precondition("agent", "at", "place")
            .negative_effect("agent", "at", "place")
            .build()?,
    )?;
    library.insert_helper(
        SchemaBuilder::new("arrive", &["agent", "place"], table)
            .effect("agent", "at", "place")
            .build()?,
    )?;
    let drive = SchemaBuilder::new("drive", &["truck", "from", "to"], table)
        .precondition("truck", "is", "vehicle")
        .precondition("from", "road", "to")
        .include(&library, "depart", &["truck", "from"])
        .include(&library, "arrive", &["truck", "to"])
        .build()?;
    library.insert(drive)?;
    library.insert(
        SchemaBuilder::new("load", &["parcel", "truck", "place"], table)
            .precondition("truck", "is", "vehicle")
            .precondition("truck", "at", "place")
            .precondition("parcel", "at", "place")
            .effect("parcel", "in", "truck")
            .negative_effect("parcel", "at", "place")
            .build()?,
    )?;
    library.insert(
        SchemaBuilder::new("unload", &["parcel", "truck", "place"], table)
            .precondition("truck", "at", "place")
            .precondition("parcel", "in", "truck")
            .effect("parcel", "at", "place")
            .negative_effect("parcel", "in", "truck")
            .build()?,
    )?;
    Ok(library)
}

impl PlanningWorld for CourierRoute {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "courier_route"
    }

    fn build(&self) -> Result<PlanningProblem, WorldError> {
        let mut table = SymbolTable::new();
        let library = schemas(&mut table)?;

        let at = table.require("at")?;
        let is = table.require("is")?;
        let road = table.require("road")?;
        let vehicle = table.require("vehicle")?;
        let truck = table.intern("truck1")?;
        let parcel = table.intern("parcel1")?;
        let depot = table.intern("depot")?;

        let mut facts = vec![
            Fact::new(truck, is, vehicle),
            Fact::new(truck, at, depot),
            Fact::new(parcel, at, depot),
        ];
        for (a, b) in &self.roads {
            let a = table.intern(a)?;
            let b = table.intern(b)?;
            facts.push(Fact::new(a, road, b));
            facts.push(Fact::new(b, road, a));
        }
        let Some(destination) = table.id_of(&self.destination) else {
            return Err(WorldError::InvalidConfiguration {
                detail: format!("destination '{}' is on no road", self.destination),
            });
        };

        Ok(PlanningProblem {
            initial: State::new(facts),
            goal: State::new([Fact::new(parcel, at, destination)]),
            table,
            library,
        })
    }
}
