//! End-to-end planning scenarios through `find_plan` and the harness.

use lock_tests::fixtures::Rooms;
use lock_tests::init_tracing;
use relplan_harness::contract::PlanningWorld;
use relplan_harness::runner::run;
use relplan_harness::worlds::ball_rooms::BallRooms;
use relplan_harness::worlds::blocks_world::BlocksWorld;
use relplan_harness::worlds::courier_route::CourierRoute;
use relplan_kernel::carrier::fact::Fact;
use relplan_kernel::carrier::state::State;
use relplan_search::policy::SearchPolicy;
use relplan_search::scorer::UniformScorer;
use relplan_search::search::{find_plan, search, TerminationReason};

#[test]
fn ball_moves_to_room2() {
    init_tracing();
    let mut w = Rooms::new();
    let initial = w.initial();
    let goal = State::new([w.fact("ball", "at", "room2")]);
    let plan = find_plan(&initial, &goal, &w.schemas, &SearchPolicy::default())
        .unwrap()
        .expect("plan exists");
    assert_eq!(w.render(&plan), ["move ball room1 room2"]);
}

#[test]
fn satisfied_goal_gives_empty_plan() {
    init_tracing();
    let mut w = Rooms::new();
    let initial = w.initial();
    let goal = State::new([w.fact("ball", "at", "room1")]);
    let result = search(&initial, &goal, &w.schemas, &SearchPolicy::default(), &UniformScorer).unwrap();
    assert_eq!(result.plan, Some(Vec::new()));
    assert_eq!(result.termination, TerminationReason::GoalSatisfiedAtRoot);
    assert_eq!(result.stats.expansions, 0);
}

#[test]
fn unknown_object_goal_has_no_plan() {
    init_tracing();
    let mut w = Rooms::new();
    let initial = w.initial();
    let goal = State::new([w.fact("kite", "at", "room2")]);
    let result = search(&initial, &goal, &w.schemas, &SearchPolicy::default(), &UniformScorer).unwrap();
    assert_eq!(result.termination, TerminationReason::FrontierExhausted);
    assert_eq!(result.plan, None);
    assert_eq!(find_plan(&initial, &goal, &w.schemas, &SearchPolicy::default()).unwrap(), None);
}

#[test]
fn negative_goal_moves_ball_out() {
    init_tracing();
    let mut w = Rooms::new();
    let initial = w.initial();
    let at_room1 = w.fact("ball", "at", "room1");
    let goal = State::new([Fact::negated(at_room1.a, at_room1.rel, at_room1.b)]);
    let plan = find_plan(&initial, &goal, &w.schemas, &SearchPolicy::default())
        .unwrap()
        .expect("plan exists");
    assert_eq!(w.render(&plan), ["move ball room1 room2"]);
}

#[test]
fn mixed_goal_across_three_rooms() {
    init_tracing();
    let mut w = Rooms::new();
    let room3 = w.id("room3");
    let base = w.initial();
    let initial = State::with_objects(
        base.facts().copied(),
        base.declared_objects().iter().copied().chain([room3]),
    );
    let at_room2 = w.fact("ball", "at", "room2");
    let goal = State::new([
        w.fact("ball", "at", "room3"),
        Fact::negated(at_room2.a, at_room2.rel, at_room2.b),
    ]);
    let plan = find_plan(&initial, &goal, &w.schemas, &SearchPolicy::default())
        .unwrap()
        .expect("plan exists");
    assert_eq!(w.render(&plan), ["move ball room1 room3"]);
}

#[test]
fn uniform_scorer_finds_shortest_blocks_plan() {
    init_tracing();
    let problem = BlocksWorld.build().unwrap();
    let schemas = problem.library.searchable();
    let result = search(
        &problem.initial,
        &problem.goal,
        &schemas,
        &SearchPolicy::default(),
        &UniformScorer,
    )
    .unwrap();
    let lines: Vec<String> = result
        .plan
        .expect("plan exists")
        .iter()
        .map(|a| a.render(&problem.table))
        .collect();
    assert_eq!(lines, ["unstack c a", "stack b c", "stack a b"]);
}

#[test]
fn harness_worlds_all_plan() {
    init_tracing();
    assert_eq!(run(&BallRooms::new()).unwrap().plan_lines.unwrap().len(), 1);
    assert!(run(&BlocksWorld).unwrap().found_plan());
    assert_eq!(
        run(&CourierRoute::new()).unwrap().plan_lines.unwrap(),
        [
            "load parcel1 truck1 depot",
            "drive truck1 depot north",
            "drive truck1 north south",
            "unload parcel1 truck1 south",
        ]
    );
}

#[test]
fn longer_courier_route() {
    init_tracing();
    let world = CourierRoute::with_roads(
        &[("depot", "a"), ("a", "b"), ("b", "c"), ("depot", "x")],
        "c",
    );
    let lines = run(&world).unwrap().plan_lines.unwrap();
    assert_eq!(lines.len(), 5, "{lines:?}");
    assert_eq!(lines.last().map(String::as_str), Some("unload parcel1 truck1 c"));
}
