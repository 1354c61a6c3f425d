//! In-process determinism locks: repeated searches and harness runs are
//! byte-identical, and hashing domains stay fixed.

use relplan_harness::contract::PlanningWorld;
use relplan_harness::policy::PolicyConfig;
use relplan_harness::runner::{run, run_world};
use relplan_harness::worlds::blocks_world::BlocksWorld;
use relplan_harness::worlds::courier_route::CourierRoute;
use relplan_kernel::carrier::state::State;
use relplan_kernel::proof::hash_domain::HashDomain;
use relplan_search::heuristic::DependencyGraphScorer;
use relplan_search::policy::SearchPolicy;
use relplan_search::search::search;

#[test]
fn repeated_searches_agree_on_plan_and_stats() {
    let problem = BlocksWorld.build().unwrap();
    let schemas = problem.library.searchable();
    let policy = SearchPolicy::default();
    let runs: Vec<_> = (0..5)
        .map(|_| {
            let scorer = DependencyGraphScorer::new(&problem.goal, &schemas, 25, &problem.table);
            search(&problem.initial, &problem.goal, &schemas, &policy, &scorer).unwrap()
        })
        .collect();
    for r in &runs[1..] {
        assert_eq!(r.plan, runs[0].plan);
        assert_eq!(r.stats, runs[0].stats);
        assert_eq!(r.termination, runs[0].termination);
    }
}

#[test]
fn report_digests_are_stable_across_runs() {
    let first = run(&CourierRoute::new()).unwrap();
    for _ in 0..3 {
        let again = run(&CourierRoute::new()).unwrap();
        assert_eq!(again.report_bytes, first.report_bytes);
        assert_eq!(again.report_digest, first.report_digest);
        assert_eq!(again.plan_digest, first.plan_digest);
    }
}

#[test]
fn policy_changes_move_the_report_digest() {
    let base = run(&BlocksWorld).unwrap();
    let weighted = run_world(
        &BlocksWorld,
        &PolicyConfig {
            path_cost_weight: Some(1),
            ..PolicyConfig::default()
        },
    )
    .unwrap();
    assert_ne!(base.policy_digest, weighted.policy_digest);
    assert_ne!(base.report_digest, weighted.report_digest);
}

#[test]
fn report_json_has_expected_fields() {
    let report = run(&CourierRoute::new()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&report.report_bytes).unwrap();
    assert_eq!(value["schema_version"], "run_report.v1");
    assert_eq!(value["world_id"], "courier_route");
    assert_eq!(value["termination"], "goal_reached");
    assert_eq!(value["plan"].as_array().map(Vec::len), Some(4));
    assert_eq!(value["policy_digest"], report.policy_digest.as_str());
    assert!(value["stats"]["expansions"].as_u64().unwrap() > 0);
}

#[test]
fn fingerprint_ignores_declared_objects_and_order() {
    let problem = BlocksWorld.build().unwrap();
    let mut reversed: Vec<_> = problem.initial.facts().copied().collect();
    reversed.reverse();
    let rebuilt = State::with_objects(reversed, problem.initial.facts().map(|f| f.a));
    assert_eq!(rebuilt.fingerprint(), problem.initial.fingerprint());
}

#[test]
fn hash_domain_prefixes_locked() {
    let expected: [(&HashDomain, &[u8]); 5] = [
        (&HashDomain::StateFingerprint, b"RELPLAN::STATE_FINGERPRINT::V1\0"),
        (&HashDomain::SymbolTable, b"RELPLAN::SYMBOL_TABLE::V1\0"),
        (&HashDomain::PlanDigest, b"RELPLAN::PLAN_DIGEST::V1\0"),
        (&HashDomain::PolicySnapshot, b"RELPLAN::POLICY_SNAPSHOT::V1\0"),
        (&HashDomain::RunReport, b"RELPLAN::RUN_REPORT::V1\0"),
    ];
    assert_eq!(HashDomain::ALL.len(), expected.len());
    for (domain, bytes) in expected {
        assert_eq!(domain.as_bytes(), bytes, "{domain}");
    }
}
