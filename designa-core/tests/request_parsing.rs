//! Wire-format tests: sparse request documents parse with the documented
//! defaults, and responses serialize with the documented tags.

use designa_core::models::{
    OptimizationRequest, PersonRole, RefereeCategory, SolveStatus, SolverType,
};

#[test]
fn minimal_request_parses_with_defaults() {
    let raw = r#"{
        "matches": [{
            "id": "m1",
            "date": "2026-03-07",
            "time": "10:00",
            "home_team": "Team A",
            "away_team": "Team B",
            "venue": {"id": "v1", "municipality_id": "muni-001"},
            "competition": {"id": "c1"},
            "referees_needed": 1,
            "scorers_needed": 0
        }],
        "persons": [{
            "id": "p1",
            "name": "Ref 1",
            "role": "referee",
            "municipality_id": "muni-001"
        }]
    }"#;

    let request: OptimizationRequest = serde_json::from_str(raw).unwrap();

    let person = &request.persons[0];
    assert_eq!(person.role, PersonRole::Referee);
    assert!(person.active);
    assert!(person.has_car);
    assert!(person.category.is_none());
    assert!(person.availabilities.is_empty());

    let m = &request.matches[0];
    assert!(m.designations.is_empty());
    assert!(m.competition.min_ref_category.is_none());

    let p = &request.parameters;
    assert_eq!(p.cost_weight, 0.7);
    assert_eq!(p.balance_weight, 0.3);
    assert_eq!(p.max_matches_per_person, 3);
    assert!(p.force_existing);
    assert_eq!(p.max_time_seconds, 10);
    assert_eq!(p.solver_type, SolverType::Cpsat);
}

#[test]
fn enums_use_the_documented_wire_tags() {
    assert_eq!(
        serde_json::to_value(SolverType::Cpsat).unwrap(),
        serde_json::json!("cpsat")
    );
    assert_eq!(
        serde_json::to_value(SolverType::Greedy).unwrap(),
        serde_json::json!("greedy")
    );
    assert_eq!(
        serde_json::to_value(SolveStatus::NoSolution).unwrap(),
        serde_json::json!("no_solution")
    );
    assert_eq!(
        serde_json::to_value(PersonRole::Scorer).unwrap(),
        serde_json::json!("scorer")
    );
    assert_eq!(
        serde_json::to_value(RefereeCategory::Autonomico).unwrap(),
        serde_json::json!("autonomico")
    );
    let parsed: RefereeCategory = serde_json::from_str("\"feb\"").unwrap();
    assert_eq!(parsed, RefereeCategory::Feb);
}

#[test]
fn category_order_follows_the_ladder() {
    assert!(RefereeCategory::Provincial < RefereeCategory::Autonomico);
    assert!(RefereeCategory::Autonomico < RefereeCategory::Nacional);
    assert!(RefereeCategory::Nacional < RefereeCategory::Feb);
    assert_eq!(RefereeCategory::Provincial.rank(), 1);
    assert_eq!(RefereeCategory::Feb.rank(), 4);
}
