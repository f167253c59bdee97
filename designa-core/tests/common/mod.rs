//! Shared builders for designa-core integration tests.

use designa_core::models::{
    Competition, Designation, Distance, Match, Person, PersonRole, RefereeCategory,
    SolverParameters, SolverType, Venue,
};

/// A Saturday; the Monday of its ISO week is 2026-03-02.
pub const SATURDAY: &str = "2026-03-07";

#[allow(dead_code)]
pub fn make_venue(muni_id: &str) -> Venue {
    Venue {
        id: "venue-1".to_string(),
        name: "Pabellon Test".to_string(),
        municipality_id: muni_id.to_string(),
    }
}

#[allow(dead_code)]
pub fn make_competition(min_ref_category: Option<RefereeCategory>) -> Competition {
    Competition {
        id: "comp-1".to_string(),
        name: "Liga Test".to_string(),
        min_ref_category,
        referees_needed: 2,
        scorers_needed: 1,
    }
}

#[allow(dead_code)]
pub fn make_match(id: &str, time: &str, referees: usize, scorers: usize) -> Match {
    Match {
        id: id.to_string(),
        date: SATURDAY.to_string(),
        time: time.to_string(),
        home_team: "Team A".to_string(),
        away_team: "Team B".to_string(),
        venue: make_venue("muni-001"),
        competition: make_competition(None),
        referees_needed: referees,
        scorers_needed: scorers,
        designations: vec![],
    }
}

#[allow(dead_code)]
pub fn make_person(id: &str, name: &str, role: PersonRole) -> Person {
    Person {
        id: id.to_string(),
        name: name.to_string(),
        role,
        category: Some(RefereeCategory::Provincial),
        municipality_id: "muni-001".to_string(),
        active: true,
        has_car: true,
        availabilities: vec![],
        incompatibilities: vec![],
    }
}

#[allow(dead_code)]
pub fn make_designation(match_id: &str, person_id: &str, role: PersonRole, status: &str) -> Designation {
    Designation {
        id: format!("des-{person_id}"),
        match_id: match_id.to_string(),
        person_id: person_id.to_string(),
        role,
        status: status.to_string(),
    }
}

#[allow(dead_code)]
pub fn make_distance(origin: &str, dest: &str, km: f64) -> Distance {
    Distance {
        origin_id: origin.to_string(),
        dest_id: dest.to_string(),
        distance_km: km,
    }
}

#[allow(dead_code)]
pub fn params(solver_type: SolverType) -> SolverParameters {
    SolverParameters {
        force_existing: false,
        solver_type,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn both_modes() -> [SolverType; 2] {
    [SolverType::Cpsat, SolverType::Greedy]
}
