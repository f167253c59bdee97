//! Urgency-ordered greedy assignment.
//!
//! Matches are visited least-filled and highest-stakes first; each unfilled
//! slot takes the cheapest remaining candidate under the shared feasibility
//! predicate. Temporal conflicts are enforced against the in-progress booked
//! time set rather than the precomputed pair list, since the booked set is
//! exactly what this mode already maintains.

use std::cmp::Reverse;
use std::collections::HashSet;

use chrono::NaiveDate;
use log::debug;

use crate::models::{
    category_rank, PersonRole, ProposedAssignment, SolveStatus, UnassignedSlot,
};

use super::distance::TravelEstimate;
use super::{role_slot, SolveOutcome, State};

const NO_CANDIDATES: &str = "no valid candidates";

pub(crate) fn solve(state: &State) -> SolveOutcome {
    let params = state.params;
    let mut assignments: Vec<ProposedAssignment> = Vec::new();
    let mut unassigned: Vec<UnassignedSlot> = Vec::new();
    let mut load = vec![0usize; state.persons.len()];
    let mut booked: Vec<Vec<(NaiveDate, u32)>> = vec![Vec::new(); state.persons.len()];
    // Persons already placed on each match, seeded or found.
    let mut taken: Vec<HashSet<usize>> = vec![HashSet::new(); state.matches.len()];
    let mut seeded = vec![[0usize; 2]; state.matches.len()];

    if params.force_existing {
        for (mi, m) in state.matches.iter().enumerate() {
            for d in m.active_designations() {
                let Some(&pi) = state.person_index.get(&d.person_id) else {
                    continue;
                };
                let person = &state.persons[pi];
                // Seeds obey the same predicates as searched candidates; a
                // designation that fails them is dropped and its slot falls
                // through to candidate search.
                if d.role != person.role || taken[mi].contains(&pi) {
                    continue;
                }
                if seeded[mi][role_slot(person.role)] >= m.needed(person.role) {
                    continue;
                }
                if load[pi] >= params.max_matches_per_person {
                    continue;
                }
                if conflicts_booked(&booked[pi], state.match_dates[mi], state.match_hours[mi]) {
                    continue;
                }
                let Some(estimate) = state.assess(pi, mi) else {
                    continue;
                };
                assignments.push(ProposedAssignment {
                    match_id: m.id.clone(),
                    person_id: person.id.clone(),
                    person_name: person.name.clone(),
                    role: person.role,
                    travel_cost: estimate.cost,
                    distance_km: estimate.km,
                    is_new: false,
                });
                seeded[mi][role_slot(person.role)] += 1;
                taken[mi].insert(pi);
                load[pi] += 1;
                if let (Some(date), Some(hour)) = (state.match_dates[mi], state.match_hours[mi]) {
                    booked[pi].push((date, hour));
                }
            }
        }
        debug!("greedy: seeded {} existing designations", assignments.len());
    }

    // Least-filled first, then highest minimum category first. The stable
    // sort keeps input order for full ties.
    let mut order: Vec<usize> = (0..state.matches.len()).collect();
    order.sort_by_key(|&mi| {
        let m = &state.matches[mi];
        (
            m.active_designations().count(),
            Reverse(category_rank(m.competition.min_ref_category)),
        )
    });

    for &mi in &order {
        let m = &state.matches[mi];
        for role in [PersonRole::Referee, PersonRole::Scorer] {
            let start = if params.force_existing {
                seeded[mi][role_slot(role)]
            } else {
                0
            };
            for slot_index in start..m.needed(role) {
                match find_best(state, mi, role, &taken[mi], &load, &booked) {
                    Some((pi, estimate)) => {
                        let person = &state.persons[pi];
                        assignments.push(ProposedAssignment {
                            match_id: m.id.clone(),
                            person_id: person.id.clone(),
                            person_name: person.name.clone(),
                            role,
                            travel_cost: estimate.cost,
                            distance_km: estimate.km,
                            is_new: !state.designated(mi, &person.id),
                        });
                        taken[mi].insert(pi);
                        load[pi] += 1;
                        if let (Some(date), Some(hour)) =
                            (state.match_dates[mi], state.match_hours[mi])
                        {
                            booked[pi].push((date, hour));
                        }
                    }
                    None => unassigned.push(UnassignedSlot {
                        match_id: m.id.clone(),
                        match_label: m.label(),
                        role,
                        slot_index,
                        reason: NO_CANDIDATES.to_owned(),
                    }),
                }
            }
        }
    }

    let any_new = assignments.iter().any(|a| a.is_new);
    let status = if unassigned.is_empty() {
        SolveStatus::Optimal
    } else if any_new {
        SolveStatus::Partial
    } else {
        SolveStatus::NoSolution
    };

    SolveOutcome {
        status,
        assignments,
        unassigned,
    }
}

/// Scans the whole roster for the lowest-scoring legal candidate. Ties keep
/// the earliest person in input order.
fn find_best(
    state: &State,
    match_idx: usize,
    role: PersonRole,
    taken: &HashSet<usize>,
    load: &[usize],
    booked: &[Vec<(NaiveDate, u32)>],
) -> Option<(usize, TravelEstimate)> {
    let params = state.params;
    let max_load_so_far = load.iter().copied().max().unwrap_or(0).max(1) as f64;
    let mut best: Option<(usize, TravelEstimate, f64)> = None;

    for (pi, person) in state.persons.iter().enumerate() {
        if person.role != role || taken.contains(&pi) {
            continue;
        }
        if load[pi] >= params.max_matches_per_person {
            continue;
        }
        if conflicts_booked(
            &booked[pi],
            state.match_dates[match_idx],
            state.match_hours[match_idx],
        ) {
            continue;
        }
        let Some(estimate) = state.assess(pi, match_idx) else {
            continue;
        };
        let score = params.cost_weight * (estimate.cost / 10.0)
            + params.balance_weight * (load[pi] as f64 / max_load_so_far);
        if best.map_or(true, |(_, _, s)| score < s) {
            best = Some((pi, estimate, score));
        }
    }

    best.map(|(pi, estimate, _)| (pi, estimate))
}

fn conflicts_booked(
    booked: &[(NaiveDate, u32)],
    date: Option<NaiveDate>,
    hour: Option<u32>,
) -> bool {
    let (Some(date), Some(hour)) = (date, hour) else {
        return false;
    };
    booked
        .iter()
        .any(|&(booked_date, booked_hour)| booked_date == date && booked_hour.abs_diff(hour) < 2)
}
