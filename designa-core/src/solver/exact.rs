//! Exact assignment model on the HiGHS MIP backend.
//!
//! Binary variables exist only for (person, match) pairs that pass the shared
//! feasibility predicate; everything else is implicitly zero. Coverage is
//! soft through per-(match, role) slack, priced high enough to dominate every
//! achievable cost and imbalance term. Conflicts and per-person capacity are
//! hard. The backend takes integer coefficients only, so every float input is
//! scaled by 100 and rounded before the model is built.

use std::collections::{HashMap, HashSet};
use std::time::Instant;

use good_lp::solvers::highs::highs;
use good_lp::{constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel, Variable};
use log::{debug, warn};

use crate::models::{PersonRole, ProposedAssignment, SolveStatus, UnassignedSlot};

use super::distance::TravelEstimate;
use super::{role_slot, SolveOutcome, SolverError, State};

/// Fixed float-to-integer scale for costs and weights.
const SCALE: f64 = 100.0;
/// Per-uncovered-slot penalty; dominates any achievable scaled cost plus
/// imbalance term (10000 x SCALE).
const COVERAGE_PENALTY: f64 = 1_000_000.0;
const BACKEND_THREADS: u32 = 4;

const NO_FEASIBLE: &str = "no feasible candidates";
const BACKEND_INFEASIBLE: &str = "solver found no solution";

struct PairVar {
    person: usize,
    match_idx: usize,
    var: Variable,
    estimate: TravelEstimate,
}

pub(crate) fn solve(state: &State) -> Result<SolveOutcome, SolverError> {
    let params = state.params;

    let mut vars = variables!();

    // Assignment variables over the filtered candidate set. Pre-filtering
    // here rather than zeroing in-model is the scalability contract: the
    // variable count is bounded by feasible pairs, not |persons| x |matches|.
    let mut pairs: Vec<PairVar> = Vec::new();
    let mut pair_index: HashMap<(usize, usize), usize> = HashMap::new();
    let mut by_match: Vec<[Vec<usize>; 2]> =
        (0..state.matches.len()).map(|_| [Vec::new(), Vec::new()]).collect();
    let mut per_person: Vec<Vec<usize>> = vec![Vec::new(); state.persons.len()];

    for mi in 0..state.matches.len() {
        for pi in 0..state.persons.len() {
            if let Some(estimate) = state.assess(pi, mi) {
                let var = vars.add(variable().binary().name(format!("x_p{pi}_m{mi}")));
                by_match[mi][role_slot(state.persons[pi].role)].push(pairs.len());
                per_person[pi].push(pairs.len());
                pair_index.insert((pi, mi), pairs.len());
                pairs.push(PairVar {
                    person: pi,
                    match_idx: mi,
                    var,
                    estimate,
                });
            }
        }
    }

    // One slack variable per required (match, role): the uncovered-slot
    // count. With no candidates the coverage equality forces it to the full
    // requirement on its own.
    let mut slacks: Vec<(usize, PersonRole, Variable, usize)> = Vec::new();
    for (mi, m) in state.matches.iter().enumerate() {
        for role in [PersonRole::Referee, PersonRole::Scorer] {
            let needed = m.needed(role);
            if needed == 0 {
                continue;
            }
            let var = vars.add(
                variable()
                    .integer()
                    .min(0)
                    .max(needed as f64)
                    .name(format!("slack_m{mi}_r{}", role_slot(role))),
            );
            slacks.push((mi, role, var, needed));
        }
    }

    // Bounded auxiliaries standing in for max/min over the active persons'
    // loads; the backend has no direct min/max-equality primitive.
    let active: Vec<usize> = state
        .persons
        .iter()
        .enumerate()
        .filter(|(_, p)| p.active)
        .map(|(pi, _)| pi)
        .collect();
    let balance = (!active.is_empty()).then(|| {
        let cap = params.max_matches_per_person as f64;
        let max_load = vars.add(variable().integer().min(0).max(cap).name("max_load"));
        let min_load = vars.add(variable().integer().min(0).max(cap).name("min_load"));
        (max_load, min_load)
    });

    let w_bal = (params.balance_weight * SCALE).round();

    let slack_term: Expression = slacks
        .iter()
        .map(|&(_, _, var, _)| var * COVERAGE_PENALTY)
        .sum();
    // The weight-cost product carries the scale exactly once, keeping every
    // cost coefficient well under the slack penalty.
    let cost_term: Expression = pairs
        .iter()
        .map(|p| p.var * (params.cost_weight * p.estimate.cost * SCALE).round())
        .sum();
    let mut objective = slack_term + cost_term;
    if let Some((max_load, min_load)) = balance {
        objective = objective + max_load * w_bal - min_load * w_bal;
    }

    let mut problem = vars
        .minimise(objective)
        .using(highs)
        .set_verbose(false)
        .set_time_limit(params.max_time_seconds as f64)
        .set_threads(BACKEND_THREADS);

    // Soft coverage: candidates of the role plus slack equal the requirement.
    for &(mi, role, slack, needed) in &slacks {
        let total: Expression = by_match[mi][role_slot(role)]
            .iter()
            .map(|&k| pairs[k].var)
            .sum();
        problem = problem.with(constraint!(total + slack == needed as f64));
    }

    // Temporal conflicts: a person takes at most one of each conflicting
    // match pair.
    if !state.conflicts.is_empty() {
        for pi in 0..state.persons.len() {
            if per_person[pi].len() < 2 {
                continue;
            }
            let vars_by_match: HashMap<usize, Variable> = per_person[pi]
                .iter()
                .map(|&k| (pairs[k].match_idx, pairs[k].var))
                .collect();
            for &(m1, m2) in &state.conflicts {
                if let (Some(&x1), Some(&x2)) = (vars_by_match.get(&m1), vars_by_match.get(&m2)) {
                    problem = problem.with(constraint!(x1 + x2 <= 1));
                }
            }
        }
    }

    // Per-person capacity over the whole batch.
    for pi in 0..state.persons.len() {
        if per_person[pi].is_empty() {
            continue;
        }
        let person_load: Expression = per_person[pi].iter().map(|&k| pairs[k].var).sum();
        problem = problem.with(constraint!(
            person_load <= params.max_matches_per_person as f64
        ));
    }

    // Pin accepted pre-existing designations whose pair survived filtering.
    // Non-surviving designations are dropped; their slots surface as
    // unassigned rather than as infeasibilities.
    if params.force_existing {
        let mut pinned: HashSet<(usize, usize)> = HashSet::new();
        for (mi, m) in state.matches.iter().enumerate() {
            for d in m.active_designations() {
                let Some(&pi) = state.person_index.get(&d.person_id) else {
                    continue;
                };
                if state.persons[pi].role != d.role || !pinned.insert((pi, mi)) {
                    continue;
                }
                if let Some(&k) = pair_index.get(&(pi, mi)) {
                    problem = problem.with(constraint!(pairs[k].var == 1));
                }
            }
        }
    }

    if let Some((max_load, min_load)) = balance {
        for &pi in &active {
            let person_load: Expression = per_person[pi].iter().map(|&k| pairs[k].var).sum();
            problem = problem.with(constraint!(max_load >= person_load.clone()));
            problem = problem.with(constraint!(min_load <= person_load));
        }
    }

    debug!(
        "exact model: {} assignment vars, {} coverage rows, {} conflict pairs",
        pairs.len(),
        slacks.len(),
        state.conflicts.len()
    );

    let backend_started = Instant::now();
    match problem.solve() {
        Ok(solution) => {
            // The backend hands back its incumbent either way; burning the
            // whole wall-clock budget means optimality was not proven.
            let hit_limit =
                backend_started.elapsed().as_secs_f64() >= params.max_time_seconds as f64;
            Ok(extract(state, &pairs, &solution, hit_limit))
        }
        Err(ResolutionError::Infeasible | ResolutionError::Unbounded) => {
            warn!("backend reported the assignment model infeasible");
            Ok(infeasible_outcome(state))
        }
        Err(e) => Err(SolverError::Backend(e.to_string())),
    }
}

fn extract(
    state: &State,
    pairs: &[PairVar],
    solution: &impl Solution,
    hit_limit: bool,
) -> SolveOutcome {
    let mut realized = vec![[0usize; 2]; state.matches.len()];
    let mut assignments = Vec::new();
    for pair in pairs {
        if solution.value(pair.var) > 0.5 {
            let person = &state.persons[pair.person];
            let m = &state.matches[pair.match_idx];
            realized[pair.match_idx][role_slot(person.role)] += 1;
            assignments.push(ProposedAssignment {
                match_id: m.id.clone(),
                person_id: person.id.clone(),
                person_name: person.name.clone(),
                role: person.role,
                travel_cost: pair.estimate.cost,
                distance_km: pair.estimate.km,
                is_new: !state.designated(pair.match_idx, &person.id),
            });
        }
    }

    let mut unassigned = Vec::new();
    for (mi, m) in state.matches.iter().enumerate() {
        for role in [PersonRole::Referee, PersonRole::Scorer] {
            for slot_index in realized[mi][role_slot(role)]..m.needed(role) {
                unassigned.push(UnassignedSlot {
                    match_id: m.id.clone(),
                    match_label: m.label(),
                    role,
                    slot_index,
                    reason: NO_FEASIBLE.to_owned(),
                });
            }
        }
    }

    let status = if assignments.is_empty() && state.total_slots() > 0 {
        SolveStatus::NoSolution
    } else if !unassigned.is_empty() {
        SolveStatus::Partial
    } else if hit_limit {
        SolveStatus::Feasible
    } else {
        SolveStatus::Optimal
    };

    SolveOutcome {
        status,
        assignments,
        unassigned,
    }
}

/// Every required slot reported uncovered; the backend could not satisfy the
/// pinned designations together with the hard constraints.
fn infeasible_outcome(state: &State) -> SolveOutcome {
    let mut unassigned = Vec::new();
    for m in state.matches {
        for role in [PersonRole::Referee, PersonRole::Scorer] {
            for slot_index in 0..m.needed(role) {
                unassigned.push(UnassignedSlot {
                    match_id: m.id.clone(),
                    match_label: m.label(),
                    role,
                    slot_index,
                    reason: BACKEND_INFEASIBLE.to_owned(),
                });
            }
        }
    }
    SolveOutcome {
        status: SolveStatus::NoSolution,
        assignments: Vec::new(),
        unassigned,
    }
}
