//! Shared solver machinery.
//!
//! Both solving modes work off the same prepared [`State`]: the symmetric
//! distance table, per-match parsed dates and truncated hours, the pairwise
//! temporal-conflict set, and the feasibility predicate. The modes differ
//! only in how they resolve the combinatorial choice.

pub mod distance;
pub(crate) mod exact;
pub mod feasibility;
pub(crate) mod greedy;
mod overlap;

use std::collections::HashMap;

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{
    Distance, Match, OptimizationResponse, Person, ProposedAssignment, SolveStatus, SolverMetrics,
    SolverParameters, SolverType, UnassignedSlot,
};
use distance::{DistanceTable, TravelEstimate};

/// Errors that abort a solve.
///
/// Domain outcomes (uncovered slots, infeasible batches) are reported through
/// the response `status` and `unassigned` list, never through this type. The
/// only abortive condition left is an unrecoverable fault in the exact
/// backend.
#[derive(Error, Debug)]
pub enum SolverError {
    /// The MIP backend failed for a reason other than infeasibility.
    #[error("solver backend failure: {0}")]
    Backend(String),
}

/// Prepared, read-only view of one request.
///
/// Construction parses every match date and time once, indexes persons by id,
/// builds the distance table and precomputes the conflict pairs. Nothing in
/// here is mutated during a solve.
pub struct State<'a> {
    pub matches: &'a [Match],
    pub persons: &'a [Person],
    pub params: &'a SolverParameters,
    pub distances: DistanceTable,
    /// Person id to roster index.
    pub person_index: HashMap<String, usize>,
    /// Parsed calendar date per match, aligned with `matches`. `None` for
    /// malformed dates (graceful degradation, see the feasibility rules).
    pub match_dates: Vec<Option<NaiveDate>>,
    /// Truncated hour per match, aligned with `matches`.
    pub match_hours: Vec<Option<u32>>,
    /// Match index pairs (i < j) that may not share a person.
    pub conflicts: Vec<(usize, usize)>,
}

impl<'a> State<'a> {
    pub fn new(
        matches: &'a [Match],
        persons: &'a [Person],
        distances: &[Distance],
        params: &'a SolverParameters,
    ) -> Self {
        let match_dates: Vec<_> = matches.iter().map(Match::calendar_date).collect();
        let match_hours: Vec<_> = matches.iter().map(Match::hour).collect();
        let conflicts = overlap::conflicting_pairs(&match_dates, &match_hours);
        let person_index = persons
            .iter()
            .enumerate()
            .map(|(idx, p)| (p.id.clone(), idx))
            .collect();

        State {
            matches,
            persons,
            params,
            distances: DistanceTable::new(distances),
            person_index,
            match_dates,
            match_hours,
            conflicts,
        }
    }

    /// Runs the shared feasibility predicate for one (person, match) pair.
    /// `Some` carries the travel estimate with the no-car penalty applied.
    pub fn assess(&self, person_idx: usize, match_idx: usize) -> Option<TravelEstimate> {
        feasibility::assess(
            &self.persons[person_idx],
            &self.matches[match_idx],
            self.match_dates[match_idx],
            self.match_hours[match_idx],
            &self.distances,
        )
    }

    /// Total required slots across the batch.
    pub fn total_slots(&self) -> usize {
        self.matches
            .iter()
            .map(|m| m.referees_needed + m.scorers_needed)
            .sum()
    }

    /// Whether `person_id` appears in the match's non-rejected designations.
    /// Drives the `is_new` flag on proposed assignments.
    pub fn designated(&self, match_idx: usize, person_id: &str) -> bool {
        self.matches[match_idx]
            .active_designations()
            .any(|d| d.person_id == person_id)
    }
}

/// What a solving mode hands back before metrics are attached.
pub(crate) struct SolveOutcome {
    pub status: SolveStatus,
    pub assignments: Vec<ProposedAssignment>,
    pub unassigned: Vec<UnassignedSlot>,
}

/// Attaches coverage and cost metrics to a mode's outcome.
pub(crate) fn finalize(
    outcome: SolveOutcome,
    total_slots: usize,
    resolution_time_ms: u64,
    solver_type: SolverType,
) -> OptimizationResponse {
    let covered_slots = total_slots.saturating_sub(outcome.unassigned.len());
    let coverage = if total_slots == 0 {
        100.0
    } else {
        round1(covered_slots as f64 / total_slots as f64 * 100.0)
    };
    let total_cost = round2(
        outcome
            .assignments
            .iter()
            .filter(|a| a.is_new)
            .map(|a| a.travel_cost)
            .sum(),
    );

    OptimizationResponse {
        status: outcome.status,
        assignments: outcome.assignments,
        metrics: SolverMetrics {
            total_cost,
            coverage,
            covered_slots,
            total_slots,
            resolution_time_ms,
            solver_type,
        },
        unassigned: outcome.unassigned,
    }
}

/// Role index for the per-match slot accounting arrays (referees first).
pub(crate) fn role_slot(role: crate::models::PersonRole) -> usize {
    match role {
        crate::models::PersonRole::Referee => 0,
        crate::models::PersonRole::Scorer => 1,
    }
}

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
