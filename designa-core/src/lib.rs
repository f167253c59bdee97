//! # Designa-Core: officiating assignment engine
//!
//! This crate assigns officiating personnel (referees and scorekeepers) to
//! basketball matches so that every required slot is filled subject to
//! eligibility and conflict constraints, while minimizing travel cost and
//! balancing workload across the roster.
//!
//! The engine is a stateless request/response core: it consumes a fully
//! materialized [`models::OptimizationRequest`] and returns a
//! [`models::OptimizationResponse`]. It performs no I/O, keeps no state
//! across invocations, and reports domain outcomes (uncovered slots,
//! infeasible batches) through the response rather than through errors.
//!
//! Two solving modes share one feasibility predicate and differ only in how
//! they resolve the combinatorial choice:
//!
//! - `cpsat` (default): an exact integer model over the filtered candidate
//!   set, solved by the HiGHS MIP backend. Soft coverage with slack, hard
//!   temporal-conflict and capacity constraints, and an objective combining
//!   coverage penalty, travel cost and load imbalance.
//! - `greedy`: urgency-ordered slot filling with a scalar candidate score.
//!
//! ## Quick example
//!
//! ```no_run
//! use designa_core::models::*;
//! use designa_core::solve;
//!
//! let request = OptimizationRequest {
//!     matches: vec![Match {
//!         id: "match-1".into(),
//!         date: "2026-03-07".into(),
//!         time: "10:00".into(),
//!         home_team: "CB Centro".into(),
//!         away_team: "AD Sur".into(),
//!         venue: Venue {
//!             id: "venue-1".into(),
//!             name: String::new(),
//!             municipality_id: "muni-001".into(),
//!         },
//!         competition: Competition {
//!             id: "comp-1".into(),
//!             name: String::new(),
//!             min_ref_category: None,
//!             referees_needed: 1,
//!             scorers_needed: 0,
//!         },
//!         referees_needed: 1,
//!         scorers_needed: 0,
//!         designations: vec![],
//!     }],
//!     persons: vec![Person {
//!         id: "ref-1".into(),
//!         name: "Ref 1".into(),
//!         role: PersonRole::Referee,
//!         category: Some(RefereeCategory::Provincial),
//!         municipality_id: "muni-001".into(),
//!         active: true,
//!         has_car: true,
//!         availabilities: vec![],
//!         incompatibilities: vec![],
//!     }],
//!     distances: vec![],
//!     parameters: SolverParameters::default(),
//! };
//!
//! match solve(&request) {
//!     Ok(response) => {
//!         println!("status: {:?}", response.status);
//!         println!("coverage: {}%", response.metrics.coverage);
//!     }
//!     Err(e) => eprintln!("solve aborted: {e}"),
//! }
//! ```

use std::time::Instant;

use log::debug;

use crate::models::{
    Distance, Match, OptimizationRequest, OptimizationResponse, Person, SolverParameters,
    SolverType,
};
use crate::solver::State;

pub mod models;
pub mod solver;

pub use solver::SolverError;

/// Runs one solve over a complete request document.
///
/// Dispatches on `parameters.solver_type` and attaches coverage and cost
/// metrics to whichever mode ran. The only error condition is an
/// unrecoverable fault in the exact backend; every domain outcome, including
/// a batch with nothing assignable, comes back as an `Ok` response with the
/// appropriate `status` and `unassigned` entries.
pub fn solve(request: &OptimizationRequest) -> Result<OptimizationResponse, SolverError> {
    solve_batch(
        &request.matches,
        &request.persons,
        &request.distances,
        &request.parameters,
    )
}

/// Same as [`solve`], taking the request parts separately.
pub fn solve_batch(
    matches: &[Match],
    persons: &[Person],
    distances: &[Distance],
    parameters: &SolverParameters,
) -> Result<OptimizationResponse, SolverError> {
    let started = Instant::now();
    let state = State::new(matches, persons, distances, parameters);
    debug!(
        "solving batch: {} matches, {} persons, {} required slots, mode {:?}",
        matches.len(),
        persons.len(),
        state.total_slots(),
        parameters.solver_type
    );

    let outcome = match parameters.solver_type {
        SolverType::Cpsat => solver::exact::solve(&state)?,
        SolverType::Greedy => solver::greedy::solve(&state),
    };

    let response = solver::finalize(
        outcome,
        state.total_slots(),
        started.elapsed().as_millis() as u64,
        parameters.solver_type,
    );
    debug!(
        "solve finished: status {:?}, {}/{} slots covered in {} ms",
        response.status,
        response.metrics.covered_slots,
        response.metrics.total_slots,
        response.metrics.resolution_time_ms
    );
    Ok(response)
}
