//! Data models for the designa-core API.
//!
//! This module contains the public data structures used to describe an
//! assignment problem (matches, personnel, distances, tuning parameters) and
//! to receive results. Everything is serializable so the engine can sit
//! behind a JSON boundary without further mapping.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Role a person can officiate in.
///
/// Every person has exactly one role; a match declares how many people of
/// each role it needs.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PersonRole {
    Referee,
    Scorer,
}

/// Referee category ladder, lowest to highest.
///
/// A referee is eligible for a competition iff their category rank is at
/// least the competition's declared minimum. Scorers are not ranked.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum RefereeCategory {
    Provincial,
    Autonomico,
    Nacional,
    Feb,
}

impl RefereeCategory {
    /// Numeric rank, 1 (provincial) through 4 (feb). A person without a
    /// category ranks 0 and fails any declared minimum.
    pub fn rank(self) -> u8 {
        match self {
            RefereeCategory::Provincial => 1,
            RefereeCategory::Autonomico => 2,
            RefereeCategory::Nacional => 3,
            RefereeCategory::Feb => 4,
        }
    }
}

/// Rank helper tolerating a missing category.
pub fn category_rank(category: Option<RefereeCategory>) -> u8 {
    category.map_or(0, RefereeCategory::rank)
}

/// Where a match is played. Only the municipality matters to the engine;
/// the name is carried through for display.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Venue {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub municipality_id: String,
}

/// Competition metadata attached to a match.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Competition {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Minimum referee category, if the competition declares one.
    #[serde(default)]
    pub min_ref_category: Option<RefereeCategory>,
    /// Competition-level defaults; matches carry their own counts and those
    /// are what the engine enforces.
    #[serde(default)]
    pub referees_needed: usize,
    #[serde(default)]
    pub scorers_needed: usize,
}

/// A pre-existing (person, match, role) assignment from the calling system.
///
/// Designations with status `"rejected"` are ignored everywhere: they are
/// never seeded, never pinned, and do not count toward slot accounting.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Designation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub match_id: String,
    pub person_id: String,
    pub role: PersonRole,
    pub status: String,
}

impl Designation {
    pub fn is_rejected(&self) -> bool {
        self.status == "rejected"
    }
}

/// A scheduled game requiring a fixed number of referees and scorers.
///
/// `date` is an ISO `YYYY-MM-DD` calendar date and `time` a 24h `HH:MM`
/// wall-clock time, both interpreted server-local with no time zone.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Match {
    pub id: String,
    pub date: String,
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    pub venue: Venue,
    pub competition: Competition,
    pub referees_needed: usize,
    pub scorers_needed: usize,
    #[serde(default)]
    pub designations: Vec<Designation>,
}

impl Match {
    /// "home vs away", the label used for unassigned-slot reporting.
    pub fn label(&self) -> String {
        format!("{} vs {}", self.home_team, self.away_team)
    }

    /// Parsed calendar date, or `None` when the field is malformed.
    /// A malformed date degrades gracefully: availability windows stop
    /// applying and the match never temporally conflicts.
    pub fn calendar_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    /// Hour of day truncated from `HH:MM`, or `None` when malformed.
    /// Minutes are ignored throughout the engine.
    pub fn hour(&self) -> Option<u32> {
        let h: u32 = self.time.split(':').next()?.trim().parse().ok()?;
        (h < 24).then_some(h)
    }

    /// Required slots for a role.
    pub fn needed(&self, role: PersonRole) -> usize {
        match role {
            PersonRole::Referee => self.referees_needed,
            PersonRole::Scorer => self.scorers_needed,
        }
    }

    /// Designations that are not rejected, in input order.
    pub fn active_designations(&self) -> impl Iterator<Item = &Designation> + '_ {
        self.designations.iter().filter(|d| !d.is_rejected())
    }
}

/// A weekly availability window.
///
/// The window applies to a match iff the match's ISO day-of-week equals
/// `day_of_week` (1 = Monday .. 7 = Sunday), the match hour lies in
/// `[start_hour, end_hour)`, and, when `week_start` is present, the Monday of
/// the match's ISO week equals it.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Availability {
    pub day_of_week: u32,
    pub start_hour: u32,
    pub end_hour: u32,
    /// Monday of the one week this window is restricted to, `YYYY-MM-DD`.
    /// Absent means the window recurs every week.
    #[serde(default)]
    pub week_start: Option<String>,
}

/// A team a person may not officiate. Matching is a case-insensitive
/// substring test against either team name.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Incompatibility {
    pub team_name: String,
}

/// An officiating person: referee or scorekeeper.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Person {
    pub id: String,
    pub name: String,
    pub role: PersonRole,
    #[serde(default)]
    pub category: Option<RefereeCategory>,
    pub municipality_id: String,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default = "default_true")]
    pub has_car: bool,
    /// Empty means universally available.
    #[serde(default)]
    pub availabilities: Vec<Availability>,
    #[serde(default)]
    pub incompatibilities: Vec<Incompatibility>,
}

fn default_true() -> bool {
    true
}

/// A pairwise municipality distance. Supplied rows are treated as symmetric;
/// only one orientation needs to be present.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Distance {
    pub origin_id: String,
    pub dest_id: String,
    pub distance_km: f64,
}

/// Which solving mode to run.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SolverType {
    /// Exact integer model on the MIP backend.
    #[default]
    Cpsat,
    /// Urgency-ordered heuristic.
    Greedy,
}

/// Solver tuning parameters. Every field has a default so a sparse or absent
/// `parameters` object parses.
///
/// # Example
///
/// ```no_run
/// use designa_core::models::{SolverParameters, SolverType};
///
/// let params = SolverParameters {
///     solver_type: SolverType::Greedy,
///     max_matches_per_person: 2,
///     ..Default::default()
/// };
/// assert_eq!(params.cost_weight, 0.7);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SolverParameters {
    /// Weight on travel cost in the objective, in [0, 1].
    #[serde(default = "default_cost_weight")]
    pub cost_weight: f64,
    /// Weight on the max − min load spread, in [0, 1].
    #[serde(default = "default_balance_weight")]
    pub balance_weight: f64,
    /// Per-person capacity over the whole batch, in [1, 10].
    #[serde(default = "default_max_matches")]
    pub max_matches_per_person: usize,
    /// Pin accepted pre-existing designations into the solution.
    #[serde(default = "default_true")]
    pub force_existing: bool,
    /// Wall-clock bound for the exact backend, seconds.
    #[serde(default = "default_max_time")]
    pub max_time_seconds: u64,
    #[serde(default)]
    pub solver_type: SolverType,
}

fn default_cost_weight() -> f64 {
    0.7
}

fn default_balance_weight() -> f64 {
    0.3
}

fn default_max_matches() -> usize {
    3
}

fn default_max_time() -> u64 {
    10
}

impl Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            cost_weight: default_cost_weight(),
            balance_weight: default_balance_weight(),
            max_matches_per_person: default_max_matches(),
            force_existing: true,
            max_time_seconds: default_max_time(),
            solver_type: SolverType::default(),
        }
    }
}

/// Root request document: one batch of matches, the full roster, the distance
/// table and the tuning parameters.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OptimizationRequest {
    pub matches: Vec<Match>,
    pub persons: Vec<Person>,
    #[serde(default)]
    pub distances: Vec<Distance>,
    #[serde(default)]
    pub parameters: SolverParameters,
}

/// Outcome classification of a solve.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// Every required slot covered and, in exact mode, optimality proven.
    Optimal,
    /// Exact mode only: a full cover found but optimality not proven within
    /// the time budget.
    Feasible,
    /// At least one assignment made, but some slot remains uncovered.
    Partial,
    /// Nothing could be assigned (or the backend found the model infeasible).
    NoSolution,
}

/// One proposed (match, person, role) assignment.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ProposedAssignment {
    pub match_id: String,
    pub person_id: String,
    pub person_name: String,
    pub role: PersonRole,
    /// Travel cost after the no-car penalty, in cost units (not km).
    pub travel_cost: f64,
    pub distance_km: f64,
    /// False iff this pair came from an accepted pre-existing designation.
    pub is_new: bool,
}

/// One required slot the solver could not fill.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct UnassignedSlot {
    pub match_id: String,
    /// "home vs away".
    pub match_label: String,
    pub role: PersonRole,
    pub slot_index: usize,
    pub reason: String,
}

/// Aggregate quality metrics for a solve.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct SolverMetrics {
    /// Sum of travel cost over new assignments, rounded to 2 decimals.
    pub total_cost: f64,
    /// Covered percentage of required slots, rounded to 1 decimal.
    /// 100.0 when the batch requires zero slots.
    pub coverage: f64,
    pub covered_slots: usize,
    pub total_slots: usize,
    pub resolution_time_ms: u64,
    pub solver_type: SolverType,
}

/// The complete result of one solve.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct OptimizationResponse {
    pub status: SolveStatus,
    /// Flat assignment list; ordering is not part of the contract.
    pub assignments: Vec<ProposedAssignment>,
    pub metrics: SolverMetrics,
    pub unassigned: Vec<UnassignedSlot>,
}
