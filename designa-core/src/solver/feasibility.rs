//! The feasibility predicate shared by both solving modes.
//!
//! A (person, match) pair either yields a travel estimate or is out. The
//! exact mode calls this at variable-creation time so infeasible pairs never
//! enter the model; the greedy mode calls it during candidate search.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::{category_rank, Match, Person, PersonRole};

use super::distance::{DistanceTable, TravelEstimate};

/// Beyond this distance, a person without a car has their cost doubled.
const NO_CAR_KM_THRESHOLD: f64 = 15.0;

/// Decides whether `person` is a legal candidate for the match and, if so,
/// returns the travel estimate both modes will price the pair at.
///
/// `date` and `hour` are the match's parsed calendar date and truncated hour;
/// they are taken pre-parsed so batch-wide preparation happens once.
pub fn assess(
    person: &Person,
    m: &Match,
    date: Option<NaiveDate>,
    hour: Option<u32>,
    distances: &DistanceTable,
) -> Option<TravelEstimate> {
    if !person.active {
        return None;
    }
    if m.needed(person.role) == 0 {
        return None;
    }
    if person.role == PersonRole::Referee {
        if let Some(min) = m.competition.min_ref_category {
            if category_rank(person.category) < min.rank() {
                return None;
            }
        }
    }
    if !is_available(person, date, hour) {
        return None;
    }
    if is_incompatible(person, m) {
        return None;
    }
    Some(travel(person, &m.venue.municipality_id, distances))
}

/// Travel estimate for a person reaching a venue municipality, with the
/// no-car penalty applied.
pub fn travel(person: &Person, venue_muni: &str, distances: &DistanceTable) -> TravelEstimate {
    let mut estimate = distances.estimate(&person.municipality_id, venue_muni);
    if !person.has_car && estimate.km > NO_CAR_KM_THRESHOLD {
        estimate.cost *= 2.0;
    }
    estimate
}

/// Availability check against the person's weekly windows.
///
/// No windows means universally available. An unparseable match date or time
/// also counts as available: the engine accepts partial data rather than
/// rejecting the batch.
fn is_available(person: &Person, date: Option<NaiveDate>, hour: Option<u32>) -> bool {
    if person.availabilities.is_empty() {
        return true;
    }
    let (Some(date), Some(hour)) = (date, hour) else {
        return true;
    };
    let day_of_week = date.weekday().number_from_monday();
    let week_monday = date.week(Weekday::Mon).first_day();

    person.availabilities.iter().any(|window| {
        window.day_of_week == day_of_week
            && hour >= window.start_hour
            && hour < window.end_hour
            && window.week_start.as_deref().is_none_or(|start| {
                match NaiveDate::parse_from_str(start, "%Y-%m-%d") {
                    Ok(start) => start == week_monday,
                    // Malformed week restriction: fall back to the recurring
                    // weekly interpretation.
                    Err(_) => true,
                }
            })
    })
}

/// Case-insensitive substring test of every incompatibility against both
/// team names. Empty entries are ignored.
fn is_incompatible(person: &Person, m: &Match) -> bool {
    if person.incompatibilities.is_empty() {
        return false;
    }
    let home = m.home_team.to_lowercase();
    let away = m.away_team.to_lowercase();
    person.incompatibilities.iter().any(|inc| {
        let needle = inc.team_name.to_lowercase();
        !needle.is_empty() && (home.contains(&needle) || away.contains(&needle))
    })
}
