//! Symmetric municipality-distance lookup.

use std::collections::HashMap;

use crate::models::Distance;

use super::round2;

/// Fixed cost for a match in the person's own municipality.
pub const SAME_TOWN_COST: f64 = 3.0;
/// Kilometers assumed for a municipality pair with no supplied distance.
pub const FALLBACK_KM: f64 = 35.0;
/// Cost units per kilometer.
const COST_PER_KM: f64 = 0.1;

/// Travel cost and distance for one (origin, destination) query.
///
/// Cost and km stay independent: the no-car penalty doubles cost but keys off
/// raw kilometers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TravelEstimate {
    pub cost: f64,
    pub km: f64,
}

/// Constant-time lookup over unordered municipality pairs.
///
/// Each supplied row is stored in both orientations, so queries never depend
/// on which way round the request listed a pair.
#[derive(Debug, Default)]
pub struct DistanceTable {
    km: HashMap<(String, String), f64>,
}

impl DistanceTable {
    pub fn new(distances: &[Distance]) -> Self {
        let mut km = HashMap::with_capacity(distances.len() * 2);
        for d in distances {
            km.insert((d.origin_id.clone(), d.dest_id.clone()), d.distance_km);
            km.insert((d.dest_id.clone(), d.origin_id.clone()), d.distance_km);
        }
        DistanceTable { km }
    }

    /// Cost and kilometers from `origin` to `dest`.
    ///
    /// Same municipality: fixed within-town minimum, zero km. Unknown pair:
    /// the moderate-distance fallback.
    pub fn estimate(&self, origin: &str, dest: &str) -> TravelEstimate {
        if origin == dest {
            return TravelEstimate {
                cost: SAME_TOWN_COST,
                km: 0.0,
            };
        }
        let km = self
            .km
            .get(&(origin.to_owned(), dest.to_owned()))
            .copied()
            .unwrap_or(FALLBACK_KM);
        TravelEstimate {
            cost: round2(km * COST_PER_KM),
            km,
        }
    }
}
