//! Pairwise temporal-conflict detection.

use chrono::NaiveDate;

/// Two matches conflict iff they share a calendar date and their truncated
/// hours are less than two apart. The set is pairwise only; no transitive
/// closure is taken. Matches with an unparseable date or time never conflict.
pub(super) fn conflicting_pairs(
    dates: &[Option<NaiveDate>],
    hours: &[Option<u32>],
) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for i in 0..dates.len() {
        let (Some(date_i), Some(hour_i)) = (dates[i], hours[i]) else {
            continue;
        };
        for j in (i + 1)..dates.len() {
            let (Some(date_j), Some(hour_j)) = (dates[j], hours[j]) else {
                continue;
            };
            if date_i == date_j && hour_i.abs_diff(hour_j) < 2 {
                pairs.push((i, j));
            }
        }
    }
    pairs
}
