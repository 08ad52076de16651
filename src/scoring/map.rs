use crate::config::Interval;
use crate::database::{Map, MapRecords};
use crate::scoring::{remap, round_score};

/// Rank the records of a map by their time, and update the map's
/// best and worst time.
///
/// The order of `records` is left untouched. Records with equal times are
/// ranked in that order, which is the order in which they were first set.
pub fn rank_map(map: &mut Map, records: &mut MapRecords) {
    let mut ranking: Vec<(usize, f64)> = records
        .values()
        .map(|rec| rec.time)
        .enumerate()
        .collect();
    ranking.sort_by(|(_, a), (_, b)| a.total_cmp(b)); // stable

    for (pos, (idx, _)) in ranking.iter().enumerate() {
        if let Some((_, rec)) = records.get_index_mut(*idx) {
            rec.rank = pos + 1;
        }
    }

    map.best_time = ranking.first().map(|(_, time)| *time);
    map.worst_time = ranking.last().map(|(_, time)| *time);
}

/// Map the time of every record on a map onto the normalized rank interval.
/// The best time is mapped to `interval.hi`, the worst time to `interval.lo`.
///
/// If every record has the same time, they all get `interval.hi`.
pub fn normalize_map(map: &Map, records: &mut MapRecords, interval: &Interval) {
    let (best, worst) = match (map.best_time, map.worst_time) {
        (Some(best), Some(worst)) => (best, worst),
        _ => return,
    };
    for rec in records.values_mut() {
        rec.norm_rank = round_score(remap(rec.time, best, worst, interval.hi, interval.lo));
    }
}

/// The attendance score of a map, which rewards records on maps that
/// few players have attempted.
///
/// A map with a single record is mapped to `interval.hi`, and a map on
/// which every participating player has a record to `interval.lo`.
/// Maps without records also get `interval.hi`.
pub fn attendance_score(records_count: usize, total_players: usize, interval: &Interval) -> f64 {
    if records_count == 0 {
        return interval.hi;
    }
    round_score(remap(
        records_count as f64,
        1.0,
        total_players as f64,
        interval.hi,
        interval.lo,
    ))
}
