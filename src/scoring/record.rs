use crate::config::Interval;
use crate::scoring::{remap, round_score};

/// The confidence in a record, which grows with the number of the season's
/// participating players that this record beats on its map.
///
/// A record that is last on its map always gets `interval.lo`.
pub fn confidence_factor(
    rank: usize,
    records_count: usize,
    total_players: usize,
    interval: &Interval,
) -> f64 {
    let opponents_behind = records_count.saturating_sub(rank);
    if opponents_behind == 0 {
        return interval.lo;
    }
    round_score(remap(
        opponents_behind as f64,
        0.0,
        total_players.saturating_sub(1) as f64,
        interval.lo,
        interval.hi,
    ))
}

pub fn base_score(norm_rank: f64, confidence_factor: f64) -> f64 {
    round_score(norm_rank * confidence_factor)
}

pub fn map_score(base_score: f64, attendance_score: f64) -> f64 {
    round_score(base_score + attendance_score)
}
