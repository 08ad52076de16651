use crate::database::{Player, Record};
use crate::scoring::round_score;

/// The number of maps `K` a player needs a record on to be assigned
/// a final score. Only a player's best `K` map scores count towards it.
///
/// This is at least one, as long as the season has any maps.
pub fn min_participation(fraction: f64, total_map_count: usize) -> usize {
    // Keep f.e. 0.3 * 10 = 3.0000000000000004 from rounding up to 4.
    let exact = ((fraction * total_map_count as f64) * 1e9).round() / 1e9;
    let k = exact.ceil().max(0.0) as usize;
    k.max(1).min(total_map_count.max(1))
}

/// Compute a player's season aggregates from all of their records.
///
/// `map_participation_count` is taken over from `player`, every other
/// field is derived from `records`. A player without records has
/// no aggregates.
pub fn rollup(player: &Player, records: &[&Record], min_participation: usize) -> Player {
    let mut rolled = Player {
        map_participation_count: player.map_participation_count,
        ..Player::default()
    };
    if records.is_empty() {
        return rolled;
    }

    let mean = |value: fn(&Record) -> f64| {
        let sum: f64 = records.iter().map(|rec| value(rec)).sum();
        round_score(sum / records.len() as f64)
    };

    rolled.avg_rank = Some(mean(|rec| rec.rank as f64));
    rolled.avg_norm_rank = Some(mean(|rec| rec.norm_rank));
    rolled.avg_confidence_factor = Some(mean(|rec| rec.confidence_factor));
    rolled.avg_base_score = Some(mean(|rec| rec.base_score));
    rolled.avg_attendance_score = Some(mean(|rec| rec.attendance_score));

    let mut map_scores: Vec<f64> = records.iter().map(|rec| rec.map_score).collect();
    map_scores.sort_by(|a, b| b.total_cmp(a));
    map_scores.truncate(min_participation.max(1));
    let avg_map_score =
        round_score(map_scores.iter().sum::<f64>() / map_scores.len() as f64);

    rolled.avg_map_score = Some(avg_map_score);
    rolled.final_score = if rolled.map_participation_count >= min_participation {
        Some(avg_map_score)
    } else {
        Some(0.0)
    };
    rolled
}
