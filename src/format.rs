use std::fmt::Write;

use crate::leaderboard::Leaderboard;

/// Format a time in seconds with millisecond precision, f.e. `"21.105"`.
pub fn fmt_time(time: f64) -> String {
    format!("{:.3}", time)
}

fn fmt_score(score: Option<f64>) -> String {
    match score {
        Some(score) => format!("{:.3}", score),
        None => "-".to_string(),
    }
}

/// A table of every record on a map, from best to worst.
pub fn time_table(lb: &Leaderboard, map_id: &str) -> String {
    let ranking = lb.map_ranking(map_id);
    if ranking.is_empty() {
        return format!("No records found for map '{}'\n", map_id);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Records for map '{}':", map_id);
    let _ = writeln!(
        out,
        "{:<15}{:>10}{:>6}{:>11}{:>12}{:>8}{:>12}{:>8}",
        "player", "time", "rank", "norm_rank", "confidence", "base", "attendance", "score"
    );
    for (player_id, rec) in ranking {
        let _ = writeln!(
            out,
            "{:<15}{:>10}{:>6}{:>11.3}{:>12.3}{:>8.3}{:>12.3}{:>8.3}",
            player_id,
            fmt_time(rec.time),
            rec.rank,
            rec.norm_rank,
            rec.confidence_factor,
            rec.base_score,
            rec.attendance_score,
            rec.map_score
        );
    }
    out
}

/// A table of every ranked player, from best to worst final score.
pub fn season_table(lb: &Leaderboard) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Season ranking ({} of {} maps required):",
        lb.min_participation(),
        lb.metadata().total_map_count
    );
    let _ = writeln!(
        out,
        "{:>4}  {:<15}{:>6}{:>10}{:>10}{:>8}",
        "pos", "player", "maps", "avg_rank", "avg_score", "final"
    );
    for rank in lb.season_ranking() {
        let player = lb.player(&rank.player_id);
        let _ = writeln!(
            out,
            "{:>4}  {:<15}{:>6}{:>10}{:>10}{:>8.3}",
            rank.pos,
            rank.player_id,
            rank.map_participation_count,
            fmt_score(player.and_then(|p| p.avg_rank)),
            fmt_score(player.and_then(|p| p.avg_map_score)),
            rank.final_score
        );
    }
    out
}
