//! The scoring pipeline.
//!
//! Every derived field of a season is a function of its record times
//! and counters. A recompute runs these passes, in order:
//!
//! 1. rank & normalize the records of every map
//! 2. update the attendance score of every map
//! 3. update confidence & composite scores of every record
//! 4. roll up the season aggregates of every player
//!
//! Attendance and confidence depend on the number of participating players
//! in the whole season, which is why every pass covers every map.

pub use map::*;
pub use player::*;
pub use record::*;
pub use remap::*;

use crate::config::ScoringConfig;
use crate::database::{Record, Snapshot};

mod map;
mod player;
mod record;
mod remap;

/// Recompute every derived field of the season.
///
/// The counters in `season.metadata`, as well as the record and participation
/// counts of maps and players are expected to be up to date.
pub fn recompute(season: &mut Snapshot, config: &ScoringConfig) {
    rank_maps(season, config);
    update_attendance(season, config);
    update_record_scores(season, config);
    update_player_stats(season, config);
}

/// Pass 1: rank & normalize every map's records.
pub fn rank_maps(season: &mut Snapshot, config: &ScoringConfig) {
    for (map_id, map) in season.maps.iter_mut() {
        if let Some(records) = season.records.get_mut(map_id) {
            rank_map(map, records);
            normalize_map(map, records, &config.norm_rank);
        }
    }
}

/// Pass 2: re-weight every map by its attendance.
pub fn update_attendance(season: &mut Snapshot, config: &ScoringConfig) {
    let total_players = season.metadata.total_participating_players_count;
    for map in season.maps.values_mut() {
        map.attendance_score =
            attendance_score(map.records_count, total_players, &config.attendance);
    }
}

/// Pass 3: update the confidence & composite scores of every record.
pub fn update_record_scores(season: &mut Snapshot, config: &ScoringConfig) {
    let total_players = season.metadata.total_participating_players_count;
    for (map_id, map) in season.maps.iter() {
        let records = match season.records.get_mut(map_id) {
            Some(records) => records,
            None => continue,
        };
        for rec in records.values_mut() {
            rec.confidence_factor = confidence_factor(
                rec.rank,
                map.records_count,
                total_players,
                &config.confidence,
            );
            rec.base_score = base_score(rec.norm_rank, rec.confidence_factor);
            rec.attendance_score = map.attendance_score;
            rec.map_score = map_score(rec.base_score, rec.attendance_score);
        }
    }
}

/// Pass 4: roll up every player's season aggregates.
pub fn update_player_stats(season: &mut Snapshot, config: &ScoringConfig) {
    let k = min_participation(
        config.min_participation_fraction,
        season.metadata.total_map_count,
    );

    let rolled: Vec<_> = season
        .players
        .iter()
        .map(|(player_id, player)| {
            let records: Vec<&Record> = season.records_of(player_id).map(|(_, rec)| rec).collect();
            rollup(player, &records, k)
        })
        .collect();

    for (player, rolled) in season.players.values_mut().zip(rolled) {
        *player = rolled;
    }
}
