use crate::config::ScoringConfig;
use crate::database::*;
use crate::event::{PbDiff, Submission};
use crate::scoring;

/// A player's position in the season ranking.
#[derive(Clone, Debug, PartialEq)]
pub struct SeasonRank {
    /// If a player has the best final score, their `pos` is `1`, and so on.
    pub pos: usize,
    pub player_id: String,
    pub final_score: f64,
    pub map_participation_count: usize,
}

/// The season's maps, players and records, along with every
/// derived score.
///
/// Every accepted submission recomputes the whole season. Concurrent
/// users must treat `submit` as a single critical section over the
/// whole `Leaderboard`, f.e. by wrapping it in a `Mutex`.
#[derive(Clone, Debug, Default)]
pub struct Leaderboard {
    season: Snapshot,
    config: ScoringConfig,
}

impl Leaderboard {
    pub fn new(config: ScoringConfig) -> Self {
        Leaderboard {
            season: Snapshot::default(),
            config,
        }
    }

    /// Use a previously exported season. Derived fields are used as they are.
    pub fn from_snapshot(season: Snapshot, config: ScoringConfig) -> Self {
        Leaderboard { season, config }
    }

    /// Use a previously exported season, and recompute its derived fields
    /// with the given scoring constants, which might differ from those the
    /// season was exported with.
    pub fn restore(season: Snapshot, config: ScoringConfig) -> Self {
        let mut lb = Leaderboard::from_snapshot(season, config);
        lb.recompute();
        lb
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Add a map to the season. Returns `false` if the map already exists.
    pub fn create_map(&mut self, map_id: &str) -> bool {
        if self.season.maps.contains_key(map_id) {
            return false;
        }
        log::debug!("add map '{}'", map_id);
        let attendance = scoring::attendance_score(
            0,
            self.season.metadata.total_participating_players_count,
            &self.config.attendance,
        );
        self.season
            .maps
            .insert(map_id.to_string(), Map::new(attendance));
        self.season.metadata.total_map_count += 1;
        true
    }

    /// Add a player to the season. Returns `false` if the player already exists.
    pub fn create_player(&mut self, player_id: &str) -> bool {
        if self.season.players.contains_key(player_id) {
            return false;
        }
        log::debug!("add player '{}'", player_id);
        self.season
            .players
            .insert(player_id.to_string(), Player::default());
        true
    }

    /// Submit a player's time on a map.
    ///
    /// The time is only stored if it beats the player's personal best on that
    /// map, in which case every derived score of the season is updated.
    /// Otherwise, the submission is ignored.
    ///
    /// # Errors
    /// Returns an error if the map or player does not exist, or if the time
    /// is not a finite number. The season remains unchanged.
    pub fn submit(
        &mut self,
        map_id: &str,
        player_id: &str,
        time: f64,
    ) -> Result<Submission, SubmitError> {
        if !self.season.maps.contains_key(map_id) {
            log::warn!("cannot submit time: map '{}' not found", map_id);
            return Err(SubmitError::UnknownMap(map_id.to_string()));
        }
        if !self.season.players.contains_key(player_id) {
            log::warn!("cannot submit time: player '{}' not found", player_id);
            return Err(SubmitError::UnknownPlayer(player_id.to_string()));
        }
        if !time.is_finite() {
            log::warn!("cannot submit time: {} is not a valid time", time);
            return Err(SubmitError::InvalidTime(time));
        }

        let prev = self
            .season
            .records
            .get(map_id)
            .and_then(|recs| recs.get(player_id))
            .map(|rec| (rec.time, rec.rank));

        let is_improvement = match prev {
            Some((prev_time, _)) => time < prev_time,
            None => true,
        };
        if !is_improvement {
            log::trace!(
                "ignore time {} of '{}' on '{}': no personal best",
                time,
                player_id,
                map_id
            );
            return Ok(Submission::Ignored);
        }

        let first_on_map = prev.is_none();
        let first_overall = !self.season.has_any_record(player_id);

        if first_overall {
            self.season.metadata.total_participating_players_count += 1;
        }
        if first_on_map {
            if let Some(map) = self.season.maps.get_mut(map_id) {
                map.records_count += 1;
            }
            if let Some(player) = self.season.players.get_mut(player_id) {
                player.map_participation_count += 1;
            }
        }

        self.season
            .records
            .entry(map_id.to_string())
            .or_default()
            .insert(player_id.to_string(), Record::new(time));

        self.recompute();

        let new_rank = self
            .record(map_id, player_id)
            .map(|rec| rec.rank)
            .unwrap_or_default();

        log::debug!(
            "new personal best of '{}' on '{}': {} (rank {})",
            player_id,
            map_id,
            time,
            new_rank
        );

        Ok(Submission::Accepted(PbDiff {
            map_id: map_id.to_string(),
            player_id: player_id.to_string(),
            prev_time: prev.map(|(prev_time, _)| prev_time),
            new_time: time,
            prev_rank: prev.map(|(_, prev_rank)| prev_rank),
            new_rank,
            first_on_map,
            first_overall,
        }))
    }

    /// Recompute every derived field of the season from the stored times and counters.
    pub fn recompute(&mut self) {
        scoring::recompute(&mut self.season, &self.config);
    }

    /// A copy of the complete season state.
    pub fn export_state(&self) -> Snapshot {
        self.season.clone()
    }

    /// Replace the season state. Derived fields are used as they are;
    /// call `recompute` to refresh them.
    pub fn import_state(&mut self, season: Snapshot) {
        self.season = season;
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.season
    }

    pub fn metadata(&self) -> &Metadata {
        &self.season.metadata
    }

    pub fn map(&self, map_id: &str) -> Option<&Map> {
        self.season.maps.get(map_id)
    }

    pub fn player(&self, player_id: &str) -> Option<&Player> {
        self.season.players.get(player_id)
    }

    /// The personal best of a player on a map, or `None` if they have not
    /// set a record there.
    pub fn record(&self, map_id: &str, player_id: &str) -> Option<&Record> {
        self.season
            .records
            .get(map_id)
            .and_then(|recs| recs.get(player_id))
    }

    /// Map IDs, in the order they were added.
    pub fn map_ids(&self) -> impl Iterator<Item = &str> {
        self.season.maps.keys().map(String::as_str)
    }

    /// Player IDs, in the order they were added.
    pub fn player_ids(&self) -> impl Iterator<Item = &str> {
        self.season.players.keys().map(String::as_str)
    }

    /// The records on a map, sorted from best to worst.
    pub fn map_ranking(&self, map_id: &str) -> Vec<(&str, &Record)> {
        let mut ranking: Vec<(&str, &Record)> = self
            .season
            .records
            .get(map_id)
            .map(|recs| {
                recs.iter()
                    .map(|(player_id, rec)| (player_id.as_str(), rec))
                    .collect()
            })
            .unwrap_or_default();
        ranking.sort_by_key(|(_, rec)| rec.rank);
        ranking
    }

    /// The records of a player, sorted from fastest to slowest time.
    pub fn player_records<'a>(&'a self, player_id: &'a str) -> Vec<(&'a str, &'a Record)> {
        let mut records: Vec<(&str, &Record)> = self.season.records_of(player_id).collect();
        records.sort_by(|(_, a), (_, b)| a.time.total_cmp(&b.time));
        records
    }

    /// The average map rank of a player, or `None` if they have not set any record.
    pub fn player_average_rank(&self, player_id: &str) -> Option<f64> {
        self.player(player_id).and_then(|player| player.avg_rank)
    }

    /// The number of maps `K` a player needs a record on to be assigned a final score.
    pub fn min_participation(&self) -> usize {
        scoring::min_participation(
            self.config.min_participation_fraction,
            self.season.metadata.total_map_count,
        )
    }

    /// Ranks all players that have set at least one record, from the best
    /// final score to the worst. Players with equal scores are listed in the order
    /// they were added.
    pub fn season_ranking(&self) -> Vec<SeasonRank> {
        let mut scores: Vec<(&str, f64, usize)> = self
            .season
            .players
            .iter()
            .filter_map(|(player_id, player)| {
                player.final_score.map(|final_score| {
                    (
                        player_id.as_str(),
                        final_score,
                        player.map_participation_count,
                    )
                })
            })
            .collect();

        // Higher is better: put them first.
        scores.sort_by(|(_, a, _), (_, b, _)| b.total_cmp(a));

        scores
            .into_iter()
            .enumerate()
            .map(|(idx, (player_id, final_score, map_participation_count))| SeasonRank {
                pos: idx + 1,
                player_id: player_id.to_string(),
                final_score,
                map_participation_count,
            })
            .collect()
    }
}
