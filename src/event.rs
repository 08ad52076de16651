/// The outcome of a submitted time.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    /// The time is a new personal best, and the season was updated.
    Accepted(PbDiff),

    /// The time is not better than the player's personal best on that map.
    /// Nothing was changed.
    Ignored,
}

impl Submission {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted(_))
    }
}

/// Describes how a new personal best changed a player's standing on a map.
#[derive(Clone, Debug, PartialEq)]
pub struct PbDiff {
    pub map_id: String,
    pub player_id: String,

    /// The previous personal best, or `None` if this is the player's
    /// first record on that map.
    pub prev_time: Option<f64>,

    pub new_time: f64,

    /// The player's map rank before this submission.
    pub prev_rank: Option<usize>,

    /// The player's map rank after this submission.
    pub new_rank: usize,

    /// `True` if the player did not have a record on this map.
    pub first_on_map: bool,

    /// `True` if the player did not have a record on any map,
    /// and now counts as a participating player.
    pub first_overall: bool,
}

impl PbDiff {
    /// The number of positions gained on the map ranking.
    ///
    /// For a player's first record, this is the number of records
    /// that rank worse than it.
    pub fn pos_gained(&self, records_count: usize) -> usize {
        match self.prev_rank {
            Some(prev_rank) => prev_rank.saturating_sub(self.new_rank),
            None => records_count.saturating_sub(self.new_rank),
        }
    }
}
