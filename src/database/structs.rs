use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Season-wide counters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// The number of players that have set a record on at least one map.
    pub total_participating_players_count: usize,

    /// The number of maps in the season.
    pub total_map_count: usize,
}

/// A map of the season.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// The number of players that have set a record on this map.
    pub records_count: usize,

    /// The fastest record time on this map, or `None` if there are no records.
    pub best_time: Option<f64>,

    /// The slowest record time on this map, or `None` if there are no records.
    pub worst_time: Option<f64>,

    /// The bonus added to the score of every record on this map.
    /// It is higher the fewer players have set a record on this map.
    pub attendance_score: f64,
}

impl Map {
    pub(crate) fn new(attendance_score: f64) -> Self {
        Map {
            records_count: 0,
            best_time: None,
            worst_time: None,
            attendance_score,
        }
    }
}

/// A player of the season, and their season aggregates.
///
/// Every aggregate is `None` until the player has set their first record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// The number of maps this player has set a record on.
    pub map_participation_count: usize,

    pub avg_rank: Option<f64>,
    pub avg_norm_rank: Option<f64>,
    pub avg_confidence_factor: Option<f64>,
    pub avg_base_score: Option<f64>,
    pub avg_attendance_score: Option<f64>,

    /// The mean of this player's best map scores. Only the best
    /// `K` scores count, where `K` is the minimum participation.
    pub avg_map_score: Option<f64>,

    /// Equal to `avg_map_score` if this player has set records on at
    /// least `K` maps, and zero otherwise.
    pub final_score: Option<f64>,
}

/// A player's personal best on a map, and its derived scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The personal best time. Lower is better.
    pub time: f64,

    /// The map rank; the record with the best time on a map has rank `1`.
    pub rank: usize,

    /// The time mapped onto the normalized rank interval, where the best
    /// time on the map gets the highest value.
    pub norm_rank: f64,

    /// How many of the season's participating players this record beats,
    /// mapped onto the confidence interval.
    pub confidence_factor: f64,

    /// `norm_rank * confidence_factor`
    pub base_score: f64,

    /// The attendance score of the map this record was set on.
    pub attendance_score: f64,

    /// `base_score + attendance_score`
    pub map_score: f64,
}

impl Record {
    /// A new personal best, with derived fields that are yet to be computed.
    pub(crate) fn new(time: f64) -> Self {
        Record {
            time,
            rank: 0,
            norm_rank: 0.0,
            confidence_factor: 0.0,
            base_score: 0.0,
            attendance_score: 0.0,
            map_score: 0.0,
        }
    }
}

/// Records of a single map, mapping player IDs to their personal best.
pub type MapRecords = IndexMap<String, Record>;

/// The complete state of a season.
///
/// This is the document that is exported to, and imported from
/// external storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub metadata: Metadata,

    /// Maps map IDs to maps, in the order they were added.
    pub maps: IndexMap<String, Map>,

    /// Maps player IDs to players, in the order they were added.
    pub players: IndexMap<String, Player>,

    /// Maps map IDs to the records set on that map.
    ///
    /// Maps without any records might not have an entry.
    pub records: IndexMap<String, MapRecords>,
}

impl Snapshot {
    /// Iterate a player's records in the order maps were added to the season.
    pub fn records_of<'a>(
        &'a self,
        player_id: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Record)> + 'a {
        self.maps.keys().filter_map(move |map_id| {
            self.records
                .get(map_id)
                .and_then(|recs| recs.get(player_id))
                .map(|rec| (map_id.as_str(), rec))
        })
    }

    /// `True` if the player has set a record on any map.
    pub fn has_any_record(&self, player_id: &str) -> bool {
        self.records
            .values()
            .any(|recs| recs.contains_key(player_id))
    }
}
