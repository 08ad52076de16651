use lazy_static::*;
use semver::Version;

lazy_static! {
    /// Package version.
    pub static ref VERSION: Version = Version::parse(env!("CARGO_PKG_VERSION"))
        .expect("failed to parse our own SemVer");
}

/// The environment variable that points to a TOML config file.
pub const CONFIG_ENV_VAR: &str = "QUICKQUACK_CONFIG";

/// The file the season is loaded from and dumped to, unless configured otherwise.
pub const DEFAULT_DATABASE_FILE: &str = "quickquack.json";

/// The normalized rank of the worst time on a map.
pub const DEFAULT_NORM_RANK_LO: f64 = 1.0;

/// The normalized rank of the best time on a map.
pub const DEFAULT_NORM_RANK_HI: f64 = 10.0;

/// The confidence of a record that beats nobody.
pub const DEFAULT_CONFIDENCE_LO: f64 = 0.0;

/// The confidence of a record that beats every other participating player.
pub const DEFAULT_CONFIDENCE_HI: f64 = 1.0;

/// The attendance bonus of a map that every participating player has a record on.
pub const DEFAULT_ATTENDANCE_LO: f64 = 0.0;

/// The attendance bonus of a map that only a single player has a record on.
///
/// Maps without any records also carry this bonus.
pub const DEFAULT_ATTENDANCE_HI: f64 = 1.0;

/// The fraction of the season's maps a player needs a record on
/// to be assigned a final score.
pub const DEFAULT_MIN_PARTICIPATION_FRACTION: f64 = 0.5;

/// Derived scores are rounded to this many decimal places.
pub const SCORE_DECIMALS: i32 = 3;
