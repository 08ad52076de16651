use std::path::PathBuf;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

use crate::constants::*;

/// A closed interval that scores are mapped into.
///
/// `lo` does not have to be smaller than `hi`. Scores are often mapped
/// onto an interval *inverted*, f.e. the best time to `hi`, and the
/// worst time to `lo`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    pub lo: f64,
    pub hi: f64,
}

impl Interval {
    pub const fn new(lo: f64, hi: f64) -> Self {
        Interval { lo, hi }
    }

    fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }
}

/// Constants of the season's scoring.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// The fastest time on a map is mapped to `hi`, the slowest to `lo`.
    pub norm_rank: Interval,

    /// A record that beats every other participating player is mapped
    /// to `hi`, a record that beats nobody to `lo`.
    pub confidence: Interval,

    /// A map with a single record is mapped to `hi`, a map that every
    /// participating player has a record on to `lo`.
    pub attendance: Interval,

    /// The fraction of the season's maps a player needs a record on
    /// to be assigned a final score.
    ///
    /// Must be in `(0, 1]`.
    pub min_participation_fraction: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            norm_rank: Interval::new(DEFAULT_NORM_RANK_LO, DEFAULT_NORM_RANK_HI),
            confidence: Interval::new(DEFAULT_CONFIDENCE_LO, DEFAULT_CONFIDENCE_HI),
            attendance: Interval::new(DEFAULT_ATTENDANCE_LO, DEFAULT_ATTENDANCE_HI),
            min_participation_fraction: DEFAULT_MIN_PARTICIPATION_FRACTION,
        }
    }
}

impl ScoringConfig {
    /// Try to catch configuration errors early.
    pub fn check(&self) -> anyhow::Result<()> {
        let intervals = [
            ("norm_rank", &self.norm_rank),
            ("confidence", &self.confidence),
            ("attendance", &self.attendance),
        ];
        for (name, interval) in intervals.iter() {
            if !interval.is_finite() {
                bail!("config: '{}' bounds must be finite numbers", name);
            }
        }

        let fraction = self.min_participation_fraction;
        if !(fraction > 0.0 && fraction <= 1.0) {
            bail!(
                "config: 'min_participation_fraction' must be in (0, 1], but is {}",
                fraction
            );
        }
        Ok(())
    }
}

/// Settings for generating a season with random records.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Maps `Map1..=MapN` are added to the season.
    pub nb_maps: usize,

    /// Players `Player1..=PlayerN` are added to the season.
    pub nb_players: usize,

    /// The chance that a player has a record on any given map.
    pub participation_chance: f64,

    /// The slowest and fastest generated times.
    pub min_time: f64,
    pub max_time: f64,

    /// The same seed always generates the same season.
    pub seed: u64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        DemoConfig {
            nb_maps: 5,
            nb_players: 17,
            participation_chance: 0.75,
            min_time: 1.0,
            max_time: 100.0,
            seed: 0,
        }
    }
}

impl DemoConfig {
    pub fn check(&self) -> anyhow::Result<()> {
        if !(0.0..=1.0).contains(&self.participation_chance) {
            bail!("config: 'participation_chance' must be in [0, 1]");
        }
        if !(self.min_time.is_finite() && self.max_time.is_finite())
            || self.min_time >= self.max_time
        {
            bail!("config: 'min_time' must be less than 'max_time'");
        }
        Ok(())
    }
}

/// Application config.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// The JSON file that the season is read from at startup, and
    /// written to before exiting. Uses `quickquack.json` in the working
    /// directory if not set.
    pub database_file: Option<PathBuf>,

    pub scoring: ScoringConfig,

    /// Used to populate the season if `database_file` does not exist yet.
    pub demo: DemoConfig,
}

impl Config {
    /// Read the config file listed in the `QUICKQUACK_CONFIG` environment variable,
    /// or use the default config if that variable is not set.
    ///
    /// # Errors
    /// - when `QUICKQUACK_CONFIG` does not point to a valid TOML config
    /// - when a check on one or more values fails
    pub fn read_from_env() -> anyhow::Result<Config> {
        let config = match std::env::var(CONFIG_ENV_VAR) {
            Ok(f) => {
                log::info!("using config file '{}'", &f);
                Config::parse_file(PathBuf::from(f))?
            }
            Err(_) => {
                log::info!("'{}' is not set: using default config", CONFIG_ENV_VAR);
                Config::default()
            }
        };
        config.check()?;
        Ok(config)
    }

    fn parse_file(f: PathBuf) -> anyhow::Result<Config> {
        let f_str = std::fs::read_to_string(&f)
            .with_context(|| format!("failed to read config file {:?}", f))?;
        Config::parse(&f_str)
    }

    pub fn parse(toml_str: &str) -> anyhow::Result<Config> {
        let config: Config = toml::from_str(toml_str).context("failed to parse config")?;
        Ok(config)
    }

    pub fn check(&self) -> anyhow::Result<()> {
        self.scoring.check()?;
        self.demo.check()
    }

    pub fn database_file(&self) -> PathBuf {
        self.database_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_FILE))
    }
}
