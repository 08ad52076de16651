//! Season leaderboard for a multi-map time-trial game.
//!
//! Players submit completion times per map. For every personal best, the
//! [`Leaderboard`] derives a map rank, a normalized rank, a confidence factor,
//! an attendance bonus and a composite map score, and rolls these up into
//! season aggregates and a final score for every player.

pub use config::{Config, DemoConfig, Interval, ScoringConfig};
pub use event::{PbDiff, Submission};
pub use leaderboard::{Leaderboard, SeasonRank};

pub mod config;
pub mod constants;
pub mod database;
pub mod demo;
pub mod event;
pub mod format;
pub mod leaderboard;
pub mod scoring;
pub mod storage;
