use thiserror::Error;

/// The reasons why a submitted time is rejected.
///
/// A rejected submission leaves the season unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubmitError {
    #[error("map '{0}' not found")]
    UnknownMap(String),

    #[error("player '{0}' not found")]
    UnknownPlayer(String),

    #[error("{0} is not a valid time")]
    InvalidTime(f64),
}
