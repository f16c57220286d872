use nw_core::NwError;
use nw_location::LocationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("episode configuration error: {0}")]
    Config(#[from] NwError),

    #[error("agent name {0:?} is registered twice")]
    DuplicateAgent(String),

    #[error("no agent named {0:?}")]
    UnknownAgent(String),

    #[error("location error: {0}")]
    Location(#[from] LocationError),
}

pub type EpisodeResult<T> = Result<T, EpisodeError>;
