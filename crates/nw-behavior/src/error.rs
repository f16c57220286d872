use thiserror::Error;

/// Policy configuration problems.
///
/// None of these stop a night: the episode reports them once and the agent
/// stands still.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BehaviorError {
    #[error("unknown archetype {0:?}")]
    UnknownArchetype(String),

    #[error("{0} policy has an empty path")]
    EmptyPath(&'static str),

    #[error("invalid staging: {0}")]
    Staging(String),

    #[error("behavior configuration error: {0}")]
    Config(String),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
