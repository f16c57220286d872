//! Session lifecycle states.

use std::fmt;

/// Why a night ended early.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EndReason {
    /// An agent reached the player.
    Jumpscare { agent: String },
    /// The power gauge hit zero.
    PowerFailure,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndReason::Jumpscare { agent } => write!(f, "jumpscare by {agent}"),
            EndReason::PowerFailure => f.write_str("power failure"),
        }
    }
}

/// Where the session is in its lifecycle.
///
/// ```text
///   Menu ──start──▶ Playing ◀──toggle──▶ Paused
///                     │
///          ┌──────────┴───────────┐
///          ▼                      ▼
///    Over(reason)             Complete
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SessionState {
    #[default]
    Menu,
    Playing,
    Paused,
    Over(EndReason),
    Complete,
}

impl SessionState {
    #[inline]
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// `true` once the night has ended, either way.
    #[inline]
    pub fn is_finished(&self) -> bool {
        matches!(self, SessionState::Over(_) | SessionState::Complete)
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionState::Menu => f.write_str("menu"),
            SessionState::Playing => f.write_str("playing"),
            SessionState::Paused => f.write_str("paused"),
            SessionState::Over(reason) => write!(f, "over ({reason})"),
            SessionState::Complete => f.write_str("complete"),
        }
    }
}
