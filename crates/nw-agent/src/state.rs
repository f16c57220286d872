//! Behavioral states and the events an update can produce.

use std::fmt;

use nw_core::AgentId;

/// Where an agent is in its approach.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentState {
    /// Waiting for the decision timer (or, for staged agents, building up).
    #[default]
    Idle,
    /// Just relocated.  The next update runs the arrival frame.
    Moving,
    /// At a door with the attack countdown running.
    AtThreshold,
    /// In a hallway, held while the light is on.
    InTransitZone,
    /// Terminal until the agent is reset.
    Attacking,
}

impl AgentState {
    pub fn as_str(self) -> &'static str {
        match self {
            AgentState::Idle          => "idle",
            AgentState::Moving        => "moving",
            AgentState::AtThreshold   => "at_threshold",
            AgentState::InTransitZone => "in_transit_zone",
            AgentState::Attacking     => "attacking",
        }
    }

    #[inline]
    pub fn is_terminal(self) -> bool {
        self == AgentState::Attacking
    }
}

impl fmt::Display for AgentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something the episode has to act on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AgentEvent {
    /// The agent attacked or reached the protected endpoint.  Emitted once
    /// per reset.
    Breach { agent: AgentId },
}
