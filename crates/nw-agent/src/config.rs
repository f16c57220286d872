//! Agent configuration.

use nw_behavior::PolicySpec;

/// Timer settings shared by every archetype.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentConfig {
    /// Lower bound of the re-armed decision delay, seconds.
    pub min_move_delay_secs: f32,

    /// Upper bound of the re-armed decision delay, seconds.
    pub max_move_delay_secs: f32,

    /// Attack countdown armed on reaching a door, seconds.
    pub attack_timer_secs: f32,

    /// If set, an agent held at a closed door this long goes back home.
    /// Unset means the countdown simply waits for the door to open.
    pub blocked_retreat_secs: Option<f32>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            min_move_delay_secs:  5.0,
            max_move_delay_secs:  20.0,
            attack_timer_secs:    10.0,
            blocked_retreat_secs: None,
        }
    }
}

/// Everything needed to create one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentSpec {
    pub name: String,

    /// Location name the agent starts each night on.
    pub home: String,

    pub policy: PolicySpec,

    #[cfg_attr(feature = "serde", serde(default))]
    pub timers: AgentConfig,
}

impl AgentSpec {
    pub fn new(name: impl Into<String>, home: impl Into<String>, policy: PolicySpec) -> Self {
        Self { name: name.into(), home: home.into(), policy, timers: AgentConfig::default() }
    }

    pub fn with_timers(mut self, timers: AgentConfig) -> Self {
        self.timers = timers;
        self
    }
}
