//! The `MovementPolicy` trait — the per-archetype extension point.

use std::collections::BTreeMap;

use nw_core::{Side, ZoneId, base_move_probability};
use nw_location::{Location, LocationRegistry};
use nw_signals::SignalGateway;

use crate::{AgentView, BehaviorError, BehaviorResult};

// ── PolicyTraits ──────────────────────────────────────────────────────────────

/// The archetype facts every policy carries: threatened side, camera
/// sensitivity and location→zone overrides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicyTraits {
    /// Which door and light this agent is gated by.  `None` for agents that
    /// never use a threshold or transit zone.
    pub side: Option<Side>,

    /// Whether a camera on the agent's zone freezes it.
    pub pause_when_watched: bool,

    /// Per-location-name zone overrides.  Locations not listed use the zone
    /// recorded in the registry.
    pub zones: BTreeMap<String, ZoneId>,
}

impl PolicyTraits {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_side(mut self, side: Side) -> Self {
        self.side = Some(side);
        self
    }

    pub fn paused_when_watched(mut self) -> Self {
        self.pause_when_watched = true;
        self
    }

    pub fn with_zone(mut self, location: impl Into<String>, zone: ZoneId) -> Self {
        self.zones.insert(location.into(), zone);
        self
    }

    /// The camera zone that shows `location` to this agent.
    pub fn zone_for(&self, location: &Location) -> Option<ZoneId> {
        self.zones.get(&location.name).copied().or(location.zone)
    }
}

// ── StageRules ────────────────────────────────────────────────────────────────

/// Timing for archetypes that stage up instead of wandering.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StageRules {
    /// Stage at which the agent rushes.  Stages run `0..=final_stage`.
    pub final_stage: u8,

    /// Seconds between stage-advance attempts.
    pub stage_interval_secs: f32,

    /// Seconds after a rush before the stage counter returns to 0.
    pub cooldown_secs: f32,
}

impl Default for StageRules {
    fn default() -> Self {
        Self {
            final_stage:         4,
            stage_interval_secs: 5.0,
            cooldown_secs:       30.0,
        }
    }
}

impl StageRules {
    pub fn validate(&self) -> BehaviorResult<()> {
        if self.final_stage == 0 {
            return Err(BehaviorError::Staging("final_stage must be at least 1".into()));
        }
        if self.stage_interval_secs.is_nan() || self.stage_interval_secs <= 0.0 {
            return Err(BehaviorError::Staging(format!(
                "stage_interval_secs must be positive, got {}",
                self.stage_interval_secs
            )));
        }
        if self.cooldown_secs < 0.0 {
            return Err(BehaviorError::Staging(format!(
                "cooldown_secs must not be negative, got {}",
                self.cooldown_secs
            )));
        }
        Ok(())
    }
}

// ── MovementPolicy ────────────────────────────────────────────────────────────

/// Pluggable per-archetype movement strategy.
///
/// Only [`kind`][Self::kind], [`traits`][Self::traits] and
/// [`decide_next_move`][Self::decide_next_move] are required.  The rest
/// default to the generic behavior: base move probability, side and zones
/// from the traits, no staging, always valid.
///
/// # Thread safety
///
/// Implementations hold configuration only and must be `Send + Sync`, so a
/// policy can be shared by agents updated on different threads.
///
/// # Example
///
/// ```rust
/// use nw_behavior::{AgentView, MovementPolicy, PolicyTraits};
/// use nw_location::LocationRegistry;
///
/// /// Always heads for the office.
/// struct Beeline(PolicyTraits);
///
/// impl MovementPolicy for Beeline {
///     fn kind(&self) -> &'static str { "beeline" }
///     fn traits(&self) -> &PolicyTraits { &self.0 }
///     fn decide_next_move(&self, _: &AgentView<'_>, _: &LocationRegistry) -> Option<String> {
///         Some("Office".to_string())
///     }
/// }
/// ```
pub trait MovementPolicy: Send + Sync + 'static {
    /// Short archetype name used in logs and diagnostics.
    fn kind(&self) -> &'static str;

    /// Side, camera sensitivity and zone overrides.
    fn traits(&self) -> &PolicyTraits;

    /// Name of the location the agent should try next, or `None` to stay.
    ///
    /// The returned name is a preference: the allocator may grant a
    /// different location or refuse.
    fn decide_next_move(&self, agent: &AgentView<'_>, registry: &LocationRegistry) -> Option<String>;

    /// Chance that an expired decision timer turns into a move attempt.
    fn move_probability(&self, difficulty: u8, _signals: &SignalGateway<'_>) -> f64 {
        base_move_probability(difficulty)
    }

    fn threat_side(&self) -> Option<Side> {
        self.traits().side
    }

    /// Zone a camera must show for this agent at `location` to count as
    /// watched.
    fn observation_zone(&self, location: &Location) -> Option<ZoneId> {
        self.traits().zone_for(location)
    }

    fn pauses_when_watched(&self) -> bool {
        self.traits().pause_when_watched
    }

    /// `Some` for archetypes driven by a stage counter instead of the idle
    /// timer.
    fn staging(&self) -> Option<&StageRules> {
        None
    }

    /// Check the configuration.  Called once per episode start.
    fn validate(&self) -> BehaviorResult<()> {
        Ok(())
    }
}
