//! Path-following archetypes.

use nw_core::base_move_probability;
use nw_location::LocationRegistry;
use nw_signals::SignalGateway;

use crate::{AgentView, BehaviorError, BehaviorResult, MovementPolicy, PolicyTraits};

// ── FixedPath ─────────────────────────────────────────────────────────────────

/// Walks a private, ordered list of location names.
///
/// - Not on the path (or not placed): go to `path[0]`.
/// - On `path[i]`: go to `path[i + 1]`.
/// - On the last element: explore, i.e. the first location in registry
///   order this agent may use that is currently free.  `None` if there is
///   none, so the agent stays put.
///
/// If the current location name appears more than once in the path, the
/// first occurrence decides the position.
#[derive(Clone, Debug, Default)]
pub struct FixedPath {
    pub path:   Vec<String>,
    pub traits: PolicyTraits,
}

impl FixedPath {
    pub fn new<I, S>(path: I, traits: PolicyTraits) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { path: path.into_iter().map(Into::into).collect(), traits }
    }

    /// Position of `location_name` on the path.
    pub fn position(&self, location_name: &str) -> Option<usize> {
        self.path.iter().position(|p| p == location_name)
    }

    fn next_on_path(&self, agent: &AgentView<'_>, registry: &LocationRegistry) -> Option<String> {
        let first = self.path.first()?;
        let Some(index) = agent.location_name(registry).and_then(|n| self.position(n)) else {
            return Some(first.clone());
        };
        match self.path.get(index + 1) {
            Some(next) => Some(next.clone()),
            None => registry
                .first_available_for(agent.name)
                .and_then(|id| registry.name_of(id))
                .map(str::to_string),
        }
    }

    fn check_path(&self, kind: &'static str) -> BehaviorResult<()> {
        if self.path.is_empty() {
            return Err(BehaviorError::EmptyPath(kind));
        }
        Ok(())
    }
}

impl MovementPolicy for FixedPath {
    fn kind(&self) -> &'static str {
        "fixed_path"
    }

    fn traits(&self) -> &PolicyTraits {
        &self.traits
    }

    fn decide_next_move(&self, agent: &AgentView<'_>, registry: &LocationRegistry) -> Option<String> {
        self.next_on_path(agent, registry)
    }

    fn validate(&self) -> BehaviorResult<()> {
        self.check_path(self.kind())
    }
}

// ── PowerGatedPath ────────────────────────────────────────────────────────────

/// A [`FixedPath`] that only wakes up once power runs low.
///
/// Move probability is 0 while power is above `threshold` percent and half
/// the base formula at or below it.
#[derive(Clone, Debug)]
pub struct PowerGatedPath {
    pub path:      FixedPath,
    pub threshold: f32,
}

impl PowerGatedPath {
    pub fn new(path: FixedPath, threshold: f32) -> Self {
        Self { path, threshold }
    }
}

impl MovementPolicy for PowerGatedPath {
    fn kind(&self) -> &'static str {
        "power_gated_path"
    }

    fn traits(&self) -> &PolicyTraits {
        &self.path.traits
    }

    fn decide_next_move(&self, agent: &AgentView<'_>, registry: &LocationRegistry) -> Option<String> {
        self.path.next_on_path(agent, registry)
    }

    fn move_probability(&self, difficulty: u8, signals: &SignalGateway<'_>) -> f64 {
        if signals.power_percentage() > self.threshold {
            return 0.0;
        }
        base_move_probability(difficulty) * 0.5
    }

    fn validate(&self) -> BehaviorResult<()> {
        self.path.check_path(self.kind())?;
        if !(0.0..=100.0).contains(&self.threshold) {
            return Err(BehaviorError::Config(format!(
                "power threshold must be within 0..=100, got {}",
                self.threshold
            )));
        }
        Ok(())
    }
}
