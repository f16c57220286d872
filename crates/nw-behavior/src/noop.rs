//! A policy that never moves.

use nw_core::Side;
use nw_location::LocationRegistry;
use nw_signals::SignalGateway;

use crate::{AgentView, MovementPolicy, PolicyTraits};

/// Never proposes a move and never rolls one.
///
/// Stands in for a policy whose configuration failed, and is handy for
/// decorative agents in tests.
#[derive(Clone, Debug, Default)]
pub struct NoopPolicy {
    traits: PolicyTraits,
}

impl NoopPolicy {
    /// A no-op mover that still reports `side`, so door lookups on an inert
    /// agent stay meaningful.
    pub fn on_side(side: Option<Side>) -> Self {
        Self { traits: PolicyTraits { side, ..PolicyTraits::default() } }
    }
}

impl MovementPolicy for NoopPolicy {
    fn kind(&self) -> &'static str {
        "noop"
    }

    fn traits(&self) -> &PolicyTraits {
        &self.traits
    }

    fn decide_next_move(&self, _agent: &AgentView<'_>, _registry: &LocationRegistry) -> Option<String> {
        None
    }

    fn move_probability(&self, _difficulty: u8, _signals: &SignalGateway<'_>) -> f64 {
        0.0
    }
}
