//! Cyclic scan: step through every location in registry order.

use nw_location::LocationRegistry;

use crate::{AgentView, MovementPolicy, PolicyTraits};

/// Moves to the location after the current one, wrapping at the end.
///
/// Access and occupancy are left to the allocator: if the next location is
/// taken or forbidden, acquire falls back to the first open one.
#[derive(Clone, Debug, Default)]
pub struct CyclicScan {
    pub traits: PolicyTraits,
}

impl CyclicScan {
    pub fn new(traits: PolicyTraits) -> Self {
        Self { traits }
    }
}

impl MovementPolicy for CyclicScan {
    fn kind(&self) -> &'static str {
        "cyclic_scan"
    }

    fn traits(&self) -> &PolicyTraits {
        &self.traits
    }

    fn decide_next_move(&self, agent: &AgentView<'_>, registry: &LocationRegistry) -> Option<String> {
        if registry.is_empty() {
            return None;
        }
        let next = match agent.location {
            Some(current) => (current.index() + 1) % registry.len(),
            None => 0,
        };
        registry.iter().nth(next).map(|l| l.name.clone())
    }
}
