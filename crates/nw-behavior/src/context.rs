//! Read-only agent state passed to every policy callback.

use nw_core::{AgentId, LocationId};
use nw_location::LocationRegistry;

/// What a policy may know about the agent it steers.
///
/// Built by the state machine for the duration of one decision.  The policy
/// sees identity, position and difficulty; it never sees timers or counters.
#[derive(Copy, Clone, Debug)]
pub struct AgentView<'a> {
    pub id:         AgentId,
    pub name:       &'a str,
    pub location:   Option<LocationId>,
    pub difficulty: u8,
}

impl<'a> AgentView<'a> {
    #[inline]
    pub fn new(id: AgentId, name: &'a str, location: Option<LocationId>, difficulty: u8) -> Self {
        Self { id, name, location, difficulty }
    }

    /// Name of the agent's current location, if it holds one.
    pub fn location_name<'r>(&self, registry: &'r LocationRegistry) -> Option<&'r str> {
        self.location.and_then(|id| registry.name_of(id))
    }
}
