//! The occupancy allocator: acquire and release location slots.
//!
//! # Implementations
//!
//! [`LocationRegistry`] implements [`Allocator`] directly and is what the
//! agent state machine is handed each update.
//! [`SharedRegistry`](crate::SharedRegistry) implements it too, taking its
//! lock once per call.
//! An agent driven from several threads locks the shared registry and
//! updates against the guarded [`LocationRegistry`], so a release and the
//! following acquire happen under one lock.
//!
//! # Acquire contract
//!
//! 1. If a preferred name is supplied, grant the first location (registry
//!    order) with that name that allows the requester and is empty.
//! 2. Otherwise, or if step 1 found nothing, grant the first location in the
//!    whole registry that allows the requester and is empty.
//! 3. If nothing qualifies, refuse (`None`).
//!
//! Acquire never releases anything.  The caller must release its previous
//! location first; agents hold at most one location at a time.

use nw_core::{AgentId, LocationId};
use tracing::trace;

use crate::LocationRegistry;

/// The identity an allocator needs: the id goes into the occupant slot, the
/// name is checked against access policies.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Requester<'a> {
    pub id:   AgentId,
    pub name: &'a str,
}

impl<'a> Requester<'a> {
    #[inline]
    pub fn new(id: AgentId, name: &'a str) -> Self {
        Self { id, name }
    }
}

/// Test-and-set access to location slots.
pub trait Allocator {
    /// Grant a location per the acquire contract, or refuse with `None`.
    fn acquire(&mut self, who: Requester<'_>, preferred: Option<&str>) -> Option<LocationId>;

    /// Grant the first empty, allowed location called `name`.  No fallback.
    fn acquire_exact(&mut self, who: Requester<'_>, name: &str) -> Option<LocationId>;

    /// Clear the slot `agent` occupies.  Returns the released location, or
    /// `None` if the agent held nothing (a no-op).
    fn release(&mut self, agent: AgentId) -> Option<LocationId>;
}

impl LocationRegistry {
    /// Set the occupant of `id` to `who`.  Caller has already checked that
    /// the slot is open to the requester.
    fn grant(&mut self, id: LocationId, who: Requester<'_>) -> LocationId {
        let location = &mut self.locations[id.index()];
        debug_assert!(location.is_open_to(who.name));
        location.occupant = Some(who.id);
        trace!(agent = who.name, location = %location.name, "location granted");
        id
    }

    fn first_open_named(&self, who: Requester<'_>, name: &str) -> Option<LocationId> {
        self.locations
            .iter()
            .find(|l| l.name == name && l.is_open_to(who.name))
            .map(|l| l.id)
    }
}

impl Allocator for LocationRegistry {
    fn acquire(&mut self, who: Requester<'_>, preferred: Option<&str>) -> Option<LocationId> {
        let preferred_hit = preferred
            .filter(|name| !name.is_empty())
            .and_then(|name| self.first_open_named(who, name));

        let id = preferred_hit.or_else(|| self.first_available_for(who.name));
        match id {
            Some(id) => Some(self.grant(id, who)),
            None => {
                trace!(agent = who.name, ?preferred, "acquire refused");
                None
            }
        }
    }

    fn acquire_exact(&mut self, who: Requester<'_>, name: &str) -> Option<LocationId> {
        let id = self.first_open_named(who, name)?;
        Some(self.grant(id, who))
    }

    fn release(&mut self, agent: AgentId) -> Option<LocationId> {
        let location = self
            .locations
            .iter_mut()
            .find(|l| l.occupant == Some(agent))?;
        location.occupant = None;
        Some(location.id)
    }
}
