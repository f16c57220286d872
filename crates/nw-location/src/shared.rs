//! A registry that can be shared between threads.
//!
//! The episode loop is single-threaded and uses [`LocationRegistry`]
//! directly.  Callers that drive agents from several threads wrap the
//! registry in a `SharedRegistry`: one registry-wide mutex makes every
//! "check empty, then set occupant" step atomic, so two agents can never
//! both observe an empty slot and both be granted it.

use std::sync::{Arc, Mutex, MutexGuard};

use nw_core::{AgentId, LocationId};

use crate::{Allocator, LocationRegistry, Requester};

/// Cloneable handle to a mutex-guarded [`LocationRegistry`].
#[derive(Clone, Default)]
pub struct SharedRegistry {
    inner: Arc<Mutex<LocationRegistry>>,
}

impl SharedRegistry {
    pub fn new(registry: LocationRegistry) -> Self {
        Self { inner: Arc::new(Mutex::new(registry)) }
    }

    /// Lock the registry for a read or a compound operation.
    ///
    /// A poisoned lock is recovered: a panic in another holder cannot leave
    /// a slot half-written, because every mutation is a single assignment.
    pub fn lock(&self) -> MutexGuard<'_, LocationRegistry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of the current registry state.
    pub fn snapshot(&self) -> LocationRegistry {
        self.lock().clone()
    }
}

impl Allocator for SharedRegistry {
    fn acquire(&mut self, who: Requester<'_>, preferred: Option<&str>) -> Option<LocationId> {
        self.lock().acquire(who, preferred)
    }

    fn acquire_exact(&mut self, who: Requester<'_>, name: &str) -> Option<LocationId> {
        self.lock().acquire_exact(who, name)
    }

    fn release(&mut self, agent: AgentId) -> Option<LocationId> {
        self.lock().release(agent)
    }
}
