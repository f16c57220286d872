//! Location catalog and builder.
//!
//! # Data layout
//!
//! Locations live in a single `Vec` in registration order.  `LocationId` is
//! the index into that `Vec`, so registry order and id order coincide and
//! every allocator scan walks the `Vec` front to back.
//!
//! Names are not required to be unique: two locations may share a name (two
//! seats on the same stage, say).  Lookups by name return the first match
//! in registry order unless stated otherwise.

use nw_core::{AgentId, LocationId, ZoneId};
use tracing::warn;

use crate::{LocationError, LocationResult};

// ── AccessPolicy ──────────────────────────────────────────────────────────────

/// Who may occupy a location.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AccessPolicy {
    /// Any agent may occupy the location.
    #[default]
    Open,
    /// Only the named agents (compared case-insensitively).  An empty list
    /// denies everyone.
    AllowList(Vec<String>),
}

impl AccessPolicy {
    /// Convenience constructor for an allow-list.
    pub fn allow<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccessPolicy::AllowList(names.into_iter().map(Into::into).collect())
    }

    #[inline]
    pub fn allows(&self, agent_name: &str) -> bool {
        match self {
            AccessPolicy::Open => true,
            AccessPolicy::AllowList(names) => {
                names.iter().any(|n| n.eq_ignore_ascii_case(agent_name))
            }
        }
    }
}

// ── LocationKind ──────────────────────────────────────────────────────────────

/// How a location gates an agent that arrives there.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LocationKind {
    /// No gating; the agent goes back to idling.
    #[default]
    Room,
    /// A hallway watched by a light.  Progress is gated on the light.
    TransitZone,
    /// A doorway.  The attack countdown runs here, gated on the door.
    Threshold,
}

// ── LocationSpec ──────────────────────────────────────────────────────────────

/// Static scene data for one location.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LocationSpec {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub access: AccessPolicy,
    #[cfg_attr(feature = "serde", serde(default))]
    pub kind: LocationKind,
    /// Camera zone that shows this location, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub zone: Option<ZoneId>,
}

impl LocationSpec {
    /// An open `Room` with no camera.
    pub fn room(name: impl Into<String>) -> Self {
        Self {
            name:   name.into(),
            access: AccessPolicy::Open,
            kind:   LocationKind::Room,
            zone:   None,
        }
    }

    pub fn with_access(mut self, access: AccessPolicy) -> Self {
        self.access = access;
        self
    }

    pub fn with_kind(mut self, kind: LocationKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_zone(mut self, zone: ZoneId) -> Self {
        self.zone = Some(zone);
        self
    }
}

// ── Location ──────────────────────────────────────────────────────────────────

/// A named place with a single occupant slot.
///
/// The slot is private: it changes only through the [`Allocator`] methods,
/// which check the access policy before setting it.
///
/// [`Allocator`]: crate::Allocator
#[derive(Clone, Debug)]
pub struct Location {
    pub id:     LocationId,
    pub name:   String,
    pub access: AccessPolicy,
    pub kind:   LocationKind,
    pub zone:   Option<ZoneId>,
    pub(crate) occupant: Option<AgentId>,
}

impl Location {
    #[inline]
    pub fn is_available(&self) -> bool {
        self.occupant.is_none()
    }

    #[inline]
    pub fn occupant(&self) -> Option<AgentId> {
        self.occupant
    }

    /// `true` if `agent_name` may occupy this location and the slot is empty.
    #[inline]
    pub fn is_open_to(&self, agent_name: &str) -> bool {
        self.is_available() && self.access.allows(agent_name)
    }
}

// ── LocationRegistry ──────────────────────────────────────────────────────────

/// The catalog of every location in the scene, in registry order.
///
/// Built once per episode with [`LocationRegistryBuilder`] and owned by the
/// episode; locations are never added or removed afterwards.
#[derive(Clone, Debug, Default)]
pub struct LocationRegistry {
    pub(crate) locations: Vec<Location>,
}

impl LocationRegistry {
    /// A registry with no locations.  Every acquire against it is refused.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from scene data.
    pub fn from_specs(specs: impl IntoIterator<Item = LocationSpec>) -> LocationResult<Self> {
        let mut builder = LocationRegistryBuilder::new();
        for spec in specs {
            builder.add(spec);
        }
        builder.build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    #[inline]
    pub fn get(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(id.index())
    }

    /// Name of `id`, or `None` for an out-of-range id.
    #[inline]
    pub fn name_of(&self, id: LocationId) -> Option<&str> {
        self.get(id).map(|l| l.name.as_str())
    }

    /// All locations in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Location> + '_ {
        self.locations.iter()
    }

    /// First location called `name`, regardless of occupancy.
    pub fn find(&self, name: &str) -> Option<LocationId> {
        self.locations.iter().find(|l| l.name == name).map(|l| l.id)
    }

    /// Every location called `name`, in registry order.
    pub fn locations_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = LocationId> + 'a {
        self.locations.iter().filter(move |l| l.name == name).map(|l| l.id)
    }

    /// Every location `agent_name` is allowed to use, occupied or not.
    pub fn locations_for(&self, agent_name: &str) -> Vec<LocationId> {
        self.locations
            .iter()
            .filter(|l| l.access.allows(agent_name))
            .map(|l| l.id)
            .collect()
    }

    /// `true` if a location called `name` exists that `agent_name` may use.
    pub fn has_location(&self, name: &str, agent_name: &str) -> bool {
        self.locations
            .iter()
            .any(|l| l.name == name && l.access.allows(agent_name))
    }

    /// First location in registry order that `agent_name` may use and that
    /// is currently empty.
    pub fn first_available_for(&self, agent_name: &str) -> Option<LocationId> {
        self.locations
            .iter()
            .find(|l| l.is_open_to(agent_name))
            .map(|l| l.id)
    }

    // ── Occupancy queries ─────────────────────────────────────────────────

    #[inline]
    pub fn occupant_of(&self, id: LocationId) -> Option<AgentId> {
        self.get(id).and_then(|l| l.occupant)
    }

    /// The location `agent` currently holds, if any.
    pub fn location_of(&self, agent: AgentId) -> Option<LocationId> {
        self.locations
            .iter()
            .find(|l| l.occupant == Some(agent))
            .map(|l| l.id)
    }

    /// Number of occupied locations.
    pub fn occupied_count(&self) -> usize {
        self.locations.iter().filter(|l| l.occupant.is_some()).count()
    }

    /// Empty every occupant slot.  Used by episode resets.
    pub fn release_all(&mut self) {
        for location in &mut self.locations {
            location.occupant = None;
        }
    }
}

// ── LocationRegistryBuilder ───────────────────────────────────────────────────

/// Construct a [`LocationRegistry`] incrementally, then call
/// [`build`](Self::build).
///
/// # Example
///
/// ```
/// use nw_location::{AccessPolicy, LocationKind, LocationRegistryBuilder, LocationSpec};
///
/// let mut b = LocationRegistryBuilder::new();
/// b.add(LocationSpec::room("Show Stage"));
/// b.add(LocationSpec::room("West Hall").with_kind(LocationKind::TransitZone));
/// b.add(LocationSpec::room("Pirate Cove").with_access(AccessPolicy::allow(["Foxy"])));
/// let registry = b.build().unwrap();
/// assert_eq!(registry.len(), 3);
/// ```
#[derive(Default)]
pub struct LocationRegistryBuilder {
    specs: Vec<LocationSpec>,
}

impl LocationRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a location and return the id it will have after `build`.
    pub fn add(&mut self, spec: LocationSpec) -> LocationId {
        let id = LocationId(self.specs.len() as u32);
        self.specs.push(spec);
        id
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Validate names and produce the registry with every slot empty.
    pub fn build(self) -> LocationResult<LocationRegistry> {
        let mut locations = Vec::with_capacity(self.specs.len());
        for (i, spec) in self.specs.into_iter().enumerate() {
            if spec.name.trim().is_empty() {
                return Err(LocationError::EmptyName);
            }
            if matches!(&spec.access, AccessPolicy::AllowList(names) if names.is_empty()) {
                warn!(location = %spec.name, "allow-list is empty; no agent can ever occupy it");
            }
            locations.push(Location {
                id:       LocationId(i as u32),
                name:     spec.name,
                access:   spec.access,
                kind:     spec.kind,
                zone:     spec.zone,
                occupant: None,
            });
        }
        Ok(LocationRegistry { locations })
    }
}
