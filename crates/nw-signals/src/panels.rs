//! In-memory collaborators.
//!
//! Plain-data implementations of every sensor trait, for tests, the demo
//! binary and any host that keeps office state itself.  Doors and lights
//! share one rule: they cannot be closed or switched on without power.
//! Opening a door or switching a light off always works.

use nw_core::{Side, ZoneId};
use tracing::debug;

use crate::{BreachSink, CameraFeed, Collaborators, DoorSensor, LightSensor, PowerGauge};

/// Per-side boolean pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
struct Pair {
    left:  bool,
    right: bool,
}

impl Pair {
    #[inline]
    fn get(&self, side: Side) -> bool {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    fn set(&mut self, side: Side, value: bool) {
        match side {
            Side::Left => self.left = value,
            Side::Right => self.right = value,
        }
    }
}

// ── DoorPanel ─────────────────────────────────────────────────────────────────

/// Two doors, both open at night start.
#[derive(Clone, Debug, Default)]
pub struct DoorPanel {
    closed: Pair,
}

impl DoorPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Close the door on `side`.  Refused (returns `false`) without power.
    pub fn close(&mut self, side: Side, power: &dyn PowerGauge) -> bool {
        if !power.has_power() {
            debug!(%side, "door close refused: no power");
            return false;
        }
        self.closed.set(side, true);
        true
    }

    pub fn open(&mut self, side: Side) {
        self.closed.set(side, false);
    }

    /// Flip the door on `side`.  Closing is refused without power.
    pub fn toggle(&mut self, side: Side, power: &dyn PowerGauge) -> bool {
        if self.closed.get(side) {
            self.open(side);
            true
        } else {
            self.close(side, power)
        }
    }
}

impl DoorSensor for DoorPanel {
    fn is_closed(&self, side: Side) -> bool {
        self.closed.get(side)
    }

    fn reset(&mut self) {
        self.closed = Pair::default();
    }
}

// ── LightPanel ────────────────────────────────────────────────────────────────

/// Two hallway lights, both off at night start.
#[derive(Clone, Debug, Default)]
pub struct LightPanel {
    on: Pair,
}

impl LightPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch the `side` light on.  Refused (returns `false`) without power.
    pub fn turn_on(&mut self, side: Side, power: &dyn PowerGauge) -> bool {
        if !power.has_power() {
            debug!(%side, "light refused: no power");
            return false;
        }
        self.on.set(side, true);
        true
    }

    pub fn turn_off(&mut self, side: Side) {
        self.on.set(side, false);
    }

    pub fn toggle(&mut self, side: Side, power: &dyn PowerGauge) -> bool {
        if self.on.get(side) {
            self.turn_off(side);
            true
        } else {
            self.turn_on(side, power)
        }
    }
}

impl LightSensor for LightPanel {
    fn is_on(&self, side: Side) -> bool {
        self.on.get(side)
    }

    fn reset(&mut self) {
        self.on = Pair::default();
    }
}

// ── CameraMonitor ─────────────────────────────────────────────────────────────

/// The camera tablet and its installed feeds.
///
/// Raising the tablet shows the first installed feed.  Switching is only
/// possible while the tablet is up and only to an installed feed.
#[derive(Clone, Debug, Default)]
pub struct CameraMonitor {
    feeds:     Vec<ZoneId>,
    tablet_up: bool,
    current:   Option<ZoneId>,
}

impl CameraMonitor {
    pub fn new(feeds: impl IntoIterator<Item = ZoneId>) -> Self {
        Self { feeds: feeds.into_iter().collect(), tablet_up: false, current: None }
    }

    pub fn feeds(&self) -> &[ZoneId] {
        &self.feeds
    }

    pub fn is_tablet_up(&self) -> bool {
        self.tablet_up
    }

    /// Raise or lower the tablet.
    pub fn toggle_tablet(&mut self) {
        self.tablet_up = !self.tablet_up;
        self.current = if self.tablet_up { self.feeds.first().copied() } else { None };
    }

    /// Show `zone`.  Returns `false` if the tablet is down or the feed is not
    /// installed.
    pub fn switch_to(&mut self, zone: ZoneId) -> bool {
        if !self.tablet_up || !self.feeds.contains(&zone) {
            debug!(%zone, tablet_up = self.tablet_up, "camera switch refused");
            return false;
        }
        self.current = Some(zone);
        true
    }
}

impl CameraFeed for CameraMonitor {
    fn is_active(&self) -> bool {
        self.tablet_up && self.current.is_some()
    }

    fn current_zone(&self) -> Option<ZoneId> {
        self.current
    }

    fn reset(&mut self) {
        self.tablet_up = false;
        self.current = None;
    }
}

// ── PowerSupply ───────────────────────────────────────────────────────────────

/// Remaining power as a percentage.  Drain rates are the host's business;
/// this only stores the level.
#[derive(Clone, Debug, PartialEq)]
pub struct PowerSupply {
    level: f32,
}

impl Default for PowerSupply {
    fn default() -> Self {
        Self { level: 100.0 }
    }
}

impl PowerSupply {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level, clamped to `0.0..=100.0`.
    pub fn set(&mut self, percentage: f32) {
        self.level = percentage.clamp(0.0, 100.0);
    }

    /// Remove `amount` percentage points, stopping at zero.
    pub fn drain(&mut self, amount: f32) {
        self.set(self.level - amount.max(0.0));
    }
}

impl PowerGauge for PowerSupply {
    fn percentage(&self) -> f32 {
        self.level
    }

    fn reset(&mut self) {
        self.level = 100.0;
    }
}

// ── RecordingSink ─────────────────────────────────────────────────────────────

/// Breach sink that remembers every notification.
#[derive(Clone, Debug, Default)]
pub struct RecordingSink {
    pub breaches: Vec<String>,
}

impl BreachSink for RecordingSink {
    fn notify_breach(&mut self, agent_name: &str) {
        self.breaches.push(agent_name.to_string());
    }
}

// ── Facility ──────────────────────────────────────────────────────────────────

/// One of everything, owned together.
#[derive(Clone, Debug, Default)]
pub struct Facility {
    pub doors:  DoorPanel,
    pub lights: LightPanel,
    pub camera: CameraMonitor,
    pub power:  PowerSupply,
    pub sink:   RecordingSink,
}

impl Facility {
    /// A facility whose camera tablet can show `feeds`.
    pub fn with_feeds(feeds: impl IntoIterator<Item = ZoneId>) -> Self {
        Self { camera: CameraMonitor::new(feeds), ..Self::default() }
    }

    pub fn close_door(&mut self, side: Side) -> bool {
        self.doors.close(side, &self.power)
    }

    pub fn open_door(&mut self, side: Side) {
        self.doors.open(side);
    }

    pub fn light_on(&mut self, side: Side) -> bool {
        self.lights.turn_on(side, &self.power)
    }

    pub fn light_off(&mut self, side: Side) {
        self.lights.turn_off(side);
    }

    /// Raise the tablet (if needed) and show `zone`.
    pub fn watch(&mut self, zone: ZoneId) -> bool {
        if !self.camera.is_tablet_up() {
            self.camera.toggle_tablet();
        }
        self.camera.switch_to(zone)
    }

    /// Lower the tablet.
    pub fn look_away(&mut self) {
        if self.camera.is_tablet_up() {
            self.camera.toggle_tablet();
        }
    }

    /// Every collaborator wired, borrowed from this facility.
    pub fn collaborators(&mut self) -> Collaborators<'_> {
        Collaborators {
            doors:  Some(&mut self.doors),
            lights: Some(&mut self.lights),
            camera: Some(&mut self.camera),
            power:  Some(&mut self.power),
            sink:   Some(&mut self.sink),
        }
    }
}
