//! Collaborator traits.
//!
//! Each trait is the narrow surface the simulation consumes from a system it
//! does not own.  `reset` has a no-op default so read-only adapters over an
//! external system only need the query methods.

use nw_core::{Side, ZoneId};

/// Office doors.
pub trait DoorSensor {
    fn is_closed(&self, side: Side) -> bool;

    /// Return the doors to their start-of-night state (both open).
    fn reset(&mut self) {}
}

/// Hallway lights.
pub trait LightSensor {
    fn is_on(&self, side: Side) -> bool;

    /// Return the lights to their start-of-night state (both off).
    fn reset(&mut self) {}
}

/// The camera tablet.
pub trait CameraFeed {
    /// `true` while a feed is up on the tablet.
    fn is_active(&self) -> bool;

    /// The zone currently shown, if any.
    fn current_zone(&self) -> Option<ZoneId>;

    /// Put the tablet down.
    fn reset(&mut self) {}
}

/// Power level.  Only the level is consumed; drain accounting lives
/// elsewhere.
pub trait PowerGauge {
    /// Remaining power, `0.0..=100.0`.
    fn percentage(&self) -> f32;

    fn has_power(&self) -> bool {
        self.percentage() > 0.0
    }

    /// Refill to 100 %.
    fn reset(&mut self) {}
}

/// Receiver for breach (jumpscare) notifications.
///
/// Fire-and-forget: the episode calls it at most once per breach.
pub trait BreachSink {
    fn notify_breach(&mut self, agent_name: &str);
}
