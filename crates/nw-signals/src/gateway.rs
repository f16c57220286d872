//! The read-only signal facade and the mutable collaborator bundle.
//!
//! # Two views of the same collaborators
//!
//! [`Collaborators`] holds `&mut` handles so the episode can reset doors,
//! lights, camera and power at night start and push breach notifications.
//! While agents update, the episode hands them a [`SignalGateway`] built
//! from the same handles: a `Copy` struct of shared references that can only
//! answer questions.
//!
//! Agents therefore cannot mutate office state, and the borrow checker
//! guarantees no collaborator changes mid-update.

use nw_core::{Side, ZoneId};

use crate::{BreachSink, CameraFeed, DoorSensor, LightSensor, PowerGauge};

// ── SignalGateway ─────────────────────────────────────────────────────────────

/// Read-only view of office state, with inert answers for unwired slots.
#[derive(Copy, Clone, Default)]
pub struct SignalGateway<'a> {
    doors:  Option<&'a dyn DoorSensor>,
    lights: Option<&'a dyn LightSensor>,
    camera: Option<&'a dyn CameraFeed>,
    power:  Option<&'a dyn PowerGauge>,
}

impl<'a> SignalGateway<'a> {
    /// A gateway with nothing wired.  Every query returns its inert default.
    pub fn inert() -> Self {
        Self::default()
    }

    pub fn with_doors(mut self, doors: &'a dyn DoorSensor) -> Self {
        self.doors = Some(doors);
        self
    }

    pub fn with_lights(mut self, lights: &'a dyn LightSensor) -> Self {
        self.lights = Some(lights);
        self
    }

    pub fn with_camera(mut self, camera: &'a dyn CameraFeed) -> Self {
        self.camera = Some(camera);
        self
    }

    pub fn with_power(mut self, power: &'a dyn PowerGauge) -> Self {
        self.power = Some(power);
        self
    }

    /// Door closed on `side`.  Unwired: `false`.
    #[inline]
    pub fn door_closed(&self, side: Side) -> bool {
        self.doors.is_some_and(|d| d.is_closed(side))
    }

    /// Light on over the `side` hallway.  Unwired: `false`.
    #[inline]
    pub fn light_on(&self, side: Side) -> bool {
        self.lights.is_some_and(|l| l.is_on(side))
    }

    /// Tablet up and showing a feed.  Unwired: `false`.
    #[inline]
    pub fn camera_active(&self) -> bool {
        self.camera.is_some_and(|c| c.is_active())
    }

    /// The zone being watched right now: the current feed, but only while
    /// the camera is active.
    #[inline]
    pub fn watched_zone(&self) -> Option<ZoneId> {
        self.camera
            .filter(|c| c.is_active())
            .and_then(|c| c.current_zone())
    }

    /// `true` if `zone` is on screen.
    #[inline]
    pub fn is_watching(&self, zone: ZoneId) -> bool {
        self.watched_zone() == Some(zone)
    }

    /// Power percentage.  Unwired: `100.0`.
    #[inline]
    pub fn power_percentage(&self) -> f32 {
        self.power.map_or(100.0, |p| p.percentage())
    }

    /// Power present.  Unwired: `true`.
    #[inline]
    pub fn has_power(&self) -> bool {
        self.power.is_none_or(|p| p.has_power())
    }
}

// ── Collaborators ─────────────────────────────────────────────────────────────

/// Mutable handles to every external collaborator the episode drives.
///
/// Build one per call from whatever the host owns; [`Facility`] provides a
/// ready-made in-memory set.
///
/// [`Facility`]: crate::Facility
#[derive(Default)]
pub struct Collaborators<'a> {
    pub doors:  Option<&'a mut dyn DoorSensor>,
    pub lights: Option<&'a mut dyn LightSensor>,
    pub camera: Option<&'a mut dyn CameraFeed>,
    pub power:  Option<&'a mut dyn PowerGauge>,
    pub sink:   Option<&'a mut dyn BreachSink>,
}

impl<'a> Collaborators<'a> {
    /// Nothing wired.  The episode still runs; every signal is inert.
    pub fn none() -> Self {
        Self::default()
    }

    /// Read-only gateway over the wired collaborators.
    pub fn gateway(&self) -> SignalGateway<'_> {
        SignalGateway {
            doors:  self.doors.as_deref(),
            lights: self.lights.as_deref(),
            camera: self.camera.as_deref(),
            power:  self.power.as_deref(),
        }
    }

    /// Reset doors, lights, camera and power to their defaults.
    pub fn reset_all(&mut self) {
        if let Some(doors) = self.doors.as_deref_mut() {
            doors.reset();
        }
        if let Some(lights) = self.lights.as_deref_mut() {
            lights.reset();
        }
        if let Some(camera) = self.camera.as_deref_mut() {
            camera.reset();
        }
        if let Some(power) = self.power.as_deref_mut() {
            power.reset();
        }
    }

    /// Forward a breach to the sink, if one is wired.
    pub fn notify_breach(&mut self, agent_name: &str) {
        if let Some(sink) = self.sink.as_deref_mut() {
            sink.notify_breach(agent_name);
        }
    }
}
