//! Session time model.
//!
//! # Design
//!
//! The episode advances in discrete updates, each carrying a `dt` in seconds.
//! `SessionClock` accumulates `dt` into `elapsed_secs` and counts updates in
//! a `Tick`.  Every agent timer in the simulation is a plain number fed by the
//! same `dt`; nothing is scheduled against wall-clock time, so a reset is an
//! assignment and takes effect synchronously.

use std::fmt;

use crate::{NwError, NwResult};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// Number of updates processed since the episode started.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SessionClock ──────────────────────────────────────────────────────────────

/// Hours shown on the in-game clock over one night (12 AM → 6 AM).
const NIGHT_HOURS: u32 = 6;

/// Accumulated session time for one night.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionClock {
    /// Seconds elapsed since the night started.
    pub elapsed_secs: f32,
    /// Length of the night in seconds.
    pub duration_secs: f32,
    /// Updates processed so far.
    pub current_tick: Tick,
}

impl SessionClock {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            elapsed_secs: 0.0,
            duration_secs,
            current_tick: Tick::ZERO,
        }
    }

    /// Add `dt` seconds and count one update.  Negative `dt` is treated as 0.
    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.elapsed_secs += dt.max(0.0);
        self.current_tick = self.current_tick.next();
    }

    #[inline]
    pub fn reset(&mut self) {
        self.elapsed_secs = 0.0;
        self.current_tick = Tick::ZERO;
    }

    /// `true` once the night has run its full duration.
    #[inline]
    pub fn is_expired(&self) -> bool {
        self.elapsed_secs >= self.duration_secs
    }

    /// Seconds left before the night completes (never negative).
    #[inline]
    pub fn remaining_secs(&self) -> f32 {
        (self.duration_secs - self.elapsed_secs).max(0.0)
    }

    /// In-game hour (0 = midnight … 6 = dawn).
    pub fn hour(&self) -> u32 {
        if self.duration_secs <= 0.0 {
            return NIGHT_HOURS;
        }
        let fraction = (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0);
        ((fraction * NIGHT_HOURS as f32).floor() as u32).min(NIGHT_HOURS)
    }

    /// Clock-face label: `"12 AM"`, `"1 AM"`, … `"6 AM"`.
    pub fn clock_face(&self) -> String {
        match self.hour() {
            0 => "12 AM".to_string(),
            h => format!("{h} AM"),
        }
    }
}

impl fmt::Display for SessionClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {:.1}s)", self.current_tick, self.clock_face(), self.elapsed_secs)
    }
}

// ── EpisodeConfig ─────────────────────────────────────────────────────────────

/// Top-level episode configuration.
///
/// Typically loaded from a TOML file by the application and handed to the
/// episode builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EpisodeConfig {
    /// Length of one night in seconds.  Default: 360 (six in-game hours).
    pub night_duration_secs: f32,

    /// Master RNG seed.  The same seed always produces identical nights.
    pub seed: u64,

    /// Name of the location whose occupation ends the night with a breach.
    /// Compared case-insensitively.
    pub protected_endpoint: String,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            night_duration_secs: 360.0,
            seed:                0,
            protected_endpoint:  "Office".to_string(),
        }
    }
}

impl EpisodeConfig {
    /// Construct a `SessionClock` pre-configured for this night.
    pub fn make_clock(&self) -> SessionClock {
        SessionClock::new(self.night_duration_secs)
    }

    /// Reject a non-positive night length or an unnamed endpoint.
    pub fn validate(&self) -> NwResult<()> {
        if !self.night_duration_secs.is_finite() || self.night_duration_secs <= 0.0 {
            return Err(NwError::InvalidDuration(self.night_duration_secs));
        }
        if self.protected_endpoint.trim().is_empty() {
            return Err(NwError::EmptyEndpoint);
        }
        Ok(())
    }

    /// `true` if `name` is the protected endpoint.
    #[inline]
    pub fn is_endpoint(&self, name: &str) -> bool {
        name.eq_ignore_ascii_case(&self.protected_endpoint)
    }
}
