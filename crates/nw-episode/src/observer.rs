//! Episode observer trait for progress reporting and test probes.

use nw_agent::AgentState;
use nw_behavior::BehaviorError;
use nw_core::{SessionClock, Tick};

use crate::SessionState;

/// Callbacks invoked by [`Episode`][crate::Episode] at key points of a night.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: hourly chime
///
/// ```rust,ignore
/// struct Chime { last_hour: u32 }
///
/// impl EpisodeObserver for Chime {
///     fn on_tick_end(&mut self, _tick: Tick, clock: &SessionClock) {
///         if clock.hour() != self.last_hour {
///             self.last_hour = clock.hour();
///             println!("{}", clock.clock_face());
///         }
///     }
/// }
/// ```
pub trait EpisodeObserver {
    /// Called after every agent has been updated for `tick`.
    fn on_tick_end(&mut self, _tick: Tick, _clock: &SessionClock) {}

    /// Called whenever the session moves between states.
    fn on_state_change(&mut self, _from: &SessionState, _to: &SessionState) {}

    /// Called when an agent's state changes during a tick.
    fn on_agent_state(&mut self, _agent: &str, _from: AgentState, _to: AgentState) {}

    /// Called once per night, for the breach that ended it.
    fn on_breach(&mut self, _agent: &str) {}

    /// Called at episode start for each agent whose configuration is invalid.
    /// The agent stays inert for the night.
    fn on_diagnostic(&mut self, _agent: &str, _error: &BehaviorError) {}
}

/// An [`EpisodeObserver`] that does nothing.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl EpisodeObserver for NoopObserver {}
