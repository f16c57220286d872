//! The `Episode` struct and its tick loop.

use nw_agent::{Agent, AgentEvent};
use nw_core::{AgentRng, EpisodeConfig, FixedRoll, RollSource, SessionClock, SimRng, roll_difficulty};
use nw_location::LocationRegistry;
use nw_signals::{Collaborators, SignalGateway};
use tracing::{debug, info, warn};

use crate::{EndReason, EpisodeError, EpisodeObserver, EpisodeResult, NoopObserver, SessionState};

// ── Roll sources ──────────────────────────────────────────────────────────────

/// Where agents and the difficulty roll draw their randomness.
pub(crate) enum Rolls {
    /// One `AgentRng` per agent (indexed like `Episode::agents`) plus an
    /// episode-level stream for difficulty.
    Seeded { agents: Vec<AgentRng>, episode: SimRng },
    /// Every draw lands at the same fraction of its range.
    Fixed(FixedRoll),
}

impl Rolls {
    pub(crate) fn seeded(seed: u64, agents: &[Agent]) -> Self {
        Rolls::Seeded {
            agents:  agents.iter().map(|a| AgentRng::new(seed, a.id())).collect(),
            episode: SimRng::new(seed),
        }
    }

    fn for_agent(&mut self, index: usize) -> &mut dyn RollSource {
        match self {
            Rolls::Seeded { agents, .. } => &mut agents[index],
            Rolls::Fixed(roll) => roll,
        }
    }

    fn for_episode(&mut self) -> &mut dyn RollSource {
        match self {
            Rolls::Seeded { episode, .. } => episode,
            Rolls::Fixed(roll) => roll,
        }
    }
}

// ── Episode ───────────────────────────────────────────────────────────────────

/// One night: the location registry, every agent, the session clock and
/// the lifecycle state.
///
/// The episode does not own the facility.  Doors, lights, cameras, power
/// and the breach sink are passed in as [`Collaborators`] on each call that
/// needs them; a missing collaborator reads as its inert default.
///
/// Create via [`EpisodeBuilder`][crate::EpisodeBuilder].
pub struct Episode<O: EpisodeObserver = NoopObserver> {
    /// Night length, seed and the protected endpoint.
    pub config: EpisodeConfig,

    pub clock: SessionClock,

    /// Owned by the episode; every agent allocates through it.
    pub registry: LocationRegistry,

    /// Updated in this order every tick.
    pub agents: Vec<Agent>,

    pub(crate) rolls:    Rolls,
    pub(crate) night:    u32,
    pub(crate) state:    SessionState,
    pub(crate) observer: O,
}

impl<O: EpisodeObserver> Episode<O> {
    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Night number passed to the last [`start_episode`](Self::start_episode).
    #[inline]
    pub fn night(&self) -> u32 {
        self.night
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Agent registered under `name` (case-insensitive).
    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.iter().find(|a| a.name().eq_ignore_ascii_case(name))
    }

    /// Seconds left in the night.
    pub fn time_remaining(&self) -> f32 {
        self.clock.remaining_secs()
    }

    /// `"12 AM"` through `"6 AM"`.
    pub fn clock_face(&self) -> String {
        self.clock.clock_face()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Begin night `night`.
    ///
    /// Resets the collaborators, rolls a difficulty for every agent from
    /// the night's bracket, reports invalid configurations (those agents
    /// stay inert), puts every agent back home and starts the clock.
    pub fn start_episode(&mut self, night: u32, collab: &mut Collaborators<'_>) {
        info!(night, agents = self.agents.len(), "starting night");
        self.night = night;
        collab.reset_all();
        self.assign_difficulty(night);
        self.check_agents();
        self.reset();
        self.clock.reset();
        self.set_state(SessionState::Playing);
    }

    /// Replay the current night with the difficulties already assigned.
    pub fn restart(&mut self, collab: &mut Collaborators<'_>) {
        info!(night = self.night, "restarting night");
        collab.reset_all();
        self.reset();
        self.clock.reset();
        self.set_state(SessionState::Playing);
    }

    /// Forced reset: empty every location, then put each agent back in
    /// `Idle` at its home with fresh timers.  Session state and clock are
    /// left alone.
    pub fn reset(&mut self) {
        self.registry.release_all();
        for (index, agent) in self.agents.iter_mut().enumerate() {
            agent.reset_to_home(&mut self.registry, self.rolls.for_agent(index));
        }
        debug!(occupied = self.registry.occupied_count(), "agents reset");
    }

    /// Flip between `Playing` and `Paused`.  Does nothing in other states.
    pub fn toggle_pause(&mut self) {
        match self.state {
            SessionState::Playing => self.set_state(SessionState::Paused),
            SessionState::Paused => self.set_state(SessionState::Playing),
            _ => {}
        }
    }

    /// Leave the night.  Agents are reset so no location stays held.
    pub fn return_to_menu(&mut self) {
        self.reset();
        self.clock.reset();
        self.set_state(SessionState::Menu);
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// Advance the night by `dt` seconds.  Does nothing unless `Playing`.
    ///
    /// Order: clock, then completion, then power, then every agent once in
    /// registration order.  A breach ends the night after the agent loop
    /// finishes.
    pub fn tick(&mut self, dt: f32, collab: &mut Collaborators<'_>) {
        if !self.state.is_playing() {
            return;
        }

        self.clock.advance(dt);
        if self.clock.is_expired() {
            info!(night = self.night, "night complete");
            self.set_state(SessionState::Complete);
            return;
        }
        if !collab.gateway().has_power() {
            warn!(night = self.night, at = %self.clock, "power ran out");
            self.set_state(SessionState::Over(EndReason::PowerFailure));
            return;
        }

        let breaches = self.update_agents(dt, &collab.gateway());
        self.observer.on_tick_end(self.clock.current_tick, &self.clock);

        for agent in breaches {
            self.on_breach(&agent, collab);
        }
    }

    /// Run up to `n` ticks of `dt` seconds, stopping early once the session
    /// is no longer `Playing`.  Returns the number of ticks processed.
    pub fn run_ticks(&mut self, n: u64, dt: f32, collab: &mut Collaborators<'_>) -> u64 {
        let mut processed = 0;
        while processed < n && self.state.is_playing() {
            self.tick(dt, collab);
            processed += 1;
        }
        processed
    }

    /// End the night with a jumpscare by `agent` and notify the sink.
    ///
    /// Ignored once the night is already over or complete, so the sink hears
    /// about at most one breach per night.
    pub fn on_breach(&mut self, agent: &str, collab: &mut Collaborators<'_>) {
        if self.state.is_finished() {
            debug!(agent, state = %self.state, "breach ignored");
            return;
        }
        info!(agent, at = %self.clock, "breach");
        self.set_state(SessionState::Over(EndReason::Jumpscare { agent: agent.to_string() }));
        self.observer.on_breach(agent);
        collab.notify_breach(agent);
    }

    // ── Difficulty ────────────────────────────────────────────────────────

    /// Override one agent's difficulty, clamped to `0..=20`.
    pub fn set_difficulty(&mut self, agent: &str, level: i32) -> EpisodeResult<()> {
        let target = self
            .agents
            .iter_mut()
            .find(|a| a.name().eq_ignore_ascii_case(agent))
            .ok_or_else(|| EpisodeError::UnknownAgent(agent.to_string()))?;
        target.set_difficulty(level);
        debug!(agent = target.name(), difficulty = target.difficulty(), "difficulty set");
        Ok(())
    }

    /// Override every agent's difficulty, clamped to `0..=20`.
    pub fn set_all_difficulty(&mut self, level: i32) {
        for agent in &mut self.agents {
            agent.set_difficulty(level);
        }
    }

    // ── Internal helpers ──────────────────────────────────────────────────

    fn assign_difficulty(&mut self, night: u32) {
        for agent in &mut self.agents {
            let level = roll_difficulty(night, self.rolls.for_episode());
            agent.set_difficulty(i32::from(level));
            debug!(agent = agent.name(), difficulty = level, "difficulty rolled");
        }
    }

    fn check_agents(&mut self) {
        for agent in &mut self.agents {
            match agent.validate() {
                Ok(()) => agent.set_inert(false),
                Err(err) => {
                    warn!(agent = agent.name(), error = %err, "invalid configuration; agent stays put");
                    self.observer.on_diagnostic(agent.name(), &err);
                    agent.set_inert(true);
                }
            }
        }
    }

    /// One update per agent.  Returns the names of agents that breached.
    fn update_agents(&mut self, dt: f32, signals: &SignalGateway<'_>) -> Vec<String> {
        let endpoint = self.config.protected_endpoint.as_str();
        let mut breaches = Vec::new();
        for (index, agent) in self.agents.iter_mut().enumerate() {
            let before = agent.state();
            let event = agent.update(dt, &mut self.registry, signals, endpoint, self.rolls.for_agent(index));
            if agent.state() != before {
                self.observer.on_agent_state(agent.name(), before, agent.state());
            }
            if let Some(AgentEvent::Breach { .. }) = event {
                breaches.push(agent.name().to_string());
            }
        }
        breaches
    }

    fn set_state(&mut self, to: SessionState) {
        if self.state == to {
            return;
        }
        debug!(from = %self.state, to = %to, "session state");
        let from = std::mem::replace(&mut self.state, to);
        self.observer.on_state_change(&from, &self.state);
    }
}
