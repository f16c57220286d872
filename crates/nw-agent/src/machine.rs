//! The per-agent state machine.

use nw_behavior::{AgentView, BehaviorError, BehaviorResult, MovementPolicy, NoopPolicy, StageRules};
use nw_core::{AgentId, LocationId, MAX_DIFFICULTY, RollSource};
use nw_location::{Allocator, LocationKind, LocationRegistry, Requester};
use nw_signals::SignalGateway;
use tracing::{debug, info, trace, warn};

use crate::{AgentConfig, AgentEvent, AgentSpec, AgentState};

/// One animatronic: identity, timers, counters and the policy that steers it.
///
/// The agent does not own its location.  It remembers which slot it holds,
/// and every change of slot goes through the registry's [`Allocator`]
/// methods: release first, then acquire.
pub struct Agent {
    id:           AgentId,
    name:         String,
    home:         String,
    timers:       AgentConfig,
    policy:       Box<dyn MovementPolicy>,
    config_error: Option<BehaviorError>,

    difficulty: u8,
    state:      AgentState,
    location:   Option<LocationId>,

    /// Seconds since the decision timer was last armed.
    elapsed: f32,
    /// Decision deadline, compared against `elapsed`.
    next_decision: f32,

    /// Attack countdown, meaningful in `AtThreshold`.
    countdown:   f32,
    blocked:     bool,
    blocked_for: f32,

    stage:       u8,
    stage_timer: f32,
    cooldown:    f32,

    breach_reported: bool,
    inert:           bool,
}

impl Agent {
    pub fn new(
        id:     AgentId,
        name:   impl Into<String>,
        home:   impl Into<String>,
        policy: Box<dyn MovementPolicy>,
        timers: AgentConfig,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            home: home.into(),
            timers,
            policy,
            config_error: None,
            difficulty: 0,
            state: AgentState::Idle,
            location: None,
            elapsed: 0.0,
            next_decision: 0.0,
            countdown: 0.0,
            blocked: false,
            blocked_for: 0.0,
            stage: 0,
            stage_timer: 0.0,
            cooldown: 0.0,
            breach_reported: false,
            inert: false,
        }
    }

    /// Build from configuration.  An unknown archetype does not fail here:
    /// the agent gets a [`NoopPolicy`] and the error is kept for
    /// [`validate`](Self::validate) to report at episode start.
    pub fn from_spec(id: AgentId, spec: &AgentSpec) -> Self {
        match spec.policy.build() {
            Ok(policy) => Self::new(id, &spec.name, &spec.home, policy, spec.timers.clone()),
            Err(err) => {
                let policy = Box::new(NoopPolicy::on_side(spec.policy.side));
                let mut agent = Self::new(id, &spec.name, &spec.home, policy, spec.timers.clone());
                agent.config_error = Some(err);
                agent
            }
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline] pub fn id(&self) -> AgentId { self.id }
    #[inline] pub fn name(&self) -> &str { &self.name }
    #[inline] pub fn home(&self) -> &str { &self.home }
    #[inline] pub fn state(&self) -> AgentState { self.state }
    #[inline] pub fn location(&self) -> Option<LocationId> { self.location }
    #[inline] pub fn difficulty(&self) -> u8 { self.difficulty }
    #[inline] pub fn countdown(&self) -> f32 { self.countdown }
    #[inline] pub fn is_blocked(&self) -> bool { self.blocked }
    #[inline] pub fn stage(&self) -> u8 { self.stage }
    #[inline] pub fn cooldown(&self) -> f32 { self.cooldown }
    #[inline] pub fn next_decision(&self) -> f32 { self.next_decision }
    #[inline] pub fn elapsed(&self) -> f32 { self.elapsed }
    #[inline] pub fn is_inert(&self) -> bool { self.inert }
    #[inline] pub fn breach_reported(&self) -> bool { self.breach_reported }
    #[inline] pub fn timers(&self) -> &AgentConfig { &self.timers }

    pub fn policy(&self) -> &dyn MovementPolicy {
        self.policy.as_ref()
    }

    /// Name of the held location.
    pub fn location_name<'r>(&self, registry: &'r LocationRegistry) -> Option<&'r str> {
        self.location.and_then(|id| registry.name_of(id))
    }

    // ── Configuration ─────────────────────────────────────────────────────

    /// Check policy and timers.  The first problem found is returned.
    pub fn validate(&self) -> BehaviorResult<()> {
        if let Some(err) = &self.config_error {
            return Err(err.clone());
        }
        self.policy.validate()?;
        let t = &self.timers;
        if t.min_move_delay_secs < 0.0 || t.max_move_delay_secs < t.min_move_delay_secs {
            return Err(BehaviorError::Config(format!(
                "move delay range [{}, {}] is invalid",
                t.min_move_delay_secs, t.max_move_delay_secs
            )));
        }
        if t.attack_timer_secs < 0.0 {
            return Err(BehaviorError::Config(format!(
                "attack timer must not be negative, got {}",
                t.attack_timer_secs
            )));
        }
        Ok(())
    }

    /// An inert agent never decides, stages or counts down.  The endpoint
    /// safety net still applies.
    pub fn set_inert(&mut self, inert: bool) {
        self.inert = inert;
    }

    /// Set the difficulty, clamped to `0..=20`.
    pub fn set_difficulty(&mut self, level: i32) {
        self.difficulty = level.clamp(0, MAX_DIFFICULTY as i32) as u8;
    }

    // ── Reset ─────────────────────────────────────────────────────────────

    /// Release whatever the agent holds, re-acquire its home location and
    /// clear every timer and counter.
    ///
    /// If home is taken or forbidden, the allocator's fallback places the
    /// agent elsewhere; if nothing is free it is left unplaced.
    pub fn reset_to_home(&mut self, registry: &mut LocationRegistry, rng: &mut dyn RollSource) {
        registry.release(self.id);
        self.location = registry.acquire(Requester::new(self.id, &self.name), Some(&self.home));
        match self.location_name(registry) {
            None => warn!(agent = %self.name, home = %self.home, "no location free at reset"),
            Some(name) if name != self.home => {
                debug!(agent = %self.name, home = %self.home, placed = name, "home unavailable at reset")
            }
            Some(_) => {}
        }

        self.state = AgentState::Idle;
        self.countdown = 0.0;
        self.blocked = false;
        self.blocked_for = 0.0;
        self.stage = 0;
        self.stage_timer = 0.0;
        self.cooldown = 0.0;
        self.breach_reported = false;
        self.rearm(rng);
    }

    // ── Update ────────────────────────────────────────────────────────────

    /// Advance the agent by `dt` seconds.
    ///
    /// `endpoint` is the name of the protected location.  Returns a breach
    /// event the first time the agent attacks after a reset.
    pub fn update(
        &mut self,
        dt:       f32,
        registry: &mut LocationRegistry,
        signals:  &SignalGateway<'_>,
        endpoint: &str,
        rng:      &mut dyn RollSource,
    ) -> Option<AgentEvent> {
        let dt = dt.max(0.0);

        if self.state == AgentState::Attacking {
            self.run_cooldown(dt);
            return None;
        }

        if self.at_endpoint(registry, endpoint) {
            debug!(agent = %self.name, "occupies the protected endpoint");
            return self.enter_attack();
        }

        if self.inert {
            return None;
        }

        let staging = self.policy.staging().cloned();
        let watched = self.is_watched(registry, signals);

        // A staged agent is never frozen: being watched costs it its stage.
        if watched && self.policy.pauses_when_watched() && staging.is_none() {
            // A due attack is never held back by the camera.
            if self.state == AgentState::AtThreshold
                && self.countdown <= 0.0
                && !self.door_closed(signals)
            {
                return self.enter_attack();
            }
            trace!(agent = %self.name, state = %self.state, "frozen by camera");
            return None;
        }

        match self.state {
            AgentState::Idle => match staging {
                Some(rules) => self.update_staged(dt, &rules, watched, registry, signals, endpoint, rng),
                None => self.update_idle(dt, registry, signals, endpoint, rng),
            },
            AgentState::Moving => {
                self.arrive(registry);
                None
            }
            AgentState::InTransitZone => {
                self.update_transit(signals);
                None
            }
            AgentState::AtThreshold => self.update_threshold(dt, registry, signals, rng),
            AgentState::Attacking => None,
        }
    }

    // ── Idle ──────────────────────────────────────────────────────────────

    fn update_idle(
        &mut self,
        dt:       f32,
        registry: &mut LocationRegistry,
        signals:  &SignalGateway<'_>,
        endpoint: &str,
        rng:      &mut dyn RollSource,
    ) -> Option<AgentEvent> {
        self.elapsed += dt;
        if self.elapsed < self.next_decision {
            return None;
        }
        let p = self.policy.move_probability(self.difficulty, signals);
        if rng.unit() < p {
            self.try_move(registry, endpoint, rng)
        } else {
            self.rearm(rng);
            None
        }
    }

    /// Ask the policy for a target, release, acquire.  A refusal puts the
    /// agent back where it was.
    fn try_move(
        &mut self,
        registry: &mut LocationRegistry,
        endpoint: &str,
        rng:      &mut dyn RollSource,
    ) -> Option<AgentEvent> {
        let view = AgentView::new(self.id, &self.name, self.location, self.difficulty);
        let target = self.policy.decide_next_move(&view, registry);
        self.rearm(rng);

        let Some(target) = target else {
            trace!(agent = %self.name, "no move target");
            return None;
        };

        let previous = self.location_name(registry).map(str::to_string);
        registry.release(self.id);
        self.location = registry.acquire(Requester::new(self.id, &self.name), Some(&target));

        let Some(granted) = self.location else {
            if let Some(prev) = &previous {
                self.location = registry.acquire_exact(Requester::new(self.id, &self.name), prev);
            }
            debug!(agent = %self.name, target = %target, "move refused");
            return None;
        };

        self.state = AgentState::Moving;
        debug!(
            agent = %self.name,
            from = ?previous,
            to = ?registry.name_of(granted),
            "moved"
        );
        if self.at_endpoint(registry, endpoint) {
            return self.enter_attack();
        }
        None
    }

    fn rearm(&mut self, rng: &mut dyn RollSource) {
        self.elapsed = 0.0;
        self.next_decision = rng.between(self.timers.min_move_delay_secs, self.timers.max_move_delay_secs);
    }

    // ── Moving ────────────────────────────────────────────────────────────

    /// The arrival frame: pick the next state from the location kind.
    ///
    /// Agents without a threatened side treat hallways and doors as rooms.
    fn arrive(&mut self, registry: &LocationRegistry) {
        let kind = self
            .location
            .and_then(|id| registry.get(id))
            .map(|l| l.kind)
            .unwrap_or_default();
        let gated = self.policy.threat_side().is_some();

        self.state = match kind {
            LocationKind::TransitZone if gated => AgentState::InTransitZone,
            LocationKind::Threshold if gated => {
                self.countdown = self.timers.attack_timer_secs;
                AgentState::AtThreshold
            }
            _ => AgentState::Idle,
        };
        trace!(agent = %self.name, state = %self.state, "arrived");
    }

    // ── InTransitZone ─────────────────────────────────────────────────────

    /// Held while the hallway light is on.  Once it is off the agent is at
    /// the door and the countdown starts.
    fn update_transit(&mut self, signals: &SignalGateway<'_>) {
        let Some(side) = self.policy.threat_side() else {
            self.state = AgentState::Idle;
            return;
        };
        if signals.light_on(side) {
            return;
        }
        self.countdown = self.timers.attack_timer_secs;
        self.state = AgentState::AtThreshold;
        debug!(agent = %self.name, %side, "left the hallway for the door");
    }

    // ── AtThreshold ───────────────────────────────────────────────────────

    /// Count down while the door is open.  A closed door holds the
    /// countdown where it is.
    fn update_threshold(
        &mut self,
        dt:       f32,
        registry: &mut LocationRegistry,
        signals:  &SignalGateway<'_>,
        rng:      &mut dyn RollSource,
    ) -> Option<AgentEvent> {
        let Some(side) = self.policy.threat_side() else {
            self.state = AgentState::Idle;
            return None;
        };

        if signals.door_closed(side) {
            if !self.blocked {
                debug!(agent = %self.name, %side, countdown = self.countdown, "blocked by door");
            }
            self.blocked = true;
            self.blocked_for += dt;
            if let Some(limit) = self.timers.blocked_retreat_secs {
                if self.blocked_for >= limit {
                    self.retreat(registry, rng);
                }
            }
            return None;
        }

        self.blocked = false;
        self.blocked_for = 0.0;
        self.countdown -= dt;
        if self.countdown <= 0.0 {
            return self.enter_attack();
        }
        None
    }

    fn retreat(&mut self, registry: &mut LocationRegistry, rng: &mut dyn RollSource) {
        registry.release(self.id);
        self.location = registry.acquire(Requester::new(self.id, &self.name), Some(&self.home));
        self.state = AgentState::Idle;
        self.blocked = false;
        self.blocked_for = 0.0;
        self.countdown = 0.0;
        self.rearm(rng);
        info!(agent = %self.name, to = ?self.location_name(registry), "gave up at the door");
    }

    fn door_closed(&self, signals: &SignalGateway<'_>) -> bool {
        self.policy.threat_side().is_some_and(|side| signals.door_closed(side))
    }

    // ── Staged archetypes ─────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn update_staged(
        &mut self,
        dt:       f32,
        rules:    &StageRules,
        watched:  bool,
        registry: &mut LocationRegistry,
        signals:  &SignalGateway<'_>,
        endpoint: &str,
        rng:      &mut dyn RollSource,
    ) -> Option<AgentEvent> {
        if watched {
            if self.stage > 0 {
                debug!(agent = %self.name, stage = self.stage, "stage reset by camera");
            }
            self.stage = 0;
            self.stage_timer = 0.0;
            return None;
        }

        self.stage_timer += dt;
        if self.stage_timer >= rules.stage_interval_secs {
            self.stage_timer = 0.0;
            if rng.unit() < self.policy.move_probability(self.difficulty, signals) {
                self.stage = (self.stage + 1).min(rules.final_stage);
                debug!(agent = %self.name, stage = self.stage, "stage up");
            }
        }

        if self.stage >= rules.final_stage {
            return self.rush(rules, registry, endpoint);
        }
        None
    }

    /// Relocate straight to the endpoint and attack.
    fn rush(
        &mut self,
        rules:    &StageRules,
        registry: &mut LocationRegistry,
        endpoint: &str,
    ) -> Option<AgentEvent> {
        let previous = self.location_name(registry).map(str::to_string);
        registry.release(self.id);
        self.location = registry.acquire_exact(Requester::new(self.id, &self.name), endpoint);
        if self.location.is_none() {
            warn!(agent = %self.name, endpoint, "endpoint unavailable; attacking from where it stands");
            if let Some(prev) = &previous {
                self.location = registry.acquire_exact(Requester::new(self.id, &self.name), prev);
            }
        }
        self.cooldown = rules.cooldown_secs;
        self.enter_attack()
    }

    /// Post-rush cooldown.  When it runs out the stage counter returns to 0;
    /// the agent stays `Attacking` until reset.
    fn run_cooldown(&mut self, dt: f32) {
        if self.cooldown <= 0.0 {
            return;
        }
        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.cooldown = 0.0;
            self.stage = 0;
            self.stage_timer = 0.0;
            debug!(agent = %self.name, "cooldown over");
        }
    }

    // ── Shared helpers ────────────────────────────────────────────────────

    fn enter_attack(&mut self) -> Option<AgentEvent> {
        self.state = AgentState::Attacking;
        self.blocked = false;
        if self.breach_reported {
            return None;
        }
        self.breach_reported = true;
        info!(agent = %self.name, "attacking");
        Some(AgentEvent::Breach { agent: self.id })
    }

    fn at_endpoint(&self, registry: &LocationRegistry, endpoint: &str) -> bool {
        self.location_name(registry)
            .is_some_and(|name| name.eq_ignore_ascii_case(endpoint))
    }

    /// `true` if a camera shows this agent's current location.
    fn is_watched(&self, registry: &LocationRegistry, signals: &SignalGateway<'_>) -> bool {
        self.location
            .and_then(|id| registry.get(id))
            .and_then(|loc| self.policy.observation_zone(loc))
            .is_some_and(|zone| signals.is_watching(zone))
    }
}
