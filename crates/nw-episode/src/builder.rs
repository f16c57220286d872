//! Fluent builder for constructing an [`Episode`].

use std::collections::HashSet;

use nw_agent::{Agent, AgentSpec};
use nw_core::{AgentId, EpisodeConfig, FixedRoll};
use nw_location::{LocationError, LocationRegistry};

use crate::episode::Rolls;
use crate::{Episode, EpisodeError, EpisodeObserver, EpisodeResult, NoopObserver, SessionState};

/// Fluent builder for [`Episode<O>`].
///
/// # Required inputs
///
/// - [`EpisodeConfig`]: night length, seed, protected endpoint
/// - [`LocationRegistry`]: must contain the protected endpoint
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                              |
/// |---------------------|--------------------------------------|
/// | `.agent(spec)`      | No agents                            |
/// | `.fixed_rolls(f)`   | Per-agent `AgentRng` from the seed   |
/// | `.observer(o)`      | `NoopObserver`                       |
///
/// # Example
///
/// ```rust,ignore
/// let mut episode = EpisodeBuilder::new(EpisodeConfig::default(), registry)
///     .agent(AgentSpec::new("Bonnie", "Show Stage", PolicySpec::fixed_path(path)))
///     .build()?;
/// episode.start_episode(1, &mut facility.collaborators());
/// ```
pub struct EpisodeBuilder<O: EpisodeObserver = NoopObserver> {
    config:     EpisodeConfig,
    registry:   LocationRegistry,
    agents:     Vec<AgentSpec>,
    fixed_roll: Option<f64>,
    observer:   O,
}

impl EpisodeBuilder<NoopObserver> {
    /// Create a builder with all required inputs.
    pub fn new(config: EpisodeConfig, registry: LocationRegistry) -> Self {
        Self {
            config,
            registry,
            agents: Vec::new(),
            fixed_roll: None,
            observer: NoopObserver,
        }
    }
}

impl<O: EpisodeObserver> EpisodeBuilder<O> {
    /// Register one agent.  Agents update in registration order.
    pub fn agent(mut self, spec: AgentSpec) -> Self {
        self.agents.push(spec);
        self
    }

    pub fn agents(mut self, specs: impl IntoIterator<Item = AgentSpec>) -> Self {
        self.agents.extend(specs);
        self
    }

    /// Replace every random draw with [`FixedRoll`]`(fraction)`.
    ///
    /// `fixed_rolls(0.0)` gives each agent the lowest difficulty of the
    /// night's bracket and the minimum move delay, and passes every move
    /// check whose probability is above zero.
    pub fn fixed_rolls(mut self, fraction: f64) -> Self {
        self.fixed_roll = Some(fraction);
        self
    }

    /// Attach an observer.  It is owned by the episode and reachable
    /// through [`Episode::observer`].
    pub fn observer<P: EpisodeObserver>(self, observer: P) -> EpisodeBuilder<P> {
        EpisodeBuilder {
            config: self.config,
            registry: self.registry,
            agents: self.agents,
            fixed_roll: self.fixed_roll,
            observer,
        }
    }

    /// Validate inputs, instantiate the agents and return an episode in
    /// the `Menu` state.
    ///
    /// Agent policies are not checked here; an invalid one is reported
    /// through [`EpisodeObserver::on_diagnostic`] when the night starts.
    pub fn build(self) -> EpisodeResult<Episode<O>> {
        let mut config = self.config;

        // ── Validate configuration ────────────────────────────────────────
        config.validate()?;

        // Agents rush the endpoint by exact name, so store the registry's
        // spelling.
        let endpoint = self
            .registry
            .iter()
            .find(|l| config.is_endpoint(&l.name))
            .map(|l| l.name.clone())
            .ok_or_else(|| LocationError::NotFound(config.protected_endpoint.clone()))?;
        config.protected_endpoint = endpoint;

        let mut seen = HashSet::new();
        for spec in &self.agents {
            if !seen.insert(spec.name.to_ascii_lowercase()) {
                return Err(EpisodeError::DuplicateAgent(spec.name.clone()));
            }
        }

        // ── Instantiate agents ────────────────────────────────────────────
        let agents: Vec<Agent> = self
            .agents
            .iter()
            .enumerate()
            .map(|(i, spec)| Agent::from_spec(AgentId(i as u32), spec))
            .collect();

        let rolls = match self.fixed_roll {
            Some(fraction) => Rolls::Fixed(FixedRoll(fraction)),
            None => Rolls::seeded(config.seed, &agents),
        };

        Ok(Episode {
            clock: config.make_clock(),
            config,
            registry: self.registry,
            agents,
            rolls,
            night: 0,
            state: SessionState::Menu,
            observer: self.observer,
        })
    }
}
