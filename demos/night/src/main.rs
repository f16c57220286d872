//! night — run one night of the nightwatch agent simulation.
//!
//! Loads a scene and cast from a TOML night file, wires an in-memory
//! facility, and ticks until dawn, a breach or a power failure.  With
//! `--guard` a scripted player shuts a door whenever an agent stands at it.
//!
//! Log verbosity follows `RUST_LOG` (default `info`; `RUST_LOG=debug` shows
//! every move).

mod night_file;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Result, ensure};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use nw_agent::AgentState;
use nw_core::{SessionClock, Side, Tick};
use nw_episode::{Episode, EpisodeBuilder, EpisodeObserver, SessionState};
use nw_signals::{DoorSensor, Facility, PowerGauge};

use night_file::NightFile;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "night")]
#[command(about = "Run one night of the nightwatch agent simulation")]
struct Args {
    /// Night file (TOML)
    #[arg(long, default_value = "demos/night/night.toml")]
    config: PathBuf,

    /// Night number; selects the difficulty bracket
    #[arg(long, default_value_t = 1)]
    night: u32,

    /// Seconds per update
    #[arg(long, default_value_t = 1.0)]
    dt: f32,

    /// Override the seed from the night file
    #[arg(long)]
    seed: Option<u64>,

    /// Power drain per second, in percentage points, per active system
    #[arg(long, default_value_t = 0.15)]
    drain: f32,

    /// Close a door whenever an agent stands at it
    #[arg(long)]
    guard: bool,
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Logs the hour as it changes and every agent transition.
struct NightLog {
    hour: u32,
}

impl EpisodeObserver for NightLog {
    fn on_tick_end(&mut self, _tick: Tick, clock: &SessionClock) {
        if clock.hour() != self.hour {
            self.hour = clock.hour();
            info!(time = %clock.clock_face(), "the clock strikes");
        }
    }

    fn on_state_change(&mut self, from: &SessionState, to: &SessionState) {
        info!(%from, %to, "session");
    }

    fn on_agent_state(&mut self, agent: &str, from: AgentState, to: AgentState) {
        info!(agent, %from, %to, "agent");
    }
}

// ── Scripted player ───────────────────────────────────────────────────────────

/// Shut each door while something waits at it, open it otherwise.
fn guard_doors<O: EpisodeObserver>(episode: &Episode<O>, facility: &mut Facility) {
    for side in Side::BOTH {
        let threatened = episode.agents.iter().any(|a| {
            a.state() == AgentState::AtThreshold && a.policy().threat_side() == Some(side)
        });
        match (threatened, facility.doors.is_closed(side)) {
            (true, false) => {
                facility.close_door(side);
            }
            (false, true) => facility.open_door(side),
            _ => {}
        }
    }
}

/// Base load plus one unit per closed door.
fn power_load(facility: &Facility) -> f32 {
    1.0 + Side::BOTH.iter().filter(|&&s| facility.doors.is_closed(s)).count() as f32
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    ensure!(args.dt > 0.0, "--dt must be positive, got {}", args.dt);

    let mut file = NightFile::load(&args.config)?;
    if let Some(seed) = args.seed {
        file.episode.seed = seed;
    }

    println!("=== night {} : {} ===", args.night, args.config.display());
    println!(
        "Locations: {}  |  Agents: {}  |  Seed: {}",
        file.locations.len(),
        file.agents.len(),
        file.episode.seed
    );
    println!();

    let mut facility = Facility::with_feeds(file.cameras.iter().copied());
    let mut episode = EpisodeBuilder::new(file.episode.clone(), file.registry()?)
        .agents(file.agents.iter().cloned())
        .observer(NightLog { hour: 0 })
        .build()?;

    episode.start_episode(args.night, &mut facility.collaborators());
    for agent in &episode.agents {
        info!(agent = agent.name(), difficulty = agent.difficulty(), policy = agent.policy().kind(), "ready");
    }

    let t0 = Instant::now();
    while episode.state().is_playing() {
        if args.guard {
            guard_doors(&episode, &mut facility);
        }
        let load = power_load(&facility);
        facility.power.drain(args.drain * load * args.dt);
        episode.tick(args.dt, &mut facility.collaborators());
    }
    let elapsed = t0.elapsed();

    println!();
    println!("Night over in {:.3} s: {}", elapsed.as_secs_f64(), episode.state());
    println!(
        "Reached {}  |  {} ticks  |  power left {:.1}%",
        episode.clock_face(),
        episode.clock.current_tick.0,
        facility.power.percentage()
    );
    println!();
    println!("{:<10} {:<14} {:<14} {:>5}", "Agent", "State", "Location", "Level");
    println!("{}", "-".repeat(46));
    for agent in &episode.agents {
        println!(
            "{:<10} {:<14} {:<14} {:>5}",
            agent.name(),
            agent.state().as_str(),
            agent.location_name(&episode.registry).unwrap_or("-"),
            agent.difficulty()
        );
    }

    Ok(())
}
