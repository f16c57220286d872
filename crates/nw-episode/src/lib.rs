//! `nw-episode` — session lifecycle for the nightwatch agent simulation.
//!
//! # One night
//!
//! ```text
//! start_episode(night):
//!   reset collaborators → roll difficulties → report bad configs
//!   → release every location → every agent Idle at home → clock 0 → Playing
//!
//! tick(dt) while Playing:
//!   ① Clock     — advance by dt; past the night length → Complete
//!   ② Power     — gauge at zero → Over(PowerFailure)
//!   ③ Agents    — Agent::update once each, in registration order
//!   ④ Breaches  — first breach → Over(Jumpscare), sink notified once
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use nw_core::EpisodeConfig;
//! use nw_episode::EpisodeBuilder;
//! use nw_signals::Facility;
//!
//! let mut facility = Facility::default();
//! let mut episode = EpisodeBuilder::new(EpisodeConfig::default(), registry)
//!     .agents(specs)
//!     .build()?;
//! episode.start_episode(1, &mut facility.collaborators());
//! while episode.state().is_playing() {
//!     episode.tick(1.0, &mut facility.collaborators());
//! }
//! ```

pub mod builder;
pub mod episode;
pub mod error;
pub mod observer;
pub mod session;


pub use builder::EpisodeBuilder;
pub use episode::Episode;
pub use error::{EpisodeError, EpisodeResult};
pub use observer::{EpisodeObserver, NoopObserver};
pub use session::{EndReason, SessionState};
