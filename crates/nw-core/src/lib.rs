//! `nw-core` — foundational types for the `nightwatch` agent simulation.
//!
//! This crate is a dependency of every other `nw-*` crate.  It has no `nw-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `LocationId`, `ZoneId`                     |
//! | [`side`]        | `Side` (left / right door, light, hallway)            |
//! | [`time`]        | `Tick`, `SessionClock`, `EpisodeConfig`               |
//! | [`rng`]         | `AgentRng`, `SimRng`, `RollSource`, `FixedRoll`       |
//! | [`difficulty`]  | Night bracket table, move-probability formula         |
//! | [`error`]       | `NwError`, `NwResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and config types.    |

pub mod difficulty;
pub mod error;
pub mod ids;
pub mod rng;
pub mod side;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use difficulty::{MAX_DIFFICULTY, base_move_probability, difficulty_range, roll_difficulty};
pub use error::{NwError, NwResult};
pub use ids::{AgentId, LocationId, ZoneId};
pub use rng::{AgentRng, FixedRoll, RollSource, SimRng};
pub use side::Side;
pub use time::{EpisodeConfig, SessionClock, Tick};
