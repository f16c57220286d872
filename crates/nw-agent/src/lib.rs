//! `nw-agent` — the agent state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`state`]   | `AgentState`, `AgentEvent`                                |
//! | [`config`]  | `AgentConfig` (timers), `AgentSpec` (name, home, policy)  |
//! | [`machine`] | `Agent` — one state machine, parameterized by a policy    |
//!
//! # Update order
//!
//! One call to [`Agent::update`] runs these steps and stops at the first
//! that applies:
//!
//! 1. `Attacking`: only the ambush cooldown runs.
//! 2. Endpoint safety net: occupying the protected endpoint is a breach.
//! 3. Inert agents (invalid configuration) do nothing else.
//! 4. Camera pause: a watched, camera-sensitive agent freezes.  Staged
//!    agents are exempt; being watched resets their stage in step 5.
//! 5. The state's own transition.
//!
//! Every timer is a plain `f32` fed by `dt`.  Nothing is scheduled, so a
//! reset is a set of assignments and cannot be outlived by a pending
//! callback.

pub mod config;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use config::{AgentConfig, AgentSpec};
pub use machine::Agent;
pub use state::{AgentEvent, AgentState};
