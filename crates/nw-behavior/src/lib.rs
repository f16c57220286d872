//! `nw-behavior` — movement policies.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                        |
//! |--------------|-----------------------------------------------------------------|
//! | [`context`]  | `AgentView<'a>` — read-only agent snapshot handed to policies   |
//! | [`policy`]   | `MovementPolicy` trait, `PolicyTraits`, `StageRules`            |
//! | [`scan`]     | `CyclicScan` — walk the whole registry in order                 |
//! | [`path`]     | `FixedPath`, `PowerGatedPath`                                   |
//! | [`ambush`]   | `StagedAmbush` — stage up while unwatched, then rush            |
//! | [`noop`]     | `NoopPolicy` — never moves                                      |
//! | [`spec`]     | `PolicySpec` — config-file description, built into a policy     |
//! | [`error`]    | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! Every agent runs the same state machine (nw-agent).  What differs between
//! archetypes is delegated to a boxed `MovementPolicy`: where to go next,
//! how likely a move is, which door the agent threatens, and how cameras
//! affect it.
//!
//! Policies are immutable and `Send + Sync`.  Per-agent counters (stage,
//! cooldown, timers) live on the agent, never in the policy, so one policy
//! value can be shared by several agents.

pub mod ambush;
pub mod context;
pub mod error;
pub mod noop;
pub mod path;
pub mod policy;
pub mod scan;
pub mod spec;

#[cfg(test)]
mod tests;

pub use ambush::StagedAmbush;
pub use context::AgentView;
pub use error::{BehaviorError, BehaviorResult};
pub use noop::NoopPolicy;
pub use path::{FixedPath, PowerGatedPath};
pub use policy::{MovementPolicy, PolicyTraits, StageRules};
pub use scan::CyclicScan;
pub use spec::PolicySpec;
