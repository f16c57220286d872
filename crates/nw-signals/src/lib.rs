//! `nw-signals` — the environmental signal gateway.
//!
//! Agents react to four pieces of office state they never own: whether a
//! door is closed, whether a hallway light is on, which camera feed (if any)
//! is being watched, and how much power is left.  This crate defines the
//! traits those collaborators implement and the read-only facade the agent
//! state machine polls.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                       |
//! |--------------|----------------------------------------------------------------|
//! | [`sensors`]  | `DoorSensor`, `LightSensor`, `CameraFeed`, `PowerGauge`, `BreachSink` |
//! | [`gateway`]  | `SignalGateway<'a>` (read-only, `Copy`), `Collaborators<'a>`   |
//! | [`panels`]   | In-memory implementations and the `Facility` bundle            |
//!
//! # Missing collaborators
//!
//! Every collaborator slot is optional.  An unwired slot answers with the
//! inert default: door open, light off, camera inactive, power full.  No
//! query can fail.

pub mod gateway;
pub mod panels;
pub mod sensors;


pub use gateway::{Collaborators, SignalGateway};
pub use panels::{CameraMonitor, DoorPanel, Facility, LightPanel, PowerSupply, RecordingSink};
pub use sensors::{BreachSink, CameraFeed, DoorSensor, LightSensor, PowerGauge};
