//! `nw-location` — location registry and occupancy allocator.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`registry`]  | `Location`, `AccessPolicy`, `LocationKind`, `LocationRegistry`, builder |
//! | [`allocator`] | `Allocator` trait, `Requester`, acquire/release on the registry |
//! | [`shared`]    | `SharedRegistry` — registry behind a mutex for threaded callers |
//! | [`error`]     | `LocationError`, `LocationResult<T>`                         |
//!
//! # Occupancy model
//!
//! Every location has a single occupant slot.  `acquire` is a test-and-set
//! on that slot and `release` clears it only for the agent that holds it.
//! Acquire never releases on the caller's behalf; an agent that wants to
//! move must release its current location first.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `LocationSpec` and friends. |

pub mod allocator;
pub mod error;
pub mod registry;
pub mod shared;


pub use allocator::{Allocator, Requester};
pub use error::{LocationError, LocationResult};
pub use registry::{
    AccessPolicy, Location, LocationKind, LocationRegistry, LocationRegistryBuilder, LocationSpec,
};
pub use shared::SharedRegistry;
