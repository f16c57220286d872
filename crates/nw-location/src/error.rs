//! Location-subsystem error type.

use thiserror::Error;

/// Errors produced while building or querying the registry.
///
/// Occupancy conflicts are not errors: `acquire` reports them as `None`.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("location name must not be empty")]
    EmptyName,

    #[error("location {0:?} not found in registry")]
    NotFound(String),
}

pub type LocationResult<T> = Result<T, LocationError>;
