//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `NwError` as one variant
//! where they need to surface a core failure.

use thiserror::Error;

/// The top-level error type for `nw-core`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NwError {
    #[error("night duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f32),

    #[error("protected endpoint name must not be empty")]
    EmptyEndpoint,
}

/// Shorthand result type for all `nw-*` crates.
pub type NwResult<T> = Result<T, NwError>;
