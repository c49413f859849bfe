//! Lifecycle error types.
//!
//! The steady-state protocol has no recoverable errors: correctness is
//! carried by invariants, and violating one is a contract panic. The only
//! fallible operations are the lifecycle brackets, `open` and `close`.

use thiserror::Error;

use crate::config::ConfigError;

/// Errors that prevent the shop from opening.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OpenError {
    /// The supplied configuration failed validation.
    #[error("invalid shop configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Errors returned when the shop cannot close yet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CloseError {
    /// Not every staff member has reached the exit barrier; tearing the
    /// shop down now would destroy state a peer still depends on.
    #[error("cannot close: {arrived} of {staff} staff have reached the exit barrier")]
    StaffStillInside {
        /// Staff members that have arrived at the barrier so far.
        arrived: usize,
        /// Configured staff count.
        staff: usize,
    },
}
