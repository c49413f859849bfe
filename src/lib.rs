//! Paintshop: a deadlock-free coordination engine for a multi-station paint shop.
//!
//! # Overview
//!
//! Two populations of concurrent workers share a small set of exclusive
//! physical resources. Customers submit paint-mixing orders and wait for
//! them to come back; staff pull orders, mix them at the tint stations the
//! order touches, and hand the finished can back. The shop closes only once
//! every customer has departed and every staff member has independently
//! agreed there is nothing left to do.
//!
//! # Core Guarantees
//!
//! - **Exact-match handoff**: every submitted order is returned to its
//!   submitter exactly once, matched by identity, never by position.
//! - **Station exclusion**: at most one staff member dispenses from a given
//!   tint station at any instant.
//! - **No deadlock**: multi-station acquisition is serialized through a
//!   single planning lock, so overlapping orders can never form a wait
//!   cycle regardless of which stations they touch.
//! - **Clean termination**: staff leave only after reaching consensus at an
//!   exit barrier, so no shared state is torn down while a peer still
//!   depends on it.
//!
//! # Module Structure
//!
//! - [`config`]: shop sizing parameters and validation
//! - [`order`]: paint cans and tint identifiers
//! - [`station`]: tint station locks and the mixing protocol
//! - [`shop`]: the shared shop context and all role operations
//! - [`worker`]: customer and staff role loops
//! - [`error`]: lifecycle error types
//! - [`test_utils`]: tracing-based test logging helpers

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

mod barrier;
mod census;
pub mod config;
pub mod error;
mod intake;
pub mod order;
mod ready;
pub mod shop;
pub mod station;
pub mod test_utils;
pub mod worker;

pub use config::{ConfigError, ShopConfig};
pub use error::{CloseError, OpenError};
pub use order::{PaintCan, Tint};
pub use shop::{Shop, ShopStats};
pub use station::{Mixer, StandardMixer, RESERVED_STATIONS};
pub use worker::{run_customer, run_staff};
