//! memstatsd core: runtime-free snapshot/delta primitives, metric naming,
//! the metrics-client contract, and the shared error type.
//!
//! This crate carries no runtime or transport dependencies so the delta
//! arithmetic and naming can be exercised without an async executor.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! Counter subtraction never underflows: deltas are computed in `i128` and
//! saturated into `i64`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod delta;
pub mod duration;
pub mod error;
pub mod names;
pub mod snapshot;
pub mod statter;

pub use delta::{Delta, DeltaTracker};
pub use duration::SignedDuration;
/// Shared result type.
pub use error::{MemStatsdError, Result};
pub use snapshot::{MemoryDelta, MemorySnapshot};
pub use statter::Statter;
