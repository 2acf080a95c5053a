//! Top-level facade crate for memstatsd.
//!
//! Re-exports core types and the agent library so users can depend on a single crate.

pub mod core {
    pub use memstatsd_core::*;
}

pub mod agent {
    pub use memstatsd_agent::*;
}
