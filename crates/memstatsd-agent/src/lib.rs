//! memstatsd agent library entry.
//!
//! This crate wires statistics providers, the two periodic reporters, and
//! the metrics clients into a startable/stoppable agent. It is intended to
//! be consumed by the binary (`main.rs`) and by integration tests.

pub mod agent;
pub mod config;
pub mod obs;
pub mod provider;
pub mod reporter;

pub use agent::{Agent, AgentHandle, AgentSettings};
pub use provider::StatsProvider;
