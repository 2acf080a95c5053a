//! Shared error type across memstatsd crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, MemStatsdError>;

/// Unified error type used by core and agent.
///
/// Only construction and startup can fail. Statistics reads and metric
/// emission are non-failing from the agent's point of view.
#[derive(Debug, Error)]
pub enum MemStatsdError {
    #[error("invalid config: {0}")]
    Config(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("reporting interval must be non-zero")]
    InvalidInterval,
    #[error("agent must be started from within a tokio runtime")]
    NoRuntime,
    #[error("io: {0}")]
    Io(String),
}

impl From<std::io::Error> for MemStatsdError {
    fn from(e: std::io::Error) -> Self {
        MemStatsdError::Io(e.to_string())
    }
}
