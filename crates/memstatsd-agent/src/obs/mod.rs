//! Metrics clients (`Statter` implementations).
//!
//! `UdpStatter` speaks the statsd line protocol; `LogStatter` writes every
//! observation as a tracing event for local runs without a collector.

pub mod log;
pub mod statsd;

pub use self::log::LogStatter;
pub use self::statsd::UdpStatter;
