//! statsd over UDP.
//!
//! One datagram per observation, sent on a connected non-blocking socket.
//! Send failures are counted and logged at debug level; the caller is never
//! told.

use std::fmt::Write;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::sync::atomic::{AtomicU64, Ordering};

use bytes::BytesMut;
use memstatsd_core::error::{MemStatsdError, Result};
use memstatsd_core::{SignedDuration, Statter};

/// Append a gauge line.
///
/// statsd reads a leading sign on a gauge as a relative change, so a
/// negative value is sent as a reset to zero followed by the decrement.
pub fn encode_gauge(buf: &mut BytesMut, name: &str, value: i64) {
    if value < 0 {
        let _ = write!(buf, "{name}:0|g\n{name}:{value}|g");
    } else {
        let _ = write!(buf, "{name}:{value}|g");
    }
}

/// Append a timing line in fractional milliseconds.
pub fn encode_timing(buf: &mut BytesMut, name: &str, value: SignedDuration) {
    let _ = write!(buf, "{name}:{}|ms", value.as_millis_f64());
}

pub struct UdpStatter {
    socket: UdpSocket,
    target: SocketAddr,
    dropped: AtomicU64,
}

impl UdpStatter {
    /// Resolve `addr` and connect an ephemeral local socket to it.
    pub fn connect<A: ToSocketAddrs>(addr: A) -> Result<Self> {
        let target = addr
            .to_socket_addrs()?
            .next()
            .ok_or_else(|| MemStatsdError::Config("statsd address resolved to nothing".into()))?;

        let local: SocketAddr = if target.is_ipv4() {
            (Ipv4Addr::UNSPECIFIED, 0).into()
        } else {
            (Ipv6Addr::UNSPECIFIED, 0).into()
        };
        let socket = UdpSocket::bind(local)?;
        socket.connect(target)?;
        socket.set_nonblocking(true)?;

        tracing::info!(%target, "statsd client ready");
        Ok(Self {
            socket,
            target,
            dropped: AtomicU64::new(0),
        })
    }

    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Datagrams that failed to send.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn send(&self, buf: &[u8]) {
        if let Err(e) = self.socket.send(buf) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(error = %e, target = %self.target, "statsd send failed");
        }
    }
}

impl Statter for UdpStatter {
    fn gauge(&self, name: &str, value: i64) {
        let mut buf = BytesMut::with_capacity(name.len() + 24);
        encode_gauge(&mut buf, name, value);
        self.send(&buf);
    }

    fn timing(&self, name: &str, value: SignedDuration) {
        let mut buf = BytesMut::with_capacity(name.len() + 24);
        encode_timing(&mut buf, name, value);
        self.send(&buf);
    }
}
