//! Signed nanosecond duration.
//!
//! `std::time::Duration` cannot go negative, but timing deltas (and raw
//! latency samples when the host wakes a sleeper early) can.

use std::fmt;
use std::ops::{Neg, Sub};
use std::time::Duration;

use serde::{Deserialize, Serialize};

const NANOS_PER_MILLI: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SignedDuration {
    nanos: i64,
}

impl SignedDuration {
    pub const ZERO: SignedDuration = SignedDuration { nanos: 0 };

    pub const fn from_nanos(nanos: i64) -> Self {
        Self { nanos }
    }

    pub const fn from_millis(millis: i64) -> Self {
        Self { nanos: millis.saturating_mul(NANOS_PER_MILLI) }
    }

    pub const fn as_nanos(self) -> i64 {
        self.nanos
    }

    /// Fractional milliseconds, the unit statsd timings are reported in.
    pub fn as_millis_f64(self) -> f64 {
        self.nanos as f64 / NANOS_PER_MILLI as f64
    }

    pub const fn is_negative(self) -> bool {
        self.nanos < 0
    }

    pub const fn saturating_sub(self, rhs: SignedDuration) -> SignedDuration {
        Self { nanos: self.nanos.saturating_sub(rhs.nanos) }
    }
}

impl From<Duration> for SignedDuration {
    /// Saturates at `i64::MAX` nanoseconds (~292 years).
    fn from(d: Duration) -> Self {
        Self { nanos: i64::try_from(d.as_nanos()).unwrap_or(i64::MAX) }
    }
}

impl Sub for SignedDuration {
    type Output = SignedDuration;

    fn sub(self, rhs: SignedDuration) -> SignedDuration {
        self.saturating_sub(rhs)
    }
}

impl Neg for SignedDuration {
    type Output = SignedDuration;

    fn neg(self) -> SignedDuration {
        Self { nanos: self.nanos.saturating_neg() }
    }
}

impl fmt::Display for SignedDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}ms", self.as_millis_f64())
    }
}
