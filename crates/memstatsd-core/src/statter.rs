//! Metrics-client contract consumed by the reporters.

use std::sync::Arc;

use crate::duration::SignedDuration;

/// Accepts named gauge and timing observations.
///
/// Calls are fire-and-forget: an implementation absorbs its own delivery
/// failures and never reports them back to the caller.
pub trait Statter: Send + Sync {
    fn gauge(&self, name: &str, value: i64);
    fn timing(&self, name: &str, value: SignedDuration);
}

impl<T: Statter + ?Sized> Statter for Arc<T> {
    fn gauge(&self, name: &str, value: i64) {
        (**self).gauge(name, value)
    }

    fn timing(&self, name: &str, value: SignedDuration) {
        (**self).timing(name, value)
    }
}

impl<T: Statter + ?Sized> Statter for &T {
    fn gauge(&self, name: &str, value: i64) {
        (**self).gauge(name, value)
    }

    fn timing(&self, name: &str, value: SignedDuration) {
        (**self).timing(name, value)
    }
}
