//! Delta computation against a single retained baseline.

use crate::duration::SignedDuration;

/// A sample that can be differenced against an earlier sample of itself.
pub trait Delta {
    /// Field-wise difference. `Default` must be the all-zero record.
    type Output: Default;

    /// `self - previous`, field by field.
    fn delta_since(&self, previous: &Self) -> Self::Output;
}

impl Delta for SignedDuration {
    type Output = SignedDuration;

    fn delta_since(&self, previous: &Self) -> SignedDuration {
        *self - *previous
    }
}

/// Holds the "previous" slot for one periodic task.
///
/// The first observation establishes the baseline and yields the zero delta;
/// subtraction is never attempted without a baseline.
#[derive(Debug, Clone)]
pub struct DeltaTracker<T> {
    previous: Option<T>,
}

impl<T> Default for DeltaTracker<T> {
    fn default() -> Self {
        Self { previous: None }
    }
}

impl<T: Delta> DeltaTracker<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `current` as the new baseline and return its delta against the
    /// old one (zero when there was none).
    pub fn observe(&mut self, current: T) -> T::Output {
        let delta = match &self.previous {
            Some(prev) => current.delta_since(prev),
            None => T::Output::default(),
        };
        self.previous = Some(current);
        delta
    }

    pub fn previous(&self) -> Option<&T> {
        self.previous.as_ref()
    }
}
