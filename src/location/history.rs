//! Bounded, arrival-ordered sample history.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use super::types::{LocationSample, DEFAULT_CAPACITY};

/// Fixed-capacity buffer of samples, oldest first.
///
/// After every [`append`](Self::append) the buffer holds at most
/// `capacity` samples; the oldest ones are evicted first.
#[derive(Debug, Clone)]
pub struct HistoryBuffer {
    samples: VecDeque<LocationSample>,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Appends a batch in arrival order, then trims to `capacity`.
    ///
    /// Returns the number of samples evicted.
    pub fn append<I>(&mut self, batch: I, capacity: NonZeroUsize) -> usize
    where
        I: IntoIterator<Item = LocationSample>,
    {
        self.samples.extend(batch);

        let excess = self.samples.len().saturating_sub(capacity.get());
        if excess > 0 {
            self.samples.drain(..excess);
        }
        excess
    }

    /// Returns the most recently arrived sample.
    #[must_use]
    pub fn latest(&self) -> Option<&LocationSample> {
        self.samples.back()
    }

    /// Returns the samples most-recent-first.
    #[must_use]
    pub fn recent(&self) -> Vec<LocationSample> {
        self.samples.iter().rev().cloned().collect()
    }

    /// Iterates in arrival order, oldest first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &LocationSample> {
        self.samples.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
