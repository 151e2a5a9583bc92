//! Monotonic sequence numbering for recorded events.
//!
//! Every recorded event carries a sequence number so the on-screen log reads
//! unambiguously even when identical notifications repeat (held keys, button
//! chatter). Numbers are never reused and never decrease; along a
//! most-recent-first snapshot they are strictly decreasing.

use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter for event sequence numbers.
///
/// The first recorded event gets sequence 1; 0 is reserved as "never
/// assigned" so a zeroed slot can't be mistaken for a real event.
///
/// The counter is atomic so it can be shared between the session and the
/// window shell without a lock; all mutation still happens on the single
/// dispatch thread.
#[derive(Debug, Default)]
pub struct SequenceCounter {
    inner: AtomicU64,
}

impl SequenceCounter {
    /// Creates a counter whose first [`next`](Self::next) returns 1.
    pub fn new() -> Self {
        Self {
            inner: AtomicU64::new(0),
        }
    }

    /// Increments the counter and returns the new value.
    ///
    /// `Ordering::Relaxed` suffices: the number orders log rows, it does not
    /// synchronise memory between threads.
    pub fn next(&self) -> u64 {
        self.inner.fetch_add(1, Ordering::Relaxed).wrapping_add(1)
    }

    /// Returns the most recently assigned value without advancing.
    pub fn current(&self) -> u64 {
        self.inner.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sequence_number_is_one() {
        // Arrange
        let counter = SequenceCounter::new();

        // Act / Assert
        assert_eq!(counter.next(), 1);
    }

    #[test]
    fn test_sequence_numbers_strictly_increase() {
        let counter = SequenceCounter::new();
        let values: Vec<u64> = (0..200).map(|_| counter.next()).collect();

        for window in values.windows(2) {
            assert!(window[1] > window[0], "sequence must strictly increase");
        }
    }

    #[test]
    fn test_current_reflects_last_assigned_value() {
        let counter = SequenceCounter::new();
        assert_eq!(counter.current(), 0, "nothing assigned yet");

        counter.next();
        counter.next();
        assert_eq!(counter.current(), 2);
    }
}
