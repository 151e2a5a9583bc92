//! Fixed-capacity, most-recent-first event history.
//!
//! # Why a ring buffer? (for beginners)
//!
//! The log shows only the newest events, newest at the top. A naive
//! implementation would shift every element one slot on each insert – O(N)
//! work per event. A ring buffer instead keeps the elements where they are
//! and moves a single *logical head* index backwards through a fixed array,
//! overwriting the oldest slot. Insertion is O(1) and both memory use and
//! per-frame render cost are bounded by the capacity, no matter how long the
//! process runs.
//!
//! Externally the ring still reads newest-first: iteration starts at the
//! head and walks forward through the array, wrapping at the end.

use crate::event::DecodedEvent;

/// Number of events the history retains. Older entries are silently
/// discarded; the depth is deliberately not configurable.
pub const HISTORY_DEPTH: usize = 50;

/// Fixed-capacity history of decoded events, newest first.
#[derive(Debug)]
pub struct EventLog {
    /// `HISTORY_DEPTH` slots; unfilled slots stay `None` until enough events
    /// have been recorded.
    slots: Vec<Option<DecodedEvent>>,
    /// Index of the most recently written slot.
    head: usize,
    /// Number of filled slots, saturating at [`HISTORY_DEPTH`].
    len: usize,
}

impl Default for EventLog {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLog {
    /// Creates an empty log with all [`HISTORY_DEPTH`] slots unfilled.
    pub fn new() -> Self {
        Self {
            slots: vec![None; HISTORY_DEPTH],
            head: 0,
            len: 0,
        }
    }

    /// Records `event` as the newest entry, evicting the oldest once the
    /// log is full. O(1).
    pub fn push(&mut self, event: DecodedEvent) {
        self.head = (self.head + HISTORY_DEPTH - 1) % HISTORY_DEPTH;
        self.slots[self.head] = Some(event);
        self.len = (self.len + 1).min(HISTORY_DEPTH);
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All [`HISTORY_DEPTH`] display slots, newest first; unfilled slots are
    /// `None`. The renderer emits a blank line for `None` so the page height
    /// stays constant while the log fills.
    pub fn rows(&self) -> impl Iterator<Item = Option<&DecodedEvent>> {
        (0..HISTORY_DEPTH).map(move |i| self.slots[(self.head + i) % HISTORY_DEPTH].as_ref())
    }

    /// The filled entries, newest first. Read-only; sequence numbers are
    /// strictly decreasing along this iterator.
    pub fn snapshot(&self) -> impl Iterator<Item = &DecodedEvent> {
        self.rows().take(self.len).flatten()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
