//! MonitorSession: the per-window use case that turns raw notifications into
//! log entries and capture side effects.
//!
//! The session owns the pieces of core state the window needs – the event
//! ring, the capture tracker, and the sequence counter – and runs the whole
//! pipeline for one notification at a time. It depends only on the
//! [`CaptureHandle`] trait; the Win32 shell injects a real SetCapture-backed
//! implementation and tests inject a recording double.
//!
//! Everything here runs on the single window dispatch thread. No step blocks
//! and no lock is taken; the host repaints synchronously whenever
//! [`MonitorSession::handle_notification`] reports that an event was
//! recorded, so the visible log is never more than one event stale.

use std::sync::Arc;

use tracing::trace;

use imon_core::event::messages::WM_MOUSEMOVE;
use imon_core::{
    button_transition, decode, is_monitored, CaptureAction, CaptureTracker, EventLog,
    SequenceCounter,
};

/// Fire-and-forget exclusive-capture control.
///
/// Capture requests have no error path: the Win32 implementation calls
/// `SetCapture`/`ReleaseCapture` and ignores the result, matching the
/// platform contract.
pub trait CaptureHandle {
    /// Route all further mouse input to the owning window.
    fn acquire(&self);
    /// Return mouse input routing to normal hit testing.
    fn release(&self);
}

/// Capture handle that does nothing; used by headless runs.
#[derive(Debug, Default)]
pub struct NullCaptureHandle;

impl CaptureHandle for NullCaptureHandle {
    fn acquire(&self) {}
    fn release(&self) {}
}

/// State and pipeline for one monitor window.
pub struct MonitorSession {
    log: EventLog,
    tracker: CaptureTracker,
    sequence: SequenceCounter,
    capture: Arc<dyn CaptureHandle>,
}

impl MonitorSession {
    /// Creates a session with an empty history and no buttons held.
    pub fn new(capture: Arc<dyn CaptureHandle>) -> Self {
        Self {
            log: EventLog::new(),
            tracker: CaptureTracker::new(),
            sequence: SequenceCounter::new(),
            capture,
        }
    }

    /// The event history, for the renderer's pull-based snapshot.
    pub fn log(&self) -> &EventLog {
        &self.log
    }

    /// Feeds one raw notification through the pipeline.
    ///
    /// Returns `true` when an event was recorded and the host must
    /// invalidate-and-update the window. Returns `false` for unmonitored
    /// messages (pass through to default handling untouched) and for
    /// suppressed moves (no button held).
    pub fn handle_notification(&mut self, message: u32, wparam: u64, lparam: i64) -> bool {
        if !is_monitored(message) {
            return false;
        }

        // Button transitions update the tracker first; the capture side
        // effect is fire-and-forget.
        if let Some((button, is_down)) = button_transition(message) {
            match self.tracker.on_button_transition(button, is_down) {
                CaptureAction::Acquire => self.capture.acquire(),
                CaptureAction::Release => self.capture.release(),
                CaptureAction::None => {}
            }
        }

        // Moves are only interesting mid-drag; drop them entirely otherwise
        // (not decoded, not sequenced, not inserted).
        if message == WM_MOUSEMOVE && self.tracker.none_down() {
            trace!("move suppressed, no button held");
            return false;
        }

        let Some(event) = decode(message, wparam, lparam, self.sequence.next()) else {
            // Unreachable for monitored identifiers; kept as a guard so an
            // out-of-contract caller degrades to "nothing recorded".
            return false;
        };
        self.log.push(event);
        true
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
