//! Mouse-button bookkeeping behind exclusive input capture.
//!
//! The window asks the platform for exclusive mouse capture while any button
//! is held, so drags that leave the client area keep reporting. The tracker
//! owns four booleans – left, right, middle, extended – and turns each
//! down/up transition into a capture decision.
//!
//! The decision guard deliberately inspects only the *other three* flags,
//! exactly as the conjunction chain it models: both X buttons share the
//! single extended flag, and chorded multi-button sequences can therefore
//! release capture while a second X button is still physically held. That
//! behavior is reproduced as-is, not corrected.

use tracing::debug;

use crate::event::messages::{
    WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MBUTTONDOWN, WM_MBUTTONUP, WM_RBUTTONDOWN, WM_RBUTTONUP,
    WM_XBUTTONDOWN, WM_XBUTTONUP,
};

/// The four button classes the tracker distinguishes.
///
/// Both X buttons map to [`TrackedButton::Extended`]; the tracker does not
/// tell them apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackedButton {
    Left,
    Right,
    Middle,
    Extended,
}

/// Capture decision produced by a button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// No change to capture state.
    None,
    /// Request exclusive input capture from the platform.
    Acquire,
    /// Relinquish exclusive input capture.
    Release,
}

/// Maps a message identifier to the button transition it encodes, if any.
///
/// Double-click messages are *not* transitions: the down/up pair around them
/// already drives the tracker.
pub fn button_transition(message: u32) -> Option<(TrackedButton, bool)> {
    match message {
        WM_LBUTTONDOWN => Some((TrackedButton::Left, true)),
        WM_LBUTTONUP => Some((TrackedButton::Left, false)),
        WM_RBUTTONDOWN => Some((TrackedButton::Right, true)),
        WM_RBUTTONUP => Some((TrackedButton::Right, false)),
        WM_MBUTTONDOWN => Some((TrackedButton::Middle, true)),
        WM_MBUTTONUP => Some((TrackedButton::Middle, false)),
        WM_XBUTTONDOWN => Some((TrackedButton::Extended, true)),
        WM_XBUTTONUP => Some((TrackedButton::Extended, false)),
        _ => None,
    }
}

/// Tracks which button classes are currently held.
#[derive(Debug, Default)]
pub struct CaptureTracker {
    left: bool,
    right: bool,
    middle: bool,
    extended: bool,
}

impl CaptureTracker {
    /// Creates a tracker with no buttons held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when none of the four button classes is held.
    ///
    /// Move notifications are suppressed entirely while this holds.
    pub fn none_down(&self) -> bool {
        !self.left && !self.right && !self.middle && !self.extended
    }

    /// Applies a down/up transition and returns the capture decision.
    ///
    /// The flag for `button` is updated unconditionally. Acquire fires on a
    /// down transition out of the all-idle state; Release fires on an up
    /// transition that leaves all four flags clear – i.e. the guard checks
    /// the other three buttons, never the one transitioning.
    pub fn on_button_transition(&mut self, button: TrackedButton, is_down: bool) -> CaptureAction {
        let was_idle = self.none_down();
        self.set(button, is_down);

        if is_down && was_idle {
            debug!(?button, "capture acquired");
            CaptureAction::Acquire
        } else if !is_down && self.none_down() {
            debug!(?button, "capture released");
            CaptureAction::Release
        } else {
            CaptureAction::None
        }
    }

    fn set(&mut self, button: TrackedButton, is_down: bool) {
        match button {
            TrackedButton::Left => self.left = is_down,
            TrackedButton::Right => self.right = is_down,
            TrackedButton::Middle => self.middle = is_down,
            TrackedButton::Extended => self.extended = is_down,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
