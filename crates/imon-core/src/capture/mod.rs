//! Exclusive-capture state machine for held mouse buttons.

pub mod tracker;

pub use tracker::{button_transition, CaptureAction, CaptureTracker, TrackedButton};
