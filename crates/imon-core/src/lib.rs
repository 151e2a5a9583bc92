//! # imon-core
//!
//! Domain logic for Input Monitor: raw-notification decoding, the bounded
//! event history, the capture state machine, and fixed-column row formatting.
//!
//! This crate has zero dependencies on OS APIs or UI frameworks; the window
//! shell in `imon-app` drives it and renders its output.
//!
//! # Pipeline overview
//!
//! A raw input notification flows one way through the crate:
//!
//! ```text
//! (message, wparam, lparam)
//!   └─ capture::CaptureTracker   -- button bookkeeping, move suppression
//!   └─ event::decode             -- classification + field extraction
//!   └─ log::EventLog             -- newest-first bounded history
//!   └─ render::format_row        -- fixed-width tab-delimited text row
//! ```
//!
//! - **`event`** – message identifiers for the monitored keyboard/mouse
//!   ranges and the pure decoder that turns a `(message, wparam, lparam)`
//!   triple into a typed [`DecodedEvent`].
//!
//! - **`log`** – the sequence counter and the fixed-capacity ring that keeps
//!   the [`HISTORY_DEPTH`] most recent events.
//!
//! - **`capture`** – the four-flag button tracker that decides when to
//!   acquire and release exclusive mouse capture and when a move
//!   notification is dropped.
//!
//! - **`render`** – per-category row formatting and tab-stop column tables.

pub mod capture;
pub mod event;
pub mod log;
pub mod render;

// Re-export the most-used types at the crate root so callers can write
// `imon_core::DecodedEvent` instead of `imon_core::event::decode::DecodedEvent`.
pub use capture::{button_transition, CaptureAction, CaptureTracker, TrackedButton};
pub use event::{
    decode, is_monitored, message_name, ButtonMask, DecodedEvent, EventCategory, EventPayload,
    KeyEvent, KeyFlags, MouseEvent, WheelEvent,
};
pub use log::{EventLog, SequenceCounter, HISTORY_DEPTH};
pub use render::{format_row, tab_stops, MAX_ROW_LEN};
