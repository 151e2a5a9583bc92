//! Classification and field extraction for raw input notifications.
//!
//! A notification arrives as a `(message, wparam, lparam)` triple. Decoding is
//! a pure function of that triple: it never consults prior state, so the same
//! triple always yields the same event regardless of call order.
//!
//! # Packed-parameter layout
//!
//! The platform packs several fields into the two parameter words. Rather
//! than macro-style casts, each field has a named extraction function below
//! documenting its exact bit range:
//!
//! ```text
//! keyboard lparam:  [31..16 key-state flags + scan code][15..0 repeat count]
//! mouse    lparam:  [31..16 signed y][15..0 signed x]
//! mouse    wparam:  [31..16 signed wheel delta][15..0 button/modifier mask]
//! ```

use bitflags::bitflags;

use super::messages::{
    is_keyboard, WM_MOUSEFIRST, WM_MOUSELAST, WM_MOUSEMOVE, WM_MOUSEWHEEL,
};

// ── Flag sets ─────────────────────────────────────────────────────────────────

bitflags! {
    /// Key-state flags from the high word of a keyboard `lparam`.
    ///
    /// Bits 0–7 of the high word carry the scan code and are deliberately
    /// absent here; `from_bits_truncate` strips them during extraction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct KeyFlags: u16 {
        /// Bit 24 of lparam: extended key (right-hand modifiers, numpad Enter).
        const EXTENDED = 0x0100;
        /// Bit 27 of lparam: dialog mode active.
        const DIALOG_MODE = 0x0800;
        /// Bit 28 of lparam: menu mode active.
        const MENU_MODE = 0x1000;
        /// Bit 29 of lparam: ALT held during the keystroke.
        const ALT_DOWN = 0x2000;
        /// Bit 30 of lparam: key was already down (auto-repeat).
        const REPEAT = 0x4000;
        /// Bit 31 of lparam: this is a release transition.
        const UP = 0x8000;
    }
}

bitflags! {
    /// The 7-bit mouse button/modifier mask carried in mouse `wparam`s.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ButtonMask: u16 {
        const LEFT = 0x0001;
        const RIGHT = 0x0002;
        const SHIFT = 0x0004;
        const CONTROL = 0x0008;
        const MIDDLE = 0x0010;
        const XBUTTON1 = 0x0020;
        const XBUTTON2 = 0x0040;
    }
}

// ── Decoded event types ───────────────────────────────────────────────────────

/// Event category, derived from the message identifier during decoding.
///
/// The category selects which payload fields are meaningful and which
/// column layout the renderer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventCategory {
    Key,
    MouseMove,
    MouseWheel,
    MouseClick,
}

/// Keyboard payload: state flags, hardware scan code, repeat count, and the
/// raw virtual-key parameter carried through for hex display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub flags: KeyFlags,
    /// Scan code; high byte forced to `0xE0` when [`KeyFlags::EXTENDED`] is set.
    pub scan_code: u16,
    pub repeat: u16,
    pub raw: u64,
}

/// Mouse move/click payload: cursor position and held-button mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub x: i32,
    pub y: i32,
    pub buttons: ButtonMask,
}

/// Mouse wheel payload: position, button mask, and signed rotation delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WheelEvent {
    pub x: i32,
    pub y: i32,
    pub buttons: ButtonMask,
    /// Positive = away from the user, in multiples of the wheel notch unit.
    pub delta: i16,
}

/// Category-specific payload of a [`DecodedEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPayload {
    Key(KeyEvent),
    MouseMove(MouseEvent),
    MouseWheel(WheelEvent),
    MouseClick(MouseEvent),
}

/// One classified input occurrence, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodedEvent {
    /// Monotonically increasing counter assigned at insertion time.
    pub sequence: u64,
    /// The original notification identifier, kept for name lookup.
    pub message: u32,
    pub payload: EventPayload,
}

impl DecodedEvent {
    /// Returns the category implied by the payload.
    pub fn category(&self) -> EventCategory {
        match self.payload {
            EventPayload::Key(_) => EventCategory::Key,
            EventPayload::MouseMove(_) => EventCategory::MouseMove,
            EventPayload::MouseWheel(_) => EventCategory::MouseWheel,
            EventPayload::MouseClick(_) => EventCategory::MouseClick,
        }
    }
}

// ── Field extraction ──────────────────────────────────────────────────────────

/// Bits 15..0 of `value`.
pub fn low_word(value: u64) -> u16 {
    value as u16
}

/// Bits 31..16 of `value`.
pub fn high_word(value: u64) -> u16 {
    (value >> 16) as u16
}

/// Signed x coordinate: bits 15..0 of a mouse `lparam`, sign-extended.
pub fn signed_x(lparam: i64) -> i32 {
    i32::from(lparam as u16 as i16)
}

/// Signed y coordinate: bits 31..16 of a mouse `lparam`, sign-extended.
pub fn signed_y(lparam: i64) -> i32 {
    i32::from((lparam as u64 >> 16) as u16 as i16)
}

/// Button/modifier key-state mask: bits 15..0 of a mouse `wparam`.
pub fn key_state(wparam: u64) -> ButtonMask {
    ButtonMask::from_bits_truncate(low_word(wparam))
}

/// Signed wheel rotation: bits 31..16 of a wheel `wparam`.
pub fn wheel_delta(wparam: u64) -> i16 {
    high_word(wparam) as i16
}

// ── Decoder ───────────────────────────────────────────────────────────────────

/// Decodes one raw notification into a [`DecodedEvent`].
///
/// Classification order, first match wins:
///
/// 1. keyboard range → [`EventCategory::Key`]
/// 2. `WM_MOUSEMOVE` → [`EventCategory::MouseMove`]
/// 3. `WM_MOUSEWHEEL` → [`EventCategory::MouseWheel`]
/// 4. remaining mouse range → [`EventCategory::MouseClick`]
///
/// Callers pre-filter with [`super::messages::is_monitored`]; an identifier
/// outside both ranges is a contract violation and yields `None` rather than
/// a panic.
pub fn decode(message: u32, wparam: u64, lparam: i64, sequence: u64) -> Option<DecodedEvent> {
    let payload = if is_keyboard(message) {
        let high = high_word(lparam as u64);
        let flags = KeyFlags::from_bits_truncate(high);
        let mut scan_code = u16::from((high & 0x00FF) as u8);
        if flags.contains(KeyFlags::EXTENDED) {
            // Reinterpret as a word with the extended-key prefix byte on top.
            scan_code |= 0xE0 << 8;
        }
        EventPayload::Key(KeyEvent {
            flags,
            scan_code,
            repeat: low_word(lparam as u64),
            raw: wparam,
        })
    } else if message == WM_MOUSEMOVE {
        EventPayload::MouseMove(MouseEvent {
            x: signed_x(lparam),
            y: signed_y(lparam),
            buttons: key_state(wparam),
        })
    } else if message == WM_MOUSEWHEEL {
        EventPayload::MouseWheel(WheelEvent {
            x: signed_x(lparam),
            y: signed_y(lparam),
            buttons: key_state(wparam),
            delta: wheel_delta(wparam),
        })
    } else if (WM_MOUSEFIRST..=WM_MOUSELAST).contains(&message) {
        // Clicks carry the mask directly in wparam, not in the key-state word.
        EventPayload::MouseClick(MouseEvent {
            x: signed_x(lparam),
            y: signed_y(lparam),
            buttons: ButtonMask::from_bits_truncate(low_word(wparam)),
        })
    } else {
        return None;
    };

    Some(DecodedEvent {
        sequence,
        message,
        payload,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
