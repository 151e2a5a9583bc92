//! Fixed-width text rows for decoded events.
//!
//! Each category renders through one layout; field widths are chosen so the
//! longest possible row of any category stays within [`MAX_ROW_LEN`]
//! characters. The renderer can therefore use one fixed text buffer per row
//! and treat overflow as impossible rather than recoverable.

use crate::event::{message_name, ButtonMask, DecodedEvent, EventPayload, KeyEvent, KeyFlags};

/// Upper bound on the character length of any formatted row.
///
/// Guaranteed by construction: the sequence field wraps at eight digits,
/// coordinates and wheel deltas are sign-extended 16-bit values (at most six
/// characters), and every other field has a fixed width.
pub const MAX_ROW_LEN: usize = 125;

/// Modulus that wraps the displayed sequence number at eight digits.
const SEQUENCE_WRAP: u64 = 100_000_000;

/// Renders `event` as one tab-delimited row in its category's layout.
pub fn format_row(event: &DecodedEvent) -> String {
    let seq = event.sequence % SEQUENCE_WRAP;
    let name = message_name(event.message);

    let row = match event.payload {
        EventPayload::Key(key) => format!(
            "Sequence:  {seq:08}\tMessage:  {name}\tExt:  {}\twParam:  0x{:016X}\t ",
            extended_status(&key),
            key.raw,
        ),
        EventPayload::MouseMove(m) | EventPayload::MouseClick(m) => format!(
            "Sequence:  {seq:08}\tMessage:  {name}\tPoint:  ({:+05},{:+05})\tVKeyStatus:  {}\t ",
            m.x,
            m.y,
            button_status(m.buttons),
        ),
        EventPayload::MouseWheel(w) => format!(
            "Sequence:  {seq:08}\tMessage:  {name}\tPoint:  ({:+05},{:+05})\tVKeyStatus:  {}\tWheel:  {:+05}\t ",
            w.x,
            w.y,
            button_status(w.buttons),
            w.delta,
        ),
    };

    debug_assert!(row.len() <= MAX_ROW_LEN, "row overflows: {}", row.len());
    row
}

/// Key-state columns: one tab-separated position per flag, `_` when clear,
/// followed by the scan code and repeat count fields.
fn extended_status(key: &KeyEvent) -> String {
    let mut s = String::with_capacity(48);
    s.push(if key.flags.contains(KeyFlags::UP) { 'U' } else { '_' });
    for (flag, mark) in [
        (KeyFlags::REPEAT, 'R'),
        (KeyFlags::ALT_DOWN, 'A'),
        (KeyFlags::MENU_MODE, 'M'),
        (KeyFlags::DIALOG_MODE, 'D'),
        (KeyFlags::EXTENDED, 'X'),
    ] {
        s.push('\t');
        s.push(if key.flags.contains(flag) { mark } else { '_' });
    }
    s.push_str(&format!("\tSC:  0x{:04X}", key.scan_code));
    s.push_str(&format!("\tRC:  0x{:04X}", key.repeat));
    s
}

/// Button columns in display order `2 1 M C S R L`, `_` when not held.
fn button_status(mask: ButtonMask) -> String {
    let mut s = String::with_capacity(16);
    s.push(if mask.contains(ButtonMask::XBUTTON2) { '2' } else { '_' });
    for (flag, mark) in [
        (ButtonMask::XBUTTON1, '1'),
        (ButtonMask::MIDDLE, 'M'),
        (ButtonMask::CONTROL, 'C'),
        (ButtonMask::SHIFT, 'S'),
        (ButtonMask::RIGHT, 'R'),
        (ButtonMask::LEFT, 'L'),
    ] {
        s.push('\t');
        s.push(if mask.contains(flag) { mark } else { '_' });
    }
    s
}

// ── Tests ─────────────────────────────────────────────────────────────────────
