//! Window-message identifiers for the monitored keyboard and mouse ranges.
//!
//! The host window procedure forwards a stream of `(message, wparam, lparam)`
//! triples. Only the identifiers in the two ranges below are ever recorded;
//! everything else is passed through to default platform handling.

// ── Keyboard range (0x0100 – 0x0109) ─────────────────────────────────────────

pub const WM_KEYFIRST: u32 = 0x0100;
pub const WM_KEYDOWN: u32 = 0x0100;
pub const WM_KEYUP: u32 = 0x0101;
pub const WM_CHAR: u32 = 0x0102;
pub const WM_DEADCHAR: u32 = 0x0103;
pub const WM_SYSKEYDOWN: u32 = 0x0104;
pub const WM_SYSKEYUP: u32 = 0x0105;
pub const WM_SYSCHAR: u32 = 0x0106;
pub const WM_SYSDEADCHAR: u32 = 0x0107;
pub const WM_KEYLAST: u32 = 0x0109;

// ── Mouse range (0x0200 – 0x020D) ────────────────────────────────────────────

pub const WM_MOUSEFIRST: u32 = 0x0200;
pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_LBUTTONDBLCLK: u32 = 0x0203;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_RBUTTONDBLCLK: u32 = 0x0206;
pub const WM_MBUTTONDOWN: u32 = 0x0207;
pub const WM_MBUTTONUP: u32 = 0x0208;
pub const WM_MBUTTONDBLCLK: u32 = 0x0209;
pub const WM_MOUSEWHEEL: u32 = 0x020A;
pub const WM_XBUTTONDOWN: u32 = 0x020B;
pub const WM_XBUTTONUP: u32 = 0x020C;
pub const WM_XBUTTONDBLCLK: u32 = 0x020D;
pub const WM_MOUSELAST: u32 = 0x020D;

// ── Predicates ────────────────────────────────────────────────────────────────

/// Returns `true` if `message` falls in the keyboard range.
pub fn is_keyboard(message: u32) -> bool {
    (WM_KEYFIRST..=WM_KEYLAST).contains(&message)
}

/// Returns `true` if `message` falls in the mouse range.
pub fn is_mouse(message: u32) -> bool {
    (WM_MOUSEFIRST..=WM_MOUSELAST).contains(&message)
}

/// Returns `true` if the host should record this message.
///
/// This is the pre-filter applied before decoding: the eight keyboard
/// messages (`WM_KEYDOWN` through `WM_SYSDEADCHAR`) and the full mouse range
/// including double-clicks and the X buttons. Messages outside this set are
/// left to default platform handling and never reach the decoder.
pub fn is_monitored(message: u32) -> bool {
    (WM_KEYDOWN..=WM_SYSDEADCHAR).contains(&message) || is_mouse(message)
}

/// Returns the display name for a monitored message identifier.
///
/// Unknown identifiers yield `"NOT_FOUND"` rather than an error; the name is
/// only ever used for display inside a formatted row.
pub fn message_name(message: u32) -> &'static str {
    match message {
        WM_KEYDOWN => "WM_KEYDOWN",
        WM_KEYUP => "WM_KEYUP",
        WM_CHAR => "WM_CHAR",
        WM_DEADCHAR => "WM_DEADCHAR",
        WM_SYSKEYDOWN => "WM_SYSKEYDOWN",
        WM_SYSKEYUP => "WM_SYSKEYUP",
        WM_SYSCHAR => "WM_SYSCHAR",
        WM_SYSDEADCHAR => "WM_SYSDEADCHAR",

        WM_MOUSEMOVE => "WM_MOUSEMOVE",
        WM_LBUTTONDOWN => "WM_LBUTTONDOWN",
        WM_LBUTTONUP => "WM_LBUTTONUP",
        WM_LBUTTONDBLCLK => "WM_LBUTTONDBLCLK",
        WM_RBUTTONDOWN => "WM_RBUTTONDOWN",
        WM_RBUTTONUP => "WM_RBUTTONUP",
        WM_RBUTTONDBLCLK => "WM_RBUTTONDBLCLK",
        WM_MBUTTONDOWN => "WM_MBUTTONDOWN",
        WM_MBUTTONUP => "WM_MBUTTONUP",
        WM_MBUTTONDBLCLK => "WM_MBUTTONDBLCLK",
        WM_MOUSEWHEEL => "WM_MOUSEWHEEL",
        WM_XBUTTONDOWN => "WM_XBUTTONDOWN",
        WM_XBUTTONUP => "WM_XBUTTONUP",
        WM_XBUTTONDBLCLK => "WM_XBUTTONDBLCLK",

        _ => "NOT_FOUND",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitored_set_covers_keyboard_and_mouse_messages() {
        assert!(is_monitored(WM_KEYDOWN));
        assert!(is_monitored(WM_SYSDEADCHAR));
        assert!(is_monitored(WM_MOUSEMOVE));
        assert!(is_monitored(WM_XBUTTONDBLCLK));
    }

    #[test]
    fn test_monitored_set_excludes_unichar_and_neighbours() {
        // 0x0108 (WM_IME_STARTCOMPOSITION area) and 0x0109 (WM_UNICHAR) sit
        // inside the keyboard *range* but are never recorded.
        assert!(!is_monitored(0x0108));
        assert!(!is_monitored(0x0109));
        // Just outside either range.
        assert!(!is_monitored(0x00FF));
        assert!(!is_monitored(0x020E));
    }

    #[test]
    fn test_keyboard_range_is_wider_than_monitored_set() {
        assert!(is_keyboard(0x0109));
        assert!(!is_keyboard(0x010A));
    }

    #[test]
    fn test_message_name_for_known_identifiers() {
        assert_eq!(message_name(WM_KEYDOWN), "WM_KEYDOWN");
        assert_eq!(message_name(WM_MOUSEWHEEL), "WM_MOUSEWHEEL");
        assert_eq!(message_name(WM_XBUTTONUP), "WM_XBUTTONUP");
    }

    #[test]
    fn test_message_name_falls_back_to_not_found() {
        assert_eq!(message_name(0xFFFF), "NOT_FOUND");
        assert_eq!(message_name(0x0109), "NOT_FOUND");
    }
}
