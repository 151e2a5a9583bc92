//! Integration tests for the decode → history → format pipeline.
//!
//! These tests exercise imon-core end-to-end the way the window shell does:
//! raw triples in, formatted rows out.

use imon_core::{
    decode, event::messages::*, format_row, EventLog, SequenceCounter, HISTORY_DEPTH, MAX_ROW_LEN,
};

fn key_lparam(repeat: u16, scan: u8) -> i64 {
    ((u64::from(scan) << 16) | u64::from(repeat)) as i64
}

fn mouse_lparam(x: i16, y: i16) -> i64 {
    ((((y as u16) as u64) << 16) | ((x as u16) as u64)) as i64
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_key_down_flows_through_to_a_formatted_row() {
    let sequence = SequenceCounter::new();
    let mut log = EventLog::new();

    let event = decode(WM_KEYDOWN, 0x41, key_lparam(1, 0x1E), sequence.next())
        .expect("monitored message decodes");
    log.push(event);

    let newest = log.snapshot().next().expect("one event recorded");
    let row = format_row(newest);

    assert!(row.contains("Sequence:  00000001"));
    assert!(row.contains("Message:  WM_KEYDOWN"));
    assert!(row.contains("SC:  0x001E"));
    assert!(row.contains("RC:  0x0001"));
    assert!(row.contains("wParam:  0x0000000000000041"));
}

#[test]
fn test_history_overflow_keeps_last_n_and_rows_stay_bounded() {
    let sequence = SequenceCounter::new();
    let mut log = EventLog::new();

    // Push well past capacity with a mix of categories.
    for i in 0..(HISTORY_DEPTH as i16 + 25) {
        let message = match i % 4 {
            0 => WM_KEYDOWN,
            1 => WM_MOUSEMOVE,
            2 => WM_MOUSEWHEEL,
            _ => WM_LBUTTONDOWN,
        };
        let event = decode(message, 0x0001, mouse_lparam(i, -i), sequence.next()).unwrap();
        log.push(event);
    }

    // Exactly the last HISTORY_DEPTH survive, newest first.
    let sequences: Vec<u64> = log.snapshot().map(|e| e.sequence).collect();
    assert_eq!(sequences.len(), HISTORY_DEPTH);
    assert_eq!(sequences[0], (HISTORY_DEPTH + 25) as u64);
    for window in sequences.windows(2) {
        assert!(window[0] > window[1]);
    }

    // Every surviving row formats within the fixed buffer bound.
    for event in log.snapshot() {
        assert!(format_row(event).len() <= MAX_ROW_LEN);
    }
}

#[test]
fn test_display_page_has_fixed_height_while_filling() {
    let sequence = SequenceCounter::new();
    let mut log = EventLog::new();

    for _ in 0..7 {
        let event = decode(WM_MOUSEWHEEL, 0x0078_0000, mouse_lparam(5, 5), sequence.next()).unwrap();
        log.push(event);
    }

    // rows() always yields a full page; the renderer blanks the None slots.
    let rows: Vec<_> = log.rows().collect();
    assert_eq!(rows.len(), HISTORY_DEPTH);
    assert_eq!(rows.iter().filter(|slot| slot.is_some()).count(), 7);
}

#[test]
fn test_unmonitored_messages_never_decode() {
    // WM_PAINT-era identifiers and the horizontal wheel sit outside the
    // monitored set; the pre-filter plus decoder both reject them.
    for message in [0x000Fu32, 0x0112, 0x020E] {
        assert!(!imon_core::is_monitored(message));
        assert!(decode(message, 0, 0, 1).is_none());
    }
}
