//! Per-category tab-stop column tables.
//!
//! Rows are tab-delimited; the renderer expands each tab to a fixed pixel
//! offset so columns line up regardless of field content. Offsets are stored
//! in character units and multiplied by the maximum character width of the
//! active font at paint time, so a font change re-derives the whole grid.

use crate::event::EventCategory;

// Offsets are in character cells; the trailing 150 is a guard stop past the
// widest possible row.

const KEY_COLUMNS: [i32; 12] = [
    //                   "Sequence:  99999999"
    24,  //              "\tMessage:  AAAAAAAAAAAAAAAA"
    52,  //              "\tExt:  "
    58,  //              "\tU"            (up)
    60,  //              "\tR"            (repeat)
    62,  //              "\tA"            (alt)
    64,  //              "\tM"            (menu)
    66,  //              "\tD"            (dialog)
    68,  //              "\tX"            (extended)
    74,  //              "\tSC:  0xFFFF"  (scan code)
    90,  //              "\tRC:  0xFFFF"  (repeat count)
    105, //              "\twParam:  0xFFFFFFFFFFFFFFFF"
    150, //              "\t "
];

const MOUSE_COLUMNS: [i32; 11] = [
    //                   "Sequence:  99999999"
    24,  //              "\tMessage:  AAAAAAAAAAAAAAAA"
    55,  //              "\tPoint:  (+9999,+9999)"
    79,  //              "\tVKeyStatus:"
    92,  //              "\t2"
    94,  //              "\t1"
    96,  //              "\tM"
    98,  //              "\tC"
    100, //              "\tS"
    102, //              "\tR"
    104, //              "\tL"
    150, //              "\t "
];

const WHEEL_COLUMNS: [i32; 13] = [
    //                   "Sequence:  99999999"
    24,  //              "\tMessage:  AAAAAAAAAAAAAAAA"
    55,  //              "\tPoint:  (+9999,+9999)"
    79,  //              "\tVKeyStatus:"
    92,  //              "\t2"
    94,  //              "\t1"
    96,  //              "\tM"
    98,  //              "\tC"
    100, //              "\tS"
    102, //              "\tR"
    104, //              "\tL"
    109, //              "\tWheel:  +"
    118, //              "\t9999"
    150, //              "\t "
];

/// Returns the tab stops for `category`, scaled to pixel offsets by
/// `max_char_width` (the active font's widest glyph advance).
pub fn tab_stops(category: EventCategory, max_char_width: i32) -> Vec<i32> {
    let units: &[i32] = match category {
        EventCategory::Key => &KEY_COLUMNS,
        EventCategory::MouseMove | EventCategory::MouseClick => &MOUSE_COLUMNS,
        EventCategory::MouseWheel => &WHEEL_COLUMNS,
    };
    units.iter().map(|u| u * max_char_width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_stops_scale_with_char_width() {
        // Arrange / Act
        let narrow = tab_stops(EventCategory::Key, 1);
        let wide = tab_stops(EventCategory::Key, 8);

        // Assert
        assert_eq!(narrow[0], 24);
        assert_eq!(wide[0], 192);
        assert_eq!(narrow.len(), wide.len());
    }

    #[test]
    fn test_move_and_click_share_a_layout() {
        assert_eq!(
            tab_stops(EventCategory::MouseMove, 7),
            tab_stops(EventCategory::MouseClick, 7)
        );
    }

    #[test]
    fn test_wheel_layout_extends_the_mouse_layout() {
        let mouse = tab_stops(EventCategory::MouseMove, 1);
        let wheel = tab_stops(EventCategory::MouseWheel, 1);

        // Shared prefix through the button columns, then the wheel columns.
        assert_eq!(&wheel[..10], &mouse[..10]);
        assert!(wheel.len() > mouse.len());
    }

    #[test]
    fn test_stops_are_strictly_increasing() {
        for category in [
            EventCategory::Key,
            EventCategory::MouseMove,
            EventCategory::MouseWheel,
            EventCategory::MouseClick,
        ] {
            let stops = tab_stops(category, 9);
            for window in stops.windows(2) {
                assert!(window[0] < window[1], "stops must increase: {stops:?}");
            }
        }
    }
}
