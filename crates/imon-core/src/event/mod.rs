//! Raw-notification classification: message identifiers and the decoder.

pub mod decode;
pub mod messages;

pub use decode::{
    decode, ButtonMask, DecodedEvent, EventCategory, EventPayload, KeyEvent, KeyFlags, MouseEvent,
    WheelEvent,
};
pub use messages::{is_monitored, message_name};
