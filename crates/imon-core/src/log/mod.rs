//! Event history: sequence numbering and the bounded most-recent-first ring.

pub mod ring;
pub mod sequence;

pub use ring::{EventLog, HISTORY_DEPTH};
pub use sequence::SequenceCounter;
