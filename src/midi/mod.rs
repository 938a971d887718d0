mod filters;
mod message;

pub use filters::*;
pub use message::*;

/// A single timestamped MIDI event.
///
/// Short messages travel packed in `message`; a system-exclusive payload,
/// when present, bypasses the 3-byte encoding entirely. Events are
/// immutable once queued and consumed exactly once.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Event {
    pub timestamp: i32,
    pub message: Message,
    pub sysex: Option<Vec<u8>>,
}
