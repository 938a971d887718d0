use crate::midi::{ChannelMask, Event, Filter, Message};

/// Error kinds surfaced by a native device handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("host error")]
    Host,
    /// Out of range, wrong direction for the request, or already opened.
    #[error("invalid device id")]
    InvalidDevice,
    #[error("insufficient memory")]
    InsufficientMemory,
    #[error("buffer too small")]
    BufferTooSmall,
    #[error("buffer overflow")]
    BufferOverflow,
    /// Handle is not opened or is the wrong direction for the call.
    #[error("bad pointer")]
    BadPointer,
    /// Illegal MIDI data, e.g. missing EOX.
    #[error("bad data")]
    BadData,
    #[error("internal error")]
    Internal,
    /// Buffer is already as large as it can be.
    #[error("buffer max size")]
    BufferMaxSize,
    #[error("unknown error")]
    Unknown,
}

impl DeviceError {
    /// True when the handle can no longer be used and its owning worker
    /// must shut down.
    pub fn is_fatal(self) -> bool {
        matches!(self, Self::Host | Self::InvalidDevice | Self::BadPointer)
    }
}

/// An opened native device handle.
///
/// The handle is not safe for concurrent access: a stream moves it onto
/// its worker thread and every call after open happens there, until the
/// close path joins the worker and releases the handle. `poll` and `read`
/// must not block; `read` returns events in device order and an empty
/// batch is a valid no-op.
pub trait DeviceIo: Send {
    fn poll(&mut self) -> Result<bool, DeviceError>;
    fn read(&mut self, max: usize) -> Result<Vec<Event>, DeviceError>;
    fn write_short(&mut self, timestamp: i32, message: Message) -> Result<(), DeviceError>;
    fn write_sysex(&mut self, timestamp: i32, payload: &[u8]) -> Result<(), DeviceError>;
    /// Input only, applied once at open time.
    fn set_channel_mask(&mut self, mask: ChannelMask) -> Result<(), DeviceError>;
    /// Input only, applied once at open time.
    fn set_filter(&mut self, filter: Filter) -> Result<(), DeviceError>;
    /// Output only, applied once at open time. Zero means timestamps are
    /// ignored and output is delivered immediately.
    fn set_latency(&mut self, latency_ms: i32) -> Result<(), DeviceError>;
    /// Releases the handle. Called exactly once, after the worker exits.
    fn close(&mut self) -> Result<(), DeviceError>;
}
