//! Bridges polling-based native MIDI device handles into channel streams.
//!
//! A [`stream::InputStream`] owns a device handle on a background worker
//! that polls it and publishes decoded events onto a bounded queue; an
//! [`stream::OutputStream`] drains a bounded queue of application events
//! into a device handle. Devices plug in through the [`device::DeviceIo`]
//! seam.

pub mod device;
pub mod midi;
pub mod stream;
