use crate::device::{DeviceError, DeviceIo};
use std::{thread::JoinHandle, time::Duration};

mod input;
mod output;

pub use input::*;
pub use output::*;

/// How long an idle input worker sleeps between device polls.
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Upper bound on events pulled from the device in one read.
const READ_CHUNK: usize = 512;

/// A worker hands its device back when it exits, along with the fatal
/// error that stopped it, if any.
type WorkerOutcome<D> = (D, Result<(), DeviceError>);

/// Waits for a stream worker to exit, then releases its device handle.
/// The join is the done signal: past this point the handle is closed and
/// never touched again.
fn join_and_release<D: DeviceIo>(worker: JoinHandle<WorkerOutcome<D>>) -> Result<(), DeviceError> {
    let (mut device, outcome) = worker.join().map_err(|_| {
        log::error!("stream worker panicked");
        DeviceError::Internal
    })?;

    let released = device.close();
    outcome.and(released)
}
