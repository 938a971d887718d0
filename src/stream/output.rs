use super::{join_and_release, WorkerOutcome};
use crate::{
    device::{DeviceError, DeviceIo},
    midi::{ChannelMask, Event},
};
use crossbeam::channel::{Receiver, SendError, Sender};
use std::thread::JoinHandle;

/// An output device fed from a bounded inbound event queue.
///
/// A background worker owns the native handle and drains the queue into
/// it in FIFO order; nothing is reordered or batched beyond what the
/// native layer itself buffers. Sending blocks while the queue is full.
pub struct OutputStream<D: DeviceIo + 'static> {
    sender: Sender<Event>,
    shutdown: Sender<()>,
    worker: Option<JoinHandle<WorkerOutcome<D>>>,
}

impl<D: DeviceIo + 'static> OutputStream<D> {
    /// Opens `device` for output with an inbound queue of `queue_capacity`
    /// events. `latency_ms` is handed to the device with negative values
    /// clamped to zero (immediate delivery, timestamps ignored); an empty
    /// channel mask leaves the device default in place. A failed native
    /// call during open returns the error and no stream.
    pub fn open(
        mut device: D,
        queue_capacity: usize,
        latency_ms: i32,
        channels: ChannelMask,
    ) -> Result<Self, DeviceError> {
        device.set_latency(latency_ms.max(0))?;

        if !channels.is_empty() {
            device.set_channel_mask(channels)?;
        }

        let (events_tx, events_rx) = crossbeam::channel::bounded(queue_capacity);
        let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded(1);

        Ok(Self {
            sender: events_tx,
            shutdown: shutdown_tx,
            worker: Some(std::thread::spawn(move || {
                run_output_worker(device, events_rx, shutdown_rx)
            })),
        })
    }

    /// Queues an event for the device, blocking while the queue is full.
    /// Fails with the event handed back once the worker has exited.
    pub fn send(&self, event: Event) -> Result<(), SendError<Event>> {
        self.sender.send(event)
    }

    /// A clone of the inbound queue for producers on other threads.
    pub fn sender(&self) -> Sender<Event> {
        self.sender.clone()
    }

    /// Stops the worker, waits for it to finish draining, and releases
    /// the native handle. Events still queued are discarded, and any
    /// producer parked on a full-queue send is unblocked by the drain.
    /// A fatal worker error takes precedence over a close error in the
    /// result.
    pub fn close(mut self) -> Result<(), DeviceError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), DeviceError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let _ = self.shutdown.try_send(());
        join_and_release(worker)
    }
}

impl<D: DeviceIo + 'static> Drop for OutputStream<D> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("failed to close output stream on drop : {e}");
        }
    }
}

fn run_output_worker<D: DeviceIo>(
    mut device: D,
    events: Receiver<Event>,
    shutdown: Receiver<()>,
) -> WorkerOutcome<D> {
    log::trace!("output worker started");

    loop {
        crossbeam::select! {
            recv(shutdown) -> _ => {
                log::trace!("output worker shutting down");
                drain(&events);
                return (device, Ok(()));
            }
            recv(events) -> event => match event {
                Ok(event) => {
                    if let Err(e) = write(&mut device, &event) {
                        log::error!("failed to write midi event : {e}");

                        if e.is_fatal() {
                            drain(&events);
                            return (device, Err(e));
                        }
                    }
                }
                Err(_) => {
                    log::trace!("output queue closed, worker shutting down");
                    return (device, Ok(()));
                }
            },
        }
    }
}

fn write<D: DeviceIo>(device: &mut D, event: &Event) -> Result<(), DeviceError> {
    match &event.sysex {
        Some(payload) => device.write_sysex(event.timestamp, payload),
        None => device.write_short(event.timestamp, event.message),
    }
}

/// Discards everything left on the queue so producers parked on a
/// full-queue send are freed before the worker exits; dropping the
/// receiver afterwards disconnects the queue for anyone still mid-send.
/// Never touches the device.
fn drain(events: &Receiver<Event>) {
    let discarded = events.try_iter().count();

    if discarded > 0 {
        log::trace!("discarded {discarded} unsent midi events");
    }
}
