use super::{join_and_release, WorkerOutcome, POLL_INTERVAL, READ_CHUNK};
use crate::{
    device::{DeviceError, DeviceIo},
    midi::{ChannelMask, Event, Filter},
};
use crossbeam::channel::{Receiver, Sender, TryRecvError};
use std::thread::JoinHandle;

/// An input device bridged onto a bounded outbound event queue.
///
/// A background worker owns the native handle, polls it, and publishes
/// decoded events in device order. The bounded queue is the only
/// backpressure point: a slow consumer stalls the worker, which stalls
/// further native reads until the queue has room again.
pub struct InputStream<D: DeviceIo + 'static> {
    events: Receiver<Event>,
    shutdown: Sender<()>,
    worker: Option<JoinHandle<WorkerOutcome<D>>>,
}

impl<D: DeviceIo + 'static> InputStream<D> {
    /// Opens `device` for input with an outbound queue of `queue_capacity`
    /// events. An empty channel mask admits all channels; `filters` are
    /// OR'ed together before being applied. A failed native call during
    /// open returns the error and no stream.
    pub fn open(
        mut device: D,
        queue_capacity: usize,
        channels: ChannelMask,
        filters: &[Filter],
    ) -> Result<Self, DeviceError> {
        if !channels.is_empty() {
            device.set_channel_mask(channels)?;
        }

        if !filters.is_empty() {
            device.set_filter(Filter::join(filters))?;
        }

        let (events_tx, events_rx) = crossbeam::channel::bounded(queue_capacity);
        let (shutdown_tx, shutdown_rx) = crossbeam::channel::bounded(1);

        Ok(Self {
            events: events_rx,
            shutdown: shutdown_tx,
            worker: Some(std::thread::spawn(move || {
                run_input_worker(device, events_tx, shutdown_rx)
            })),
        })
    }

    /// The outbound event queue. Yields events in device order and
    /// disconnects once the stream is closed or its worker hits a fatal
    /// device error.
    pub fn events(&self) -> Receiver<Event> {
        self.events.clone()
    }

    /// Stops the worker, waits for it to exit, and releases the native
    /// handle. Undelivered events still buffered on the queue are
    /// discarded; a fatal worker error takes precedence over a close
    /// error in the result.
    pub fn close(mut self) -> Result<(), DeviceError> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<(), DeviceError> {
        let Some(worker) = self.worker.take() else {
            return Ok(());
        };

        let _ = self.shutdown.try_send(());
        // Release our end of the queue. Receivers handed out by `events()`
        // keep already-published events readable; once the last one drops,
        // the channel disconnects.
        drop(std::mem::replace(
            &mut self.events,
            crossbeam::channel::never(),
        ));

        join_and_release(worker)
    }
}

impl<D: DeviceIo + 'static> Drop for InputStream<D> {
    fn drop(&mut self) {
        if let Err(e) = self.shutdown() {
            log::error!("failed to close input stream on drop : {e}");
        }
    }
}

fn run_input_worker<D: DeviceIo>(
    mut device: D,
    events: Sender<Event>,
    shutdown: Receiver<()>,
) -> WorkerOutcome<D> {
    log::trace!("input worker started");
    let mut had_data = false;

    loop {
        match shutdown.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => {
                log::trace!("input worker shutting down");
                return (device, Ok(()));
            }
            Err(TryRecvError::Empty) => {}
        }

        let pending = match device.poll() {
            Ok(pending) => pending,
            Err(e) => return (device, Err(e)),
        };

        if pending {
            had_data = true;

            let batch = match device.read(READ_CHUNK) {
                Ok(batch) => batch,
                Err(e) => return (device, Err(e)),
            };

            for event in batch {
                // The send is the backpressure point, but the worker keeps
                // watching the shutdown signal while parked on a full queue
                // so close never waits on a consumer.
                crossbeam::select! {
                    send(events, event) -> published => {
                        if published.is_err() {
                            log::trace!("input queue disconnected, worker shutting down");
                            return (device, Ok(()));
                        }
                    }
                    recv(shutdown) -> _ => {
                        log::trace!("input worker shutting down");
                        return (device, Ok(()));
                    }
                }
            }

            continue;
        }

        if had_data {
            // One extra spin after a burst so the tail drains promptly.
            had_data = false;
            continue;
        }

        std::thread::sleep(POLL_INTERVAL);
    }
}
