//! The periodic capture worker behind `periodic_captures`.

use std::sync::Weak;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};
use tracing::{debug, trace};

use crate::controller::Inner;
use crate::frame::PixelFrame;

/// Handle to a running feed worker.
pub(crate) struct FeedHandle {
    stop_tx: Sender<()>,
    thread: Option<JoinHandle<()>>,
}

impl FeedHandle {
    /// Spawn the worker for one subscription.
    pub(crate) fn spawn(
        inner: Weak<Inner>,
        interval: Duration,
        frame_tx: Sender<PixelFrame>,
    ) -> Self {
        let (stop_tx, stop_rx) = bounded(1);
        let thread = thread::spawn(move || run(inner, interval, frame_tx, stop_rx));

        Self {
            stop_tx,
            thread: Some(thread),
        }
    }

    /// Ask the worker to stop without waiting for it.
    pub(crate) fn signal_stop(&self) {
        let _ = self.stop_tx.try_send(());
    }

    /// Stop the worker and wait for it to exit.
    pub(crate) fn stop(mut self) {
        self.signal_stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

/// Worker loop: trigger a capture, wait one interval, yield the frame if a
/// capture completed since the last yield.
///
/// The wait doubles as the cancellation point: a stop signal or a vanished
/// subscriber ends the loop at the delay, so the next tick's capture never
/// runs. The worker holds only a weak reference to the controller and winds
/// down when the controller is dropped.
fn run(
    inner: Weak<Inner>,
    interval: Duration,
    frame_tx: Sender<PixelFrame>,
    stop_rx: Receiver<()>,
) {
    debug!(?interval, "feed worker running");

    // Frames captured before this subscription are never yielded.
    let mut last_yielded = match inner.upgrade() {
        Some(inner) => inner.latest().0,
        None => return,
    };

    loop {
        match inner.upgrade() {
            Some(inner) => inner.run_capture(),
            None => break,
        }

        match stop_rx.recv_timeout(interval) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        // An asynchronous copy may have completed during the wait; yield
        // whatever capture has landed since the previous tick.
        let produced = match inner.upgrade() {
            Some(inner) => match inner.latest() {
                (sequence, Some(frame)) if sequence > last_yielded => Some((sequence, frame)),
                _ => None,
            },
            None => break,
        };

        if let Some((sequence, frame)) = produced {
            last_yielded = sequence;
            match frame_tx.try_send(frame) {
                Ok(()) => trace!(sequence, "frame delivered"),
                Err(TrySendError::Full(_)) => {
                    debug!(sequence, "subscriber lagging, dropping frame");
                }
                Err(TrySendError::Disconnected(_)) => {
                    debug!("subscriber went away");
                    break;
                }
            }
        }
    }

    debug!("feed worker exited");
}
