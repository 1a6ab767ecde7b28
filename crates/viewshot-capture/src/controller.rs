//! The capture controller: current-state owner and trigger mediator.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use std::time::Duration;

use crossbeam_channel::Receiver;
use parking_lot::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::CaptureError;
use crate::feed::FeedHandle;
use crate::frame::PixelFrame;
use crate::region::{CaptureRegion, RenderFn, RenderOutcome};
use crate::state::CaptureState;
use crate::{CaptureResult, FEED_CHANNEL_CAPACITY};

/// An installed render callback.
///
/// The render closure sits behind its own lock so a capture can run it
/// without holding the registration slot; an unbind or rebind that lands
/// mid-render is resolved by the generation check when the result comes back.
struct Registration {
    generation: u64,
    render: Arc<Mutex<RenderFn>>,
}

#[derive(Default)]
struct Current {
    state: CaptureState,
    sequence: u64,
}

/// Shared controller state.
pub(crate) struct Inner {
    feed_interval: Duration,
    registration: Mutex<Option<Registration>>,
    current: Mutex<Current>,
    next_generation: AtomicU64,
    feed: Mutex<Option<FeedHandle>>,
}

impl Inner {
    fn active_generation(&self) -> Option<u64> {
        self.registration.lock().as_ref().map(|reg| reg.generation)
    }

    /// Invoke the registered render callback, if any, and store the outcome.
    pub(crate) fn run_capture(self: &Arc<Self>) {
        let (generation, render) = {
            let registration = self.registration.lock();
            match registration.as_ref() {
                // Nothing registered: triggering is a tolerated no-op.
                None => return,
                Some(reg) => (reg.generation, Arc::clone(&reg.render)),
            }
        };

        let sink = CompletionSink {
            inner: Arc::downgrade(self),
            generation,
        };

        let outcome = {
            let mut render = render.lock();
            (*render)(&sink)
        };

        match outcome {
            RenderOutcome::Skipped | RenderOutcome::Pending => {}
            RenderOutcome::Completed(result) => self.finish(generation, result),
        }
    }

    /// Store a completed capture, unless its registration has been replaced.
    fn finish(&self, generation: u64, result: CaptureResult<PixelFrame>) {
        if self.active_generation() != Some(generation) {
            debug!("dropping capture result from a stale registration");
            return;
        }

        let mut current = self.current.lock();
        match result {
            Ok(frame) => {
                debug!(
                    width = frame.width(),
                    height = frame.height(),
                    "capture completed"
                );
                current.sequence += 1;
                // Storing the new frame releases the previous one.
                current.state = CaptureState::Success(frame);
            }
            Err(err) => {
                warn!(%err, "capture failed");
                current.state = CaptureState::Error(Arc::new(err));
            }
        }
    }

    /// The current frame sequence and, when in `Success`, the frame itself.
    pub(crate) fn latest(&self) -> (u64, Option<PixelFrame>) {
        let current = self.current.lock();
        (current.sequence, current.state.frame().cloned())
    }

    fn clear_registration(&self, generation: u64) {
        {
            let mut registration = self.registration.lock();
            match registration.as_ref() {
                Some(reg) if reg.generation == generation => *registration = None,
                // A newer binding owns the slot; the stale handle is inert.
                _ => return,
            }
        }

        // Release the frame held on behalf of the unbound region. The
        // sequence is kept so a running feed never re-yields across bindings.
        self.current.lock().state = CaptureState::Initial;
        debug!("region unbound");
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        // The worker only holds a weak reference, so it cannot be the one
        // dropping us mid-join; a signal is enough to let it wind down.
        if let Some(feed) = self.feed.get_mut().take() {
            feed.signal_stop();
        }
    }
}

/// Hand-off point for capture results produced off the triggering thread.
///
/// An asynchronous pixel copy completes by pushing its result through a clone
/// of this sink; results from registrations that have since been unbound are
/// dropped.
#[derive(Clone)]
pub(crate) struct CompletionSink {
    inner: Weak<Inner>,
    generation: u64,
}

impl CompletionSink {
    pub(crate) fn complete(&self, result: CaptureResult<PixelFrame>) {
        match self.inner.upgrade() {
            Some(inner) => inner.finish(self.generation, result),
            None => debug!("dropping capture result: controller is gone"),
        }
    }
}

/// Handle for a region bound to a controller.
///
/// Returned by [`CaptureController::bind_region`]; unbinding consumes the
/// handle, clears the registration, and releases the controller's owned
/// frame. Dropping the handle unbinds as well, so an unwound mount can never
/// leave a dangling render path behind.
pub struct RegionBinding {
    inner: Weak<Inner>,
    generation: u64,
}

impl RegionBinding {
    /// Clear the registration and release the controller's owned frame.
    pub fn unbind(self) {}
}

impl Drop for RegionBinding {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner.clear_registration(self.generation);
        }
    }
}

/// Holds the latest captured frame (or error/initial state), exposes the
/// on-demand trigger, and runs the periodic live feed.
///
/// A controller never renders anything itself: it invokes the render callback
/// installed by the currently bound [`CaptureRegion`] and publishes the
/// result. At most one region is bound at a time; binding another region
/// replaces the previous registration. Use one controller per region to
/// capture several regions independently.
pub struct CaptureController {
    inner: Arc<Inner>,
}

impl CaptureController {
    /// Create a controller whose live feed ticks at `feed_interval`.
    pub fn new(feed_interval: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                feed_interval,
                registration: Mutex::new(None),
                current: Mutex::new(Current::default()),
                next_generation: AtomicU64::new(1),
                feed: Mutex::new(None),
            }),
        }
    }

    /// Install `region`'s render callback, replacing any prior registration.
    pub fn bind_region(&self, region: &CaptureRegion) -> RegionBinding {
        let generation = self.inner.next_generation.fetch_add(1, Ordering::Relaxed);
        let replaced = self
            .inner
            .registration
            .lock()
            .replace(Registration {
                generation,
                render: Arc::new(Mutex::new(region.render_fn())),
            })
            .is_some();

        if replaced {
            debug!(generation, "replaced existing region registration");
        } else {
            debug!(generation, "region bound");
        }

        RegionBinding {
            inner: Arc::downgrade(&self.inner),
            generation,
        }
    }

    /// Capture the bound region now.
    ///
    /// A no-op when no region is bound or the region has no usable bounds
    /// yet. Software draws complete before this returns; a pixel copy lands
    /// in [`current`](CaptureController::current) when its completion fires.
    pub fn capture(&self) {
        self.inner.run_capture();
    }

    /// The outcome of the most recent completed capture.
    pub fn current(&self) -> CaptureState {
        self.inner.current.lock().state.clone()
    }

    /// The most recently captured frame, when the current state is `Success`.
    pub fn latest_frame(&self) -> Option<PixelFrame> {
        self.inner.current.lock().state.frame().cloned()
    }

    /// Start the live feed at the controller's default interval.
    pub fn periodic_captures(&self) -> CaptureResult<Receiver<PixelFrame>> {
        self.periodic_captures_every(self.inner.feed_interval)
    }

    /// Start the live feed, capturing once per `interval`.
    ///
    /// Returns the subscriber end of a bounded channel; each tick triggers a
    /// capture and yields the frame once it completes. Frames are dropped
    /// rather than buffered when the subscriber lags behind
    /// [`FEED_CHANNEL_CAPACITY`]. Only one feed may run at a time.
    #[instrument(name = "start_feed", skip(self))]
    pub fn periodic_captures_every(
        &self,
        interval: Duration,
    ) -> CaptureResult<Receiver<PixelFrame>> {
        let mut feed = self.inner.feed.lock();
        if feed.is_some() {
            return Err(CaptureError::FeedAlreadyRunning);
        }

        let (frame_tx, frame_rx) = crossbeam_channel::bounded(FEED_CHANNEL_CAPACITY);
        *feed = Some(FeedHandle::spawn(
            Arc::downgrade(&self.inner),
            interval,
            frame_tx,
        ));

        info!(?interval, "live feed started");
        Ok(frame_rx)
    }

    /// Stop the live feed.
    ///
    /// No capture is triggered by the feed after this returns. The feed may
    /// be started again afterwards.
    #[instrument(name = "stop_feed", skip(self))]
    pub fn stop_feed(&self) -> CaptureResult<()> {
        match self.inner.feed.lock().take() {
            Some(handle) => {
                handle.stop();
                info!("live feed stopped");
                Ok(())
            }
            None => Err(CaptureError::FeedNotRunning),
        }
    }
}
