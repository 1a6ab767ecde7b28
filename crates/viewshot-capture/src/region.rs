//! Capture regions: a UI subtree boundary plus its render primitive.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::trace;

use crate::controller::CompletionSink;
use crate::frame::{FrameBuf, PixelFrame};
use crate::geometry::{Bounds, LayoutInfo};
use crate::surface::WindowSurface;
use crate::CaptureResult;

/// What a single render-callback invocation did.
pub(crate) enum RenderOutcome {
    /// Bounds were absent or zero-area; nothing was rendered or allocated.
    Skipped,

    /// The synchronous draw path finished.
    Completed(CaptureResult<PixelFrame>),

    /// An asynchronous pixel copy was dispatched; the result arrives later
    /// through the completion sink.
    Pending,
}

/// The render callback a controller invokes to perform a capture.
pub(crate) type RenderFn = Box<dyn FnMut(&CompletionSink) -> RenderOutcome + Send>;

/// A UI subtree whose on-screen rectangle can be captured.
///
/// The host binding layer reports every layout pass through
/// [`layout_changed`], and the region supplies the render primitive via its
/// [`WindowSurface`]. Binding the region to a
/// [`CaptureController`](crate::CaptureController) installs a render callback
/// that reads the most recently observed bounds at each trigger.
///
/// [`layout_changed`]: CaptureRegion::layout_changed
pub struct CaptureRegion {
    surface: Arc<dyn WindowSurface>,
    bounds: Arc<Mutex<Option<Bounds>>>,
}

impl CaptureRegion {
    /// Create a region over the given window surface.
    pub fn new(surface: Arc<dyn WindowSurface>) -> Self {
        Self {
            surface,
            bounds: Arc::new(Mutex::new(None)),
        }
    }

    /// Record the region's position from a layout pass.
    ///
    /// Only the most recent layout is retained. Window-space bounds are
    /// preferred when the platform provides them.
    pub fn layout_changed(&self, layout: LayoutInfo) {
        let bounds = layout.effective();
        trace!(?bounds, "region layout changed");
        *self.bounds.lock() = Some(bounds);
    }

    /// The bounds recorded by the most recent layout pass, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        *self.bounds.lock()
    }

    /// Build the render callback installed into a controller at bind time.
    pub(crate) fn render_fn(&self) -> RenderFn {
        let surface = Arc::clone(&self.surface);
        let bounds = Arc::clone(&self.bounds);

        Box::new(move |sink| render_once(&surface, &bounds, sink))
    }
}

/// One render-callback invocation: skip, draw, or dispatch a copy.
fn render_once(
    surface: &Arc<dyn WindowSurface>,
    bounds: &Mutex<Option<Bounds>>,
    sink: &CompletionSink,
) -> RenderOutcome {
    let bounds = match *bounds.lock() {
        Some(bounds) if !bounds.is_empty() => bounds,
        _ => {
            // Layout may simply not have completed yet.
            trace!("capture skipped: no usable bounds");
            return RenderOutcome::Skipped;
        }
    };

    let mut buf = FrameBuf::rgba(bounds);

    if surface.supports_pixel_copy() {
        trace!(?bounds, "dispatching pixel copy");
        let sink = sink.clone();
        surface.copy_region(
            bounds,
            buf,
            Box::new(move |result| sink.complete(result.map(FrameBuf::freeze))),
        );
        RenderOutcome::Pending
    } else {
        trace!(?bounds, "drawing region");
        match surface.draw_region(bounds, &mut buf) {
            Ok(()) => RenderOutcome::Completed(Ok(buf.freeze())),
            Err(err) => RenderOutcome::Completed(Err(err)),
        }
    }
}
