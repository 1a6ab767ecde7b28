//! Host window surface: the render-to-buffer collaborator.

use crate::error::CaptureError;
use crate::frame::FrameBuf;
use crate::geometry::Bounds;
use crate::CaptureResult;

/// Completion signal for an asynchronous pixel copy.
///
/// Invoked exactly once with the filled buffer, or with the copy failure.
pub type CopyComplete = Box<dyn FnOnce(CaptureResult<FrameBuf>) + Send + 'static>;

/// The host platform's "render window region to RGBA buffer" primitive.
///
/// This crate depends on, but does not implement, this primitive. It is
/// offered in two forms and a capture prefers the asynchronous pixel copy
/// whenever the surface reports support for it — software draws silently
/// produce blank output for hardware-composited content, so the copy path is
/// the correct one wherever it exists.
pub trait WindowSurface: Send + Sync {
    /// Whether the asynchronous pixel copy path is available.
    ///
    /// Implementations returning `true` must override [`copy_region`].
    ///
    /// [`copy_region`]: WindowSurface::copy_region
    fn supports_pixel_copy(&self) -> bool {
        false
    }

    /// Synchronously draw the window's current visual state, restricted to
    /// `bounds`, into `buf`.
    ///
    /// The buffer origin corresponds to the bounds' top-left corner, so the
    /// draw must translate by `(-bounds.left, -bounds.top)`.
    fn draw_region(&self, bounds: Bounds, buf: &mut FrameBuf) -> CaptureResult<()>;

    /// Asynchronously copy the window's pixels within `bounds` into `buf`,
    /// invoking `done` exactly once on completion.
    ///
    /// The completion may run on any thread; the caller treats it as a
    /// hand-off and serializes the result itself.
    fn copy_region(&self, bounds: Bounds, buf: FrameBuf, done: CopyComplete) {
        let _ = bounds;
        let _ = buf;
        done(Err(CaptureError::CopyFailed(
            "pixel copy not supported by this surface".into(),
        )));
    }
}
