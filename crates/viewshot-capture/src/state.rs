//! The controller's current-capture state.

use std::sync::Arc;

use crate::error::CaptureError;
use crate::frame::PixelFrame;

/// The outcome of the most recent completed capture.
///
/// Exactly one value is current per controller at any time. A skipped capture
/// (absent or zero-area bounds) leaves the previous value in place; only a
/// completed render or a render failure replaces it.
#[derive(Debug, Clone, Default)]
pub enum CaptureState {
    /// No capture has completed yet.
    #[default]
    Initial,

    /// The most recent capture produced this frame.
    Success(PixelFrame),

    /// The most recent capture failed.
    Error(Arc<CaptureError>),
}

impl CaptureState {
    /// Whether no capture has completed yet.
    pub fn is_initial(&self) -> bool {
        matches!(self, Self::Initial)
    }

    /// Whether the most recent capture succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Whether the most recent capture failed.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// The captured frame, when the state is `Success`.
    pub fn frame(&self) -> Option<&PixelFrame> {
        match self {
            Self::Success(frame) => Some(frame),
            _ => None,
        }
    }
}
