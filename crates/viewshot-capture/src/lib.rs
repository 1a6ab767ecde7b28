//! Region capture for retained UI trees.
//!
//! This crate lets a host application capture a pixel snapshot of an
//! arbitrary rectangular region of its on-screen view hierarchy, either on
//! demand or as a periodic live feed. The host supplies the actual
//! render-to-buffer primitive through the [`WindowSurface`] trait; this crate
//! owns the capture state machine and the producer/consumer contract around
//! it.

mod controller;
mod error;
mod feed;
mod frame;
mod geometry;
mod region;
mod state;
mod surface;

pub use controller::{CaptureController, RegionBinding};
pub use error::CaptureError;
pub use frame::{FrameBuf, PixelFrame};
pub use geometry::{Bounds, LayoutInfo};
pub use region::CaptureRegion;
pub use state::CaptureState;
pub use surface::{CopyComplete, WindowSurface};

/// Channel capacity for live-feed frames.
pub const FEED_CHANNEL_CAPACITY: usize = 3;

/// Result type for capture operations.
pub type CaptureResult<T> = Result<T, CaptureError>;
