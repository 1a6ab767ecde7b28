//! Error types for the capture module.

use thiserror::Error;

/// Errors that can occur during capture operations.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The software draw primitive reported failure.
    #[error("region draw failed: {0}")]
    RenderFailed(String),

    /// The asynchronous pixel copy reported failure.
    #[error("pixel copy failed: {0}")]
    CopyFailed(String),

    /// A live feed is already running on this controller.
    #[error("live feed already running")]
    FeedAlreadyRunning,

    /// No live feed is running on this controller.
    #[error("live feed not running")]
    FeedNotRunning,
}
