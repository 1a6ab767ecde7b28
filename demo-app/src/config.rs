//! Demo configuration.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration for a demo run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Simulated window width in pixels.
    pub window_width: u32,

    /// Simulated window height in pixels.
    pub window_height: u32,

    /// Live feed capture interval in milliseconds.
    pub feed_interval_ms: u64,

    /// Number of live frames to collect before stopping the feed.
    pub feed_frames: usize,

    /// Directory PNG captures are written to.
    pub output_dir: PathBuf,

    /// Capture through the simulated hardware pixel copy instead of the
    /// software draw.
    pub use_pixel_copy: bool,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            window_width: 640,
            window_height: 480,
            feed_interval_ms: 250,
            feed_frames: 8,
            output_dir: PathBuf::from("captures"),
            use_pixel_copy: false,
        }
    }
}

impl DemoConfig {
    /// Load from a JSON file, or fall back to defaults when no path is given.
    pub fn load(path: Option<&str>) -> Result<Self> {
        match path {
            Some(path) => {
                let raw = fs::read_to_string(path)
                    .with_context(|| format!("reading config {path}"))?;
                serde_json::from_str(&raw).with_context(|| format!("parsing config {path}"))
            }
            None => Ok(Self::default()),
        }
    }
}
