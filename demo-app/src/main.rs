//! Demo application for the viewshot capture library.
//!
//! Builds a retained scene of colored cards, binds it to a capture
//! controller, and exercises both capture paths: a one-shot capture and the
//! periodic live feed, writing every captured frame to a PNG file.

mod config;
mod scene;
mod surface;

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use image::RgbaImage;
use parking_lot::RwLock;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use viewshot_capture::{
    Bounds, CaptureController, CaptureRegion, CaptureState, LayoutInfo, PixelFrame,
};

use crate::config::DemoConfig;
use crate::scene::Scene;
use crate::surface::SceneSurface;

/// How long to wait for an in-flight pixel copy before giving up.
const CAPTURE_WAIT: Duration = Duration::from_millis(500);

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "viewshot_demo=debug,viewshot_capture=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let config = DemoConfig::load(std::env::args().nth(1).as_deref())?;
    info!(?config, "viewshot demo starting");
    fs::create_dir_all(&config.output_dir)
        .with_context(|| format!("creating {}", config.output_dir.display()))?;

    let scene = Arc::new(RwLock::new(Scene::card_grid(
        config.window_width,
        config.window_height,
    )));
    let surface = Arc::new(SceneSurface::new(
        Arc::clone(&scene),
        config.use_pixel_copy,
    ));

    let region = CaptureRegion::new(surface);
    let controller = CaptureController::new(Duration::from_millis(config.feed_interval_ms));
    let binding = controller.bind_region(&region);

    // Before any layout pass a trigger is a silent no-op.
    controller.capture();
    info!(
        still_initial = controller.current().is_initial(),
        "pre-layout capture was skipped"
    );

    // The captured region is the window minus its outer margin, as a real
    // layout pass would report it.
    let margin = 8;
    let grid = Bounds::new(
        margin,
        margin,
        config.window_width - 2 * margin as u32,
        config.window_height - 2 * margin as u32,
    );
    region.layout_changed(LayoutInfo::windowed(grid, grid));

    one_shot(&controller, &config)?;
    live_feed(&controller, &scene, &config)?;

    binding.unbind();
    info!("viewshot demo finished");
    Ok(())
}

/// Trigger a single capture and write the result to disk.
fn one_shot(controller: &CaptureController, config: &DemoConfig) -> Result<()> {
    controller.capture();

    match wait_for_capture(controller) {
        CaptureState::Success(frame) => {
            let path = config.output_dir.join("one_shot.png");
            save_png(&frame, &path)?;
            info!(
                path = %path.display(),
                width = frame.width(),
                height = frame.height(),
                "one-shot capture saved"
            );
            Ok(())
        }
        CaptureState::Error(err) => bail!("one-shot capture failed: {err}"),
        CaptureState::Initial => bail!("one-shot capture never completed"),
    }
}

/// Subscribe to the live feed, mutating the scene between frames.
fn live_feed(
    controller: &CaptureController,
    scene: &Arc<RwLock<Scene>>,
    config: &DemoConfig,
) -> Result<()> {
    let frames = controller.periodic_captures()?;
    info!(
        interval_ms = config.feed_interval_ms,
        frames = config.feed_frames,
        "live feed subscribed"
    );

    let mut saved = 0usize;
    while saved < config.feed_frames {
        match frames.recv_timeout(Duration::from_secs(5)) {
            Ok(frame) => {
                let path = config.output_dir.join(format!("live_{saved:03}.png"));
                save_png(&frame, &path)?;
                info!(path = %path.display(), "live frame saved");
                saved += 1;

                // Mutate the scene so the next frame differs.
                scene.write().tick();
            }
            Err(err) => {
                warn!(%err, "live feed stalled");
                break;
            }
        }
    }

    controller.stop_feed()?;
    info!(saved, "live feed finished");
    Ok(())
}

/// Poll until the current capture lands or the wait budget runs out.
fn wait_for_capture(controller: &CaptureController) -> CaptureState {
    let deadline = Instant::now() + CAPTURE_WAIT;
    loop {
        let state = controller.current();
        if !state.is_initial() || Instant::now() >= deadline {
            return state;
        }
        thread::sleep(Duration::from_millis(5));
    }
}

/// Encode a captured frame as PNG.
fn save_png(frame: &PixelFrame, path: &Path) -> Result<()> {
    let image = RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
        .context("frame buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
