//! `WindowSurface` implementations over the demo scene.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::trace;

use viewshot_capture::{Bounds, CaptureResult, CopyComplete, FrameBuf, WindowSurface};

use crate::scene::Scene;

/// Simulated latency of the hardware copy path.
const COPY_LATENCY: Duration = Duration::from_millis(2);

/// Exposes the demo scene through both rendering strategies: the synchronous
/// software draw, and a simulated hardware pixel copy completing on a worker
/// thread.
pub struct SceneSurface {
    scene: Arc<RwLock<Scene>>,
    pixel_copy: bool,
}

impl SceneSurface {
    pub fn new(scene: Arc<RwLock<Scene>>, pixel_copy: bool) -> Self {
        Self { scene, pixel_copy }
    }
}

impl WindowSurface for SceneSurface {
    fn supports_pixel_copy(&self) -> bool {
        self.pixel_copy
    }

    fn draw_region(&self, bounds: Bounds, buf: &mut FrameBuf) -> CaptureResult<()> {
        self.scene.read().draw_region(bounds, buf);
        Ok(())
    }

    fn copy_region(&self, bounds: Bounds, mut buf: FrameBuf, done: CopyComplete) {
        let scene = Arc::clone(&self.scene);
        thread::spawn(move || {
            thread::sleep(COPY_LATENCY);
            scene.read().draw_region(bounds, &mut buf);
            trace!(?bounds, "simulated pixel copy finished");
            done(Ok(buf));
        });
    }
}
