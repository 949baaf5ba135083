//! The render loop: load once, redraw every frame until asked to quit.

use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::config::RenderConfig;
use crate::mesh::Mesh;
use crate::render::{Canvas, EventSource, FrameBuffer, ModelRenderer};

/// Sleeps out the remainder of each frame to hold a target frame rate.
pub struct FrameLimiter {
    frame_target: Duration,
    previous_frame: Instant,
}

impl FrameLimiter {
    pub fn new(fps: u32) -> Self {
        Self {
            frame_target: Duration::from_secs(1) / fps.max(1),
            previous_frame: Instant::now(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the time elapsed
    /// since the previous call.
    pub fn wait_and_get_delta(&mut self) -> Duration {
        let elapsed = self.previous_frame.elapsed();
        if elapsed < self.frame_target {
            thread::sleep(self.frame_target - elapsed);
        }

        let now = Instant::now();
        let delta = now - self.previous_frame;
        self.previous_frame = now;
        delta
    }
}

/// Redraw `mesh` on `surface` once per frame until the surface reports a quit
/// request. Quit is only checked between frames, never mid-draw.
///
/// Returns the number of frames presented.
pub fn run<S>(surface: &mut S, mesh: Mesh, config: &RenderConfig) -> Result<u64, String>
where
    S: Canvas + EventSource,
{
    let renderer = ModelRenderer::new(config.projection());
    let mut limiter = FrameLimiter::new(config.fps);
    let mut frames = 0u64;

    debug!(
        "Rendering {} faces at scale {} on {}x{}",
        mesh.faces().len(),
        config.scale,
        config.width,
        config.height
    );

    while !surface.poll_quit() {
        renderer.render_frame(surface, &mesh, config.color, config.background)?;
        frames += 1;

        let delta = limiter.wait_and_get_delta();
        trace!("Frame {frames} took {:.2} ms", delta.as_secs_f64() * 1000.0);
    }

    info!("Quit after {frames} frames");
    Ok(frames)
}

/// Render a single frame without a window.
pub fn snapshot(mesh: &Mesh, config: &RenderConfig) -> FrameBuffer {
    let mut frame = FrameBuffer::new(config.width, config.height);
    frame.clear(config.background);
    ModelRenderer::new(config.projection()).draw(&mut frame, mesh, config.color);
    frame
}
