//! Viewer settings and command-line parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::colors::{self, Color};
use crate::render::OrthoProjection;

pub const WINDOW_WIDTH: u32 = 640;
pub const WINDOW_HEIGHT: u32 = 480;
/// Pixels per model unit.
pub const RENDER_SCALE: f32 = 50.0;
pub const FPS: u32 = 60;
/// Largest accepted width or height, keeping the frame buffer under 256 MiB.
pub const MAX_DIMENSION: u32 = 8192;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub color: Color,
    pub background: Color,
    pub fps: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            scale: RENDER_SCALE,
            color: colors::WIREFRAME,
            background: colors::BACKGROUND,
            fps: FPS,
        }
    }
}

impl RenderConfig {
    /// The screen-space transform implied by this surface size and scale.
    pub fn projection(&self) -> OrthoProjection {
        OrthoProjection::new(self.scale, self.width, self.height)
    }
}

/// Render an OBJ triangle mesh as a wireframe.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// OBJ model to display.
    #[arg(default_value = "models/model.obj")]
    pub model: PathBuf,

    /// Window width in pixels.
    #[arg(long, default_value_t = WINDOW_WIDTH, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub width: u32,

    /// Window height in pixels.
    #[arg(long, default_value_t = WINDOW_HEIGHT, value_parser = clap::value_parser!(u32).range(1..=MAX_DIMENSION as i64))]
    pub height: u32,

    /// Pixels per model unit.
    #[arg(long, default_value_t = RENDER_SCALE)]
    pub scale: f32,

    /// Wireframe color as RRGGBB.
    #[arg(long, default_value_t = colors::WIREFRAME)]
    pub color: Color,

    /// Clear color as RRGGBB.
    #[arg(long, default_value_t = colors::BACKGROUND)]
    pub background: Color,

    /// Frame rate cap.
    #[arg(long, default_value_t = FPS, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: u32,

    /// Render a single frame to this image file instead of opening a window.
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,
}

impl Args {
    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            scale: self.scale,
            color: self.color,
            background: self.background,
            fps: self.fps,
        }
    }
}
