//! A CPU wireframe viewer for triangulated OBJ meshes.
//!
//! Meshes are loaded once, validated, and then redrawn every frame as
//! Bresenham lines through a fixed orthographic projection. SDL2 is used
//! only to show the finished frame.
//!
//! # Quick Start
//!
//! ```ignore
//! use wirecast::prelude::*;
//!
//! let mesh = Mesh::load("models/model.obj")?;
//! let config = RenderConfig::default();
//! let mut window = Window::new("wirecast", config.width, config.height)?;
//! wirecast::app::run(&mut window, mesh, &config)?;
//! ```

pub mod app;
pub mod colors;
pub mod config;
pub mod math;
pub mod mesh;
pub mod render;
pub mod window;

pub use colors::Color;
pub use config::RenderConfig;
pub use math::Point3;
pub use mesh::{Face, LoadError, Mesh, ParseError};
pub use render::{Canvas, EventSource, FrameBuffer, ModelRenderer, OrthoProjection, ScreenPoint};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::app::{run, snapshot, FrameLimiter};
    pub use crate::colors::Color;
    pub use crate::config::RenderConfig;
    pub use crate::math::Point3;
    pub use crate::mesh::{Face, LoadError, Mesh};
    pub use crate::render::{
        draw_line, BresenhamLine, Canvas, EventSource, FrameBuffer, ModelRenderer,
        OrthoProjection, ScreenPoint,
    };
    pub use crate::window::Window;
}
