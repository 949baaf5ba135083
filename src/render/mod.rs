//! Wireframe rasterization.
//!
//! - [`line`]: integer Bresenham line stepping
//! - [`projection`]: the fixed orthographic model-to-screen transform
//! - [`renderer`]: draws every face of a [`Mesh`](crate::mesh::Mesh) as three lines
//! - [`framebuffer`]: an in-memory [`Canvas`]

pub mod canvas;
pub mod framebuffer;
pub mod line;
pub mod projection;
pub mod renderer;

pub use canvas::{Canvas, EventSource};
pub use framebuffer::FrameBuffer;
pub use line::{draw_line, BresenhamLine};
pub use projection::{OrthoProjection, ScreenPoint, COORD_LIMIT};
pub use renderer::ModelRenderer;
