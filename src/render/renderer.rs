//! Wireframe drawing of whole meshes.

use super::canvas::Canvas;
use super::line::draw_line;
use super::projection::OrthoProjection;
use crate::colors::Color;
use crate::mesh::Mesh;

/// Draws every edge of every face of a mesh through a fixed projection.
///
/// There is no culling or depth test: faces are drawn in declaration order,
/// edges A→B, B→C, C→A, and edges shared between faces are drawn again.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelRenderer {
    projection: OrthoProjection,
}

impl ModelRenderer {
    pub fn new(projection: OrthoProjection) -> Self {
        Self { projection }
    }

    pub fn projection(&self) -> &OrthoProjection {
        &self.projection
    }

    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C, mesh: &Mesh, color: Color) {
        for [a, b, c] in mesh.triangles() {
            let a = self.projection.project(a);
            let b = self.projection.project(b);
            let c = self.projection.project(c);

            draw_line(canvas, a, b, color);
            draw_line(canvas, b, c, color);
            draw_line(canvas, c, a, color);
        }
    }

    /// One full frame: clear, draw the wireframe, present.
    pub fn render_frame<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        mesh: &Mesh,
        color: Color,
        background: Color,
    ) -> Result<(), String> {
        canvas.clear(background);
        self.draw(canvas, mesh, color);
        canvas.present()
    }
}
