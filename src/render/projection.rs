//! Fixed orthographic model-to-screen transform.
//!
//! `screen = round(world * scale) + size / 2` on x and y; z is dropped.
//! There is no perspective divide and no clipping, points that land off
//! screen are left for the canvas to discard.
//!
//! Results are pinned to [`COORD_LIMIT`] pixels either side of the origin so
//! a vertex at an extreme (or infinite) position can neither overflow the
//! integer conversion nor turn an edge into billions of off-screen steps.

use crate::math::Point3;

/// Largest absolute screen coordinate a projection will produce.
pub const COORD_LIMIT: i32 = 1 << 20;

/// An integer pixel position (column, row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScreenPoint {
    pub x: i32,
    pub y: i32,
}

impl ScreenPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrthoProjection {
    scale: f32,
    center_x: i32,
    center_y: i32,
}

impl OrthoProjection {
    /// Projection for a `width` x `height` surface, with the model origin at
    /// its center and one model unit spanning `scale` pixels.
    pub fn new(scale: f32, width: u32, height: u32) -> Self {
        Self {
            scale,
            center_x: (width / 2) as i32,
            center_y: (height / 2) as i32,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[inline]
    pub fn project(&self, point: Point3) -> ScreenPoint {
        let scaled = point * self.scale;
        ScreenPoint {
            x: to_screen(scaled.x, self.center_x),
            y: to_screen(scaled.y, self.center_y),
        }
    }
}

/// Offset and clamp in f64, where neither can overflow. NaN maps
/// to 0 through the saturating cast.
#[inline]
fn to_screen(scaled: f32, center: i32) -> i32 {
    let limit = f64::from(COORD_LIMIT);
    (f64::from(scaled.round()) + f64::from(center)).clamp(-limit, limit) as i32
}
