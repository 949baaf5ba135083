//! Integer line rasterization (Bresenham).

use std::iter::FusedIterator;

use super::canvas::Canvas;
use super::projection::ScreenPoint;
use crate::colors::Color;

/// The pixels of the 8-connected line from `start` to `end`, both included.
///
/// Yields exactly `max(|dx|, |dy|) + 1` points, beginning with `start` and
/// finishing on `end`. A zero-length line yields `start` once.
///
/// Plain Bresenham resolves ties (the ideal line passing exactly halfway
/// between two pixels) towards the starting point, so walking a line
/// backwards can light a different pixel. Ties here are resolved towards
/// the lexicographically smaller endpoint regardless of direction, which
/// makes the point set of `(a, b)` identical to that of `(b, a)`.
#[derive(Clone, Debug)]
pub struct BresenhamLine {
    x: i32,
    y: i32,
    end: ScreenPoint,
    dx: i64,
    dy: i64,
    x_step: i32,
    y_step: i32,
    err: i64,
    remaining: usize,
    from_smaller: bool,
}

impl BresenhamLine {
    pub fn new(start: ScreenPoint, end: ScreenPoint) -> Self {
        // Absolute distance to travel on each axis.
        let dx = (i64::from(end.x) - i64::from(start.x)).abs();
        let dy = (i64::from(end.y) - i64::from(start.y)).abs();

        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            // +1 or -1 so the same loop covers every octant.
            x_step: if start.x < end.x { 1 } else { -1 },
            y_step: if start.y < end.y { 1 } else { -1 },
            // Positive error favors an x step, negative a y step.
            err: dx - dy,
            remaining: dx.max(dy) as usize + 1,
            from_smaller: start <= end,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = ScreenPoint;

    #[inline]
    fn next(&mut self) -> Option<ScreenPoint> {
        if self.remaining == 0 {
            return None;
        }
        let point = ScreenPoint::new(self.x, self.y);
        self.remaining -= 1;

        if self.remaining == 0 {
            debug_assert_eq!(point, self.end);
            return Some(point);
        }

        // Doubling keeps the half-pixel threshold in integers. Both tests
        // can pass on the same iteration, giving a diagonal step.
        let e2 = 2 * self.err;
        let (step_x, step_y) = if self.from_smaller {
            (e2 > -self.dy, e2 < self.dx)
        } else {
            (e2 >= -self.dy, e2 <= self.dx)
        };
        if step_x {
            self.err -= self.dy;
            self.x += self.x_step;
        }
        if step_y {
            self.err += self.dx;
            self.y += self.y_step;
        }

        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for BresenhamLine {}

impl FusedIterator for BresenhamLine {}

/// Rasterize the segment `start`..=`end` onto `canvas` in a single color.
#[inline]
pub fn draw_line<C: Canvas + ?Sized>(
    canvas: &mut C,
    start: ScreenPoint,
    end: ScreenPoint,
    color: Color,
) {
    for point in BresenhamLine::new(start, end) {
        canvas.set_pixel(point.x, point.y, color);
    }
}
