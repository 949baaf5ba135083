//! Capabilities the renderer draws through and the frame loop polls.
//!
//! Surface creation, memory and bounds checking belong to the implementor;
//! the rasterizer hands over any integer coordinate, including ones outside
//! the visible area, and expects them to be clipped here.

use crate::colors::Color;

/// A 2D surface that accepts individual pixel writes.
pub trait Canvas {
    /// Write a single pixel. Out-of-bounds coordinates are ignored.
    fn set_pixel(&mut self, x: i32, y: i32, color: Color);

    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Color);

    /// Make everything written since the last present visible.
    fn present(&mut self) -> Result<(), String>;
}

/// Source of the per-frame quit signal.
pub trait EventSource {
    /// Drain pending events, returning true if the user asked to quit.
    fn poll_quit(&mut self) -> bool;
}
