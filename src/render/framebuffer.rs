//! Owned ARGB8888 pixel buffer.
//!
//! Backs the SDL window between presents and doubles as a headless
//! [`Canvas`] for snapshots and tests.

use std::path::Path;

use image::{ImageResult, Rgb, RgbImage};

use super::canvas::Canvas;
use crate::colors::{self, Color};

pub struct FrameBuffer {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            color_buffer: vec![colors::BACKGROUND.to_argb(); size],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y)
            .map(|index| Color::from_argb(self.color_buffer[index]))
    }

    /// Coordinates of every pixel that currently holds `color`, row by row.
    pub fn pixels_with(&self, color: Color) -> impl Iterator<Item = (i32, i32)> + '_ {
        let argb = color.to_argb();
        let width = self.width as usize;
        self.color_buffer
            .iter()
            .enumerate()
            .filter(move |&(_, &pixel)| pixel == argb)
            .map(move |(index, _)| ((index % width) as i32, (index / width) as i32))
    }

    /// Raw pixel words, row-major, one `u32` per pixel.
    pub fn pixels(&self) -> &[u32] {
        &self.color_buffer
    }

    /// The buffer as bytes in native-endian ARGB8888, ready for upload to a
    /// streaming texture.
    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8, and the
        // byte length covers exactly the initialized words.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let index = y as usize * self.width as usize + x as usize;
            let color = Color::from_argb(self.color_buffer[index]);
            Rgb([color.r, color.g, color.b])
        })
    }

    /// Write the current contents to an image file; the format follows the
    /// file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image().save(path)
    }
}

impl Canvas for FrameBuffer {
    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color.to_argb();
        }
    }

    fn clear(&mut self, color: Color) {
        self.color_buffer.fill(color.to_argb());
    }

    fn present(&mut self) -> Result<(), String> {
        Ok(())
    }
}
