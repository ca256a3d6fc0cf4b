// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Owned RGB pixel buffers.

use alloc::vec;
use alloc::vec::Vec;

use crate::types::{Color, PixelRect};

/// A device-independent, row-major RGB image.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Returned by [`PixelBuffer::from_pixels`] when the pixel count does not match the size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferSizeError {
    /// Pixels required by the requested size.
    pub expected: usize,
    /// Pixels supplied.
    pub actual: usize,
}

impl core::fmt::Display for BufferSizeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "pixel buffer needs {} pixels, got {}",
            self.expected, self.actual
        )
    }
}

impl core::error::Error for BufferSizeError {}

impl PixelBuffer {
    /// Create a buffer filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels, for example a cached frame to render into.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Result<Self, BufferSizeError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(BufferSizeError {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The rectangle covered by this buffer, anchored at the origin.
    pub fn rect(&self) -> PixelRect {
        PixelRect::from_size(self.width, self.height)
    }

    /// Whether the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// All pixels, row-major.
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, if in bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set the pixel at `(x, y)`; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill `rect`, clipped to the buffer.
    pub fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let r = rect.intersect(&self.rect());
        for y in r.top..r.bottom {
            for x in r.left..r.right {
                self.set(x, y, color);
            }
        }
    }

    /// Draw a 1-pixel outline just inside `rect`, clipped to the buffer.
    pub fn frame_rect(&mut self, rect: PixelRect, color: Color) {
        if rect.is_empty() {
            return;
        }
        let (l, t, r, b) = (rect.left, rect.top, rect.right - 1, rect.bottom - 1);
        self.fill_rect(PixelRect::new(l, t, r + 1, t + 1), color);
        self.fill_rect(PixelRect::new(l, b, r + 1, b + 1), color);
        self.fill_rect(PixelRect::new(l, t, l + 1, b + 1), color);
        self.fill_rect(PixelRect::new(r, t, r + 1, b + 1), color);
    }

    /// A darkened copy, keeping `percent` of each channel.
    ///
    /// Handy for showing the previous frame as stale while a new layout is computed.
    pub fn dimmed(&self, percent: u8) -> Self {
        let factor = f64::from(percent.min(100)) / 100.0;
        Self {
            width: self.width,
            height: self.height,
            pixels: self.pixels.iter().map(|c| c.scale(factor)).collect(),
        }
    }

    /// Packed `RGB8` bytes, row-major, for blitting.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        (x < self.width as usize && y < self.height as usize).then(|| y * self.width as usize + x)
    }
}
