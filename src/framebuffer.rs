//! RGBA pixel buffer for raster output.
//!
//! Pixels are tightly packed in row-major order. All writes go through
//! alpha blending and respect an optional clip rectangle, so rasterizers can
//! emit coverage without bounds checks of their own.

use crate::color::Rgba;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use trueno::Vector;

/// Integer pixel bounds, half-open on the right and bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelBounds {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

/// Framebuffer with clip-aware alpha blending.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    /// Width in pixels.
    width: u32,
    /// Height in pixels.
    height: u32,
    /// RGBA pixels in row-major order, 4 bytes each.
    pixels: Vec<u8>,
    /// Writable region; the whole buffer when `None`.
    clip: Option<PixelBounds>,
}

impl Framebuffer {
    /// Create a new transparent framebuffer.
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is zero.
    ///
    /// # Example
    ///
    /// ```
    /// use trueno_radar::framebuffer::Framebuffer;
    ///
    /// let fb = Framebuffer::new(800, 600).unwrap();
    /// assert_eq!(fb.width(), 800);
    /// assert_eq!(fb.height(), 600);
    /// ```
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let size = (width as usize) * (height as usize) * 4;
        Ok(Self {
            width,
            height,
            pixels: vec![0; size],
            clip: None,
        })
    }

    /// Get the width in pixels.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height in pixels.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Get the raw pixel data.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Restrict subsequent writes to `clip` (in pixel coordinates).
    ///
    /// Partially covered pixels on the clip edge are included.
    pub fn set_clip(&mut self, clip: Option<Rect>) {
        self.clip = clip.map(|r| {
            let w = f64::from(self.width);
            let h = f64::from(self.height);
            PixelBounds {
                x0: r.x.floor().clamp(0.0, w) as u32,
                y0: r.y.floor().clamp(0.0, h) as u32,
                x1: r.max_x().ceil().clamp(0.0, w) as u32,
                y1: r.max_y().ceil().clamp(0.0, h) as u32,
            }
        });
    }

    /// Fill every pixel with `color`, ignoring the clip.
    pub fn clear(&mut self, color: Rgba) {
        let rgba = color.to_array();
        for chunk in self.pixels.chunks_exact_mut(4) {
            chunk.copy_from_slice(&rgba);
        }
    }

    /// Get the color at a specific pixel coordinate.
    ///
    /// Returns `None` if the coordinates are out of bounds.
    #[must_use]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = self.pixel_index(x, y);
        Some(Rgba::new(
            self.pixels[idx],
            self.pixels[idx + 1],
            self.pixels[idx + 2],
            self.pixels[idx + 3],
        ))
    }

    /// Blend `color` at `(x, y)` scaled by `coverage` in `[0, 1]`.
    ///
    /// Uses the "over" operator. Out-of-bounds and clipped pixels are skipped.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgba, coverage: f32) {
        if !self.writable(x, y) {
            return;
        }
        let src_a = f32::from(color.a) / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let idx = self.pixel_index(x as u32, y as u32);
        let dst_a = f32::from(self.pixels[idx + 3]) / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);

        let blend = |src: u8, dst: u8| -> u8 {
            let src_f = f32::from(src) / 255.0;
            let dst_f = f32::from(dst) / 255.0;
            let out = (src_f * src_a + dst_f * dst_a * (1.0 - src_a)) / out_a;
            (out * 255.0).round().clamp(0.0, 255.0) as u8
        };

        self.pixels[idx] = blend(color.r, self.pixels[idx]);
        self.pixels[idx + 1] = blend(color.g, self.pixels[idx + 1]);
        self.pixels[idx + 2] = blend(color.b, self.pixels[idx + 2]);
        self.pixels[idx + 3] = (out_a * 255.0).round() as u8;
    }

    /// Blend a horizontal run of pixels `[x0, x1)` on row `y`.
    pub fn blend_span(&mut self, y: i64, x0: i64, x1: i64, color: Rgba) {
        let lo = x0.max(0);
        let hi = x1.min(i64::from(self.width));
        for x in lo..hi {
            self.blend_pixel(x, y, color, 1.0);
        }
    }

    /// Fraction of pixels that differ from `background`.
    #[must_use]
    pub fn ink_ratio(&self, background: Rgba) -> f64 {
        let bg = background.to_array();
        let inked = self
            .pixels
            .chunks_exact(4)
            .filter(|px| *px != bg.as_slice())
            .count();
        inked as f64 / (self.width as f64 * self.height as f64)
    }

    /// Luminance statistics `(min, max, mean)` using SIMD-accelerated reduction.
    #[must_use]
    pub fn luminance_stats(&self) -> (f32, f32, f32) {
        // ITU-R BT.709 luminance
        let luminances: Vec<f32> = self
            .pixels
            .chunks_exact(4)
            .map(|px| {
                0.2126 * f32::from(px[0]) + 0.7152 * f32::from(px[1]) + 0.0722 * f32::from(px[2])
            })
            .collect();

        let vec = Vector::from_vec(luminances);
        let min = vec.min().unwrap_or(0.0);
        let max = vec.max().unwrap_or(255.0);
        let mean = vec.mean().unwrap_or(127.5);
        (min, max, mean)
    }

    fn writable(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return false;
        }
        match self.clip {
            Some(c) => {
                x >= i64::from(c.x0)
                    && x < i64::from(c.x1)
                    && y >= i64::from(c.y0)
                    && y < i64::from(c.y1)
            }
            None => true,
        }
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y as usize) * (self.width as usize) + (x as usize)) * 4
    }
}
