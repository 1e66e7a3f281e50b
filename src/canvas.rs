// this_file: src/canvas.rs
//! RGB pixel buffer with fill and alpha-compositing operations.

use crate::color::Rgb;
use crate::error::{Error, Result};

/// Bytes per pixel (R, G, B)
pub const CHANNELS: usize = 3;

/// Row-major RGB canvas. Its size is fixed at allocation.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Canvas {
    /// Allocate a black canvas.
    ///
    /// Fails with [`Error::Allocation`] for zero dimensions or when the
    /// buffer cannot be reserved.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let fail = || Error::Allocation { width, height };
        if width == 0 || height == 0 {
            return Err(fail());
        }
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(fail)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| fail())?;
        pixels.resize(len, 0);

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGB bytes, `width * 3` per row
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Byte offset of `(x, y)`, or `None` outside the canvas
    fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Color at `(x, y)`
    pub fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        let idx = self.index(x, y)?;
        let p = &self.pixels[idx..idx + CHANNELS];
        Some(Rgb::new(p[0], p[1], p[2]))
    }

    /// Fill every pixel with `color`
    pub fn clear(&mut self, color: Rgb) {
        let rgb = color.channels();
        for px in self.pixels.chunks_exact_mut(CHANNELS) {
            px.copy_from_slice(&rgb);
        }
    }

    /// Fill the in-bounds part of a rectangle.
    pub fn fill_rect(&mut self, x0: i64, y0: i64, width: u32, height: u32, color: Rgb) {
        let rgb = color.channels();
        let left = x0.max(0);
        let top = y0.max(0);
        let right = (x0 + i64::from(width)).min(i64::from(self.width));
        let bottom = (y0 + i64::from(height)).min(i64::from(self.height));
        if left >= right || top >= bottom {
            return;
        }

        let row_bytes = self.width as usize * CHANNELS;
        for y in top as usize..bottom as usize {
            let start = y * row_bytes + left as usize * CHANNELS;
            let end = y * row_bytes + right as usize * CHANNELS;
            for px in self.pixels[start..end].chunks_exact_mut(CHANNELS) {
                px.copy_from_slice(&rgb);
            }
        }
    }

    /// Composite `color` over the pixel at `(x, y)` with `alpha` in [0, 1].
    ///
    /// Each channel becomes `alpha * fg + (1 - alpha) * old`, truncated.
    /// Coordinates outside the canvas are ignored.
    pub fn blend_pixel(&mut self, x: i64, y: i64, color: Rgb, alpha: f32) {
        let Some(idx) = self.index(x, y) else {
            return;
        };
        let alpha = alpha.clamp(0.0, 1.0);
        for (dst, fg) in self.pixels[idx..idx + CHANNELS]
            .iter_mut()
            .zip(color.channels())
        {
            *dst = blend_channel(*dst, fg, alpha);
        }
    }
}

/// `alpha * fg + (1 - alpha) * bg`, truncated to u8
pub fn blend_channel(bg: u8, fg: u8, alpha: f32) -> u8 {
    (alpha * f32::from(fg) + (1.0 - alpha) * f32::from(bg)) as u8
}
