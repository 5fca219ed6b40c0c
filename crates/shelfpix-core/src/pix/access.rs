//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! The checked variants return `Option`/`Result`; the unchecked variants
//! panic on out-of-bounds coordinates and are intended for loops that
//! already iterate within the image bounds.

use super::{Pix, PixMut, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Get a pixel value at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.data.index(x, y).map(|i| self.data.data[i])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let i = y as usize * self.data.width as usize + x as usize;
        self.data.data[i]
    }

    /// Get RGB values at (x, y).
    ///
    /// Only valid for 32-bit images; returns `None` for 8 bpp or
    /// out-of-bounds coordinates.
    pub fn get_rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgb)
    }

    /// Get RGBA values at (x, y).
    ///
    /// Only valid for 32-bit images.
    pub fn get_rgba(&self, x: u32, y: u32) -> Option<(u8, u8, u8, u8)> {
        if self.depth() != PixelDepth::Bit32 {
            return None;
        }
        self.get_pixel(x, y).map(color::extract_rgba)
    }
}

impl PixMut {
    /// Get a pixel value at (x, y).
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<u32> {
        self.data.index(x, y).map(|i| self.data.data[i])
    }

    /// Get a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn get_pixel_unchecked(&self, x: u32, y: u32) -> u32 {
        let i = y as usize * self.data.width as usize + x as usize;
        self.data.data[i]
    }

    /// Set a pixel value at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds.
    pub fn set_pixel(&mut self, x: u32, y: u32, val: u32) -> Result<()> {
        match self.data.index(x, y) {
            Some(i) => {
                self.data.data[i] = val;
                Ok(())
            }
            None => Err(Error::IndexOutOfBounds {
                x,
                y,
                width: self.data.width,
                height: self.data.height,
            }),
        }
    }

    /// Set a pixel value without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn set_pixel_unchecked(&mut self, x: u32, y: u32, val: u32) {
        let i = y as usize * self.data.width as usize + x as usize;
        self.data.data[i] = val;
    }

    /// Set an RGB pixel at (x, y) with full opacity.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-32-bit images.
    pub fn set_rgb(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgb(r, g, b))
    }

    /// Set an RGBA pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] for non-32-bit images.
    pub fn set_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) -> Result<()> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        self.set_pixel(x, y, color::compose_rgba(r, g, b, a))
    }
}

/// Byte-for-byte comparison of two images, including depth and spp.
fn pix_data_eq(a: &Pix, b: &Pix) -> bool {
    a.data.width == b.data.width
        && a.data.height == b.data.height
        && a.data.depth == b.data.depth
        && a.data.spp == b.data.spp
        && a.data.data == b.data.data
}

impl PartialEq for Pix {
    fn eq(&self, other: &Self) -> bool {
        pix_data_eq(self, other)
    }
}
