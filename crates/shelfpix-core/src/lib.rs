//! Shelfpix Core - raster container for the product imaging toolkit
//!
//! This crate provides the data structures shared by every shelfpix crate:
//!
//! - [`Pix`] / [`PixMut`] - the image container (immutable / mutable)
//! - [`color`] - channel packing helpers for 32-bit pixels
//! - [`Error`] / [`Result`] - the core error type
//!
//! Image-level operations living here are the ones that belong on the
//! container itself: pixel access, alpha-overlay compositing
//! ([`Pix::overlay_alpha`]) and bilinear scaling ([`Pix::scale_bilinear`]).
//! Color classification and codecs live in their own crates.

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{ImageFormat, Pix, PixMut, PixelDepth};

/// Channel packing helpers for 32-bit RGBA pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit RGBA pixel.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Extract RGBA values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgba(pixel: u32) -> (u8, u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel), alpha(pixel))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_compose_extract_roundtrip() {
            let pixel = compose_rgba(100, 150, 200, 255);
            assert_eq!(extract_rgba(pixel), (100, 150, 200, 255));
        }

        #[test]
        fn test_compose_rgb_opaque() {
            let pixel = compose_rgb(1, 2, 3);
            assert_eq!(alpha(pixel), 255);
            assert_eq!(extract_rgb(pixel), (1, 2, 3));
        }

        #[test]
        fn test_channel_positions() {
            let pixel = compose_rgba(0xAA, 0xBB, 0xCC, 0xDD);
            assert_eq!(pixel, 0xAABBCCDD);
        }
    }
}
