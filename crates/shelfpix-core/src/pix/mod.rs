//! Pix - the raster image container
//!
//! `Pix` is the image type shared by every shelfpix crate. Product photos
//! are 32-bit RGB or RGBA images; rendered barcodes and QR codes are 8-bit
//! grayscale.
//!
//! # Pixel layout
//!
//! - One `u32` element per pixel, row-major
//! - For 32-bit images the word is `0xRRGGBBAA` (red in MSB, alpha in LSB)
//! - For 8-bit images the gray value lives in the low byte
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership). To modify pixel
//! data, convert to `PixMut` via [`Pix::try_into_mut`] or [`Pix::to_mut`],
//! then convert back with `Into<Pix>`.

mod access;
pub mod blend;
pub mod scale;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Pixel depth (bits per pixel)
///
/// Only the two depths the toolkit actually processes are representable:
/// 8-bit grayscale for rendered codes and 32-bit RGB/RGBA for photographs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum PixelDepth {
    /// 8-bit grayscale
    Bit8 = 8,
    /// 32-bit RGB or RGBA
    Bit32 = 32,
}

impl PixelDepth {
    /// Create `PixelDepth` from a raw bit count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDepth`] if `bits` is not 8 or 32.
    pub fn from_bits(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(PixelDepth::Bit8),
            32 => Ok(PixelDepth::Bit32),
            _ => Err(Error::InvalidDepth(bits)),
        }
    }

    /// Get the number of bits per pixel.
    pub fn bits(self) -> u32 {
        self as u32
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// PNG format
    Png,
    /// JFIF JPEG format
    Jpeg,
    /// WebP format
    WebP,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::WebP => "webp",
        }
    }
}

/// Internal pixel data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Depth in bits per pixel
    depth: PixelDepth,
    /// Samples per pixel (1 for grayscale, 3 for RGB, 4 for RGBA)
    spp: u32,
    /// The image data, one element per pixel
    data: Vec<u32>,
}

/// The main image container
///
/// `Pix` uses reference counting via `Arc` for efficient cloning.
///
/// # Examples
///
/// ```
/// use shelfpix_core::{Pix, PixelDepth};
///
/// let pix = Pix::new(640, 480, PixelDepth::Bit32).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    data: Arc<PixData>,
}

impl Pix {
    /// Create a new zero-filled image.
    ///
    /// For 32 bpp the samples-per-pixel defaults to 3 (RGB); use
    /// [`PixMut::set_spp`] to mark an image as RGBA.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width` or `height` is zero.
    pub fn new(width: u32, height: u32, depth: PixelDepth) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let spp = match depth {
            PixelDepth::Bit8 => 1,
            PixelDepth::Bit32 => 3,
        };
        Ok(Self {
            data: Arc::new(PixData {
                width,
                height,
                depth,
                spp,
                data: vec![0; width as usize * height as usize],
            }),
        })
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.data.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.data.height
    }

    /// Pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.data.depth
    }

    /// Samples per pixel (1 = gray, 3 = RGB, 4 = RGBA).
    #[inline]
    pub fn spp(&self) -> u32 {
        self.data.spp
    }

    /// Whether this image carries an alpha channel.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.data.spp == 4
    }

    /// Convert to a mutable image without copying if this is the only
    /// reference, otherwise hand the (shared) `Pix` back.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Pix> {
        match Arc::try_unwrap(self.data) {
            Ok(data) => Ok(PixMut { data }),
            Err(data) => Err(Pix { data }),
        }
    }

    /// Get a mutable copy of this image (always copies the pixel data).
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            data: (*self.data).clone(),
        }
    }
}

/// Mutable image, obtained from [`Pix::try_into_mut`] or [`Pix::to_mut`]
#[derive(Debug)]
pub struct PixMut {
    data: PixData,
}

impl PixMut {
    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.data.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.data.height
    }

    /// Pixel depth.
    #[inline]
    pub fn depth(&self) -> PixelDepth {
        self.data.depth
    }

    /// Samples per pixel.
    #[inline]
    pub fn spp(&self) -> u32 {
        self.data.spp
    }

    /// Set the samples-per-pixel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSpp`] unless `spp` is 1 for 8 bpp, or
    /// 3 or 4 for 32 bpp.
    pub fn set_spp(&mut self, spp: u32) -> Result<()> {
        let valid = match self.data.depth {
            PixelDepth::Bit8 => spp == 1,
            PixelDepth::Bit32 => spp == 3 || spp == 4,
        };
        if !valid {
            return Err(Error::InvalidSpp {
                spp,
                depth: self.data.depth.bits(),
            });
        }
        self.data.spp = spp;
        Ok(())
    }

    /// Fill every pixel with the same raw value.
    pub fn fill(&mut self, val: u32) {
        self.data.data.fill(val);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            data: Arc::new(pix.data),
        }
    }
}

// Shared index math for the access layer.
impl PixData {
    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.width && y < self.height {
            Some(y as usize * self.width as usize + x as usize)
        } else {
            None
        }
    }
}
