//! Bilinear scaling
//!
//! Used to size a logo overlay to its target footprint before compositing.
//! Bilinear interpolation is enough for the modest downscales involved;
//! each output pixel samples the four surrounding source pixels weighted
//! by fractional position.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Resize to `width` x `height` with bilinear interpolation.
    ///
    /// All four channels (including alpha) are interpolated independently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either target dimension is
    /// zero, and [`Error::UnsupportedDepth`] for non-32-bit images.
    pub fn scale_bilinear(&self, width: u32, height: u32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }

        let sw = self.width();
        let sh = self.height();

        let out = Pix::new(width, height, PixelDepth::Bit32)?;
        let mut out_mut = out.try_into_mut().unwrap();
        out_mut.set_spp(self.spp())?;

        let x_ratio = sw as f32 / width as f32;
        let y_ratio = sh as f32 / height as f32;

        for dy in 0..height {
            // Sample at pixel centers so edges are not over-weighted.
            let sy = ((dy as f32 + 0.5) * y_ratio - 0.5).max(0.0);
            let y0 = sy as u32;
            let y1 = (y0 + 1).min(sh - 1);
            let fy = sy - y0 as f32;

            for dx in 0..width {
                let sx = ((dx as f32 + 0.5) * x_ratio - 0.5).max(0.0);
                let x0 = sx as u32;
                let x1 = (x0 + 1).min(sw - 1);
                let fx = sx - x0 as f32;

                let p00 = color::extract_rgba(self.get_pixel_unchecked(x0, y0));
                let p10 = color::extract_rgba(self.get_pixel_unchecked(x1, y0));
                let p01 = color::extract_rgba(self.get_pixel_unchecked(x0, y1));
                let p11 = color::extract_rgba(self.get_pixel_unchecked(x1, y1));

                let lerp = |c00: u8, c10: u8, c01: u8, c11: u8| -> u8 {
                    let top = c00 as f32 + fx * (c10 as f32 - c00 as f32);
                    let bot = c01 as f32 + fx * (c11 as f32 - c01 as f32);
                    (top + fy * (bot - top) + 0.5) as u8
                };

                let r = lerp(p00.0, p10.0, p01.0, p11.0);
                let g = lerp(p00.1, p10.1, p01.1, p11.1);
                let b = lerp(p00.2, p10.2, p01.2, p11.2);
                let a = lerp(p00.3, p10.3, p01.3, p11.3);

                out_mut.set_pixel_unchecked(dx, dy, color::compose_rgba(r, g, b, a));
            }
        }

        Ok(out_mut.into())
    }
}
