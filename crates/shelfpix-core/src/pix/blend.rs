//! Alpha-overlay compositing
//!
//! Pastes one raster image onto another at a fixed offset, weighting each
//! overlay pixel by its alpha channel. This is how a corrected logo is
//! placed onto a bottle photograph: the overlay's transparent margin leaves
//! the photo untouched, opaque pixels replace it, and antialiased edge
//! pixels blend.

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Composite `overlay` onto this image with per-pixel alpha blending.
    ///
    /// The overlay's top-left corner lands at `(x, y)` in base coordinates;
    /// the offset may be negative and overlay regions falling outside the
    /// base are clipped. For each covered pixel,
    /// `out = overlay * a/255 + base * (1 - a/255)` per channel. The base
    /// image's own alpha channel, if present, is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] unless both images are 32 bpp.
    pub fn overlay_alpha(&self, overlay: &Pix, x: i32, y: i32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if overlay.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(overlay.depth().bits()));
        }

        let mut out = self.to_mut();

        let bw = self.width() as i64;
        let bh = self.height() as i64;
        for oy in 0..overlay.height() as i64 {
            let by = y as i64 + oy;
            if by < 0 || by >= bh {
                continue;
            }
            for ox in 0..overlay.width() as i64 {
                let bx = x as i64 + ox;
                if bx < 0 || bx >= bw {
                    continue;
                }

                let over = overlay.get_pixel_unchecked(ox as u32, oy as u32);
                let (or, og, ob, oa) = color::extract_rgba(over);
                // Overlays loaded from RGB sources carry no alpha plane;
                // treat them as fully opaque.
                let oa = if overlay.spp() == 4 { oa } else { 255 };

                if oa == 0 {
                    continue;
                }

                let base = out.get_pixel_unchecked(bx as u32, by as u32);
                let (br, bg, bb, ba) = color::extract_rgba(base);

                let (nr, ng, nb) = if oa == 255 {
                    (or, og, ob)
                } else {
                    (
                        blend_channel(or, br, oa),
                        blend_channel(og, bg, oa),
                        blend_channel(ob, bb, oa),
                    )
                };

                out.set_pixel_unchecked(bx as u32, by as u32, color::compose_rgba(nr, ng, nb, ba));
            }
        }

        Ok(out.into())
    }
}

/// Blend one channel: `over * a/255 + base * (255-a)/255`, rounded.
#[inline]
fn blend_channel(over: u8, base: u8, alpha: u8) -> u8 {
    let a = alpha as u32;
    ((over as u32 * a + base as u32 * (255 - a) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_rgb(w: u32, h: u32, r: u8, g: u8, b: u8) -> Pix {
        let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.fill(color::compose_rgb(r, g, b));
        pm.into()
    }

    fn solid_rgba(w: u32, h: u32, r: u8, g: u8, b: u8, a: u8) -> Pix {
        let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(4).unwrap();
        pm.fill(color::compose_rgba(r, g, b, a));
        pm.into()
    }

    #[test]
    fn test_opaque_overlay_replaces() {
        let base = solid_rgb(8, 8, 200, 200, 200);
        let logo = solid_rgba(2, 2, 10, 20, 30, 255);
        let out = base.overlay_alpha(&logo, 3, 3).unwrap();

        assert_eq!(out.get_rgb(3, 3), Some((10, 20, 30)));
        assert_eq!(out.get_rgb(4, 4), Some((10, 20, 30)));
        assert_eq!(out.get_rgb(2, 3), Some((200, 200, 200)));
        assert_eq!(out.get_rgb(5, 5), Some((200, 200, 200)));
    }

    #[test]
    fn test_transparent_overlay_is_noop() {
        let base = solid_rgb(4, 4, 50, 60, 70);
        let logo = solid_rgba(4, 4, 255, 255, 255, 0);
        let out = base.overlay_alpha(&logo, 0, 0).unwrap();
        assert_eq!(out, base);
    }

    #[test]
    fn test_half_alpha_blends() {
        let base = solid_rgb(2, 2, 0, 0, 0);
        let logo = solid_rgba(2, 2, 255, 255, 255, 128);
        let out = base.overlay_alpha(&logo, 0, 0).unwrap();
        let (r, _, _) = out.get_rgb(0, 0).unwrap();
        assert!((r as i32 - 128).abs() <= 1);
    }

    #[test]
    fn test_negative_offset_clips() {
        let base = solid_rgb(4, 4, 9, 9, 9);
        let logo = solid_rgba(3, 3, 1, 2, 3, 255);
        let out = base.overlay_alpha(&logo, -2, -2).unwrap();
        assert_eq!(out.get_rgb(0, 0), Some((1, 2, 3)));
        assert_eq!(out.get_rgb(1, 1), Some((9, 9, 9)));
        assert_eq!(out.width(), 4);
        assert_eq!(out.height(), 4);
    }

    #[test]
    fn test_rgb_overlay_treated_opaque() {
        let base = solid_rgb(4, 4, 9, 9, 9);
        let logo = solid_rgb(2, 2, 1, 2, 3);
        let out = base.overlay_alpha(&logo, 0, 0).unwrap();
        assert_eq!(out.get_rgb(1, 1), Some((1, 2, 3)));
    }

    #[test]
    fn test_grayscale_rejected() {
        let base = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let logo = solid_rgb(2, 2, 0, 0, 0);
        assert!(base.overlay_alpha(&logo, 0, 0).is_err());
        assert!(logo.overlay_alpha(&base, 0, 0).is_err());
    }

    #[test]
    fn test_base_alpha_preserved() {
        let base = solid_rgba(2, 2, 5, 5, 5, 77);
        let logo = solid_rgba(2, 2, 200, 200, 200, 255);
        let out = base.overlay_alpha(&logo, 0, 0).unwrap();
        assert_eq!(out.get_rgba(0, 0), Some((200, 200, 200, 77)));
    }
}
