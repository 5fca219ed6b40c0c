//! Region-limited color replacement
//!
//! Recolors a horizontal band of a product photograph: every pixel inside
//! the band whose color matches a classification rule has its RGB channels
//! overwritten with a fixed replacement color. Everything else, including
//! the alpha channel of matched pixels, is copied unchanged.
//!
//! The motivating use is swapping the color of a bottle cap that occupies
//! the top band of a packshot. The cap band and the thresholds are tuned
//! visually per shot, so both are caller-supplied parameters here, never
//! constants.
//!
//! # Examples
//!
//! ```
//! use shelfpix_color::{recolor, Band, ColorRule};
//! use shelfpix_core::{Pix, PixelDepth};
//!
//! // Turn gold pixels in the top 450 rows dark charcoal.
//! let pix = Pix::new(100, 100, PixelDepth::Bit32).unwrap();
//! let rule = ColorRule::Range {
//!     low: (150, 120, 0),
//!     high: (255, 230, 120),
//! };
//! let out = recolor(&pix, Band::new(0, 450), &rule, (30, 30, 30)).unwrap();
//! assert_eq!(out.width(), pix.width());
//! ```

use crate::{ColorError, ColorResult};
use shelfpix_core::{Pix, PixelDepth, color};

/// A horizontal band of image rows, `[top, bottom)`
///
/// The band always spans the full image width. Bounds are clamped to the
/// image at use time, so a band may be built before the image dimensions
/// are known; a band that is empty after clamping is legal and recoloring
/// with it returns the input unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    /// First row inside the band
    pub top: i32,
    /// First row below the band (exclusive)
    pub bottom: i32,
}

impl Band {
    /// Create a band covering rows `[top, bottom)`.
    pub fn new(top: i32, bottom: i32) -> Self {
        Self { top, bottom }
    }

    /// A band covering every row of an image with the given height.
    pub fn full(height: u32) -> Self {
        Self {
            top: 0,
            bottom: height.min(i32::MAX as u32) as i32,
        }
    }

    /// Create a band from relative positions within an image.
    ///
    /// `top` and `bottom` are fractions of the image height in `[0.0, 1.0]`.
    /// Cap regions are usually tuned this way ("the top 15% of the shot")
    /// so the same band definition carries across image resolutions.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidRegion`] if either fraction is not
    /// finite or lies outside `[0.0, 1.0]`.
    pub fn from_fractions(top: f32, bottom: f32, height: u32) -> ColorResult<Self> {
        for (name, f) in [("top", top), ("bottom", bottom)] {
            if !f.is_finite() || !(0.0..=1.0).contains(&f) {
                return Err(ColorError::InvalidRegion(format!(
                    "{name} fraction {f} not in [0.0, 1.0]"
                )));
            }
        }
        Ok(Self {
            top: (top * height as f32) as i32,
            bottom: (bottom * height as f32) as i32,
        })
    }

    /// Clamp to `[0, height]` and return the concrete row range.
    ///
    /// Returns `None` when the clamped band is empty.
    fn clamped(self, height: u32) -> Option<(u32, u32)> {
        let top = self.top.clamp(0, height.min(i32::MAX as u32) as i32) as u32;
        let bottom = self.bottom.clamp(0, height.min(i32::MAX as u32) as i32) as u32;
        if top < bottom { Some((top, bottom)) } else { None }
    }
}

/// Pixel classification rule deciding which colors get replaced
///
/// Two policies are in production use and they are not interchangeable:
/// a closed box rejects saturated highlights that the one-sided
/// comparisons accept. Callers pick whichever matched their shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRule {
    /// Match iff every channel lies within its inclusive `[low, high]` band.
    Range {
        /// Per-channel lower bounds (r, g, b), inclusive
        low: (u8, u8, u8),
        /// Per-channel upper bounds (r, g, b), inclusive
        high: (u8, u8, u8),
    },
    /// Match iff `r > red_floor` AND `g > green_floor` AND
    /// `b < blue_ceiling`. Unbounded above on red and green.
    FloorCeiling {
        /// Red must exceed this
        red_floor: u8,
        /// Green must exceed this
        green_floor: u8,
        /// Blue must stay below this
        blue_ceiling: u8,
    },
}

impl ColorRule {
    /// Evaluate the rule against one pixel's RGB values.
    #[inline]
    pub fn matches(&self, r: u8, g: u8, b: u8) -> bool {
        match *self {
            ColorRule::Range { low, high } => {
                (low.0..=high.0).contains(&r)
                    && (low.1..=high.1).contains(&g)
                    && (low.2..=high.2).contains(&b)
            }
            ColorRule::FloorCeiling {
                red_floor,
                green_floor,
                blue_ceiling,
            } => r > red_floor && g > green_floor && b < blue_ceiling,
        }
    }
}

/// Replace matching colors within a band of an image.
///
/// For every pixel whose row lies in `band` (clamped to the image), the
/// pixel's RGB values are tested against `rule`; on a match the R, G and B
/// channels are set to `replacement` and the alpha channel, if present, is
/// left untouched. Pixels outside the band and non-matching pixels are
/// copied unchanged. The output has the input's exact dimensions, depth
/// and samples-per-pixel.
///
/// The operation is a pure single-pass transform: identical inputs always
/// produce identical output, and an empty band returns a byte-identical
/// copy of the input.
///
/// # Errors
///
/// Returns [`ColorError::UnsupportedChannelLayout`] if the image is not
/// 32 bpp. The check runs before any pixel work, so a failed call never
/// produces a partially recolored image.
pub fn recolor(
    pix: &Pix,
    band: Band,
    rule: &ColorRule,
    replacement: (u8, u8, u8),
) -> ColorResult<Pix> {
    if pix.depth() != PixelDepth::Bit32 {
        return Err(ColorError::UnsupportedChannelLayout {
            actual: pix.depth().bits(),
        });
    }

    let mut out = pix.to_mut();

    let Some((top, bottom)) = band.clamped(pix.height()) else {
        return Ok(out.into());
    };

    let (nr, ng, nb) = replacement;
    let width = pix.width();
    for y in top..bottom {
        for x in 0..width {
            let pixel = out.get_pixel_unchecked(x, y);
            let (r, g, b, a) = color::extract_rgba(pixel);
            if rule.matches(r, g, b) {
                out.set_pixel_unchecked(x, y, color::compose_rgba(nr, ng, nb, a));
            }
        }
    }

    Ok(out.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GOLD_RANGE: ColorRule = ColorRule::Range {
        low: (150, 120, 0),
        high: (255, 230, 120),
    };

    const GOLD_FLOOR: ColorRule = ColorRule::FloorCeiling {
        red_floor: 140,
        green_floor: 110,
        blue_ceiling: 130,
    };

    fn white_image(w: u32, h: u32) -> Pix {
        let pix = Pix::new(w, h, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.fill(color::compose_rgb(255, 255, 255));
        pm.into()
    }

    #[test]
    fn test_range_rule_matches_box() {
        assert!(GOLD_RANGE.matches(200, 150, 20));
        assert!(GOLD_RANGE.matches(150, 120, 0)); // inclusive low
        assert!(GOLD_RANGE.matches(255, 230, 120)); // inclusive high
        assert!(!GOLD_RANGE.matches(149, 150, 20));
        assert!(!GOLD_RANGE.matches(200, 231, 20));
    }

    #[test]
    fn test_floor_ceiling_rule_open_above() {
        assert!(GOLD_FLOOR.matches(255, 255, 0));
        assert!(!GOLD_FLOOR.matches(140, 150, 20)); // strict floor
        assert!(!GOLD_FLOOR.matches(200, 150, 130)); // strict ceiling
    }

    #[test]
    fn test_policies_diverge_on_saturated_gold() {
        // Bright highlight: above the range box but past both floors.
        let (r, g, b) = (250, 200, 10);
        let range = ColorRule::Range {
            low: (150, 120, 0),
            high: (230, 230, 120),
        };
        assert!(!range.matches(r, g, b));
        assert!(GOLD_FLOOR.matches(r, g, b));
    }

    #[test]
    fn test_band_clamping() {
        assert_eq!(Band::new(-5, 3).clamped(10), Some((0, 3)));
        assert_eq!(Band::new(2, 50).clamped(10), Some((2, 10)));
        assert_eq!(Band::new(4, 4).clamped(10), None);
        assert_eq!(Band::new(7, 2).clamped(10), None);
    }

    #[test]
    fn test_band_from_fractions() {
        let band = Band::from_fractions(0.0, 0.15, 2752).unwrap();
        assert_eq!(band.top, 0);
        assert_eq!(band.bottom, 412);

        assert!(Band::from_fractions(-0.1, 0.5, 100).is_err());
        assert!(Band::from_fractions(0.0, 1.5, 100).is_err());
        assert!(Band::from_fractions(0.0, f32::NAN, 100).is_err());
    }

    #[test]
    fn test_recolor_only_matching_pixels_in_band() {
        let pix = white_image(4, 4);
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(2, 1, 200, 150, 20).unwrap();
        pm.set_rgb(1, 3, 200, 150, 20).unwrap(); // below the band
        let pix: Pix = pm.into();

        let out = recolor(&pix, Band::new(0, 2), &GOLD_RANGE, (30, 30, 30)).unwrap();

        assert_eq!(out.get_rgb(2, 1), Some((30, 30, 30)));
        assert_eq!(out.get_rgb(1, 3), Some((200, 150, 20)));
        assert_eq!(out.get_rgb(0, 0), Some((255, 255, 255)));
    }

    #[test]
    fn test_recolor_empty_band_is_identity() {
        let pix = white_image(4, 4);
        let out = recolor(&pix, Band::new(2, 2), &GOLD_RANGE, (30, 30, 30)).unwrap();
        assert_eq!(out, pix);
    }

    #[test]
    fn test_recolor_preserves_alpha() {
        let pix = Pix::new(2, 2, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(4).unwrap();
        pm.set_rgba(0, 0, 200, 150, 20, 99).unwrap();
        let pix: Pix = pm.into();

        let out = recolor(&pix, Band::full(2), &GOLD_RANGE, (30, 30, 30)).unwrap();
        assert_eq!(out.get_rgba(0, 0), Some((30, 30, 30, 99)));
        assert_eq!(out.spp(), 4);
    }

    #[test]
    fn test_recolor_rejects_grayscale() {
        let pix = Pix::new(4, 4, PixelDepth::Bit8).unwrap();
        let err = recolor(&pix, Band::full(4), &GOLD_RANGE, (0, 0, 0)).unwrap_err();
        assert!(matches!(
            err,
            ColorError::UnsupportedChannelLayout { actual: 8 }
        ));
    }

    #[test]
    fn test_recolor_idempotent_when_replacement_outside_match_set() {
        assert!(!GOLD_RANGE.matches(30, 30, 30));

        let pix = white_image(4, 4);
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(1, 1, 200, 150, 20).unwrap();
        let pix: Pix = pm.into();

        let once = recolor(&pix, Band::full(4), &GOLD_RANGE, (30, 30, 30)).unwrap();
        let twice = recolor(&once, Band::full(4), &GOLD_RANGE, (30, 30, 30)).unwrap();
        assert_eq!(once, twice);
    }
}
