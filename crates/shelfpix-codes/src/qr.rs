//! QR code rendering
//!
//! Batch-verification labels carry a QR code pointing at the
//! verification URL for a SKU. Encoding goes through the `qrcode`
//! crate; rendering produces an 8 bpp image with black modules on a
//! white quiet zone.

use crate::CodeResult;
use qrcode::{EcLevel, QrCode};
use shelfpix_core::{Pix, PixelDepth};

/// Rendering options for QR codes
#[derive(Debug, Clone)]
pub struct QrOptions {
    /// Error correction level
    pub ec_level: EcLevel,
    /// Size of one module in pixels
    pub module_size: u32,
    /// Quiet zone around the symbol, in modules
    pub border: u32,
}

impl Default for QrOptions {
    fn default() -> Self {
        // High error correction so the label survives print wear.
        Self {
            ec_level: EcLevel::H,
            module_size: 10,
            border: 4,
        }
    }
}

/// Render a QR code for the given payload
///
/// The symbol version is chosen automatically to fit the payload at
/// the requested error correction level.
pub fn render_qr(data: &str, options: &QrOptions) -> CodeResult<Pix> {
    let code = QrCode::with_error_correction_level(data, options.ec_level)?;

    let modules = code.width() as u32;
    let size = (modules + 2 * options.border) * options.module_size;

    let pix = Pix::new(size, size, PixelDepth::Bit8)?;
    let mut pm = pix.try_into_mut().unwrap();
    pm.fill(255);

    let colors = code.to_colors();
    let offset = options.border * options.module_size;
    for my in 0..modules {
        for mx in 0..modules {
            if colors[(my * modules + mx) as usize] != qrcode::Color::Dark {
                continue;
            }
            let x0 = offset + mx * options.module_size;
            let y0 = offset + my * options.module_size;
            for y in y0..y0 + options.module_size {
                for x in x0..x0 + options.module_size {
                    pm.set_pixel_unchecked(x, y, 0);
                }
            }
        }
    }

    Ok(pm.into())
}
