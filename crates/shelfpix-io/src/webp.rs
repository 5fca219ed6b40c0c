//! WebP image format support
//!
//! Catalog uploads get converted to WebP to cut storage. Reading handles
//! both lossy and lossless sources; animated WebP (multiple frames) is
//! not supported.
//!
//! # Notes
//!
//! - Writing: currently only lossless encoding is supported by the
//!   underlying library

use crate::{IoError, IoResult};
use image_webp::{ColorType, WebPDecoder, WebPEncoder};
use shelfpix_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Read, Seek, Write};

/// Read a WebP image
///
/// Reads the first frame of a WebP image. Animated WebP images return
/// an error.
///
/// The resulting Pix is 32 bpp with spp=4 if the source has an alpha
/// channel, spp=3 otherwise.
pub fn read_webp<R: Read + BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = WebPDecoder::new(reader)
        .map_err(|e| IoError::DecodeError(format!("WebP decode error: {}", e)))?;

    if decoder.is_animated() {
        return Err(IoError::UnsupportedFormat(
            "animated WebP not supported".to_string(),
        ));
    }

    let (width, height) = decoder.dimensions();
    let has_alpha = decoder.has_alpha();

    let buffer_size = decoder.output_buffer_size().ok_or_else(|| {
        IoError::DecodeError("failed to determine output buffer size".to_string())
    })?;

    let mut buffer = vec![0u8; buffer_size];
    let mut decoder = decoder;
    decoder
        .read_image(&mut buffer)
        .map_err(|e| IoError::DecodeError(format!("WebP read error: {}", e)))?;

    let pix = Pix::new(width, height, PixelDepth::Bit32)?;
    let mut pm = pix.try_into_mut().unwrap();

    if has_alpha {
        pm.set_spp(4)?;
        for y in 0..height {
            for x in 0..width {
                let idx = ((y * width + x) * 4) as usize;
                let pixel = color::compose_rgba(
                    buffer[idx],
                    buffer[idx + 1],
                    buffer[idx + 2],
                    buffer[idx + 3],
                );
                pm.set_pixel_unchecked(x, y, pixel);
            }
        }
    } else {
        for y in 0..height {
            for x in 0..width {
                let idx = ((y * width + x) * 3) as usize;
                let pixel =
                    color::compose_rgb(buffer[idx], buffer[idx + 1], buffer[idx + 2]);
                pm.set_pixel_unchecked(x, y, pixel);
            }
        }
    }

    Ok(pm.into())
}

/// WebP encoding options
#[derive(Debug, Clone)]
pub struct WebPOptions {
    /// Use predictor transform (improves compression for lossless encoding)
    pub use_predictor_transform: bool,
}

impl Default for WebPOptions {
    fn default() -> Self {
        Self {
            use_predictor_transform: true,
        }
    }
}

/// Write a WebP image with default options
pub fn write_webp<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    write_webp_with_options(pix, writer, &WebPOptions::default())
}

/// Write a WebP image with options
///
/// 8 bpp grayscale input is expanded to RGB before encoding. 32 bpp
/// input is written as RGB or RGBA depending on samples-per-pixel.
pub fn write_webp_with_options<W: Write>(
    pix: &Pix,
    writer: W,
    options: &WebPOptions,
) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (buffer, color_type) = match pix.depth() {
        PixelDepth::Bit8 => {
            let mut buffer = Vec::with_capacity((width * height * 3) as usize);
            for y in 0..height {
                for x in 0..width {
                    let gray = pix.get_pixel_unchecked(x, y) as u8;
                    buffer.push(gray);
                    buffer.push(gray);
                    buffer.push(gray);
                }
            }
            (buffer, ColorType::Rgb8)
        }
        PixelDepth::Bit32 if pix.spp() == 4 => {
            let mut buffer = Vec::with_capacity((width * height * 4) as usize);
            for y in 0..height {
                for x in 0..width {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    buffer.push(r);
                    buffer.push(g);
                    buffer.push(b);
                    buffer.push(a);
                }
            }
            (buffer, ColorType::Rgba8)
        }
        PixelDepth::Bit32 => {
            let mut buffer = Vec::with_capacity((width * height * 3) as usize);
            for y in 0..height {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    buffer.push(r);
                    buffer.push(g);
                    buffer.push(b);
                }
            }
            (buffer, ColorType::Rgb8)
        }
    };

    let mut encoder = WebPEncoder::new(writer);

    // EncoderParams is non-exhaustive, so start from Default and modify
    let mut params = image_webp::EncoderParams::default();
    params.use_predictor_transform = options.use_predictor_transform;
    encoder.set_params(params);

    encoder
        .encode(&buffer, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("WebP encode error: {}", e)))?;

    Ok(())
}
