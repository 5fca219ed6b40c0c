//! JPEG image format support
//!
//! Product photos arrive and leave as JPEG. Decoding goes through
//! `jpeg-decoder`, encoding through `jpeg-encoder` with a caller-chosen
//! quality (catalog retouching saves at quality 95).
//!
//! JPEG has no alpha channel: RGBA images are written with the alpha
//! plane dropped.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType as JpegColorType, Encoder};
use shelfpix_core::{Pix, PixelDepth, color};
use std::io::{Read, Write};

/// Default encode quality for catalog output.
pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Read a JPEG image
///
/// Grayscale sources decode to 8 bpp, color sources to 32 bpp (spp=3).
/// CMYK JPEGs are not supported.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("missing JPEG header info".to_string()))?;

    let width = info.width as u32;
    let height = info.height as u32;

    match info.pixel_format {
        PixelFormat::L8 => {
            let pix = Pix::new(width, height, PixelDepth::Bit8)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                for x in 0..width {
                    let idx = (y * width + x) as usize;
                    pm.set_pixel_unchecked(x, y, data[idx] as u32);
                }
            }
            Ok(pm.into())
        }
        PixelFormat::L16 => {
            let pix = Pix::new(width, height, PixelDepth::Bit8)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                for x in 0..width {
                    let idx = (y * width + x) as usize * 2;
                    // Big-endian 16-bit sample, keep the high byte.
                    pm.set_pixel_unchecked(x, y, data[idx] as u32);
                }
            }
            Ok(pm.into())
        }
        PixelFormat::RGB24 => {
            let pix = Pix::new(width, height, PixelDepth::Bit32)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                for x in 0..width {
                    let idx = (y * width + x) as usize * 3;
                    let pixel = color::compose_rgb(data[idx], data[idx + 1], data[idx + 2]);
                    pm.set_pixel_unchecked(x, y, pixel);
                }
            }
            Ok(pm.into())
        }
        PixelFormat::CMYK32 => Err(IoError::UnsupportedFormat(
            "CMYK JPEG not supported".to_string(),
        )),
    }
}

/// Write a JPEG image at [`DEFAULT_JPEG_QUALITY`]
pub fn write_jpeg<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    write_jpeg_with_quality(pix, writer, DEFAULT_JPEG_QUALITY)
}

/// Write a JPEG image at the given quality (1-100)
///
/// 8 bpp images are written as grayscale, 32 bpp as RGB. An alpha
/// channel, if present, is dropped.
pub fn write_jpeg_with_quality<W: Write>(pix: &Pix, mut writer: W, quality: u8) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    if width > u16::MAX as u32 || height > u16::MAX as u32 {
        return Err(IoError::EncodeError(format!(
            "image too large for JPEG: {}x{}",
            width, height
        )));
    }

    // jpeg-encoder writes through its own JfifWrite trait, so encode
    // into a buffer and hand the bytes to the caller's writer.
    let mut encoded = Vec::new();
    let encoder = Encoder::new(&mut encoded, quality);

    match pix.depth() {
        PixelDepth::Bit8 => {
            let mut buf = Vec::with_capacity((width * height) as usize);
            for y in 0..height {
                for x in 0..width {
                    buf.push(pix.get_pixel_unchecked(x, y) as u8);
                }
            }
            encoder
                .encode(&buf, width as u16, height as u16, JpegColorType::Luma)
                .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
        }
        PixelDepth::Bit32 => {
            let mut buf = Vec::with_capacity((width * height * 3) as usize);
            for y in 0..height {
                for x in 0..width {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    buf.push(r);
                    buf.push(g);
                    buf.push(b);
                }
            }
            encoder
                .encode(&buf, width as u16, height as u16, JpegColorType::Rgb)
                .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))?;
        }
    }

    writer.write_all(&encoded)?;
    Ok(())
}
