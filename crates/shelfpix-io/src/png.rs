//! PNG image format support

use crate::{IoError, IoResult};
use png::{BitDepth, ColorType, Decoder, Encoder};
use shelfpix_core::{Pix, PixelDepth, color};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Grayscale sources decode to 8 bpp; everything else decodes to 32 bpp
/// with spp=4 when the source carries alpha. 16-bit sample depths are
/// reduced to 8 bits, and indexed images are expanded through their
/// palette.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let decoder = Decoder::new(reader);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    // Palette for indexed images, expanded inline below.
    let palette: Option<Vec<u8>> = reader.info().palette.as_ref().map(|p| p.to_vec());

    match (color_type, bit_depth) {
        (ColorType::Grayscale, BitDepth::Eight) => {
            let pix = Pix::new(width, height, PixelDepth::Bit8)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    pm.set_pixel_unchecked(x, y, data[row_start + x as usize] as u32);
                }
            }
            Ok(pm.into())
        }
        (ColorType::Grayscale, BitDepth::Sixteen) => {
            let pix = Pix::new(width, height, PixelDepth::Bit8)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * 2;
                    pm.set_pixel_unchecked(x, y, data[idx] as u32);
                }
            }
            Ok(pm.into())
        }
        (ColorType::GrayscaleAlpha, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            let pix = Pix::new(width, height, PixelDepth::Bit32)?;
            let mut pm = pix.try_into_mut().unwrap();
            pm.set_spp(4)?;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    let (g, a) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2])
                    } else {
                        (data[idx], data[idx + 1])
                    };
                    pm.set_pixel_unchecked(x, y, color::compose_rgba(g, g, g, a));
                }
            }
            Ok(pm.into())
        }
        (ColorType::Rgb, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 6 } else { 3 };
            let pix = Pix::new(width, height, PixelDepth::Bit32)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    let (r, g, b) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2])
                    };
                    pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
            }
            Ok(pm.into())
        }
        (ColorType::Rgba, _) => {
            let samples = if bit_depth == BitDepth::Sixteen { 8 } else { 4 };
            let pix = Pix::new(width, height, PixelDepth::Bit32)?;
            let mut pm = pix.try_into_mut().unwrap();
            pm.set_spp(4)?;
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x as usize * samples;
                    let (r, g, b, a) = if bit_depth == BitDepth::Sixteen {
                        (data[idx], data[idx + 2], data[idx + 4], data[idx + 6])
                    } else {
                        (data[idx], data[idx + 1], data[idx + 2], data[idx + 3])
                    };
                    pm.set_pixel_unchecked(x, y, color::compose_rgba(r, g, b, a));
                }
            }
            Ok(pm.into())
        }
        (ColorType::Indexed, BitDepth::Eight) => {
            let palette = palette
                .ok_or_else(|| IoError::InvalidData("indexed PNG without palette".to_string()))?;
            let pix = Pix::new(width, height, PixelDepth::Bit32)?;
            let mut pm = pix.try_into_mut().unwrap();
            for y in 0..height {
                let row_start = y as usize * bytes_per_row;
                for x in 0..width {
                    let i = data[row_start + x as usize] as usize * 3;
                    let (r, g, b) = match palette.get(i..i + 3) {
                        Some(rgb) => (rgb[0], rgb[1], rgb[2]),
                        None => {
                            return Err(IoError::InvalidData(format!(
                                "palette index {} out of range",
                                i / 3
                            )));
                        }
                    };
                    pm.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
            }
            Ok(pm.into())
        }
        _ => Err(IoError::UnsupportedFormat(format!(
            "unsupported PNG format: {:?} {:?}",
            color_type, bit_depth
        ))),
    }
}

/// Write a PNG image
///
/// 8 bpp images are written as grayscale; 32 bpp as RGB or RGBA
/// depending on samples-per-pixel.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, samples) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 => {
            if pix.spp() == 4 {
                (ColorType::Rgba, 4)
            } else {
                (ColorType::Rgb, 3)
            }
        }
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let mut data = vec![0u8; width as usize * height as usize * samples];
    for y in 0..height {
        let row_start = y as usize * width as usize * samples;
        for x in 0..width {
            let idx = row_start + x as usize * samples;
            match color_type {
                ColorType::Grayscale => {
                    data[idx] = pix.get_pixel_unchecked(x, y) as u8;
                }
                ColorType::Rgb => {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                }
                ColorType::Rgba => {
                    let (r, g, b, a) = color::extract_rgba(pix.get_pixel_unchecked(x, y));
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                    data[idx + 3] = a;
                }
                _ => unreachable!(),
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_png_roundtrip_grayscale() {
        let pix = Pix::new(10, 10, PixelDepth::Bit8).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        for y in 0..10 {
            for x in 0..10 {
                pm.set_pixel(x, y, (x + y) * 10).unwrap();
            }
        }
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.depth(), PixelDepth::Bit8);
        assert_eq!(pix2, pix);
    }

    #[test]
    fn test_png_roundtrip_rgb() {
        let pix = Pix::new(5, 5, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_rgb(0, 0, 255, 0, 0).unwrap();
        pm.set_rgb(1, 1, 0, 255, 0).unwrap();
        pm.set_rgb(2, 2, 0, 0, 255).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.get_rgb(0, 0), Some((255, 0, 0)));
        assert_eq!(pix2.get_rgb(1, 1), Some((0, 255, 0)));
        assert_eq!(pix2.get_rgb(2, 2), Some((0, 0, 255)));
    }

    #[test]
    fn test_png_roundtrip_rgba() {
        let pix = Pix::new(4, 4, PixelDepth::Bit32).unwrap();
        let mut pm = pix.try_into_mut().unwrap();
        pm.set_spp(4).unwrap();
        pm.set_rgba(1, 2, 10, 20, 30, 128).unwrap();
        let pix: Pix = pm.into();

        let mut buffer = Vec::new();
        write_png(&pix, &mut buffer).unwrap();

        let pix2 = read_png(Cursor::new(buffer)).unwrap();
        assert_eq!(pix2.spp(), 4);
        assert_eq!(pix2.get_rgba(1, 2), Some((10, 20, 30, 128)));
    }
}
