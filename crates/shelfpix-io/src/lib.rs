//! Image I/O for the shelfpix product imaging toolkit
//!
//! Reads and writes the formats product photos actually arrive in:
//! PNG, JPEG, and WebP. Each codec lives behind a cargo feature so a
//! consumer can drop what it does not need.
//!
//! The path-level entry points [`read_image`] and [`write_image`]
//! dispatch on content (magic bytes) for reading and on the requested
//! [`ImageFormat`] for writing.

pub mod error;
pub mod format;

#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "webp-format")]
pub mod webp;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes};
pub use shelfpix_core::ImageFormat;

use shelfpix_core::Pix;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Read an image from a file path
///
/// The format is detected from the file's magic bytes, not its
/// extension. Returns [`IoError::UnsupportedFormat`] when the detected
/// format's codec feature is disabled.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let reader = BufReader::new(File::open(path)?);

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::read_webp(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "format {:?} not enabled",
            other
        ))),
    }
}

/// Write an image to a file path in the given format
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let writer = BufWriter::new(File::create(path)?);

    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::write_jpeg(pix, writer),
        #[cfg(feature = "webp-format")]
        ImageFormat::WebP => webp::write_webp(pix, writer),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "format {:?} not enabled",
            other
        ))),
    }
}
