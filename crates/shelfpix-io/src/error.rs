//! Error handling for image reading and writing
//!
//! The codec modules funnel their library-specific failures into a
//! single [`IoError`] so callers moving catalog photos between PNG,
//! JPEG, and WebP handle one error type regardless of format.

use thiserror::Error;

/// Image read or write failure.
#[derive(Error, Debug)]
pub enum IoError {
    /// Underlying file or stream error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The format is not recognized, not enabled via features, or the
    /// image uses a variant of it we do not handle (CMYK JPEG,
    /// animated WebP)
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The byte stream does not describe a well-formed image
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The codec rejected the stream while decoding
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The codec could not serialize the raster
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Raster construction or access failed around the codec call
    #[error("core error: {0}")]
    Core(#[from] shelfpix_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
