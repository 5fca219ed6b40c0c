//! Error types for shelfpix-color

use thiserror::Error;

/// Errors that can occur during color replacement operations
#[derive(Debug, Error)]
pub enum ColorError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] shelfpix_core::Error),

    /// The image does not carry the three color channels the operation
    /// needs (e.g. an 8-bit grayscale image)
    #[error("unsupported channel layout: expected 32 bpp RGB/RGBA, got {actual} bpp")]
    UnsupportedChannelLayout { actual: u32 },

    /// Malformed region bounds
    #[error("invalid region: {0}")]
    InvalidRegion(String),
}

/// Result type for color operations
pub type ColorResult<T> = Result<T, ColorError>;
