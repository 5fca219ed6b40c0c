//! Code generation error types

use thiserror::Error;

/// Error type for barcode and QR code generation.
#[derive(Error, Debug)]
pub enum CodeError {
    /// The input digit string is malformed (wrong length, non-digits,
    /// or a check digit that does not match)
    #[error("invalid digits: {0}")]
    InvalidDigits(String),

    /// The QR payload could not be encoded
    #[error("QR encode error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// An error from the core library
    #[error("core error: {0}")]
    Core(#[from] shelfpix_core::Error),
}

/// Convenience alias for code generation results.
pub type CodeResult<T> = Result<T, CodeError>;
