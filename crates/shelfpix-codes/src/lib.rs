//! Product code generation for the shelfpix product imaging toolkit
//!
//! Renders the two codes that go on packaging artwork: UPC-A retail
//! barcodes and QR codes for batch verification.

pub mod error;
pub mod qr;
pub mod upca;

pub use error::{CodeError, CodeResult};
pub use qr::{QrOptions, render_qr};
pub use upca::{UpcaOptions, check_digit, encode_upca, render_upca};

pub use qrcode::EcLevel;
