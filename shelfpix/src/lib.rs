//! shelfpix - Product imaging toolkit for e-commerce catalogs
//!
//! # Overview
//!
//! shelfpix covers the image pipeline behind a product catalog:
//!
//! - Region-limited color remapping (cap and label recoloring)
//! - Image I/O (PNG, JPEG, WebP) and format conversion
//! - Logo compositing and bilinear scaling
//! - UPC-A barcode and QR code rendering for packaging artwork
//! - Filtered repository export and zip packaging
//!
//! # Example
//!
//! ```
//! use shelfpix::{Pix, PixelDepth};
//!
//! // Create a new 32-bit color image
//! let pix = Pix::new(640, 480, PixelDepth::Bit32).unwrap();
//! assert_eq!(pix.width(), 640);
//! assert_eq!(pix.height(), 480);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use shelfpix_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use shelfpix_codes as codes;
pub use shelfpix_color as color;
pub use shelfpix_export as export;
pub use shelfpix_io as io;
