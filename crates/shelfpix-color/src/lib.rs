//! Shelfpix Color - region-limited color replacement
//!
//! This crate holds the recoloring operation used to retouch product
//! photography:
//!
//! - **Recoloring** ([`recolor`]): replace every pixel in a horizontal
//!   band whose color matches a classification rule with a fixed color,
//!   leaving everything else (including alpha) untouched.
//! - **Classification rules** ([`ColorRule`]): a closed per-channel range
//!   box, or independent floor/ceiling comparisons.
//! - **Bands** ([`Band`]): row-bounded regions, absolute or as fractions
//!   of image height.

pub mod error;
pub mod recolor;

// Re-export core types
pub use shelfpix_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

// Re-export recoloring types and functions
pub use recolor::{Band, ColorRule, recolor};
