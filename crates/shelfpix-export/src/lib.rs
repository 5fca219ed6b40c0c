//! Repository export for the shelfpix product imaging toolkit
//!
//! Product repositories accumulate hundreds of megabytes of photo
//! assets. This crate copies a tree with the heavyweight content
//! filtered out and packages the result as a zip bundle that fits
//! under upload size limits.

pub mod error;
pub mod tree;
pub mod zip;

pub use error::{ExportError, ExportResult};
pub use tree::{ExportOptions, ExportSummary, dir_size, export_tree};
pub use zip::{zip_dir, zip_dir_to_file};
