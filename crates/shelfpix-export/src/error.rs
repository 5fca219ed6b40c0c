//! Export error types

use thiserror::Error;

/// Error type for tree export and zip packaging.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal failed
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),

    /// A path could not be expressed relative to the export root
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// An entry size, offset, or entry count no longer fits the
    /// archive format's fields
    #[error("archive limit exceeded: {0}")]
    ArchiveLimit(String),
}

/// Convenience alias for export results.
pub type ExportResult<T> = Result<T, ExportError>;
