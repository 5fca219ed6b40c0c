//! Failures the regression harness itself can hit
//!
//! Comparison mismatches are not errors; they are recorded on the
//! running `RegParams` and reported at cleanup. `TestError` covers
//! only the cases where the harness cannot proceed at all.

use thiserror::Error;

/// Harness failure during a regression run
#[derive(Debug, Error)]
pub enum TestError {
    /// A fixture image under tests/data could not be decoded
    #[error("cannot load fixture '{path}': {message}")]
    FixtureLoad { path: String, message: String },

    /// A regression output could not be encoded to the regout directory
    #[error("cannot write regression output '{path}': {message}")]
    OutputWrite { path: String, message: String },

    /// Golden or regout file access failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for harness operations
pub type TestResult<T> = Result<T, TestError>;
