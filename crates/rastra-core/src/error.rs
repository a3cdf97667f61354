//! Error types for rastra-core
//!
//! Only construction-time problems are errors. Pixel coordinates outside a
//! buffer are clipped silently and numeric degeneracies resolve to
//! documented defaults, so neither shows up here.

use thiserror::Error;

/// rastra-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid buffer dimensions
    #[error("invalid buffer dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Raw pixel data does not match the buffer dimensions
    #[error("pixel data length mismatch: expected {expected} bytes, got {actual}")]
    DataLength { expected: usize, actual: usize },
}

/// Result type alias for rastra-core operations
pub type Result<T> = std::result::Result<T, Error>;
