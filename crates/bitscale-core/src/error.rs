//! Error types for bitscale-core
//!
//! Provides a unified error type for the packed raster types.
//! Each variant captures enough context for diagnostics without exposing
//! the packing layout.

use thiserror::Error;

/// bitscale-core error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Invalid raster dimensions
    #[error("invalid raster dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel coordinate outside the raster
    #[error("pixel ({x}, {y}) out of bounds for {width}x{height} raster")]
    OutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Two rasters or rows disagree on width
    #[error("width mismatch: expected {expected}, got {actual}")]
    WidthMismatch { expected: u32, actual: u32 },

    /// Raw byte buffer has the wrong length for the declared size
    #[error("buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Memory allocation failed
    #[error("memory allocation of {bytes} bytes failed")]
    AllocationFailed { bytes: usize },
}

/// Result type alias for bitscale-core operations
pub type Result<T> = std::result::Result<T, Error>;
