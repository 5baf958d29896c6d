//! Error types for bitscale-stream
//!
//! Every error aborts the resize in flight: rows may already have been
//! evicted from the cache, so the operation cannot be resumed and must be
//! restarted from the source.

use thiserror::Error;

/// Errors that can occur while streaming a resize
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// Core library error
    #[error("core error: {0}")]
    Core(bitscale_core::Error),

    /// A pixel was fed outside the declared input dimensions
    #[error("coordinate ({x}, {y}) out of range for {width}x{height} input")]
    CoordinateOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// An output row was requested before its input rows were cached
    #[error("input row {in_row} needed by output row {out_row} is not resident")]
    RowNotResident { out_row: u32, in_row: u32 },

    /// A cache slot or output buffer could not be allocated
    #[error("allocation of {bytes} bytes failed")]
    AllocationFailure { bytes: usize },

    /// The source ended before every output row was produced
    #[error("incomplete output: produced {produced} of {expected} rows")]
    IncompleteOutput { produced: u32, expected: u32 },

    /// Zero-sized input or output
    #[error("invalid dimensions: {in_width}x{in_height} -> {out_width}x{out_height}")]
    InvalidDimensions {
        in_width: u32,
        in_height: u32,
        out_width: u32,
        out_height: u32,
    },

    /// Scale options outside their allowed range
    #[error("invalid options: {0}")]
    InvalidOptions(String),

    /// A pixel or end-of-image event arrived before begin-image
    #[error("pixel data received before image start")]
    NotStarted,

    /// A second begin-image event arrived for the same resize
    #[error("image already started")]
    AlreadyStarted,
}

impl From<bitscale_core::Error> for StreamError {
    fn from(err: bitscale_core::Error) -> Self {
        match err {
            bitscale_core::Error::AllocationFailed { bytes } => Self::AllocationFailure { bytes },
            other => Self::Core(other),
        }
    }
}

/// Result type for streaming operations
pub type StreamResult<T> = Result<T, StreamError>;
