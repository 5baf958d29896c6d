//! I/O error types
//!
//! Provides a unified error type for the decoder and encoder adapters.
//! Each format module maps its underlying library errors into `IoError`
//! variants so that callers only need to handle one error type.

use thiserror::Error;

/// Error type for image decode/encode operations.
///
/// Wraps format-specific decoding/encoding errors as well as standard I/O,
/// core-library and resampler errors raised from inside decoder callbacks.
#[derive(Error, Debug)]
pub enum IoError {
    /// Standard I/O error (file not found, permission denied, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The image format is not supported or not enabled via features
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The image data is structurally invalid
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// A format-specific decoder returned an error
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A format-specific encoder returned an error
    #[error("encode error: {0}")]
    EncodeError(String),

    /// An error from the core library (e.g. row width mismatch)
    #[error("core error: {0}")]
    Core(#[from] bitscale_core::Error),

    /// An error raised by the resampler while consuming decoded pixels
    #[error("stream error: {0}")]
    Stream(#[from] bitscale_stream::StreamError),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
