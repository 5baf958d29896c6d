//! Resize configuration

use crate::{StreamError, StreamResult};

/// Number of source rows kept resident by default
pub const DEFAULT_CACHE_CAPACITY: usize = 5;

/// Interpolated gray level (of 255) at or above which an output pixel is white
pub const DEFAULT_GRAY_THRESHOLD: u8 = 180;

/// Channel sum (of 3 * 255) above which a decoded color pixel is white
pub const DEFAULT_BLACK_LEVEL: u16 = 350;

/// Largest meaningful black level: three saturated 8-bit channels
pub const MAX_BLACK_LEVEL: u16 = 3 * 255;

/// Options for a streaming resize
///
/// Built with [`Default`] and adjusted with the chained setters:
///
/// ```
/// use bitscale_stream::ScaleOptions;
///
/// let opts = ScaleOptions::default().cache_capacity(3).gray_threshold(128);
/// assert_eq!(opts.cache_capacity, 3);
/// assert!(opts.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleOptions {
    /// Number of source rows the row cache holds (at least 2)
    pub cache_capacity: usize,
    /// Gray level at or above which an interpolated pixel becomes white
    pub gray_threshold: u8,
    /// Channel sum above which decoder adapters report a white pixel
    pub black_level: u16,
    /// Only use a cached row for interpolation once every column was fed
    pub track_row_completeness: bool,
}

impl Default for ScaleOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            gray_threshold: DEFAULT_GRAY_THRESHOLD,
            black_level: DEFAULT_BLACK_LEVEL,
            track_row_completeness: true,
        }
    }
}

impl ScaleOptions {
    /// Set the row cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Set the output gray threshold
    pub fn gray_threshold(mut self, threshold: u8) -> Self {
        self.gray_threshold = threshold;
        self
    }

    /// Set the decoder black level
    pub fn black_level(mut self, level: u16) -> Self {
        self.black_level = level;
        self
    }

    /// Enable or disable per-row completeness tracking
    pub fn track_row_completeness(mut self, track: bool) -> Self {
        self.track_row_completeness = track;
        self
    }

    /// Check that every option is in range.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidOptions`] if the cache holds fewer than
    /// two rows or the black level exceeds `3 * 255`.
    pub fn validate(&self) -> StreamResult<()> {
        if self.cache_capacity < 2 {
            return Err(StreamError::InvalidOptions(format!(
                "cache capacity must be at least 2, got {}",
                self.cache_capacity
            )));
        }
        if self.black_level > MAX_BLACK_LEVEL {
            return Err(StreamError::InvalidOptions(format!(
                "black level must be at most {}, got {}",
                MAX_BLACK_LEVEL, self.black_level
            )));
        }
        Ok(())
    }
}

/// Reduce a decoded color sample to one bit.
///
/// A pixel is white when the sum of its three channels exceeds
/// `black_level`.
///
/// ```
/// use bitscale_stream::{DEFAULT_BLACK_LEVEL, pixel_is_set};
///
/// assert!(pixel_is_set(255, 255, 255, DEFAULT_BLACK_LEVEL));
/// assert!(!pixel_is_set(100, 100, 150, DEFAULT_BLACK_LEVEL));
/// ```
#[inline]
pub fn pixel_is_set(r: u8, g: u8, b: u8, black_level: u16) -> bool {
    r as u16 + g as u16 + b as u16 > black_level
}
