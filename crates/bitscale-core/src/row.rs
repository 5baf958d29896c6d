//! PackedRow - a single 1-bit scanline
//!
//! Pixels are packed 8 per byte, low bit first: pixel `x` lives in bit
//! `x % 8` of byte `x / 8`. Padding bits past `width` in the last byte are
//! always kept at zero, so two rows with the same pixels compare equal.
//!
//! # Examples
//!
//! ```
//! use bitscale_core::PackedRow;
//!
//! let mut row = PackedRow::new(10).unwrap();
//! row.set(9, true).unwrap();
//! assert!(row.get(9));
//! assert_eq!(row.as_bytes(), &[0x00, 0x02]);
//!
//! // Reads past the end yield the background value
//! assert!(!row.get(10));
//! ```

use crate::error::{Error, Result};

/// Allocate a zero-filled byte buffer, reporting allocation failure as an
/// error instead of aborting.
pub(crate) fn try_alloc_zeroed(len: usize) -> Result<Vec<u8>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| Error::AllocationFailed { bytes: len })?;
    data.resize(len, 0);
    Ok(data)
}

#[inline]
pub(crate) fn bit_get(data: &[u8], x: u32) -> bool {
    data[(x / 8) as usize] & (1 << (x % 8)) != 0
}

#[inline]
pub(crate) fn bit_set(data: &mut [u8], x: u32, bit: bool) {
    let mask = 1u8 << (x % 8);
    let byte = &mut data[(x / 8) as usize];
    if bit {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// One row of packed 1-bit pixels.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackedRow {
    /// Width in pixels
    width: u32,
    /// Packed pixel data, `bytes_for_width(width)` long
    data: Vec<u8>,
}

impl PackedRow {
    /// Create a new row with all pixels cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if `width` is 0, or
    /// [`Error::AllocationFailed`] if the buffer cannot be allocated.
    pub fn new(width: u32) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidDimension { width, height: 1 });
        }
        let data = try_alloc_zeroed(Self::bytes_for_width(width))?;
        Ok(Self { width, data })
    }

    /// Wrap an existing packed buffer.
    ///
    /// Padding bits beyond `width` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferSize`] if `data` is not exactly
    /// `ceil(width / 8)` bytes long.
    pub fn from_bytes(width: u32, mut data: Vec<u8>) -> Result<Self> {
        if width == 0 {
            return Err(Error::InvalidDimension { width, height: 1 });
        }
        let expected = Self::bytes_for_width(width);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        let tail = width % 8;
        if tail != 0 {
            data[expected - 1] &= (1u8 << tail) - 1;
        }
        Ok(Self { width, data })
    }

    /// Number of bytes needed to hold `width` packed pixels.
    #[inline]
    pub fn bytes_for_width(width: u32) -> usize {
        (width as usize).div_ceil(8)
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// The packed bytes, low bit first.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the pixel at `x`.
    ///
    /// Returns `false` (background) for `x >= width`.
    #[inline]
    pub fn get(&self, x: u32) -> bool {
        x < self.width && bit_get(&self.data, x)
    }

    /// Set the pixel at `x`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `x >= width`.
    #[inline]
    pub fn set(&mut self, x: u32, bit: bool) -> Result<()> {
        if x >= self.width {
            return Err(Error::OutOfBounds {
                x,
                y: 0,
                width: self.width,
                height: 1,
            });
        }
        bit_set(&mut self.data, x, bit);
        Ok(())
    }

    /// Clear every pixel to 0.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Overwrite this row with the contents of `other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WidthMismatch`] if the widths differ.
    pub fn copy_from(&mut self, other: &PackedRow) -> Result<()> {
        if other.width != self.width {
            return Err(Error::WidthMismatch {
                expected: self.width,
                actual: other.width,
            });
        }
        self.data.copy_from_slice(&other.data);
        Ok(())
    }

    /// Number of set pixels
    pub fn count_ones(&self) -> u32 {
        self.data.iter().map(|b| b.count_ones()).sum()
    }

    /// Overwrite this row from packed bytes of the same layout, clearing
    /// padding bits.
    pub(crate) fn copy_from_slice(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() != self.data.len() {
            return Err(Error::BufferSize {
                expected: self.data.len(),
                actual: bytes.len(),
            });
        }
        self.data.copy_from_slice(bytes);
        let tail = self.width % 8;
        if tail != 0
            && let Some(last) = self.data.last_mut()
        {
            *last &= (1u8 << tail) - 1;
        }
        Ok(())
    }
}
