//! Bitmap - a full-frame 1-bit raster
//!
//! `Bitmap` stores `height` rows of packed pixels back to back, each row
//! `ceil(width / 8)` bytes with the same low-bit-first layout as
//! [`PackedRow`]. It is used as the output raster of a resize and as the
//! fully materialized source for the whole-image reference resize.
//!
//! # Examples
//!
//! ```
//! use bitscale_core::Bitmap;
//!
//! let mut bm = Bitmap::new(4, 3).unwrap();
//! bm.set(3, 2, true).unwrap();
//! assert!(bm.get(3, 2));
//!
//! // Out-of-range reads yield the background value instead of failing
//! assert!(!bm.get(4, 2));
//! assert!(bm.set(4, 2, true).is_err());
//! ```

use crate::error::{Error, Result};
use crate::row::{PackedRow, bit_get, bit_set, try_alloc_zeroed};

/// Full-frame packed 1-bit raster
///
/// # Memory Layout
///
/// Row-major with a stride of `ceil(width / 8)` bytes. Padding bits at the
/// end of each row are kept at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Bytes per row
    stride: usize,
    /// Packed pixel data
    data: Vec<u8>,
}

impl Bitmap {
    /// Create a new bitmap with all pixels cleared.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0, or
    /// [`Error::AllocationFailed`] if the pixel buffer cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let stride = PackedRow::bytes_for_width(width);
        let bytes = stride
            .checked_mul(height as usize)
            .ok_or(Error::AllocationFailed { bytes: usize::MAX })?;
        let data = try_alloc_zeroed(bytes)?;
        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    /// Build a bitmap by evaluating `f(x, y)` for every pixel.
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Result<Self>
    where
        F: FnMut(u32, u32) -> bool,
    {
        let mut bm = Self::new(width, height)?;
        for y in 0..height {
            let line = &mut bm.data[y as usize * bm.stride..(y as usize + 1) * bm.stride];
            for x in 0..width {
                if f(x, y) {
                    bit_set(line, x, true);
                }
            }
        }
        Ok(bm)
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get dimensions as (width, height)
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// All packed rows, back to back.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The packed bytes of row `y`, or `None` if `y >= height`.
    pub fn row_bytes(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.stride;
        Some(&self.data[start..start + self.stride])
    }

    /// Get the pixel at (x, y).
    ///
    /// Returns `false` (background) for coordinates outside the raster.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        bit_get(&self.data[y as usize * self.stride..], x)
    }

    /// Set the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if the coordinates are outside the raster.
    pub fn set(&mut self, x: u32, y: u32, bit: bool) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        bit_set(&mut self.data[y as usize * self.stride..], x, bit);
        Ok(())
    }

    /// Copy row `y` into `row`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for `y >= height` or
    /// [`Error::WidthMismatch`] if `row` has a different width.
    pub fn copy_row_into(&self, y: u32, row: &mut PackedRow) -> Result<()> {
        let bytes = self.row_bytes(y).ok_or(Error::OutOfBounds {
            x: 0,
            y,
            width: self.width,
            height: self.height,
        })?;
        if row.width() != self.width {
            return Err(Error::WidthMismatch {
                expected: self.width,
                actual: row.width(),
            });
        }
        row.copy_from_slice(bytes)
    }

    /// Overwrite row `y` with `row`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] for `y >= height` or
    /// [`Error::WidthMismatch`] if `row` has a different width.
    pub fn write_row(&mut self, y: u32, row: &PackedRow) -> Result<()> {
        if y >= self.height {
            return Err(Error::OutOfBounds {
                x: 0,
                y,
                width: self.width,
                height: self.height,
            });
        }
        if row.width() != self.width {
            return Err(Error::WidthMismatch {
                expected: self.width,
                actual: row.width(),
            });
        }
        let start = y as usize * self.stride;
        self.data[start..start + self.stride].copy_from_slice(row.as_bytes());
        Ok(())
    }

    /// Number of set pixels
    pub fn count_ones(&self) -> u64 {
        self.data.iter().map(|b| b.count_ones() as u64).sum()
    }

    /// Find the first pixel, in raster order, where `self` and `other` differ.
    ///
    /// Returns `None` if both bitmaps have the same dimensions and pixels.
    /// Bitmaps of different size report `(0, 0)`.
    pub fn first_difference(&self, other: &Bitmap) -> Option<(u32, u32)> {
        if self.dimensions() != other.dimensions() {
            return Some((0, 0));
        }
        let y = (0..self.height).find(|&y| self.row_bytes(y) != other.row_bytes(y))?;
        (0..self.width)
            .find(|&x| self.get(x, y) != other.get(x, y))
            .map(|x| (x, y))
    }
}
