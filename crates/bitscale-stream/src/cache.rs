//! Bounded cache of source scanlines
//!
//! The cache holds at most `capacity` rows. Slots are filled in order and,
//! once every slot is bound, a new row evicts the resident row with the
//! smallest index.
//!
//! # Eviction precondition
//!
//! Evicting the smallest index is only safe because rows are fed top to
//! bottom and output rows are requested in non-decreasing order: the
//! oldest resident scanline is then never needed again. This is not a
//! general LRU; a caller that revisits old rows after `capacity` newer rows
//! have been fed will find them gone.

use crate::{StreamError, StreamResult};
use bitscale_core::PackedRow;
use log::trace;

/// One bound cache slot
#[derive(Debug, Clone)]
pub struct CachedRow {
    /// Source scanline currently held
    row: u32,
    /// Pixel data
    bits: PackedRow,
    /// Columns written since the slot was bound
    written: PackedRow,
    /// Number of distinct columns written
    filled: u32,
}

impl CachedRow {
    fn new(width: u32, row: u32) -> StreamResult<Self> {
        Ok(Self {
            row,
            bits: PackedRow::new(width)?,
            written: PackedRow::new(width)?,
            filled: 0,
        })
    }

    /// Rebind to `row`, zeroing the buffers in place.
    fn rebind(&mut self, row: u32) {
        self.row = row;
        self.bits.clear();
        self.written.clear();
        self.filled = 0;
    }

    /// Source row index held by this slot
    #[inline]
    pub fn row_index(&self) -> u32 {
        self.row
    }

    /// Packed pixel data
    #[inline]
    pub fn bits(&self) -> &PackedRow {
        &self.bits
    }

    /// Number of distinct columns fed since the slot was bound
    #[inline]
    pub fn columns_written(&self) -> u32 {
        self.filled
    }

    /// Whether every column of the row has been fed
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.filled == self.bits.width()
    }

    /// Store one pixel.
    ///
    /// Writing the same column twice overwrites the bit and counts once.
    pub fn set(&mut self, x: u32, bit: bool) -> StreamResult<()> {
        self.bits.set(x, bit)?;
        if !self.written.get(x) {
            self.written.set(x, true)?;
            self.filled += 1;
        }
        Ok(())
    }
}

/// Fixed-capacity map from source row index to packed row
#[derive(Debug, Clone)]
pub struct RowCache {
    /// Row width in pixels
    width: u32,
    /// Maximum number of resident rows
    capacity: usize,
    /// Bound slots, in slot order
    slots: Vec<CachedRow>,
}

impl RowCache {
    /// Create an empty cache for rows of `width` pixels.
    ///
    /// Slot buffers are allocated on first use and reused afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidOptions`] if `capacity < 2` or
    /// `width == 0`, or [`StreamError::AllocationFailure`] if the slot table
    /// cannot be allocated.
    pub fn new(width: u32, capacity: usize) -> StreamResult<Self> {
        if capacity < 2 {
            return Err(StreamError::InvalidOptions(format!(
                "cache capacity must be at least 2, got {capacity}"
            )));
        }
        if width == 0 {
            return Err(StreamError::InvalidOptions(
                "cached row width must be non-zero".to_string(),
            ));
        }
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| StreamError::AllocationFailure {
                bytes: capacity * std::mem::size_of::<CachedRow>(),
            })?;
        Ok(Self {
            width,
            capacity,
            slots,
        })
    }

    /// Row width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Maximum number of resident rows
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of rows currently resident
    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no row has been stored yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Get a writable slot bound to `row`.
    ///
    /// An already resident row is returned unchanged. Otherwise the first
    /// empty slot is bound, or, with every slot in use, the slot holding the
    /// smallest row index is evicted and rebound. New and rebound slots are
    /// zero-filled.
    pub fn acquire(&mut self, row: u32) -> StreamResult<&mut CachedRow> {
        if let Some(i) = self.slots.iter().position(|s| s.row == row) {
            return Ok(&mut self.slots[i]);
        }

        if self.slots.len() < self.capacity {
            self.slots.push(CachedRow::new(self.width, row)?);
            let last = self.slots.len() - 1;
            return Ok(&mut self.slots[last]);
        }

        // Strict comparison keeps the first of equal minima
        let mut victim = 0;
        for (i, slot) in self.slots.iter().enumerate().skip(1) {
            if slot.row < self.slots[victim].row {
                victim = i;
            }
        }
        let slot = &mut self.slots[victim];
        trace!("row cache: evicting row {} for row {}", slot.row, row);
        slot.rebind(row);
        Ok(slot)
    }

    /// Look up the slot bound to `row`.
    pub fn find(&self, row: u32) -> Option<&CachedRow> {
        self.slots.iter().find(|s| s.row == row)
    }

    /// Row indices currently resident, in slot order.
    pub fn resident_rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots.iter().map(|s| s.row)
    }
}
