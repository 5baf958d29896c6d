//! Streaming bilinear resampler
//!
//! [`StreamScaler`] owns the geometry of one resize and the row cache it
//! fills. Source pixels arrive through [`StreamScaler::feed`]; an output row
//! can be computed with [`StreamScaler::process_row`] as soon as both of the
//! source rows it samples are resident.
//!
//! # Example
//!
//! ```
//! use bitscale_stream::{ScaleOptions, StreamScaler};
//!
//! let mut scaler = StreamScaler::new(4, 4, 2, 2, ScaleOptions::default()).unwrap();
//! for y in 0..2 {
//!     for x in 0..4 {
//!         scaler.feed(x, y, true).unwrap();
//!     }
//! }
//! // Output row 0 samples source rows 0 and 1
//! assert!(scaler.row_ready(0));
//! assert!(!scaler.row_ready(1));
//! let row = scaler.process_row(0).unwrap();
//! assert_eq!(row.as_bytes(), &[0b11]);
//! ```

use crate::cache::RowCache;
use crate::kernel::{ScaleGeometry, interpolate_row};
use crate::{ScaleOptions, StreamError, StreamResult};
use bitscale_core::PackedRow;
use log::{debug, error, warn};

/// Resampling state for one resize
#[derive(Debug, Clone)]
pub struct StreamScaler {
    geometry: ScaleGeometry,
    options: ScaleOptions,
    cache: RowCache,
    /// Highest source row fed so far
    highest_row: Option<u32>,
}

impl StreamScaler {
    /// Create a resampler for an `in_width x in_height` source and an
    /// `out_width x out_height` target.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidDimensions`] if any dimension is 0 and
    /// [`StreamError::InvalidOptions`] if `options` fails validation.
    pub fn new(
        in_width: u32,
        in_height: u32,
        out_width: u32,
        out_height: u32,
        options: ScaleOptions,
    ) -> StreamResult<Self> {
        options.validate()?;
        let geometry = ScaleGeometry::new(in_width, in_height, out_width, out_height)?;
        let cache = RowCache::new(in_width, options.cache_capacity)?;
        debug!(
            "stream scaler: {}x{} -> {}x{}, ratios ({}, {}), {} cached rows",
            in_width,
            in_height,
            out_width,
            out_height,
            geometry.x_ratio(),
            geometry.y_ratio(),
            options.cache_capacity
        );
        Ok(Self {
            geometry,
            options,
            cache,
            highest_row: None,
        })
    }

    /// Dimensions and scale ratios
    #[inline]
    pub fn geometry(&self) -> &ScaleGeometry {
        &self.geometry
    }

    /// Options the resampler was built with
    #[inline]
    pub fn options(&self) -> &ScaleOptions {
        &self.options
    }

    /// The row cache
    #[inline]
    pub fn cache(&self) -> &RowCache {
        &self.cache
    }

    /// Store one source pixel.
    ///
    /// Feeding a coordinate twice overwrites the earlier bit.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::CoordinateOutOfRange`] for coordinates outside
    /// the source, leaving the cache untouched.
    pub fn feed(&mut self, x: u32, y: u32, bit: bool) -> StreamResult<()> {
        let (width, height) = (self.geometry.in_width(), self.geometry.in_height());
        if x >= width || y >= height {
            return Err(StreamError::CoordinateOutOfRange {
                x,
                y,
                width,
                height,
            });
        }
        if let Some(highest) = self.highest_row
            && y < highest
            && self.cache.find(y).is_none()
        {
            warn!("row {y} fed after row {highest} and is no longer resident");
        }
        self.cache.acquire(y)?.set(x, bit)?;
        self.highest_row = Some(self.highest_row.map_or(y, |h| h.max(y)));
        Ok(())
    }

    /// Upper source row sampled by output row `r`.
    #[inline]
    pub fn first_input_row(&self, r: u32) -> u32 {
        self.geometry.first_input_row(r)
    }

    /// Last source row output row `r` depends on.
    #[inline]
    pub fn required_input_row(&self, r: u32) -> u32 {
        self.geometry.required_input_row(r)
    }

    /// Whether output row `r` can be computed now.
    ///
    /// Both sampled source rows must be resident, and complete when row
    /// completeness tracking is on. A sampled row past the bottom of the
    /// source reads as background and is always available.
    pub fn row_ready(&self, r: u32) -> bool {
        if r >= self.geometry.out_height() {
            return false;
        }
        let y0 = self.first_input_row(r);
        self.row_available(y0) && self.row_available(y0 + 1)
    }

    fn row_available(&self, y: u32) -> bool {
        if y >= self.geometry.in_height() {
            return true;
        }
        self.cache
            .find(y)
            .is_some_and(|slot| !self.options.track_row_completeness || slot.is_complete())
    }

    /// Source row `y` for output row `r`, `None` past the bottom edge.
    fn input_row(&self, r: u32, y: u32) -> StreamResult<Option<&PackedRow>> {
        if y >= self.geometry.in_height() {
            return Ok(None);
        }
        match self.cache.find(y) {
            Some(slot) if !self.options.track_row_completeness || slot.is_complete() => {
                Ok(Some(slot.bits()))
            }
            Some(slot) => {
                error!(
                    "output row {r}: input row {y} has {} of {} columns",
                    slot.columns_written(),
                    self.geometry.in_width()
                );
                Err(StreamError::RowNotResident {
                    out_row: r,
                    in_row: y,
                })
            }
            None => {
                error!("output row {r}: input row {y} not found");
                Err(StreamError::RowNotResident {
                    out_row: r,
                    in_row: y,
                })
            }
        }
    }

    /// Compute output row `r` into a caller-provided buffer.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::RowNotResident`] if a sampled source row is
    /// missing (or incomplete with tracking on), and a core error if `r` is
    /// past the last output row or `out` has the wrong width.
    pub fn process_row_into(&self, r: u32, out: &mut PackedRow) -> StreamResult<()> {
        let (out_width, out_height) = (self.geometry.out_width(), self.geometry.out_height());
        if r >= out_height {
            return Err(bitscale_core::Error::OutOfBounds {
                x: 0,
                y: r,
                width: out_width,
                height: out_height,
            }
            .into());
        }
        if out.width() != out_width {
            return Err(bitscale_core::Error::WidthMismatch {
                expected: out_width,
                actual: out.width(),
            }
            .into());
        }

        let y0 = self.first_input_row(r);
        let upper = self.input_row(r, y0)?;
        let lower = self.input_row(r, y0 + 1)?;
        interpolate_row(
            &self.geometry,
            r,
            self.options.gray_threshold,
            |x| upper.is_some_and(|row| row.get(x)),
            |x| lower.is_some_and(|row| row.get(x)),
            out,
        )
    }

    /// Compute output row `r` into a newly allocated row.
    pub fn process_row(&self, r: u32) -> StreamResult<PackedRow> {
        let mut out = PackedRow::new(self.geometry.out_width())?;
        self.process_row_into(r, &mut out)?;
        Ok(out)
    }
}
