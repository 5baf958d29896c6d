//! Decoder-facing glue
//!
//! A push-style decoder reports an image through [`DecodeCallbacks`]:
//! `on_begin` once with the source size, `on_pixel` for every pixel in
//! raster order, then `on_end`. [`FeedDriver`] implements those callbacks,
//! feeds each pixel into a [`StreamScaler`] and, whenever a source row is
//! finished, emits every output row that has become computable into a
//! [`RowSink`].

use crate::{ScaleOptions, StreamError, StreamResult, StreamScaler};
use bitscale_core::{Bitmap, PackedRow};
use log::{debug, error, trace};

/// Events produced by a push-style image decoder
pub trait DecodeCallbacks {
    /// Image header: source dimensions are now known.
    fn on_begin(&mut self, width: u32, height: u32) -> StreamResult<()>;

    /// One decoded pixel, already reduced to a bit (set = white).
    fn on_pixel(&mut self, x: u32, y: u32, value: bool) -> StreamResult<()>;

    /// End of image data.
    fn on_end(&mut self) -> StreamResult<()>;
}

/// Destination for produced output rows
pub trait RowSink {
    /// Called once with the output size before the first row.
    fn begin(&mut self, _width: u32, _height: u32) -> StreamResult<()> {
        Ok(())
    }

    /// Store output row `y`.
    fn write_row(&mut self, y: u32, row: &PackedRow) -> StreamResult<()>;
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn begin(&mut self, width: u32, height: u32) -> StreamResult<()> {
        (**self).begin(width, height)
    }

    fn write_row(&mut self, y: u32, row: &PackedRow) -> StreamResult<()> {
        (**self).write_row(y, row)
    }
}

impl RowSink for Bitmap {
    fn begin(&mut self, width: u32, height: u32) -> StreamResult<()> {
        if self.width() != width {
            return Err(bitscale_core::Error::WidthMismatch {
                expected: width,
                actual: self.width(),
            }
            .into());
        }
        if self.height() != height {
            return Err(bitscale_core::Error::InvalidDimension {
                width: self.width(),
                height: self.height(),
            }
            .into());
        }
        Ok(())
    }

    fn write_row(&mut self, y: u32, row: &PackedRow) -> StreamResult<()> {
        Bitmap::write_row(self, y, row)?;
        Ok(())
    }
}

/// Output raster allocated when the image begins
#[derive(Debug, Default)]
pub struct RasterSink {
    bitmap: Option<Bitmap>,
}

impl RasterSink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The raster, once allocated
    pub fn bitmap(&self) -> Option<&Bitmap> {
        self.bitmap.as_ref()
    }

    /// Take the completed raster.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::NotStarted`] if no image was begun.
    pub fn into_bitmap(self) -> StreamResult<Bitmap> {
        self.bitmap.ok_or(StreamError::NotStarted)
    }
}

impl RowSink for RasterSink {
    fn begin(&mut self, width: u32, height: u32) -> StreamResult<()> {
        self.bitmap = Some(Bitmap::new(width, height)?);
        Ok(())
    }

    fn write_row(&mut self, y: u32, row: &PackedRow) -> StreamResult<()> {
        let bitmap = self.bitmap.as_mut().ok_or(StreamError::NotStarted)?;
        bitmap.write_row(y, row)?;
        Ok(())
    }
}

/// Feeds decoder events into a [`StreamScaler`] and drains finished
/// output rows into a sink.
///
/// # Example
///
/// ```
/// use bitscale_stream::{DecodeCallbacks, FeedDriver, ScaleOptions};
///
/// let mut driver = FeedDriver::to_bitmap(2, 2, ScaleOptions::default());
/// driver.on_begin(4, 4).unwrap();
/// for y in 0..4 {
///     for x in 0..4 {
///         driver.on_pixel(x, y, true).unwrap();
///     }
/// }
/// driver.on_end().unwrap();
/// let bitmap = driver.finish().unwrap().into_bitmap().unwrap();
/// assert_eq!(bitmap.count_ones(), 4);
/// ```
#[derive(Debug)]
pub struct FeedDriver<S> {
    out_width: u32,
    out_height: u32,
    options: ScaleOptions,
    sink: S,
    scaler: Option<StreamScaler>,
    /// Reused output row buffer
    out_row: Option<PackedRow>,
    /// Next output row to produce
    next_row: u32,
}

impl FeedDriver<RasterSink> {
    /// Driver that collects the output into a [`Bitmap`].
    pub fn to_bitmap(out_width: u32, out_height: u32, options: ScaleOptions) -> Self {
        Self::new(out_width, out_height, options, RasterSink::new())
    }
}

impl<S: RowSink> FeedDriver<S> {
    /// Create a driver for an `out_width x out_height` target.
    ///
    /// The resampler itself is built when the decoder reports the source
    /// size.
    pub fn new(out_width: u32, out_height: u32, options: ScaleOptions, sink: S) -> Self {
        Self {
            out_width,
            out_height,
            options,
            sink,
            scaler: None,
            out_row: None,
            next_row: 0,
        }
    }

    /// Number of output rows emitted so far
    #[inline]
    pub fn rows_produced(&self) -> u32 {
        self.next_row
    }

    /// The resampler, once the image has begun
    #[inline]
    pub fn scaler(&self) -> Option<&StreamScaler> {
        self.scaler.as_ref()
    }

    /// The output sink
    #[inline]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Hand back the sink after every output row was produced.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::IncompleteOutput`] if rows are missing.
    pub fn finish(self) -> StreamResult<S> {
        if self.next_row < self.out_height {
            return Err(StreamError::IncompleteOutput {
                produced: self.next_row,
                expected: self.out_height,
            });
        }
        Ok(self.sink)
    }

    /// Emit output rows while the next one is ready.
    fn drain_ready_rows(&mut self) -> StreamResult<()> {
        let Self {
            scaler,
            sink,
            out_row,
            next_row,
            out_height,
            ..
        } = self;
        let (Some(scaler), Some(out_row)) = (scaler.as_ref(), out_row.as_mut()) else {
            return Err(StreamError::NotStarted);
        };
        while *next_row < *out_height && scaler.row_ready(*next_row) {
            scaler.process_row_into(*next_row, out_row)?;
            sink.write_row(*next_row, out_row)?;
            trace!(
                "output row {} from input rows {}..={}",
                next_row,
                scaler.first_input_row(*next_row),
                scaler.required_input_row(*next_row)
            );
            *next_row += 1;
        }
        Ok(())
    }
}

impl<S: RowSink> DecodeCallbacks for FeedDriver<S> {
    fn on_begin(&mut self, width: u32, height: u32) -> StreamResult<()> {
        if self.scaler.is_some() {
            return Err(StreamError::AlreadyStarted);
        }
        let scaler = StreamScaler::new(
            width,
            height,
            self.out_width,
            self.out_height,
            self.options.clone(),
        )?;
        self.out_row = Some(PackedRow::new(self.out_width)?);
        self.sink.begin(self.out_width, self.out_height)?;
        self.scaler = Some(scaler);
        Ok(())
    }

    fn on_pixel(&mut self, x: u32, y: u32, value: bool) -> StreamResult<()> {
        let scaler = self.scaler.as_mut().ok_or(StreamError::NotStarted)?;
        scaler.feed(x, y, value)?;

        let last_column = x + 1 == scaler.geometry().in_width();
        let row_complete = scaler.options().track_row_completeness
            && scaler.cache().find(y).is_some_and(|slot| slot.is_complete());
        if last_column || row_complete {
            self.drain_ready_rows()?;
        }
        Ok(())
    }

    fn on_end(&mut self) -> StreamResult<()> {
        if self.scaler.is_none() {
            return Err(StreamError::NotStarted);
        }
        self.drain_ready_rows()?;
        if self.next_row < self.out_height {
            error!(
                "image ended after {} of {} output rows",
                self.next_row, self.out_height
            );
            return Err(StreamError::IncompleteOutput {
                produced: self.next_row,
                expected: self.out_height,
            });
        }
        debug!("resize complete: {} output rows", self.out_height);
        Ok(())
    }
}
