//! PNG image format support
//!
//! Decoding is row by row: each scanline is reduced to one bit per pixel
//! and pushed through [`DecodeCallbacks`] before the next is read, so the
//! full image is never held in memory. Encoding writes a 1-bit grayscale
//! PNG from a row-producing function.

use crate::bits::{line_buffer, pack_msb_first};
use crate::{IoError, IoResult};
use bitscale_core::PackedRow;
use bitscale_stream::{DecodeCallbacks, pixel_is_set};
use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Decode a PNG, reporting every pixel to `callbacks` in raster order.
///
/// Palette, low-bit-depth and 16-bit images are normalized to 8-bit
/// samples first. A pixel is white when its channel sum exceeds
/// `black_level` (gray samples count three times); alpha is ignored.
///
/// # Errors
///
/// Interlaced PNGs are rejected with [`IoError::UnsupportedFormat`] since
/// their passes do not arrive in raster order. Errors returned by the
/// callbacks are propagated as [`IoError::Stream`].
pub fn decode_png<R, C>(reader: R, callbacks: &mut C, black_level: u16) -> IoResult<()>
where
    R: BufRead + Seek,
    C: DecodeCallbacks + ?Sized,
{
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width;
    let height = info.height;
    if info.interlaced {
        return Err(IoError::UnsupportedFormat(
            "interlaced PNG cannot be streamed in raster order".to_string(),
        ));
    }

    let samples = match reader.output_color_type() {
        (ColorType::Grayscale, BitDepth::Eight) => 1,
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => 2,
        (ColorType::Rgb, BitDepth::Eight) => 3,
        (ColorType::Rgba, BitDepth::Eight) => 4,
        (color_type, bit_depth) => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG format: {:?} {:?}",
                color_type, bit_depth
            )));
        }
    };
    debug!("PNG {}x{}, {} samples per pixel", width, height, samples);

    let line_len = (width as usize).checked_mul(samples).ok_or(
        bitscale_core::Error::AllocationFailed { bytes: usize::MAX },
    )?;
    let mut line = line_buffer(line_len)?;
    callbacks.on_begin(width, height)?;
    for y in 0..height {
        reader
            .read_row(&mut line)
            .map_err(|e| IoError::DecodeError(format!("PNG row {} error: {}", y, e)))?
            .ok_or_else(|| IoError::DecodeError(format!("PNG ended before row {}", y)))?;

        for (x, px) in (0..width).zip(line.chunks_exact(samples)) {
            let bit = if samples < 3 {
                pixel_is_set(px[0], px[0], px[0], black_level)
            } else {
                pixel_is_set(px[0], px[1], px[2], black_level)
            };
            callbacks.on_pixel(x, y, bit)?;
        }
    }
    callbacks.on_end()?;
    Ok(())
}

/// Write a 1-bit grayscale PNG.
///
/// `rows(y, row)` fills `row` with output row `y`; rows are requested in
/// order from 0 to `height - 1`. A set pixel is written as white.
pub fn write_png_1bpp<W, F>(writer: W, width: u32, height: u32, mut rows: F) -> IoResult<()>
where
    W: Write,
    F: FnMut(u32, &mut PackedRow) -> IoResult<()>,
{
    let mut row = PackedRow::new(width)?;
    let mut line = line_buffer(row.as_bytes().len())?;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::One);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    let mut stream = writer
        .stream_writer()
        .map_err(|e| IoError::EncodeError(format!("PNG stream error: {}", e)))?;

    for y in 0..height {
        rows(y, &mut row)?;
        pack_msb_first(&row, &mut line, false);
        stream.write_all(&line)?;
    }

    stream
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG data error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG trailer error: {}", e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitscale_core::Bitmap;
    use bitscale_stream::StreamResult;
    use std::io::Cursor;

    /// Records decoder events into a bitmap
    #[derive(Default)]
    struct Collect {
        bitmap: Option<Bitmap>,
        ended: bool,
    }

    impl DecodeCallbacks for Collect {
        fn on_begin(&mut self, width: u32, height: u32) -> StreamResult<()> {
            self.bitmap = Some(Bitmap::new(width, height)?);
            Ok(())
        }

        fn on_pixel(&mut self, x: u32, y: u32, value: bool) -> StreamResult<()> {
            if let Some(bm) = self.bitmap.as_mut() {
                bm.set(x, y, value)?;
            }
            Ok(())
        }

        fn on_end(&mut self) -> StreamResult<()> {
            self.ended = true;
            Ok(())
        }
    }

    fn encode(bitmap: &Bitmap) -> Vec<u8> {
        let mut data = Vec::new();
        write_png_1bpp(&mut data, bitmap.width(), bitmap.height(), |y, row| {
            Ok(bitmap.copy_row_into(y, row)?)
        })
        .unwrap();
        data
    }

    #[test]
    fn test_png_1bpp_decodes_back() {
        let src = Bitmap::from_fn(13, 5, |x, y| (x * y) % 4 == 1).unwrap();
        let data = encode(&src);
        assert!(data.starts_with(&[0x89, b'P', b'N', b'G']));

        let mut collect = Collect::default();
        decode_png(Cursor::new(data), &mut collect, 350).unwrap();
        assert!(collect.ended);
        assert_eq!(collect.bitmap.unwrap(), src);
    }

    #[test]
    fn test_png_rgb_threshold() {
        // 2x1 RGB: one pixel just above the black level, one just below
        let mut data = Vec::new();
        {
            let mut encoder = Encoder::new(&mut data, 2, 1);
            encoder.set_color(ColorType::Rgb);
            encoder.set_depth(BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer
                .write_image_data(&[151, 100, 100, 150, 100, 100])
                .unwrap();
        }
        let mut collect = Collect::default();
        decode_png(Cursor::new(data), &mut collect, 350).unwrap();
        let bm = collect.bitmap.unwrap();
        assert!(bm.get(0, 0));
        assert!(!bm.get(1, 0));
    }

    #[test]
    fn test_png_garbage() {
        let mut collect = Collect::default();
        let result = decode_png(Cursor::new(b"not a png".to_vec()), &mut collect, 350);
        assert!(matches!(result, Err(IoError::DecodeError(_))));
        assert!(collect.bitmap.is_none());
    }
}
