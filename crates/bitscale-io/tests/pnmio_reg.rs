//! PBM I/O regression test
//!
//! Binary write/read of 1-bit rasters, ASCII (P1) reading, and streaming a
//! PBM straight into the resampler.

use bitscale_core::Bitmap;
use bitscale_io::{ImageFormat, IoError, decode_pbm, detect_format_from_bytes, write_pbm};
use bitscale_stream::{DecodeCallbacks, FeedDriver, ScaleOptions, StreamResult, scale_bitmap};
use bitscale_test::{RegParams, bitmap_to_ascii, patterns};
use std::io::Cursor;

#[derive(Default)]
struct Collect {
    bitmap: Option<Bitmap>,
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
        Ok(())
    }
}

fn encode(bitmap: &Bitmap) -> Vec<u8> {
    let mut data = Vec::new();
    write_pbm(&mut data, bitmap.width(), bitmap.height(), |y, row| {
        Ok(bitmap.copy_row_into(y, row)?)
    })
    .expect("write PBM");
    data
}

fn decode(data: &[u8]) -> Result<Bitmap, IoError> {
    let mut collect = Collect::default();
    decode_pbm(Cursor::new(data), &mut collect)?;
    Ok(collect.bitmap.expect("decoded bitmap"))
}

/// Render a raster as P1 text, `1` for black.
fn to_p1(bitmap: &Bitmap) -> String {
    let mut text = format!("P1\n# generated\n{} {}\n", bitmap.width(), bitmap.height());
    for y in 0..bitmap.height() {
        let row: Vec<&str> = (0..bitmap.width())
            .map(|x| if bitmap.get(x, y) { "0" } else { "1" })
            .collect();
        text.push_str(&row.join(" "));
        text.push('\n');
    }
    text
}

#[test]
fn pnmio_reg() {
    let mut rp = RegParams::new("pnmio");

    // --- Test 1: P4 write/read, widths on and off byte boundaries ---
    for src in [
        patterns::checkerboard(16, 5, 1),
        patterns::text_like(67, 19),
        patterns::scattered_dots(9, 33, 11),
    ] {
        let data = encode(&src);
        rp.compare_values(
            1.0,
            matches!(detect_format_from_bytes(&data), Ok(ImageFormat::Pbm)) as u8 as f64,
            0.0,
        );
        let header = format!("P4\n{} {}\n", src.width(), src.height());
        let expected_len = header.len() + src.height() as usize * src.width().div_ceil(8) as usize;
        rp.compare_values(expected_len as f64, data.len() as f64, 0.0);
        rp.compare_bitmaps(&src, &decode(&data).expect("read PBM"));
    }

    // --- Test 2: P1 text decodes to the same raster ---
    let src = patterns::diagonal_stripes(21, 7, 4);
    let text = to_p1(&src);
    let decoded = decode(text.as_bytes()).expect("read P1");
    rp.compare_strings(
        bitmap_to_ascii(&src).as_bytes(),
        bitmap_to_ascii(&decoded).as_bytes(),
    );

    // --- Test 3: streaming a PBM matches the reference resize ---
    let src = patterns::text_like(240, 96);
    let data = encode(&src);
    let options = ScaleOptions::default().cache_capacity(3);
    let mut driver = FeedDriver::to_bitmap(60, 24, options.clone());
    decode_pbm(Cursor::new(&data), &mut driver).expect("stream PBM");
    let streamed = driver
        .finish()
        .expect("finish")
        .into_bitmap()
        .expect("bitmap");
    let expected = scale_bitmap(&src, 60, 24, &options).expect("reference");
    rp.compare_bitmaps(&expected, &streamed);

    // --- Test 4: malformed input ---
    rp.compare_values(
        1.0,
        matches!(decode(b"P4\n8 2\n\x00"), Err(IoError::DecodeError(_))) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        matches!(decode(b"P1\n2 1\n0 x\n"), Err(IoError::InvalidData(_))) as u8 as f64,
        0.0,
    );
    rp.compare_values(
        1.0,
        matches!(decode(b"P5\n2 1\n255\n"), Err(IoError::UnsupportedFormat(_))) as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pnmio regression test failed");
}
