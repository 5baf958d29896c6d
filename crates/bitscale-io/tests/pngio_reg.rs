//! PNG I/O regression test
//!
//! Writes 1-bit PNGs, decodes them back through the push-style decoder and
//! checks that decoding straight into the streaming resampler matches a
//! whole-image resize of the same raster.

use bitscale_core::Bitmap;
use bitscale_io::{ImageFormat, decode_png, detect_format_from_bytes, write_png_1bpp};
use bitscale_stream::{DecodeCallbacks, FeedDriver, ScaleOptions, StreamResult, scale_bitmap};
use bitscale_test::{RegParams, patterns};
use png::{BitDepth, ColorType, Encoder};
use std::io::Cursor;

/// Collects decoded pixels into a full raster
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
    write_png_1bpp(&mut data, bitmap.width(), bitmap.height(), |y, row| {
        Ok(bitmap.copy_row_into(y, row)?)
    })
    .expect("write PNG");
    data
}

fn decode(data: &[u8]) -> Bitmap {
    let mut collect = Collect::default();
    decode_png(Cursor::new(data), &mut collect, 350).expect("read PNG");
    collect.bitmap.expect("decoded bitmap")
}

#[test]
fn pngio_reg() {
    let mut rp = RegParams::new("pngio");

    // --- Test 1: 1 bpp write/read keeps every pixel ---
    for src in [
        patterns::checkerboard(37, 23, 4),
        patterns::text_like(130, 41),
        patterns::scattered_dots(8, 8, 3),
    ] {
        let data = encode(&src);
        rp.compare_values(
            1.0,
            matches!(detect_format_from_bytes(&data), Ok(ImageFormat::Png)) as u8 as f64,
            0.0,
        );
        rp.compare_bitmaps(&src, &decode(&data));
    }

    // --- Test 2: decoding into the resampler matches the reference ---
    let src = patterns::diagonal_stripes(150, 110, 9);
    let data = encode(&src);
    let options = ScaleOptions::default();
    let mut driver = FeedDriver::to_bitmap(47, 31, options.clone());
    decode_png(Cursor::new(&data), &mut driver, options.black_level).expect("stream PNG");
    let streamed = driver
        .finish()
        .expect("finish")
        .into_bitmap()
        .expect("bitmap");
    let expected = scale_bitmap(&src, 47, 31, &options).expect("reference");
    rp.compare_bitmaps(&expected, &streamed);

    // --- Test 3: 8 bpp grayscale is reduced with the black level ---
    let gray: Vec<u8> = vec![0, 116, 117, 255];
    let mut data = Vec::new();
    {
        let mut encoder = Encoder::new(&mut data, 4, 1);
        encoder.set_color(ColorType::Grayscale);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header");
        writer.write_image_data(&gray).expect("data");
    }
    let bm = decode(&data);
    let bits: Vec<bool> = (0..4).map(|x| bm.get(x, 0)).collect();
    rp.compare_strings(
        format!("{:?}", bits).as_bytes(),
        format!("{:?}", [false, false, true, true]).as_bytes(),
    );

    // --- Test 4: RGBA alpha does not affect the bit ---
    let rgba: Vec<u8> = vec![255, 255, 255, 0, 10, 10, 10, 255];
    let mut data = Vec::new();
    {
        let mut encoder = Encoder::new(&mut data, 2, 1);
        encoder.set_color(ColorType::Rgba);
        encoder.set_depth(BitDepth::Eight);
        let mut writer = encoder.write_header().expect("header");
        writer.write_image_data(&rgba).expect("data");
    }
    let bm = decode(&data);
    rp.compare_values(1.0, bm.get(0, 0) as u8 as f64, 0.0);
    rp.compare_values(0.0, bm.get(1, 0) as u8 as f64, 0.0);

    // --- Test 5: truncated stream is an error, not a short image ---
    let data = encode(&patterns::checkerboard(64, 64, 2));
    let cut = &data[..data.len() / 2];
    let mut driver = FeedDriver::to_bitmap(16, 16, ScaleOptions::default());
    rp.compare_values(
        1.0,
        decode_png(Cursor::new(cut), &mut driver, 350).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pngio regression test failed");
}
