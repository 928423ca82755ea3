//! JPEG encoding for export.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::ImageEncoder;

use super::{color_type, EncodeError};
use crate::raster::ScanImage;

/// Encode an image to JPEG bytes.
///
/// `quality` is clamped to 1-100 (100 = highest quality). Grayscale
/// images are written as single-channel JPEGs.
///
/// # Quality Guidelines
///
/// * 90-100: archival, text edges stay crisp for later OCR
/// * 75-90: good for sharing
/// * Below 60: visible artifacts around glyphs
pub fn encode_jpeg(image: &ScanImage, quality: u8) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());

    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&image.pixels, image.width, image.height, color_type(image))
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::PixelFormat;
    use proptest::prelude::*;

    proptest! {
        /// Property: valid input always produces a well-formed JPEG.
        #[test]
        fn prop_valid_input_produces_valid_jpeg(
            width in 1u32..=40,
            height in 1u32..=40,
            quality in 1u8..=100,
            gray in any::<bool>(),
        ) {
            let format = if gray { PixelFormat::Gray8 } else { PixelFormat::Rgb8 };
            let img = ScanImage::filled(width, height, format, 128);
            let jpeg = encode_jpeg(&img, quality).unwrap();

            prop_assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
            prop_assert_eq!(&jpeg[jpeg.len() - 2..], &[0xFF, 0xD9]);
        }

        /// Property: encoding is deterministic.
        #[test]
        fn prop_deterministic_output(
            width in 1u32..=20,
            height in 1u32..=20,
            quality in 1u8..=100,
        ) {
            let img = ScanImage::filled(width, height, PixelFormat::Rgb8, 100);
            prop_assert_eq!(
                encode_jpeg(&img, quality).unwrap(),
                encode_jpeg(&img, quality).unwrap()
            );
        }
    }
}
