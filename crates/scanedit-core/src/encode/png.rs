//! Lossless PNG encoding.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::ImageEncoder;

use super::{color_type, EncodeError};
use crate::raster::ScanImage;

/// Encode an image to PNG bytes.
pub fn encode_png(image: &ScanImage) -> Result<Vec<u8>, EncodeError> {
    image.validate()?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(&image.pixels, image.width, image.height, color_type(image))
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
