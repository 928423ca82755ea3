//! PNG/JPEG/TIFF decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageReader};
use tracing::{debug, instrument};

use super::{DecodeError, Orientation};
use crate::raster::ScanImage;

/// Decode an encoded image, applying EXIF orientation correction.
///
/// Sources without color (grayscale, with or without alpha) decode to
/// `Gray8`; everything else becomes `Rgb8`. Alpha is discarded.
///
/// # Errors
///
/// - `InvalidFormat` if the bytes are not a recognized, supported format
/// - `CorruptedFile` if decoding fails part way
/// - `EmptyImage` if the image has no pixels
#[instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> Result<ScanImage, DecodeError> {
    let orientation = extract_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    if img.width() == 0 || img.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }

    let img = apply_orientation(img, orientation);
    debug!(
        width = img.width(),
        height = img.height(),
        ?orientation,
        "Image decoded"
    );

    if img.color().has_color() {
        Ok(ScanImage::from_rgb_image(img.into_rgb8()))
    } else {
        Ok(ScanImage::from_gray_image(img.into_luma8()))
    }
}

/// Read and decode an image file.
pub fn open_image(path: impl AsRef<Path>) -> Result<ScanImage, DecodeError> {
    let bytes = std::fs::read(path.as_ref()).map_err(|e| DecodeError::Io(e.to_string()))?;
    decode_image(&bytes)
}

/// Extract the EXIF orientation of an encoded image.
///
/// Returns `Orientation::Normal` if there is no EXIF data or no
/// orientation tag.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
