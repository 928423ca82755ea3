//! Image cropping by pixel rectangle.
//!
//! A crop is described by two opposite corners in image pixel coordinates,
//! in any order. The rectangle is normalized to `min..max` on each axis
//! (end exclusive) and clamped to the image, so a drag selection that
//! starts bottom-right or leaves the canvas still produces a valid region.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel
//! - x grows to the right, y grows downwards
//! - corners may be negative or beyond the image; they are clamped

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::EditError;
use crate::raster::ScanImage;

/// A clamped, non-empty crop rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Width in pixels, at least 1.
    pub width: u32,
    /// Height in pixels, at least 1.
    pub height: u32,
}

impl CropRegion {
    /// Normalize two corners and clamp them to a `image_width x image_height`
    /// canvas.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if the clamped rectangle has zero width or height.
    pub fn from_corners(
        x1: i64,
        y1: i64,
        x2: i64,
        y2: i64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, EditError> {
        let (w, h) = (image_width as i64, image_height as i64);

        let left = x1.min(x2).clamp(0, w);
        let right = x1.max(x2).clamp(0, w);
        let top = y1.min(y2).clamp(0, h);
        let bottom = y1.max(y2).clamp(0, h);

        if right <= left || bottom <= top {
            return Err(EditError::InvalidParameter(format!(
                "crop rectangle ({}, {})-({}, {}) is empty within {}x{}",
                x1, y1, x2, y2, image_width, image_height
            )));
        }

        Ok(Self {
            left: left as u32,
            top: top as u32,
            width: (right - left) as u32,
            height: (bottom - top) as u32,
        })
    }

    /// Map a drag selection made on a scaled preview back to image pixels.
    ///
    /// `start` and `end` are positions inside a preview of
    /// `view_width x view_height` that displays the whole image stretched to
    /// fit. Each coordinate maps to `floor(v / view * image)`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` for a zero-sized view, non-finite positions, or a
    /// selection that collapses to an empty rectangle.
    pub fn from_view_selection(
        start: (f64, f64),
        end: (f64, f64),
        view_width: u32,
        view_height: u32,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, EditError> {
        if view_width == 0 || view_height == 0 {
            return Err(EditError::InvalidParameter(format!(
                "preview has zero area ({}x{})",
                view_width, view_height
            )));
        }
        let coords = [start.0, start.1, end.0, end.1];
        if coords.iter().any(|v| !v.is_finite()) {
            return Err(EditError::InvalidParameter(
                "selection coordinates must be finite".to_string(),
            ));
        }

        let sx = image_width as f64 / view_width as f64;
        let sy = image_height as f64 / view_height as f64;
        let map = |v: f64, scale: f64| (v * scale).floor() as i64;

        Self::from_corners(
            map(start.0, sx),
            map(start.1, sy),
            map(end.0, sx),
            map(end.1, sy),
            image_width,
            image_height,
        )
    }
}

/// Crop an image to the rectangle spanned by two corners.
///
/// # Arguments
///
/// * `image` - Source image to crop
/// * `x1`, `y1` - First corner in pixels
/// * `x2`, `y2` - Opposite corner in pixels (exclusive edge)
///
/// # Errors
///
/// `InvalidInput` for a malformed image. `InvalidParameter` when
/// `x1 == x2`, `y1 == y2`, or the rectangle lies entirely off the image.
///
/// # Example
///
/// ```
/// use scanedit_core::{crop, PixelFormat, ScanImage};
///
/// let image = ScanImage::filled(100, 100, PixelFormat::Rgb8, 128);
/// let cropped = crop(&image, 90, 90, 10, 10).unwrap();
/// assert_eq!((cropped.width, cropped.height), (80, 80));
/// ```
pub fn crop(image: &ScanImage, x1: i64, y1: i64, x2: i64, y2: i64) -> Result<ScanImage, EditError> {
    image.validate()?;
    let region = CropRegion::from_corners(x1, y1, x2, y2, image.width, image.height)?;
    crop_region(image, &region)
}

/// Crop an image to an already-clamped region.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn crop_region(image: &ScanImage, region: &CropRegion) -> Result<ScanImage, EditError> {
    image.validate()?;
    if region.width == 0
        || region.height == 0
        || region.left as u64 + region.width as u64 > image.width as u64
        || region.top as u64 + region.height as u64 > image.height as u64
    {
        return Err(EditError::InvalidParameter(format!(
            "crop region {:?} does not fit a {}x{} image",
            region, image.width, image.height
        )));
    }

    // Full crop returns a clone
    if region.width == image.width && region.height == image.height {
        return Ok(image.clone());
    }

    let channels = image.channels();
    let src_stride = image.width as usize * channels;
    let row_len = region.width as usize * channels;
    let mut output = Vec::with_capacity(row_len * region.height as usize);

    // Copy pixel data row by row
    for y in region.top..region.top + region.height {
        let start = y as usize * src_stride + region.left as usize * channels;
        output.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(ScanImage {
        width: region.width,
        height: region.height,
        format: image.format,
        pixels: output,
    })
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating image dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (1u32..=64, 1u32..=64)
    }

    /// Strategy for generating corner coordinates, including off-canvas ones.
    fn corners_strategy() -> impl Strategy<Value = (i64, i64, i64, i64)> {
        (-20i64..=90, -20i64..=90, -20i64..=90, -20i64..=90)
    }

    fn create_test_image(width: u32, height: u32) -> ScanImage {
        let pixels = (0..width * height).map(|i| (i % 251) as u8).collect();
        ScanImage::new_gray(width, height, pixels)
    }

    proptest! {
        /// Property: a crop either fails with InvalidParameter or produces a
        /// non-empty image bounded by the source.
        #[test]
        fn prop_crop_bounded_or_rejected(
            (width, height) in dimensions_strategy(),
            (x1, y1, x2, y2) in corners_strategy(),
        ) {
            let img = create_test_image(width, height);
            match crop(&img, x1, y1, x2, y2) {
                Ok(result) => {
                    prop_assert!(result.width >= 1 && result.width <= width);
                    prop_assert!(result.height >= 1 && result.height <= height);
                    prop_assert_eq!(result.pixels.len(), result.expected_len());
                }
                Err(err) => prop_assert!(matches!(err, EditError::InvalidParameter(_))),
            }
        }

        /// Property: every output pixel equals the source pixel it was cut from.
        #[test]
        fn prop_crop_copies_source_pixels(
            (width, height) in dimensions_strategy(),
            (x1, y1, x2, y2) in corners_strategy(),
        ) {
            let img = create_test_image(width, height);
            if let Ok(region) = CropRegion::from_corners(x1, y1, x2, y2, width, height) {
                let result = crop_region(&img, &region).unwrap();
                for y in 0..result.height {
                    for x in 0..result.width {
                        prop_assert_eq!(
                            result.pixel(x, y),
                            img.pixel(region.left + x, region.top + y)
                        );
                    }
                }
            }
        }
    }
}
