//! Global Otsu binarization.
//!
//! 1. Convert to BT.601 luma (see [`crate::luminance`]).
//! 2. Pick the threshold `t` with [`IntensityHistogram::otsu_threshold`].
//! 3. Map `v > t` to 255 and everything else to 0.
//! 4. Replicate the result into three channels so downstream consumers
//!    always see RGB.

use tracing::{debug, instrument};

use crate::error::EditError;
use crate::histogram::IntensityHistogram;
use crate::raster::ScanImage;

/// Binarize an image with an automatically selected global threshold.
///
/// The output is always `Rgb8` and contains only the values 0 and 255.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn binarize(image: &ScanImage) -> Result<ScanImage, EditError> {
    image.validate()?;

    let luma = image.to_luma();
    let threshold = IntensityHistogram::from_plane(&luma).otsu_threshold();
    debug!(threshold, "Otsu threshold selected");

    let pixels = luma
        .iter()
        .flat_map(|&v| {
            let b = if v > threshold { 255 } else { 0 };
            [b, b, b]
        })
        .collect();

    Ok(ScanImage::new_rgb(image.width, image.height, pixels))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: output holds only 0 and 255 on every channel.
        #[test]
        fn prop_binarize_two_levels(pixels in proptest::collection::vec(any::<u8>(), 6 * 5 * 3)) {
            let img = ScanImage::new_rgb(6, 5, pixels);
            let result = binarize(&img).unwrap();
            prop_assert_eq!(result.pixels.len(), img.pixels.len());
            prop_assert!(result.pixels.iter().all(|&v| v == 0 || v == 255));
            for px in result.pixels.chunks_exact(3) {
                prop_assert!(px[0] == px[1] && px[1] == px[2]);
            }
        }
    }
}
