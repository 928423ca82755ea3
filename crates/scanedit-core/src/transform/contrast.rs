//! Linear contrast scaling.
//!
//! Formula: `output = clamp(round(alpha * input + beta), 0, 255)` with
//! `beta = 0`, applied to every channel independently. The mapping depends
//! only on the input byte, so it is precomputed as a 256-entry lookup table.

use tracing::instrument;

use crate::error::EditError;
use crate::raster::ScanImage;

/// Scale pixel intensities by `alpha`.
///
/// Any finite `alpha > 0` is accepted. Values far outside `0.1..=3.0` are
/// legal but rarely useful; constraining them is up to the caller.
///
/// # Errors
///
/// `InvalidInput` for a malformed image, `InvalidParameter` for a
/// non-finite, zero, or negative `alpha`.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn adjust_contrast(image: &ScanImage, alpha: f64) -> Result<ScanImage, EditError> {
    image.validate()?;
    if !alpha.is_finite() || alpha <= 0.0 {
        return Err(EditError::InvalidParameter(format!(
            "contrast alpha must be a finite value > 0, got {}",
            alpha
        )));
    }

    let lut = contrast_lut(alpha);
    let pixels = image.pixels.iter().map(|&v| lut[v as usize]).collect();

    Ok(ScanImage {
        width: image.width,
        height: image.height,
        format: image.format,
        pixels,
    })
}

fn contrast_lut(alpha: f64) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (v, out) in lut.iter_mut().enumerate() {
        *out = (alpha * v as f64).round().clamp(0.0, 255.0) as u8;
    }
    lut
}


// ============================================================================
// Property-Based Tests
// ============================================================================
