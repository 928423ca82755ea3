//! Same-canvas image rotation with bilinear and bicubic interpolation.
//!
//! The output keeps the input dimensions: content rotated past the canvas
//! edge is cut off and the exposed corners are filled according to a
//! [`BorderMode`].
//!
//! # Algorithm
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. With `(cx, cy)` the center of the pixel grid and θ the
//! counter-clockwise angle as seen on screen (y grows downwards):
//!
//! ```text
//! src_x = (dst_x - cx) * cos(θ) - (dst_y - cy) * sin(θ) + cx
//! src_y = (dst_x - cx) * sin(θ) + (dst_y - cy) * cos(θ) + cy
//! ```

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::EditError;
use crate::raster::ScanImage;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// 2x2 neighbourhood. Used for interactive rotation.
    #[default]
    Bilinear,
    /// 4x4 cubic convolution (a = -0.75). Used by deskew.
    Bicubic,
}

/// How samples that fall outside the source canvas are filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BorderMode {
    /// Every channel of an outside sample takes this value.
    Constant(u8),
    /// Outside samples repeat the nearest edge pixel.
    Replicate,
}

impl Default for BorderMode {
    fn default() -> Self {
        BorderMode::Constant(0)
    }
}

/// Rotate an image about its center.
///
/// Uses bilinear resampling and fills the exposed corners with black.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Errors
///
/// `InvalidInput` for a malformed image, `InvalidParameter` for a NaN or
/// infinite angle.
pub fn rotate(image: &ScanImage, angle_degrees: f64) -> Result<ScanImage, EditError> {
    rotate_with(
        image,
        angle_degrees,
        Interpolation::Bilinear,
        BorderMode::Constant(0),
    )
}

/// Rotate an image about its center with an explicit filter and border policy.
///
/// The output has the same width, height and pixel format as the input.
/// Multiples of 360 degrees return an exact copy.
#[instrument(skip(image), fields(width = image.width, height = image.height))]
pub fn rotate_with(
    image: &ScanImage,
    angle_degrees: f64,
    filter: Interpolation,
    border: BorderMode,
) -> Result<ScanImage, EditError> {
    image.validate()?;
    if !angle_degrees.is_finite() {
        return Err(EditError::InvalidParameter(format!(
            "rotation angle must be finite, got {}",
            angle_degrees
        )));
    }

    // Fast path: no rotation needed
    if angle_degrees.rem_euclid(360.0) == 0.0 {
        return Ok(image.clone());
    }

    let (w, h) = (image.width, image.height);
    let channels = image.channels();

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    // Center of the pixel grid, so that 180 degrees maps pixels onto pixels
    let cx = (w as f64 - 1.0) / 2.0;
    let cy = (h as f64 - 1.0) / 2.0;

    let mut output = vec![0u8; image.expected_len()];
    let mut sample = vec![0u8; channels];

    for dst_y in 0..h {
        for dst_x in 0..w {
            // Translate destination point to origin at center
            let dx = dst_x as f64 - cx;
            let dy = dst_y as f64 - cy;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + cx;
            let src_y = dx * sin + dy * cos + cy;

            match filter {
                Interpolation::Bilinear => {
                    sample_bilinear(image, src_x, src_y, border, &mut sample)
                }
                Interpolation::Bicubic => sample_bicubic(image, src_x, src_y, border, &mut sample),
            }

            let dst_idx = (dst_y as usize * w as usize + dst_x as usize) * channels;
            output[dst_idx..dst_idx + channels].copy_from_slice(&sample);
        }
    }

    Ok(ScanImage {
        width: w,
        height: h,
        format: image.format,
        pixels: output,
    })
}

/// Read one channel at integer coordinates, applying the border policy.
#[inline]
fn fetch(image: &ScanImage, x: i64, y: i64, channel: usize, border: BorderMode) -> f64 {
    let (w, h) = (image.width as i64, image.height as i64);
    let (px, py) = if x >= 0 && x < w && y >= 0 && y < h {
        (x, y)
    } else {
        match border {
            BorderMode::Constant(value) => return value as f64,
            BorderMode::Replicate => (x.clamp(0, w - 1), y.clamp(0, h - 1)),
        }
    };
    let idx = (py as usize * image.width as usize + px as usize) * image.channels() + channel;
    image.pixels[idx] as f64
}

/// Sample a pixel using bilinear interpolation.
///
/// Bilinear interpolation considers the 4 nearest pixels and weights
/// their contribution based on distance.
fn sample_bilinear(image: &ScanImage, x: f64, y: f64, border: BorderMode, out: &mut [u8]) {
    let x0 = x.floor();
    let y0 = y.floor();

    // Fractional distances
    let fx = x - x0;
    let fy = y - y0;

    let (x0, y0) = (x0 as i64, y0 as i64);

    for (c, value) in out.iter_mut().enumerate() {
        let p00 = fetch(image, x0, y0, c, border);
        let p10 = fetch(image, x0 + 1, y0, c, border);
        let p01 = fetch(image, x0, y0 + 1, c, border);
        let p11 = fetch(image, x0 + 1, y0 + 1, c, border);

        let v = p00 * (1.0 - fx) * (1.0 - fy)
            + p10 * fx * (1.0 - fy)
            + p01 * (1.0 - fx) * fy
            + p11 * fx * fy;
        *value = v.clamp(0.0, 255.0).round() as u8;
    }
}

/// Sample a pixel using bicubic interpolation over a 4x4 neighbourhood.
fn sample_bicubic(image: &ScanImage, x: f64, y: f64, border: BorderMode, out: &mut [u8]) {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let (x0, y0) = (x0 as i64, y0 as i64);

    let wx = cubic_weights(fx);
    let wy = cubic_weights(fy);

    for (c, value) in out.iter_mut().enumerate() {
        let mut sum = 0.0;
        for (ky, wy) in wy.iter().enumerate() {
            let py = y0 + ky as i64 - 1;
            let mut row = 0.0;
            for (kx, wx) in wx.iter().enumerate() {
                let px = x0 + kx as i64 - 1;
                row += fetch(image, px, py, c, border) * wx;
            }
            sum += row * wy;
        }
        *value = sum.clamp(0.0, 255.0).round() as u8;
    }
}

/// Cubic convolution kernel weights for the taps at offsets -1, 0, 1, 2.
///
/// ```text
/// W(t) = (a + 2)|t|^3 - (a + 3)|t|^2 + 1          for |t| <= 1
/// W(t) = a|t|^3 - 5a|t|^2 + 8a|t| - 4a            for 1 < |t| < 2
/// ```
fn cubic_weights(t: f64) -> [f64; 4] {
    const A: f64 = -0.75;
    let near = |d: f64| ((A + 2.0) * d - (A + 3.0)) * d * d + 1.0;
    let far = |d: f64| ((A * d - 5.0 * A) * d + 8.0 * A) * d - 4.0 * A;
    [far(t + 1.0), near(t), near(1.0 - t), far(2.0 - t)]
}


// ============================================================================
// Property-Based Tests
// ============================================================================
