//! Skew estimation and correction for scanned text.
//!
//! Pipeline:
//! 1. Grayscale (BT.601 luma)
//! 2. Gaussian blur to suppress paper texture and noise
//! 3. Canny edge detection
//! 4. 3x3 dilation so broken glyph edges join into lines
//! 5. Probabilistic Hough line-segment detection
//! 6. Median of the segment angles
//! 7. Bicubic rotation with replicated borders to undo the skew
//!
//! The median is used instead of the mean so that a few stray lines
//! (table rules, page edges) do not drag the estimate.

use std::f64::consts::PI;

use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::filter::gaussian_blur_f32;
use imageproc::morphology::dilate;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::hough::{probabilistic_hough, HoughOptions, LineSegment};
use super::rotation::{rotate_with, BorderMode, Interpolation};
use crate::error::EditError;
use crate::raster::ScanImage;

// Bounds on the accumulator resolution; finer values blow up its size.
const MIN_RHO: f64 = 0.1;
const MAX_RHO: f64 = 1000.0;
const MIN_ANGLE_RESOLUTION: f64 = 0.05;

/// Tuning constants for line detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskewParams {
    /// Gaussian blur sigma (1.1 matches a 5x5 kernel).
    pub blur_sigma: f32,
    /// Canny hysteresis low threshold.
    pub canny_low: f32,
    /// Canny hysteresis high threshold.
    pub canny_high: f32,
    /// Dilation radius in pixels (1 = 3x3 square).
    pub dilate_radius: u8,
    /// Accumulator distance resolution in pixels.
    pub rho: f64,
    /// Accumulator angle resolution in degrees.
    pub angle_resolution_degrees: f64,
    /// Votes needed before a line is followed.
    pub vote_threshold: u32,
    /// Minimum segment length as a fraction of the image width.
    pub min_line_length_ratio: f64,
    /// Longest run of missing edge pixels bridged within one segment.
    pub max_line_gap: u32,
    /// Seed for the order in which edge points are visited.
    pub seed: u64,
}

impl Default for DeskewParams {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            canny_low: 50.0,
            canny_high: 150.0,
            dilate_radius: 1,
            rho: 1.0,
            angle_resolution_degrees: 1.0,
            vote_threshold: 100,
            min_line_length_ratio: 0.5,
            max_line_gap: 20,
            seed: 0x5eed,
        }
    }
}

impl DeskewParams {
    /// Set the accumulator vote threshold.
    pub fn with_vote_threshold(mut self, votes: u32) -> Self {
        self.vote_threshold = votes;
        self
    }

    /// Set the minimum segment length as a fraction of the image width.
    pub fn with_min_line_length_ratio(mut self, ratio: f64) -> Self {
        self.min_line_length_ratio = ratio;
        self
    }

    /// Set the largest gap bridged inside one segment.
    pub fn with_max_line_gap(mut self, gap: u32) -> Self {
        self.max_line_gap = gap;
        self
    }

    /// Reject values the detector cannot work with.
    pub fn validate(&self) -> Result<(), EditError> {
        let invalid = |what: &str| Err(EditError::InvalidParameter(what.to_string()));

        if !(self.blur_sigma.is_finite() && self.blur_sigma > 0.0) {
            return invalid("blur sigma must be finite and > 0");
        }
        if !(self.canny_low.is_finite() && self.canny_high.is_finite())
            || self.canny_low < 0.0
            || self.canny_low > self.canny_high
        {
            return invalid("canny thresholds must satisfy 0 <= low <= high");
        }
        if !(self.rho.is_finite() && (MIN_RHO..=MAX_RHO).contains(&self.rho)) {
            return invalid("rho resolution must be in [0.1, 1000] pixels");
        }
        if !(self.angle_resolution_degrees.is_finite()
            && (MIN_ANGLE_RESOLUTION..=180.0).contains(&self.angle_resolution_degrees))
        {
            return invalid("angle resolution must be in [0.05, 180] degrees");
        }
        if self.vote_threshold == 0 {
            return invalid("vote threshold must be at least 1");
        }
        if !(self.min_line_length_ratio.is_finite() && self.min_line_length_ratio >= 0.0) {
            return invalid("minimum line length ratio must be finite and >= 0");
        }
        Ok(())
    }

    fn hough_options(&self, width: u32) -> HoughOptions {
        HoughOptions {
            rho: self.rho,
            theta: self.angle_resolution_degrees * PI / 180.0,
            threshold: self.vote_threshold,
            min_line_length: (width as f64 * self.min_line_length_ratio).floor() as u32,
            max_line_gap: self.max_line_gap,
            seed: self.seed,
        }
    }
}

/// Result of skew estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkewEstimate {
    /// Skew of the content in degrees, counter-clockwise positive (the same
    /// convention as [`rotate`](super::rotate)). Rotating by the negation of
    /// this value straightens the page.
    pub angle_degrees: f64,
    /// Number of line segments that contributed.
    pub line_count: usize,
}

/// Run the edge and line detection stages on a grayscale plane.
pub fn detect_line_segments(
    gray: &GrayImage,
    params: &DeskewParams,
) -> Result<Vec<LineSegment>, EditError> {
    params.validate()?;

    let (width, height) = gray.dimensions();
    // Canny needs a 3x3 neighbourhood
    if width < 3 || height < 3 {
        return Ok(Vec::new());
    }

    let blurred = gaussian_blur_f32(gray, params.blur_sigma);
    let edges = canny(&blurred, params.canny_low, params.canny_high);
    let thick = dilate(&edges, Norm::LInf, params.dilate_radius);

    Ok(probabilistic_hough(&thick, &params.hough_options(width)))
}

/// Estimate the dominant skew of the text lines in `image`.
///
/// Returns `None` when no line segments are found.
#[instrument(skip(image, params), fields(width = image.width, height = image.height))]
pub fn estimate_skew(
    image: &ScanImage,
    params: &DeskewParams,
) -> Result<Option<SkewEstimate>, EditError> {
    let gray = image.to_gray_image()?;
    let segments = detect_line_segments(&gray, params)?;

    let angles: Vec<f64> = segments.iter().map(LineSegment::angle_degrees).collect();
    let Some(median) = median(angles) else {
        debug!("No lines detected");
        return Ok(None);
    };

    let estimate = SkewEstimate {
        angle_degrees: -median,
        line_count: segments.len(),
    };
    debug!(
        skew = estimate.angle_degrees,
        lines = estimate.line_count,
        "Skew estimated"
    );
    Ok(Some(estimate))
}

/// Straighten an image using the default detector settings.
///
/// An image without detectable lines is returned unchanged.
pub fn deskew(image: &ScanImage) -> Result<ScanImage, EditError> {
    deskew_with(image, &DeskewParams::default())
}

/// Straighten an image with explicit detector settings.
pub fn deskew_with(image: &ScanImage, params: &DeskewParams) -> Result<ScanImage, EditError> {
    match estimate_skew(image, params)? {
        Some(estimate) => rotate_with(
            image,
            -estimate.angle_degrees,
            Interpolation::Bicubic,
            BorderMode::Replicate,
        ),
        None => Ok(image.clone()),
    }
}

/// Median of the values; the mean of the two middle values for even counts.
fn median(mut values: Vec<f64>) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}
