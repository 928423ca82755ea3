//! Serializable description of a single edit.
//!
//! A front end can log, transmit, or replay edits as `EditOperation`
//! values instead of calling the transform functions directly.

use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::raster::ScanImage;
use crate::transform::{adjust_contrast, binarize, crop, deskew, rotate};

/// One transform and its parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOperation {
    /// Rotate counter-clockwise by `angle_degrees` about the center.
    Rotate { angle_degrees: f64 },
    /// Crop to the rectangle spanned by two corners.
    Crop { x1: i64, y1: i64, x2: i64, y2: i64 },
    /// Scale intensities by `alpha`.
    Contrast { alpha: f64 },
    /// Otsu binarization.
    Binarize,
    /// Automatic skew correction with default detector settings.
    Deskew,
}

impl EditOperation {
    /// Run the operation on `image`, producing a new image.
    pub fn apply(&self, image: &ScanImage) -> Result<ScanImage, EditError> {
        match *self {
            EditOperation::Rotate { angle_degrees } => rotate(image, angle_degrees),
            EditOperation::Crop { x1, y1, x2, y2 } => crop(image, x1, y1, x2, y2),
            EditOperation::Contrast { alpha } => adjust_contrast(image, alpha),
            EditOperation::Binarize => binarize(image),
            EditOperation::Deskew => deskew(image),
        }
    }

    /// Short lowercase name, matching the serialized `op` tag.
    pub fn name(&self) -> &'static str {
        match self {
            EditOperation::Rotate { .. } => "rotate",
            EditOperation::Crop { .. } => "crop",
            EditOperation::Contrast { .. } => "contrast",
            EditOperation::Binarize => "binarize",
            EditOperation::Deskew => "deskew",
        }
    }
}
