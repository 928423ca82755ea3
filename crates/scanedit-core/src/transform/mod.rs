//! Pure image operations used by the edit session.
//!
//! Every operation takes `&ScanImage` and returns a new image; inputs are
//! never modified.
//!
//! # Coordinate System
//!
//! - Origin is the top-left pixel, y grows downwards
//! - Rotation angles are in degrees, positive = counter-clockwise on screen
//! - Crop corners are integer pixel coordinates, end exclusive

mod binarize;
mod contrast;
mod crop;
mod deskew;
mod hough;
mod rotation;

pub use binarize::binarize;
pub use contrast::adjust_contrast;
pub use crop::{crop, crop_region, CropRegion};
pub use deskew::{
    deskew, deskew_with, detect_line_segments, estimate_skew, DeskewParams, SkewEstimate,
};
pub use hough::LineSegment;
pub use rotation::{rotate, rotate_with, BorderMode, Interpolation};
