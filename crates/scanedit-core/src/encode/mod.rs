//! Encoding of edited scans.
//!
//! - PNG (lossless), used for the OCR hand-off and for saving
//! - JPEG with configurable quality, for compact exports
//!
//! Both encoders accept `Rgb8` and `Gray8` images and write the matching
//! color type; nothing is converted.

mod jpeg;
mod png;

use image::ExtendedColorType;
use thiserror::Error;

use crate::error::EditError;
use crate::raster::{PixelFormat, ScanImage};

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The image failed validation (zero area or buffer mismatch).
    #[error(transparent)]
    InvalidImage(#[from] EditError),

    /// The encoder itself failed.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

fn color_type(image: &ScanImage) -> ExtendedColorType {
    match image.format {
        PixelFormat::Rgb8 => ExtendedColorType::Rgb8,
        PixelFormat::Gray8 => ExtendedColorType::L8,
    }
}
