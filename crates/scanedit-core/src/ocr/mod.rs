//! Hand-off of the edited page to an OCR engine.
//!
//! The library does not recognize text itself. [`OcrEngine`] is the seam:
//! [`TesseractCli`] shells out to the `tesseract` binary (feature
//! `tesseract`, enabled by default), and tests or other front ends can
//! plug in their own engine.

mod config;
#[cfg(feature = "tesseract")]
mod tesseract;

use thiserror::Error;

use crate::encode::EncodeError;
use crate::raster::ScanImage;

pub use config::OcrConfig;
#[cfg(feature = "tesseract")]
pub use tesseract::TesseractCli;

/// Errors from configuring or running an OCR engine.
#[derive(Debug, Error)]
pub enum OcrError {
    /// A configuration value is out of range.
    #[error("Invalid OCR configuration: {0}")]
    InvalidConfig(String),

    /// The engine executable does not exist or could not be started.
    #[error("OCR engine not found at {0}")]
    BinaryNotFound(String),

    /// The engine ran and reported failure.
    #[error("OCR engine failed (exit code {code:?}): {stderr}")]
    EngineFailed { code: Option<i32>, stderr: String },

    /// The engine produced text that is not valid UTF-8.
    #[error("OCR engine returned invalid output: {0}")]
    InvalidOutput(String),

    /// The page could not be encoded for the engine.
    #[error("Failed to prepare image for OCR: {0}")]
    Encode(#[from] EncodeError),

    /// Temporary file handling failed.
    #[error("I/O error: {0}")]
    Io(String),
}

/// Something that turns a page image into text.
pub trait OcrEngine {
    /// Recognize the text on `image`.
    fn recognize(&self, image: &ScanImage) -> Result<String, OcrError>;
}
