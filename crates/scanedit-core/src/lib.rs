//! Scanedit Core - pre-OCR editing of scanned documents
//!
//! This crate provides the edit session with undo/redo, the page transforms
//! (rotate, crop, contrast, binarize, deskew), and the decode, encode and
//! OCR hand-off around them.
//!
//! # Example
//!
//! ```ignore
//! use scanedit_core::{decode_image, EditOperation, EditSession};
//!
//! let bytes = std::fs::read("scan.jpg")?;
//! let mut session = EditSession::new(decode_image(&bytes)?)?;
//! session.apply(&EditOperation::Deskew)?;
//! session.apply(&EditOperation::Binarize)?;
//! let page = session.finalize();
//! ```

pub mod decode;
pub mod encode;
pub mod error;
pub mod histogram;
pub mod luminance;
pub mod ocr;
pub mod operation;
pub mod raster;
pub mod session;
pub mod transform;

pub use decode::{decode_image, open_image, DecodeError};
pub use encode::{encode_jpeg, encode_png, EncodeError};
pub use error::EditError;
pub use histogram::IntensityHistogram;
pub use ocr::{OcrConfig, OcrEngine, OcrError};
#[cfg(feature = "tesseract")]
pub use ocr::TesseractCli;
pub use operation::EditOperation;
pub use raster::{PixelFormat, ScanImage};
pub use session::EditSession;
pub use transform::{
    adjust_contrast, binarize, crop, crop_region, deskew, deskew_with, estimate_skew, rotate,
    rotate_with, BorderMode, CropRegion, DeskewParams, Interpolation, SkewEstimate,
};
