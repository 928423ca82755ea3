//! Decoding of uploaded scans.
//!
//! Accepts any PNG, JPEG or TIFF the `image` crate can read, applies the EXIF
//! orientation tag so the page is upright, and produces a [`ScanImage`]
//! (`Gray8` for grayscale sources, `Rgb8` otherwise).
//!
//! [`ScanImage`]: crate::ScanImage

mod reader;
mod types;

pub use reader::{decode_image, get_orientation, open_image};
pub use types::{DecodeError, Orientation};
