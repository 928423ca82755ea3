//! WASM-compatible wrapper for scan images.

use scanedit_core::{PixelFormat, ScanImage};
use wasm_bindgen::prelude::*;

/// An image handle for JavaScript.
///
/// The pixel data stays in WASM memory. `pixels()` and `rgba_pixels()` copy
/// it out as a `Uint8Array`.
#[wasm_bindgen]
pub struct JsScanImage {
    inner: ScanImage,
}

#[wasm_bindgen]
impl JsScanImage {
    /// Create an RGB image (3 bytes per pixel, row-major order).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsScanImage {
        Self::from_core(ScanImage::new_rgb(width, height, pixels))
    }

    /// Create a grayscale image (1 byte per pixel).
    pub fn gray(width: u32, height: u32, pixels: Vec<u8>) -> JsScanImage {
        Self::from_core(ScanImage::new_gray(width, height, pixels))
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// True for single-channel images.
    #[wasm_bindgen(getter)]
    pub fn is_grayscale(&self) -> bool {
        self.inner.format == PixelFormat::Gray8
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.pixels.len()
    }

    /// Raw pixel data in the image's own format.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.pixels.clone()
    }

    /// Pixel data expanded to RGBA with opaque alpha, ready for `ImageData`.
    pub fn rgba_pixels(&self) -> Vec<u8> {
        self.inner
            .to_rgb8()
            .pixels
            .chunks_exact(3)
            .flat_map(|px| [px[0], px[1], px[2], 255])
            .collect()
    }

    /// Explicitly free WASM memory.
    ///
    /// Optional; wasm-bindgen's finalizer handles cleanup.
    pub fn free(self) {}
}

impl JsScanImage {
    pub(crate) fn from_core(inner: ScanImage) -> Self {
        Self { inner }
    }

    pub(crate) fn as_core(&self) -> &ScanImage {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_scan_image_creation() {
        let img = JsScanImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.byte_length(), 15000);
        assert!(!img.is_grayscale());
    }

    #[test]
    fn test_gray_image() {
        let img = JsScanImage::gray(2, 1, vec![10, 200]);
        assert!(img.is_grayscale());
        assert_eq!(img.pixels(), vec![10, 200]);
    }

    #[test]
    fn test_rgba_pixels() {
        let rgb = JsScanImage::new(2, 1, vec![255, 128, 64, 1, 2, 3]);
        assert_eq!(rgb.rgba_pixels(), vec![255, 128, 64, 255, 1, 2, 3, 255]);

        let gray = JsScanImage::gray(1, 1, vec![77]);
        assert_eq!(gray.rgba_pixels(), vec![77, 77, 77, 255]);
    }
}
