//! In-memory raster type shared by every transform.

use image::{GrayImage, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::EditError;
use crate::luminance::rgb_to_luma;

/// Pixel layout of a [`ScanImage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// Three interleaved 8-bit channels, red first.
    #[default]
    Rgb8,
    /// One 8-bit intensity channel.
    Gray8,
}

impl PixelFormat {
    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Gray8 => 1,
        }
    }
}

/// A decoded scan: dimensions plus row-major 8-bit pixel data.
///
/// Transforms never mutate an image in place; they return a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Channel layout of `pixels`.
    pub format: PixelFormat,
    /// Pixel data in row-major order.
    /// Length should be width * height * format.channels().
    pub pixels: Vec<u8>,
}

impl ScanImage {
    /// Create an RGB image from interleaved pixel data.
    pub fn new_rgb(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Rgb8,
            pixels,
        }
    }

    /// Create a single-channel grayscale image.
    pub fn new_gray(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            format: PixelFormat::Gray8,
            pixels,
        }
    }

    /// Create an image where every byte is `value`.
    pub fn filled(width: u32, height: u32, format: PixelFormat, value: u8) -> Self {
        let len = width as usize * height as usize * format.channels();
        Self {
            width,
            height,
            format,
            pixels: vec![value; len],
        }
    }

    /// Create a ScanImage from an image::RgbImage.
    pub fn from_rgb_image(img: RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new_rgb(width, height, img.into_raw())
    }

    /// Create a ScanImage from an image::GrayImage.
    pub fn from_gray_image(img: GrayImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new_gray(width, height, img.into_raw())
    }

    /// Number of bytes per pixel.
    #[inline]
    pub fn channels(&self) -> usize {
        self.format.channels()
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Buffer length implied by the dimensions and format.
    pub fn expected_len(&self) -> usize {
        self.pixel_count() * self.channels()
    }

    /// Check if this is an empty image.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }

    /// Check that the image is non-empty and its buffer matches its dimensions.
    pub fn validate(&self) -> Result<(), EditError> {
        if self.width == 0 || self.height == 0 {
            return Err(EditError::InvalidInput(format!(
                "image has zero area ({}x{})",
                self.width, self.height
            )));
        }
        if self.pixels.len() != self.expected_len() {
            return Err(EditError::InvalidInput(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{} {:?}",
                self.pixels.len(),
                self.expected_len(),
                self.width,
                self.height,
                self.format
            )));
        }
        Ok(())
    }

    /// Bytes of the pixel at (x, y). Panics if out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let c = self.channels();
        let idx = (y as usize * self.width as usize + x as usize) * c;
        &self.pixels[idx..idx + c]
    }

    /// Luma plane of this image (BT.601 for RGB, a copy for grayscale).
    pub fn to_luma(&self) -> Vec<u8> {
        match self.format {
            PixelFormat::Rgb8 => rgb_to_luma(&self.pixels),
            PixelFormat::Gray8 => self.pixels.clone(),
        }
    }

    /// Convert to an image::GrayImage for the imageproc filters.
    pub fn to_gray_image(&self) -> Result<GrayImage, EditError> {
        self.validate()?;
        GrayImage::from_raw(self.width, self.height, self.to_luma())
            .ok_or_else(|| EditError::InvalidInput("luma plane size mismatch".to_string()))
    }

    /// Return an RGB copy, replicating the intensity channel for grayscale.
    pub fn to_rgb8(&self) -> ScanImage {
        match self.format {
            PixelFormat::Rgb8 => self.clone(),
            PixelFormat::Gray8 => {
                let pixels = self.pixels.iter().flat_map(|&v| [v, v, v]).collect();
                ScanImage::new_rgb(self.width, self.height, pixels)
            }
        }
    }
}
