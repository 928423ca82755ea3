//! Image encoding WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! const png = encode_png(session.current());
//! await writable.write(new Blob([png], { type: 'image/png' }));
//! ```

use scanedit_core::encode;
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsScanImage;

/// Encode an image to lossless PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsScanImage) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(image.as_core()).map_err(to_js_error)
}

/// Encode an image to JPEG bytes. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsScanImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(image.as_core(), quality).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_png_signature() {
        let img = JsScanImage::new(10, 10, vec![128u8; 10 * 10 * 3]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let img = JsScanImage::gray(16, 16, vec![200u8; 16 * 16]);
        let jpeg = encode_jpeg(&img, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
