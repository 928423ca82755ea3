//! Image decoding WASM bindings.

use scanedit_core::decode;
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsScanImage;

/// Decode a PNG, JPEG or TIFF file, applying EXIF orientation.
///
/// Grayscale sources stay single-channel; everything else is RGB.
///
/// # Example
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// console.log(`Decoded ${image.width}x${image.height}`);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsScanImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsScanImage::from_core)
        .map_err(to_js_error)
}
