//! Scanedit WASM - WebAssembly bindings for the scan editor
//!
//! This crate exposes the scanedit-core edit session to a browser front end.
//!
//! # Module Structure
//!
//! - `types` - `JsScanImage`, the image handle shared with JavaScript
//! - `session` - `JsEditSession` with rotate/crop/contrast/binarize/deskew
//!   and undo/redo
//! - `decode` - PNG/JPEG/TIFF decoding with EXIF orientation
//! - `encode` - PNG/JPEG export
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, JsEditSession, encode_png } from '@scanedit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const session = new JsEditSession(decode_image(bytes));
//! session.deskew();
//! session.binarize();
//! const png = encode_png(session.current());
//! ```

use wasm_bindgen::prelude::*;

mod decode;
mod encode;
mod session;
mod types;

pub use decode::decode_image;
pub use encode::{encode_jpeg, encode_png};
pub use session::JsEditSession;
pub use types::JsScanImage;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JavaScript error value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
