//! WASM bindings for the edit session.
//!
//! Each edit method runs the transform on the current image and commits
//! the result. On error the session is unchanged and the error message is
//! thrown to JavaScript.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession(image);
//! session.rotate(-2.5);
//! session.crop_view_selection(12, 30, 380, 520, canvas.width, canvas.height);
//! session.undo();
//! session.apply({ op: "contrast", alpha: 1.4 });
//! ```

use scanedit_core::{
    crop_region, CropRegion, EditError, EditOperation, EditSession, ScanImage,
};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsScanImage;

/// Undo/redo edit session for one scanned page.
#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    /// Start a session on a copy of `image`.
    #[wasm_bindgen(constructor)]
    pub fn new(image: &JsScanImage) -> Result<JsEditSession, JsValue> {
        EditSession::new(image.as_core().clone())
            .map(|inner| JsEditSession { inner })
            .map_err(to_js_error)
    }

    /// Rotate counter-clockwise by `angle_degrees`, keeping the canvas size.
    pub fn rotate(&mut self, angle_degrees: f64) -> Result<(), JsValue> {
        self.run(EditOperation::Rotate { angle_degrees })
    }

    /// Crop to the rectangle spanned by two corners in image pixels.
    pub fn crop(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) -> Result<(), JsValue> {
        self.run(EditOperation::Crop {
            x1: x1.into(),
            y1: y1.into(),
            x2: x2.into(),
            y2: y2.into(),
        })
    }

    /// Crop using a drag selection made on a preview of
    /// `view_width x view_height` that shows the whole current image.
    pub fn crop_view_selection(
        &mut self,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        view_width: u32,
        view_height: u32,
    ) -> Result<(), JsValue> {
        self.edit(|current| {
            let region = CropRegion::from_view_selection(
                (start_x, start_y),
                (end_x, end_y),
                view_width,
                view_height,
                current.width,
                current.height,
            )?;
            crop_region(current, &region)
        })
    }

    /// Scale intensities by `alpha` (> 0).
    pub fn adjust_contrast(&mut self, alpha: f64) -> Result<(), JsValue> {
        self.run(EditOperation::Contrast { alpha })
    }

    /// Black-and-white conversion with an automatic threshold.
    pub fn binarize(&mut self) -> Result<(), JsValue> {
        self.run(EditOperation::Binarize)
    }

    /// Detect and correct the page skew.
    pub fn deskew(&mut self) -> Result<(), JsValue> {
        self.run(EditOperation::Deskew)
    }

    /// Apply a serialized operation, e.g. `{ op: "rotate", angle_degrees: 3 }`.
    pub fn apply(&mut self, op: JsValue) -> Result<(), JsValue> {
        let op: EditOperation = serde_wasm_bindgen::from_value(op)
            .map_err(|e| JsValue::from_str(&format!("Invalid edit operation: {}", e)))?;
        self.run(op)
    }

    /// Step back one edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.inner.undo()
    }

    /// Re-apply the last undone edit. Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        self.inner.redo()
    }

    /// Discard all edits and return to the uploaded image.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    #[wasm_bindgen(getter)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    #[wasm_bindgen(getter)]
    pub fn can_redo(&self) -> bool {
        self.inner.can_redo()
    }

    /// Copy of the current image.
    pub fn current(&self) -> JsScanImage {
        JsScanImage::from_core(self.inner.finalize())
    }

    /// Copy of the uploaded image.
    pub fn original(&self) -> JsScanImage {
        JsScanImage::from_core(self.inner.original().clone())
    }
}

impl JsEditSession {
    fn run(&mut self, op: EditOperation) -> Result<(), JsValue> {
        self.inner.apply(&op).map_err(to_js_error)
    }

    fn edit(
        &mut self,
        f: impl FnOnce(&ScanImage) -> Result<ScanImage, EditError>,
    ) -> Result<(), JsValue> {
        let result = f(self.inner.current()).map_err(to_js_error)?;
        self.inner.commit(result).map_err(to_js_error)
    }
}
