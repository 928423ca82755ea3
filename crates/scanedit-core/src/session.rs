//! Edit session with linear undo/redo.
//!
//! The session keeps the uploaded image, the current working image, and two
//! stacks of full snapshots:
//!
//! ```text
//! original ... history[0] .. history[n-1] | current | redo[m-1] .. redo[0]
//! ```
//!
//! `history` holds older states (most recent last) and `redo_history` the
//! states that were undone (most recent last). Committing a new result
//! clears the redo stack, so the timeline never branches.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use tracing::debug;

use crate::error::EditError;
use crate::ocr::{OcrEngine, OcrError};
use crate::operation::EditOperation;
use crate::raster::ScanImage;

/// Undo/redo state for one document.
#[derive(Debug, Clone)]
pub struct EditSession {
    original: ScanImage,
    current: ScanImage,
    history: VecDeque<ScanImage>,
    redo_history: Vec<ScanImage>,
    history_limit: Option<NonZeroUsize>,
}

impl EditSession {
    /// Start a session on `image`, which becomes both the original and the
    /// current state.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the image has zero area or a mismatched buffer.
    pub fn new(image: ScanImage) -> Result<Self, EditError> {
        image.validate()?;
        debug!(width = image.width, height = image.height, "Edit session started");
        Ok(Self {
            current: image.clone(),
            original: image,
            history: VecDeque::new(),
            redo_history: Vec::new(),
            history_limit: None,
        })
    }

    /// Like [`EditSession::new`], keeping at most `limit` undo snapshots.
    ///
    /// When a commit would exceed the limit the oldest snapshot is dropped.
    pub fn with_history_limit(image: ScanImage, limit: NonZeroUsize) -> Result<Self, EditError> {
        let mut session = Self::new(image)?;
        session.history_limit = Some(limit);
        Ok(session)
    }

    /// Make `result` the current image, remembering the previous one for
    /// undo. Any redo states are discarded.
    ///
    /// # Errors
    ///
    /// `InvalidResult` if `result` is empty or malformed; the session is
    /// left unchanged.
    pub fn commit(&mut self, result: ScanImage) -> Result<(), EditError> {
        result
            .validate()
            .map_err(|e| EditError::InvalidResult(e.to_string()))?;

        let previous = std::mem::replace(&mut self.current, result);
        self.history.push_back(previous);
        self.redo_history.clear();

        if let Some(limit) = self.history_limit {
            while self.history.len() > limit.get() {
                self.history.pop_front();
            }
        }

        debug!(
            width = self.current.width,
            height = self.current.height,
            undo_depth = self.history.len(),
            "Edit committed"
        );
        Ok(())
    }

    /// Run `op` on the current image and commit the result.
    ///
    /// A failing operation leaves the session untouched.
    pub fn apply(&mut self, op: &EditOperation) -> Result<(), EditError> {
        debug!(op = op.name(), "Applying edit");
        let result = op.apply(&self.current)?;
        self.commit(result)
    }

    /// Step back one edit. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.history.pop_back() else {
            return false;
        };
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_history.push(undone);
        debug!(
            undo_depth = self.history.len(),
            redo_depth = self.redo_history.len(),
            "Undo"
        );
        true
    }

    /// Re-apply the most recently undone edit. Returns `false` if there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_history.pop() else {
            return false;
        };
        let replaced = std::mem::replace(&mut self.current, next);
        self.history.push_back(replaced);
        debug!(
            undo_depth = self.history.len(),
            redo_depth = self.redo_history.len(),
            "Redo"
        );
        true
    }

    /// Return to the original image and forget all history.
    pub fn reset(&mut self) {
        self.current = self.original.clone();
        self.history.clear();
        self.redo_history.clear();
        debug!("Session reset");
    }

    /// Copy of the current image. Later edits do not affect it.
    pub fn finalize(&self) -> ScanImage {
        self.current.clone()
    }

    /// End the session, handing over the current image.
    pub fn into_image(self) -> ScanImage {
        self.current
    }

    /// Recognize the text of the current image.
    ///
    /// The session is borrowed immutably, so a failed OCR run leaves it
    /// exactly as it was.
    pub fn recognize(&self, engine: &dyn OcrEngine) -> Result<String, OcrError> {
        engine.recognize(&self.current)
    }

    pub fn current(&self) -> &ScanImage {
        &self.current
    }

    pub fn original(&self) -> &ScanImage {
        &self.original
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_history.is_empty()
    }

    /// Number of snapshots available to undo.
    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Number of snapshots available to redo.
    pub fn redo_depth(&self) -> usize {
        self.redo_history.len()
    }

    pub fn history_limit(&self) -> Option<NonZeroUsize> {
        self.history_limit
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
