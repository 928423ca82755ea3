//! Error type shared by the edit session and the transforms.

use thiserror::Error;

/// Errors raised by transforms and by [`EditSession`](crate::EditSession).
///
/// All of these are deterministic: repeating the call with the same input
/// fails the same way, so callers should not retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// The source image is empty or its buffer does not match its dimensions.
    #[error("Invalid input image: {0}")]
    InvalidInput(String),

    /// A transform argument is out of range, non-finite, or describes a
    /// degenerate region.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A committed image is degenerate and cannot become the current image.
    #[error("Invalid edit result: {0}")]
    InvalidResult(String),
}
