//! Error types for result decoding.

use steambridge_native::CallbackId;

/// Errors produced while decoding a call result buffer.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("{shape}: buffer holds {actual} bytes, need {expected}")]
    Truncated {
        shape: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("callback {callback} is decoded as {expected}, got shape {actual}")]
    ShapeMismatch {
        callback: CallbackId,
        expected: &'static str,
        actual: &'static str,
    },
}
