//! Error types for the native layer.

use crate::interface::Interface;

/// Errors produced while loading or calling into the Steamworks library.
#[derive(Debug, thiserror::Error)]
pub enum NativeError {
    #[error("failed to load {path}: {reason}")]
    LibraryLoad { path: String, reason: String },

    #[error("native entry point not exported: {0}")]
    MissingSymbol(&'static str),

    #[error("SteamAPI init failed ({code}): {message}")]
    InitFailed { code: i32, message: String },

    #[error("steam API is not initialized")]
    NotInitialized,

    #[error("interface unavailable: {0}")]
    InterfaceUnavailable(Interface),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("{0} is already registered")]
    AlreadyRegistered(&'static str),
}
