//! Native layer for the Steamworks flat API.
//!
//! Loads `steam_api` at runtime, resolves its `SteamAPI_*` entry points
//! into a [`table::NativeTable`] and exposes them through one seam trait
//! per native interface (see [`api`]). Nothing here keeps state beyond
//! the loaded library; caching and gating live in the layers above.

pub mod api;
pub mod error;
pub mod ffi;
pub mod interface;
pub mod library;
pub mod table;
pub mod types;

pub use api::{CallResultApi, NativeApi, SteamCore};
pub use error::NativeError;
pub use interface::{Interface, InterfaceSlot};
pub use library::{DEFAULT_LIBRARY, SteamLibrary};
pub use types::{
    AppId, CallFailure, CallHandle, CallStatus, CallbackId, EResult, FetchStatus, InterfacePtr,
    LeaderboardHandle, PublishedFileId, SteamId, UgcUpdateHandle,
};
