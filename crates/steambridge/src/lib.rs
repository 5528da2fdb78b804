//! Managers over the Steamworks flat API.
//!
//! A [`Client`] owns the loaded library, the initialised flag and one
//! instance of every manager. Manager operations never return errors:
//! while the SDK is down, or the native interface cannot be fetched, they
//! log a warning and answer with the sentinel for their return type
//! (`false`, `0`, `""`, `None`, empty `Vec`) without touching the library.
//!
//! Asynchronous operations start a native call and hand the handle to the
//! [`Poller`](steambridge_callbacks::Poller), resolving to `None` on
//! failure or timeout.
//!
//! ```no_run
//! # async fn demo() -> Result<(), steambridge::NativeError> {
//! use steambridge::{Client, ClientOptions};
//!
//! let client = Client::load(ClientOptions::default())?;
//! client.init()?;
//! if let Some(board) = client.leaderboards().find("Feet Traveled").await {
//!     let scores = client.leaderboards().download_scores(board, Default::default(), 1, 10).await;
//!     println!("{} entries", scores.len());
//! }
//! client.shutdown();
//! # Ok(())
//! # }
//! ```

pub mod apps;
pub mod client;
pub mod friends;
pub mod input;
pub mod leaderboards;
pub mod networking;
pub mod overlay;
pub mod rich_presence;
pub mod screenshots;
mod shared;
pub mod stats;
pub mod user;
pub mod utils;
pub mod workshop;

#[cfg(test)]
mod testing;

pub use client::{Client, ClientOptions};
pub use steambridge_callbacks::{CallbackResult, PollOptions};
pub use steambridge_native::{
    AppId, EResult, NativeApi, NativeError, PublishedFileId, SteamId, SteamLibrary,
};
