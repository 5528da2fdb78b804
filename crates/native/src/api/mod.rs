//! Seam traits over the native interfaces.
//!
//! Managers depend on these traits rather than on [`SteamLibrary`]
//! directly so every operation can be exercised against a test double.
//! Each submodule declares one interface trait and implements it for the
//! loaded library.
//!
//! [`SteamLibrary`]: crate::SteamLibrary

mod apps;
mod friends;
mod input;
mod networking;
mod screenshots;
mod ugc;
mod user;
mod user_stats;
mod utils;

pub use apps::AppsApi;
pub use friends::FriendsApi;
pub use input::{AnalogActionData, DigitalActionData, InputApi, MAX_CONTROLLERS};
pub use networking::{INVALID_CONNECTION, MAX_RECEIVE_BATCH, NetworkingApi, ReceivedMessage};
pub use screenshots::ScreenshotsApi;
pub use ugc::{ItemInstallInfo, UgcApi, UpdateProgress};
pub use user::{AuthTicket, UserApi};
pub use user_stats::{DownloadedEntry, UserStatsApi};
pub use utils::UtilsApi;

use crate::error::NativeError;
use crate::interface::Interface;
use crate::types::{AppId, CallFailure, CallHandle, CallStatus, CallbackId, FetchStatus, InterfacePtr};

/// SDK lifecycle, the callback pump and interface accessors.
pub trait SteamCore {
    fn init(&self, app_id: Option<AppId>) -> Result<(), NativeError>;

    fn shutdown(&self);

    /// Dispatches queued native callbacks and advances pending call results.
    fn run_callbacks(&self);

    fn is_steam_running(&self) -> bool;

    fn restart_app_if_necessary(&self, app_id: AppId) -> Result<bool, NativeError>;

    /// Fetches the interface pointer, or `None` when the accessor is missing
    /// or returns null.
    fn interface(&self, kind: Interface) -> Option<InterfacePtr>;
}

/// The `ISteamUtils` entry points used to collect call results.
pub trait CallResultApi {
    fn is_api_call_completed(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
    ) -> Result<CallStatus, NativeError>;

    /// Copies the result for `call` into `buf`. `buf.len()` is passed as the
    /// expected result size.
    fn get_api_call_result(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
        buf: &mut [u8],
        callback: CallbackId,
    ) -> Result<FetchStatus, NativeError>;

    fn get_api_call_failure_reason(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
    ) -> Result<CallFailure, NativeError>;
}

/// Every native interface the managers use.
pub trait NativeApi:
    SteamCore
    + CallResultApi
    + UtilsApi
    + AppsApi
    + FriendsApi
    + UserApi
    + UserStatsApi
    + UgcApi
    + InputApi
    + ScreenshotsApi
    + NetworkingApi
    + Send
    + Sync
    + 'static
{
}

impl<T> NativeApi for T where
    T: SteamCore
        + CallResultApi
        + UtilsApi
        + AppsApi
        + FriendsApi
        + UserApi
        + UserStatsApi
        + UgcApi
        + InputApi
        + ScreenshotsApi
        + NetworkingApi
        + Send
        + Sync
        + 'static
{
}
