//! In-process stand-in for the Steam library.
//!
//! Every seam-trait method records its name before answering with a canned
//! value, so tests can assert exactly which native calls were made. Async
//! starts hand out increasing call handles; their results are scripted per
//! callback id and reported complete on the first check.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use steambridge_callbacks::PollOptions;

use steambridge_native::api::{
    AnalogActionData, AppsApi, AuthTicket, CallResultApi, DigitalActionData, DownloadedEntry,
    FriendsApi, InputApi, ItemInstallInfo, NetworkingApi, ReceivedMessage, ScreenshotsApi,
    SteamCore, UgcApi, UpdateProgress, UserApi, UserStatsApi, UtilsApi,
};
use steambridge_native::ffi::ConnectionStatusFn;
use steambridge_native::{
    AppId, CallFailure, CallHandle, CallStatus, CallbackId, EResult, FetchStatus, Interface,
    InterfacePtr, LeaderboardHandle, NativeError, PublishedFileId, SteamId, UgcUpdateHandle,
};

use crate::shared::Shared;

pub(crate) const FAKE_STEAM_ID: SteamId = 76_561_198_000_000_001;
pub(crate) const FAKE_APP_ID: AppId = 480;

#[derive(Default)]
pub(crate) struct FakeSteam {
    calls: Mutex<Vec<&'static str>>,
    results: Mutex<HashMap<CallbackId, Vec<u8>>>,
    next_call: AtomicU64,
    /// Async starts return the invalid handle.
    pub(crate) fail_starts: AtomicBool,
    /// Interface accessors return null.
    pub(crate) no_interfaces: AtomicBool,
    /// `SteamAPI_InitFlat` fails.
    pub(crate) fail_init: AtomicBool,
    stats: Mutex<HashMap<String, i32>>,
    status_callback: Mutex<Option<ConnectionStatusFn>>,
    receive_max: Mutex<Option<usize>>,
}

impl FakeSteam {
    fn hit(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, name: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == name).count()
    }

    /// `max` passed to the latest `receive_messages`.
    pub(crate) fn last_receive_max(&self) -> Option<usize> {
        *self.receive_max.lock().unwrap()
    }

    /// Scripts the result buffer returned for `callback`.
    pub(crate) fn script(&self, callback: CallbackId, payload: Vec<u8>) {
        self.results.lock().unwrap().insert(callback, payload);
    }

    pub(crate) fn status_callback(&self) -> Option<ConnectionStatusFn> {
        *self.status_callback.lock().unwrap()
    }

    fn start(&self, name: &'static str) -> Result<CallHandle, NativeError> {
        self.hit(name);
        if self.fail_starts.load(Ordering::SeqCst) {
            return Ok(CallHandle::INVALID);
        }
        Ok(CallHandle(self.next_call.fetch_add(1, Ordering::SeqCst) + 1))
    }
}

/// Shared state over a fresh fake, polling 3 x 10 ms.
pub(crate) fn shared(initialized: bool) -> (Arc<FakeSteam>, Arc<Shared<FakeSteam>>) {
    let fake = Arc::new(FakeSteam::default());
    let poll = PollOptions::new(3, Duration::from_millis(10));
    let shared = Arc::new(Shared::new(Arc::clone(&fake), poll));
    shared.set_initialized(initialized);
    (fake, shared)
}

/// Little-endian payload builder for scripted results.
#[derive(Default)]
pub(crate) struct Payload(Vec<u8>);

impl Payload {
    pub(crate) fn zeroed(size: usize) -> Self {
        Self(vec![0; size])
    }

    pub(crate) fn u8(mut self, offset: usize, v: u8) -> Self {
        self.0[offset] = v;
        self
    }

    pub(crate) fn i32(mut self, offset: usize, v: i32) -> Self {
        self.0[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn u32(mut self, offset: usize, v: u32) -> Self {
        self.0[offset..offset + 4].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn u64(mut self, offset: usize, v: u64) -> Self {
        self.0[offset..offset + 8].copy_from_slice(&v.to_le_bytes());
        self
    }

    pub(crate) fn bytes(mut self, offset: usize, v: &[u8]) -> Self {
        self.0[offset..offset + v.len()].copy_from_slice(v);
        self
    }

    pub(crate) fn build(self) -> Vec<u8> {
        self.0
    }
}

impl SteamCore for FakeSteam {
    fn init(&self, _app_id: Option<AppId>) -> Result<(), NativeError> {
        self.hit("init");
        if self.fail_init.load(Ordering::SeqCst) {
            return Err(NativeError::InitFailed {
                code: 2,
                message: "No appID found".into(),
            });
        }
        Ok(())
    }

    fn shutdown(&self) {
        self.hit("shutdown");
    }

    fn run_callbacks(&self) {
        self.hit("run_callbacks");
    }

    fn is_steam_running(&self) -> bool {
        self.hit("is_steam_running");
        true
    }

    fn restart_app_if_necessary(&self, _app_id: AppId) -> Result<bool, NativeError> {
        self.hit("restart_app_if_necessary");
        Ok(false)
    }

    fn interface(&self, kind: Interface) -> Option<InterfacePtr> {
        self.hit("interface");
        if self.no_interfaces.load(Ordering::SeqCst) {
            return None;
        }
        InterfacePtr::from_addr(0x1000 + kind as usize * 0x10)
    }
}

impl CallResultApi for FakeSteam {
    fn is_api_call_completed(&self, _utils: InterfacePtr, _call: CallHandle) -> Result<CallStatus, NativeError> {
        self.hit("is_api_call_completed");
        Ok(CallStatus {
            completed: true,
            failed: false,
        })
    }

    fn get_api_call_result(
        &self,
        _utils: InterfacePtr,
        _call: CallHandle,
        buf: &mut [u8],
        callback: CallbackId,
    ) -> Result<FetchStatus, NativeError> {
        self.hit("get_api_call_result");
        let results = self.results.lock().unwrap();
        let Some(payload) = results.get(&callback) else {
            return Ok(FetchStatus {
                fetched: true,
                failed: true,
            });
        };
        let n = buf.len().min(payload.len());
        buf[..n].copy_from_slice(&payload[..n]);
        Ok(FetchStatus {
            fetched: true,
            failed: false,
        })
    }

    fn get_api_call_failure_reason(&self, _utils: InterfacePtr, _call: CallHandle) -> Result<CallFailure, NativeError> {
        self.hit("get_api_call_failure_reason");
        Ok(CallFailure::NetworkFailure)
    }
}

impl UtilsApi for FakeSteam {
    fn app_id(&self, _utils: InterfacePtr) -> Result<AppId, NativeError> {
        self.hit("app_id");
        Ok(FAKE_APP_ID)
    }

    fn seconds_since_app_active(&self, _utils: InterfacePtr) -> Result<u32, NativeError> {
        self.hit("seconds_since_app_active");
        Ok(42)
    }

    fn current_battery_power(&self, _utils: InterfacePtr) -> Result<u8, NativeError> {
        self.hit("current_battery_power");
        Ok(255)
    }

    fn ip_country(&self, _utils: InterfacePtr) -> Result<String, NativeError> {
        self.hit("ip_country");
        Ok("AR".into())
    }

    fn server_real_time(&self, _utils: InterfacePtr) -> Result<u32, NativeError> {
        self.hit("server_real_time");
        Ok(1_700_000_000)
    }

    fn is_overlay_enabled(&self, _utils: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("is_overlay_enabled");
        Ok(true)
    }

    fn is_steam_running_on_steam_deck(&self, _utils: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("is_steam_running_on_steam_deck");
        Ok(true)
    }

    fn steam_ui_language(&self, _utils: InterfacePtr) -> Result<String, NativeError> {
        self.hit("steam_ui_language");
        Ok("english".into())
    }

    fn show_floating_gamepad_text_input(
        &self,
        _utils: InterfacePtr,
        _mode: i32,
        _x: i32,
        _y: i32,
        _width: i32,
        _height: i32,
    ) -> Result<bool, NativeError> {
        self.hit("show_floating_gamepad_text_input");
        Ok(true)
    }
}

impl AppsApi for FakeSteam {
    fn is_subscribed(&self, _apps: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("is_subscribed");
        Ok(true)
    }

    fn is_subscribed_app(&self, _apps: InterfacePtr, app_id: AppId) -> Result<bool, NativeError> {
        self.hit("is_subscribed_app");
        Ok(app_id == FAKE_APP_ID)
    }

    fn is_dlc_installed(&self, _apps: InterfacePtr, _app_id: AppId) -> Result<bool, NativeError> {
        self.hit("is_dlc_installed");
        Ok(false)
    }

    fn current_game_language(&self, _apps: InterfacePtr) -> Result<String, NativeError> {
        self.hit("current_game_language");
        Ok("spanish".into())
    }

    fn available_game_languages(&self, _apps: InterfacePtr) -> Result<String, NativeError> {
        self.hit("available_game_languages");
        Ok("english,spanish, german".into())
    }

    fn app_build_id(&self, _apps: InterfacePtr) -> Result<i32, NativeError> {
        self.hit("app_build_id");
        Ok(1234)
    }

    fn app_owner(&self, _apps: InterfacePtr) -> Result<SteamId, NativeError> {
        self.hit("app_owner");
        Ok(FAKE_STEAM_ID)
    }

    fn app_install_dir(&self, _apps: InterfacePtr, app_id: AppId) -> Result<Option<String>, NativeError> {
        self.hit("app_install_dir");
        Ok((app_id == FAKE_APP_ID).then(|| "/games/spacewar".to_string()))
    }

    fn dlc_count(&self, _apps: InterfacePtr) -> Result<i32, NativeError> {
        self.hit("dlc_count");
        Ok(3)
    }

    fn is_subscribed_from_family_sharing(&self, _apps: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("is_subscribed_from_family_sharing");
        Ok(false)
    }
}

impl FriendsApi for FakeSteam {
    fn persona_name(&self, _friends: InterfacePtr) -> Result<String, NativeError> {
        self.hit("persona_name");
        Ok("capy".into())
    }

    fn persona_state(&self, _friends: InterfacePtr) -> Result<i32, NativeError> {
        self.hit("persona_state");
        Ok(1)
    }

    fn friend_count(&self, _friends: InterfacePtr, _flags: i32) -> Result<i32, NativeError> {
        self.hit("friend_count");
        Ok(2)
    }

    fn friend_by_index(&self, _friends: InterfacePtr, index: i32, _flags: i32) -> Result<SteamId, NativeError> {
        self.hit("friend_by_index");
        Ok(FAKE_STEAM_ID + 1 + index as u64)
    }

    fn friend_persona_name(&self, _friends: InterfacePtr, friend: SteamId) -> Result<String, NativeError> {
        self.hit("friend_persona_name");
        Ok(format!("friend-{}", friend - FAKE_STEAM_ID))
    }

    fn set_rich_presence(&self, _friends: InterfacePtr, _key: &str, _value: &str) -> Result<bool, NativeError> {
        self.hit("set_rich_presence");
        Ok(true)
    }

    fn clear_rich_presence(&self, _friends: InterfacePtr) -> Result<(), NativeError> {
        self.hit("clear_rich_presence");
        Ok(())
    }

    fn friend_rich_presence(&self, _friends: InterfacePtr, _friend: SteamId, key: &str) -> Result<String, NativeError> {
        self.hit("friend_rich_presence");
        Ok(if key == "status" { "In menus".into() } else { String::new() })
    }

    fn activate_game_overlay(&self, _friends: InterfacePtr, _dialog: &str) -> Result<(), NativeError> {
        self.hit("activate_game_overlay");
        Ok(())
    }

    fn activate_game_overlay_to_user(&self, _friends: InterfacePtr, _dialog: &str, _user: SteamId) -> Result<(), NativeError> {
        self.hit("activate_game_overlay_to_user");
        Ok(())
    }

    fn activate_game_overlay_to_web_page(&self, _friends: InterfacePtr, _url: &str, _mode: i32) -> Result<(), NativeError> {
        self.hit("activate_game_overlay_to_web_page");
        Ok(())
    }

    fn activate_game_overlay_to_store(&self, _friends: InterfacePtr, _app_id: AppId, _flag: i32) -> Result<(), NativeError> {
        self.hit("activate_game_overlay_to_store");
        Ok(())
    }

    fn activate_game_overlay_invite_dialog(&self, _friends: InterfacePtr, _lobby: SteamId) -> Result<(), NativeError> {
        self.hit("activate_game_overlay_invite_dialog");
        Ok(())
    }
}

impl UserApi for FakeSteam {
    fn steam_id(&self, _user: InterfacePtr) -> Result<SteamId, NativeError> {
        self.hit("steam_id");
        Ok(FAKE_STEAM_ID)
    }

    fn logged_on(&self, _user: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("logged_on");
        Ok(true)
    }

    fn player_steam_level(&self, _user: InterfacePtr) -> Result<i32, NativeError> {
        self.hit("player_steam_level");
        Ok(12)
    }

    fn auth_session_ticket(&self, _user: InterfacePtr) -> Result<Option<AuthTicket>, NativeError> {
        self.hit("auth_session_ticket");
        Ok(Some(AuthTicket {
            handle: 7,
            ticket: vec![0xCA, 0xFE],
        }))
    }

    fn cancel_auth_ticket(&self, _user: InterfacePtr, _handle: u32) -> Result<(), NativeError> {
        self.hit("cancel_auth_ticket");
        Ok(())
    }

    fn request_encrypted_app_ticket(&self, _user: InterfacePtr, _data: &[u8]) -> Result<CallHandle, NativeError> {
        self.start("request_encrypted_app_ticket")
    }

    fn encrypted_app_ticket(&self, _user: InterfacePtr) -> Result<Option<Vec<u8>>, NativeError> {
        self.hit("encrypted_app_ticket");
        Ok(Some(vec![1, 2, 3, 4]))
    }

    fn request_store_auth_url(&self, _user: InterfacePtr, _redirect_url: &str) -> Result<CallHandle, NativeError> {
        self.start("request_store_auth_url")
    }

    fn market_eligibility(&self, _user: InterfacePtr) -> Result<CallHandle, NativeError> {
        self.start("market_eligibility")
    }

    fn duration_control(&self, _user: InterfacePtr) -> Result<CallHandle, NativeError> {
        self.start("duration_control")
    }
}

impl UserStatsApi for FakeSteam {
    fn get_stat_i32(&self, _stats: InterfacePtr, name: &str) -> Result<Option<i32>, NativeError> {
        self.hit("get_stat_i32");
        Ok(self.stats.lock().unwrap().get(name).copied())
    }

    fn get_stat_f32(&self, _stats: InterfacePtr, name: &str) -> Result<Option<f32>, NativeError> {
        self.hit("get_stat_f32");
        Ok(self.stats.lock().unwrap().get(name).map(|v| *v as f32))
    }

    fn set_stat_i32(&self, _stats: InterfacePtr, name: &str, value: i32) -> Result<bool, NativeError> {
        self.hit("set_stat_i32");
        self.stats.lock().unwrap().insert(name.to_string(), value);
        Ok(true)
    }

    fn set_stat_f32(&self, _stats: InterfacePtr, name: &str, value: f32) -> Result<bool, NativeError> {
        self.hit("set_stat_f32");
        self.stats.lock().unwrap().insert(name.to_string(), value as i32);
        Ok(true)
    }

    fn store_stats(&self, _stats: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("store_stats");
        Ok(true)
    }

    fn get_achievement(&self, _stats: InterfacePtr, name: &str) -> Result<Option<bool>, NativeError> {
        self.hit("get_achievement");
        Ok((name == "ACH_WIN_ONE_GAME").then_some(true))
    }

    fn set_achievement(&self, _stats: InterfacePtr, _name: &str) -> Result<bool, NativeError> {
        self.hit("set_achievement");
        Ok(true)
    }

    fn clear_achievement(&self, _stats: InterfacePtr, _name: &str) -> Result<bool, NativeError> {
        self.hit("clear_achievement");
        Ok(true)
    }

    fn num_achievements(&self, _stats: InterfacePtr) -> Result<u32, NativeError> {
        self.hit("num_achievements");
        Ok(2)
    }

    fn achievement_name(&self, _stats: InterfacePtr, index: u32) -> Result<String, NativeError> {
        self.hit("achievement_name");
        Ok(format!("ACH_{index}"))
    }

    fn reset_all_stats(&self, _stats: InterfacePtr, _achievements_too: bool) -> Result<bool, NativeError> {
        self.hit("reset_all_stats");
        self.stats.lock().unwrap().clear();
        Ok(true)
    }

    fn request_user_stats(&self, _stats: InterfacePtr, _user: SteamId) -> Result<CallHandle, NativeError> {
        self.start("request_user_stats")
    }

    fn request_global_stats(&self, _stats: InterfacePtr, _history_days: i32) -> Result<CallHandle, NativeError> {
        self.start("request_global_stats")
    }

    fn number_of_current_players(&self, _stats: InterfacePtr) -> Result<CallHandle, NativeError> {
        self.start("number_of_current_players")
    }

    fn find_leaderboard(&self, _stats: InterfacePtr, _name: &str) -> Result<CallHandle, NativeError> {
        self.start("find_leaderboard")
    }

    fn find_or_create_leaderboard(
        &self,
        _stats: InterfacePtr,
        _name: &str,
        _sort_method: i32,
        _display_type: i32,
    ) -> Result<CallHandle, NativeError> {
        self.start("find_or_create_leaderboard")
    }

    fn leaderboard_name(&self, _stats: InterfacePtr, _board: LeaderboardHandle) -> Result<String, NativeError> {
        self.hit("leaderboard_name");
        Ok("Feet Traveled".into())
    }

    fn leaderboard_entry_count(&self, _stats: InterfacePtr, _board: LeaderboardHandle) -> Result<i32, NativeError> {
        self.hit("leaderboard_entry_count");
        Ok(2)
    }

    fn upload_leaderboard_score(
        &self,
        _stats: InterfacePtr,
        _board: LeaderboardHandle,
        _method: i32,
        _score: i32,
        _details: &[i32],
    ) -> Result<CallHandle, NativeError> {
        self.start("upload_leaderboard_score")
    }

    fn download_leaderboard_entries(
        &self,
        _stats: InterfacePtr,
        _board: LeaderboardHandle,
        _request: i32,
        _range_start: i32,
        _range_end: i32,
    ) -> Result<CallHandle, NativeError> {
        self.start("download_leaderboard_entries")
    }

    fn downloaded_leaderboard_entry(
        &self,
        _stats: InterfacePtr,
        _entries: u64,
        index: i32,
        max_details: usize,
    ) -> Result<Option<DownloadedEntry>, NativeError> {
        self.hit("downloaded_leaderboard_entry");
        Ok(Some(DownloadedEntry {
            steam_id: FAKE_STEAM_ID + index as u64,
            global_rank: index + 1,
            score: 1000 - index * 100,
            details: vec![index; max_details.min(1)],
            ugc: 0,
        }))
    }
}

impl UgcApi for FakeSteam {
    fn create_item(&self, _ugc: InterfacePtr, _app_id: AppId, _file_type: i32) -> Result<CallHandle, NativeError> {
        self.start("create_item")
    }

    fn start_item_update(&self, _ugc: InterfacePtr, _app_id: AppId, _item: PublishedFileId) -> Result<UgcUpdateHandle, NativeError> {
        self.hit("start_item_update");
        Ok(0xBEEF)
    }

    fn set_item_title(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, _title: &str) -> Result<bool, NativeError> {
        self.hit("set_item_title");
        Ok(true)
    }

    fn set_item_description(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, _description: &str) -> Result<bool, NativeError> {
        self.hit("set_item_description");
        Ok(true)
    }

    fn set_item_content(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, folder: &str) -> Result<bool, NativeError> {
        self.hit("set_item_content");
        Ok(!folder.is_empty())
    }

    fn set_item_preview(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, _file: &str) -> Result<bool, NativeError> {
        self.hit("set_item_preview");
        Ok(true)
    }

    fn set_item_visibility(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, _visibility: i32) -> Result<bool, NativeError> {
        self.hit("set_item_visibility");
        Ok(true)
    }

    fn submit_item_update(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle, _change_note: Option<&str>) -> Result<CallHandle, NativeError> {
        self.start("submit_item_update")
    }

    fn item_update_progress(&self, _ugc: InterfacePtr, _update: UgcUpdateHandle) -> Result<UpdateProgress, NativeError> {
        self.hit("item_update_progress");
        Ok(UpdateProgress {
            status: 3,
            bytes_processed: 512,
            bytes_total: 1024,
        })
    }

    fn subscribe_item(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("subscribe_item")
    }

    fn unsubscribe_item(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("unsubscribe_item")
    }

    fn set_user_item_vote(&self, _ugc: InterfacePtr, _item: PublishedFileId, _vote_up: bool) -> Result<CallHandle, NativeError> {
        self.start("set_user_item_vote")
    }

    fn get_user_item_vote(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("get_user_item_vote")
    }

    fn add_item_to_favorites(&self, _ugc: InterfacePtr, _app_id: AppId, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("add_item_to_favorites")
    }

    fn remove_item_from_favorites(&self, _ugc: InterfacePtr, _app_id: AppId, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("remove_item_from_favorites")
    }

    fn delete_item(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<CallHandle, NativeError> {
        self.start("delete_item")
    }

    fn item_state(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<u32, NativeError> {
        self.hit("item_state");
        Ok(1 | 4)
    }

    fn item_install_info(&self, _ugc: InterfacePtr, item: PublishedFileId) -> Result<Option<ItemInstallInfo>, NativeError> {
        self.hit("item_install_info");
        Ok(Some(ItemInstallInfo {
            size_on_disk: 2048,
            folder: format!("/workshop/{item}"),
            timestamp: 1_700_000_000,
        }))
    }

    fn item_download_info(&self, _ugc: InterfacePtr, _item: PublishedFileId) -> Result<Option<(u64, u64)>, NativeError> {
        self.hit("item_download_info");
        Ok(Some((10, 20)))
    }

    fn download_item(&self, _ugc: InterfacePtr, _item: PublishedFileId, _high_priority: bool) -> Result<bool, NativeError> {
        self.hit("download_item");
        Ok(true)
    }

    fn subscribed_items(&self, _ugc: InterfacePtr) -> Result<Vec<PublishedFileId>, NativeError> {
        self.hit("subscribed_items");
        Ok(vec![11, 22])
    }
}

impl InputApi for FakeSteam {
    fn input_init(&self, _input: InterfacePtr, _explicitly_call_run_frame: bool) -> Result<bool, NativeError> {
        self.hit("input_init");
        Ok(true)
    }

    fn input_shutdown(&self, _input: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("input_shutdown");
        Ok(true)
    }

    fn run_frame(&self, _input: InterfacePtr) -> Result<(), NativeError> {
        self.hit("run_frame");
        Ok(())
    }

    fn connected_controllers(&self, _input: InterfacePtr) -> Result<Vec<u64>, NativeError> {
        self.hit("connected_controllers");
        Ok(vec![100])
    }

    fn action_set_handle(&self, _input: InterfacePtr, name: &str) -> Result<u64, NativeError> {
        self.hit("action_set_handle");
        Ok(if name == "missing" { 0 } else { 1 })
    }

    fn activate_action_set(&self, _input: InterfacePtr, _controller: u64, _action_set: u64) -> Result<(), NativeError> {
        self.hit("activate_action_set");
        Ok(())
    }

    fn digital_action_handle(&self, _input: InterfacePtr, _name: &str) -> Result<u64, NativeError> {
        self.hit("digital_action_handle");
        Ok(2)
    }

    fn digital_action_data(&self, _input: InterfacePtr, _controller: u64, _action: u64) -> Result<DigitalActionData, NativeError> {
        self.hit("digital_action_data");
        Ok(DigitalActionData {
            state: true,
            active: true,
        })
    }

    fn analog_action_handle(&self, _input: InterfacePtr, _name: &str) -> Result<u64, NativeError> {
        self.hit("analog_action_handle");
        Ok(3)
    }

    fn analog_action_data(&self, _input: InterfacePtr, _controller: u64, _action: u64) -> Result<AnalogActionData, NativeError> {
        self.hit("analog_action_data");
        Ok(AnalogActionData {
            mode: 1,
            x: 0.5,
            y: -0.25,
            active: true,
        })
    }

    fn input_type_for_handle(&self, _input: InterfacePtr, _controller: u64) -> Result<i32, NativeError> {
        self.hit("input_type_for_handle");
        Ok(14)
    }

    fn trigger_vibration(&self, _input: InterfacePtr, _controller: u64, _left: u16, _right: u16) -> Result<(), NativeError> {
        self.hit("trigger_vibration");
        Ok(())
    }
}

impl ScreenshotsApi for FakeSteam {
    fn trigger_screenshot(&self, _screenshots: InterfacePtr) -> Result<(), NativeError> {
        self.hit("trigger_screenshot");
        Ok(())
    }

    fn hook_screenshots(&self, _screenshots: InterfacePtr, _hook: bool) -> Result<(), NativeError> {
        self.hit("hook_screenshots");
        Ok(())
    }

    fn is_screenshots_hooked(&self, _screenshots: InterfacePtr) -> Result<bool, NativeError> {
        self.hit("is_screenshots_hooked");
        Ok(false)
    }

    fn add_screenshot_to_library(
        &self,
        _screenshots: InterfacePtr,
        path: &str,
        _thumbnail: Option<&str>,
        _width: i32,
        _height: i32,
    ) -> Result<u32, NativeError> {
        self.hit("add_screenshot_to_library");
        Ok(if path.ends_with(".jpg") { 9 } else { 0 })
    }

    fn set_location(&self, _screenshots: InterfacePtr, _screenshot: u32, _location: &str) -> Result<bool, NativeError> {
        self.hit("set_location");
        Ok(true)
    }

    fn tag_user(&self, _screenshots: InterfacePtr, _screenshot: u32, _user: SteamId) -> Result<bool, NativeError> {
        self.hit("tag_user");
        Ok(true)
    }

    fn tag_published_file(&self, _screenshots: InterfacePtr, _screenshot: u32, _item: PublishedFileId) -> Result<bool, NativeError> {
        self.hit("tag_published_file");
        Ok(true)
    }
}

impl NetworkingApi for FakeSteam {
    fn init_relay_network_access(&self, _utils: InterfacePtr) -> Result<(), NativeError> {
        self.hit("init_relay_network_access");
        Ok(())
    }

    fn set_connection_status_callback(
        &self,
        _utils: InterfacePtr,
        callback: Option<ConnectionStatusFn>,
    ) -> Result<bool, NativeError> {
        self.hit("set_connection_status_callback");
        *self.status_callback.lock().unwrap() = callback;
        Ok(true)
    }

    fn create_listen_socket_p2p(&self, _sockets: InterfacePtr, _virtual_port: i32) -> Result<u32, NativeError> {
        self.hit("create_listen_socket_p2p");
        Ok(5)
    }

    fn connect_p2p(&self, _sockets: InterfacePtr, _remote: SteamId, _virtual_port: i32) -> Result<u32, NativeError> {
        self.hit("connect_p2p");
        Ok(6)
    }

    fn accept_connection(&self, _sockets: InterfacePtr, conn: u32) -> Result<EResult, NativeError> {
        self.hit("accept_connection");
        Ok(if conn == 6 { EResult::OK } else { EResult::INVALID_PARAM })
    }

    fn close_connection(
        &self,
        _sockets: InterfacePtr,
        _conn: u32,
        _reason: i32,
        _debug: Option<&str>,
        _linger: bool,
    ) -> Result<bool, NativeError> {
        self.hit("close_connection");
        Ok(true)
    }

    fn close_listen_socket(&self, _sockets: InterfacePtr, _socket: u32) -> Result<bool, NativeError> {
        self.hit("close_listen_socket");
        Ok(true)
    }

    fn send_message(&self, _sockets: InterfacePtr, conn: u32, _data: &[u8], _flags: i32) -> Result<(EResult, i64), NativeError> {
        self.hit("send_message");
        if conn == 6 {
            Ok((EResult::OK, 17))
        } else {
            Ok((EResult::INVALID_PARAM, 0))
        }
    }

    fn receive_messages(&self, _sockets: InterfacePtr, conn: u32, max: usize) -> Result<Vec<ReceivedMessage>, NativeError> {
        self.hit("receive_messages");
        *self.receive_max.lock().unwrap() = Some(max);
        let all = vec![
            ReceivedMessage {
                conn,
                sender: Some(FAKE_STEAM_ID),
                data: b"ping".to_vec(),
                message_number: 1,
                channel: 0,
            },
            ReceivedMessage {
                conn,
                sender: Some(FAKE_STEAM_ID),
                data: b"pong".to_vec(),
                message_number: 2,
                channel: 0,
            },
        ];
        Ok(all.into_iter().take(max).collect())
    }
}
