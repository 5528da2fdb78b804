//! The foreign function table.
//!
//! Every native entry point the bridge uses is declared once below with its
//! exported name and C signature. Symbols are resolved when the library is
//! loaded; a symbol the library does not export stays unresolved and fails
//! with [`NativeError::MissingSymbol`] when invoked.

use std::ffi::{c_char, c_void};

use libloading::Library;

use crate::error::NativeError;
use crate::ffi::{
    ConnectionStatusFn, RawAnalogActionData, RawDigitalActionData, RawLeaderboardEntry,
    RawNetworkingIdentity, RawNetworkingMessage,
};

/// A resolved (or unresolved) native entry point.
pub struct Entry<F> {
    symbol: &'static str,
    func: Option<F>,
}

impl<F: Copy> Entry<F> {
    fn new(symbol: &'static str, func: Option<F>) -> Self {
        Self { symbol, func }
    }

    pub fn get(&self) -> Result<F, NativeError> {
        self.func.ok_or(NativeError::MissingSymbol(self.symbol))
    }

    pub fn is_resolved(&self) -> bool {
        self.func.is_some()
    }

    pub fn symbol(&self) -> &'static str {
        self.symbol
    }
}

/// Looks up `symbol` in `lib` and copies out the function pointer.
///
/// # Safety
/// `F` must match the exported symbol's real signature.
pub(crate) unsafe fn lookup<F: Copy>(lib: &Library, symbol: &str) -> Option<F> {
    let mut name = Vec::with_capacity(symbol.len() + 1);
    name.extend_from_slice(symbol.as_bytes());
    name.push(0);
    unsafe { lib.get::<F>(&name) }.ok().map(|sym| *sym)
}

macro_rules! native_table {
    ($( $field:ident = $symbol:literal : fn($($arg:ty),* $(,)?) $(-> $ret:ty)?; )*) => {
        /// Function pointers for every declared entry point.
        pub struct NativeTable {
            $( pub $field: Entry<unsafe extern "C" fn($($arg),*) $(-> $ret)?>, )*
        }

        impl NativeTable {
            /// Exported names of every declared entry point.
            pub const ENTRY_POINTS: &'static [&'static str] = &[$($symbol),*];

            /// # Safety
            /// `lib` must be a Steamworks flat API build whose exports match
            /// the declared signatures.
            pub(crate) unsafe fn resolve(lib: &Library) -> Self {
                Self {
                    $( $field: Entry::new($symbol, unsafe { lookup(lib, $symbol) }), )*
                }
            }

            /// A table with nothing resolved.
            pub fn empty() -> Self {
                Self {
                    $( $field: Entry::new($symbol, None), )*
                }
            }

            /// Names of entry points the loaded library does not export.
            pub fn unresolved(&self) -> Vec<&'static str> {
                let mut missing = Vec::new();
                $(
                    if !self.$field.is_resolved() {
                        missing.push(self.$field.symbol());
                    }
                )*
                missing
            }
        }
    };
}

native_table! {
    // Lifecycle
    init_flat = "SteamAPI_InitFlat": fn(*mut c_char) -> i32;
    shutdown = "SteamAPI_Shutdown": fn();
    run_callbacks = "SteamAPI_RunCallbacks": fn();
    is_steam_running = "SteamAPI_IsSteamRunning": fn() -> bool;
    restart_app_if_necessary = "SteamAPI_RestartAppIfNecessary": fn(u32) -> bool;

    // ISteamUtils
    utils_is_api_call_completed = "SteamAPI_ISteamUtils_IsAPICallCompleted": fn(*mut c_void, u64, *mut bool) -> bool;
    utils_get_api_call_result = "SteamAPI_ISteamUtils_GetAPICallResult": fn(*mut c_void, u64, *mut c_void, i32, i32, *mut bool) -> bool;
    utils_get_api_call_failure_reason = "SteamAPI_ISteamUtils_GetAPICallFailureReason": fn(*mut c_void, u64) -> i32;
    utils_app_id = "SteamAPI_ISteamUtils_GetAppID": fn(*mut c_void) -> u32;
    utils_seconds_since_app_active = "SteamAPI_ISteamUtils_GetSecondsSinceAppActive": fn(*mut c_void) -> u32;
    utils_current_battery_power = "SteamAPI_ISteamUtils_GetCurrentBatteryPower": fn(*mut c_void) -> u8;
    utils_ip_country = "SteamAPI_ISteamUtils_GetIPCountry": fn(*mut c_void) -> *const c_char;
    utils_server_real_time = "SteamAPI_ISteamUtils_GetServerRealTime": fn(*mut c_void) -> u32;
    utils_is_overlay_enabled = "SteamAPI_ISteamUtils_IsOverlayEnabled": fn(*mut c_void) -> bool;
    utils_is_steam_running_on_steam_deck = "SteamAPI_ISteamUtils_IsSteamRunningOnSteamDeck": fn(*mut c_void) -> bool;
    utils_steam_ui_language = "SteamAPI_ISteamUtils_GetSteamUILanguage": fn(*mut c_void) -> *const c_char;
    utils_show_floating_gamepad_text_input = "SteamAPI_ISteamUtils_ShowFloatingGamepadTextInput": fn(*mut c_void, i32, i32, i32, i32, i32) -> bool;

    // ISteamApps
    apps_is_subscribed = "SteamAPI_ISteamApps_BIsSubscribed": fn(*mut c_void) -> bool;
    apps_is_subscribed_app = "SteamAPI_ISteamApps_BIsSubscribedApp": fn(*mut c_void, u32) -> bool;
    apps_is_dlc_installed = "SteamAPI_ISteamApps_BIsDlcInstalled": fn(*mut c_void, u32) -> bool;
    apps_current_game_language = "SteamAPI_ISteamApps_GetCurrentGameLanguage": fn(*mut c_void) -> *const c_char;
    apps_available_game_languages = "SteamAPI_ISteamApps_GetAvailableGameLanguages": fn(*mut c_void) -> *const c_char;
    apps_app_build_id = "SteamAPI_ISteamApps_GetAppBuildId": fn(*mut c_void) -> i32;
    apps_app_owner = "SteamAPI_ISteamApps_GetAppOwner": fn(*mut c_void) -> u64;
    apps_app_install_dir = "SteamAPI_ISteamApps_GetAppInstallDir": fn(*mut c_void, u32, *mut c_char, u32) -> u32;
    apps_dlc_count = "SteamAPI_ISteamApps_GetDLCCount": fn(*mut c_void) -> i32;
    apps_is_subscribed_from_family_sharing = "SteamAPI_ISteamApps_BIsSubscribedFromFamilySharing": fn(*mut c_void) -> bool;

    // ISteamFriends
    friends_persona_name = "SteamAPI_ISteamFriends_GetPersonaName": fn(*mut c_void) -> *const c_char;
    friends_persona_state = "SteamAPI_ISteamFriends_GetPersonaState": fn(*mut c_void) -> i32;
    friends_friend_count = "SteamAPI_ISteamFriends_GetFriendCount": fn(*mut c_void, i32) -> i32;
    friends_friend_by_index = "SteamAPI_ISteamFriends_GetFriendByIndex": fn(*mut c_void, i32, i32) -> u64;
    friends_friend_persona_name = "SteamAPI_ISteamFriends_GetFriendPersonaName": fn(*mut c_void, u64) -> *const c_char;
    friends_set_rich_presence = "SteamAPI_ISteamFriends_SetRichPresence": fn(*mut c_void, *const c_char, *const c_char) -> bool;
    friends_clear_rich_presence = "SteamAPI_ISteamFriends_ClearRichPresence": fn(*mut c_void);
    friends_friend_rich_presence = "SteamAPI_ISteamFriends_GetFriendRichPresence": fn(*mut c_void, u64, *const c_char) -> *const c_char;
    friends_activate_game_overlay = "SteamAPI_ISteamFriends_ActivateGameOverlay": fn(*mut c_void, *const c_char);
    friends_activate_game_overlay_to_user = "SteamAPI_ISteamFriends_ActivateGameOverlayToUser": fn(*mut c_void, *const c_char, u64);
    friends_activate_game_overlay_to_web_page = "SteamAPI_ISteamFriends_ActivateGameOverlayToWebPage": fn(*mut c_void, *const c_char, i32);
    friends_activate_game_overlay_to_store = "SteamAPI_ISteamFriends_ActivateGameOverlayToStore": fn(*mut c_void, u32, i32);
    friends_activate_game_overlay_invite_dialog = "SteamAPI_ISteamFriends_ActivateGameOverlayInviteDialog": fn(*mut c_void, u64);

    // ISteamUser
    user_steam_id = "SteamAPI_ISteamUser_GetSteamID": fn(*mut c_void) -> u64;
    user_logged_on = "SteamAPI_ISteamUser_BLoggedOn": fn(*mut c_void) -> bool;
    user_player_steam_level = "SteamAPI_ISteamUser_GetPlayerSteamLevel": fn(*mut c_void) -> i32;
    user_auth_session_ticket = "SteamAPI_ISteamUser_GetAuthSessionTicket": fn(*mut c_void, *mut c_void, i32, *mut u32, *const c_void) -> u32;
    user_cancel_auth_ticket = "SteamAPI_ISteamUser_CancelAuthTicket": fn(*mut c_void, u32);
    user_request_encrypted_app_ticket = "SteamAPI_ISteamUser_RequestEncryptedAppTicket": fn(*mut c_void, *mut c_void, i32) -> u64;
    user_encrypted_app_ticket = "SteamAPI_ISteamUser_GetEncryptedAppTicket": fn(*mut c_void, *mut c_void, i32, *mut u32) -> bool;
    user_request_store_auth_url = "SteamAPI_ISteamUser_RequestStoreAuthURL": fn(*mut c_void, *const c_char) -> u64;
    user_market_eligibility = "SteamAPI_ISteamUser_GetMarketEligibility": fn(*mut c_void) -> u64;
    user_duration_control = "SteamAPI_ISteamUser_GetDurationControl": fn(*mut c_void) -> u64;

    // ISteamUserStats
    stats_get_stat_i32 = "SteamAPI_ISteamUserStats_GetStatInt32": fn(*mut c_void, *const c_char, *mut i32) -> bool;
    stats_get_stat_f32 = "SteamAPI_ISteamUserStats_GetStatFloat": fn(*mut c_void, *const c_char, *mut f32) -> bool;
    stats_set_stat_i32 = "SteamAPI_ISteamUserStats_SetStatInt32": fn(*mut c_void, *const c_char, i32) -> bool;
    stats_set_stat_f32 = "SteamAPI_ISteamUserStats_SetStatFloat": fn(*mut c_void, *const c_char, f32) -> bool;
    stats_store_stats = "SteamAPI_ISteamUserStats_StoreStats": fn(*mut c_void) -> bool;
    stats_get_achievement = "SteamAPI_ISteamUserStats_GetAchievement": fn(*mut c_void, *const c_char, *mut bool) -> bool;
    stats_set_achievement = "SteamAPI_ISteamUserStats_SetAchievement": fn(*mut c_void, *const c_char) -> bool;
    stats_clear_achievement = "SteamAPI_ISteamUserStats_ClearAchievement": fn(*mut c_void, *const c_char) -> bool;
    stats_num_achievements = "SteamAPI_ISteamUserStats_GetNumAchievements": fn(*mut c_void) -> u32;
    stats_achievement_name = "SteamAPI_ISteamUserStats_GetAchievementName": fn(*mut c_void, u32) -> *const c_char;
    stats_reset_all_stats = "SteamAPI_ISteamUserStats_ResetAllStats": fn(*mut c_void, bool) -> bool;
    stats_request_user_stats = "SteamAPI_ISteamUserStats_RequestUserStats": fn(*mut c_void, u64) -> u64;
    stats_request_global_stats = "SteamAPI_ISteamUserStats_RequestGlobalStats": fn(*mut c_void, i32) -> u64;
    stats_number_of_current_players = "SteamAPI_ISteamUserStats_GetNumberOfCurrentPlayers": fn(*mut c_void) -> u64;
    stats_find_leaderboard = "SteamAPI_ISteamUserStats_FindLeaderboard": fn(*mut c_void, *const c_char) -> u64;
    stats_find_or_create_leaderboard = "SteamAPI_ISteamUserStats_FindOrCreateLeaderboard": fn(*mut c_void, *const c_char, i32, i32) -> u64;
    stats_leaderboard_name = "SteamAPI_ISteamUserStats_GetLeaderboardName": fn(*mut c_void, u64) -> *const c_char;
    stats_leaderboard_entry_count = "SteamAPI_ISteamUserStats_GetLeaderboardEntryCount": fn(*mut c_void, u64) -> i32;
    stats_upload_leaderboard_score = "SteamAPI_ISteamUserStats_UploadLeaderboardScore": fn(*mut c_void, u64, i32, i32, *const i32, i32) -> u64;
    stats_download_leaderboard_entries = "SteamAPI_ISteamUserStats_DownloadLeaderboardEntries": fn(*mut c_void, u64, i32, i32, i32) -> u64;
    stats_downloaded_leaderboard_entry = "SteamAPI_ISteamUserStats_GetDownloadedLeaderboardEntry": fn(*mut c_void, u64, i32, *mut RawLeaderboardEntry, *mut i32, i32) -> bool;

    // ISteamUGC
    ugc_create_item = "SteamAPI_ISteamUGC_CreateItem": fn(*mut c_void, u32, i32) -> u64;
    ugc_start_item_update = "SteamAPI_ISteamUGC_StartItemUpdate": fn(*mut c_void, u32, u64) -> u64;
    ugc_set_item_title = "SteamAPI_ISteamUGC_SetItemTitle": fn(*mut c_void, u64, *const c_char) -> bool;
    ugc_set_item_description = "SteamAPI_ISteamUGC_SetItemDescription": fn(*mut c_void, u64, *const c_char) -> bool;
    ugc_set_item_content = "SteamAPI_ISteamUGC_SetItemContent": fn(*mut c_void, u64, *const c_char) -> bool;
    ugc_set_item_preview = "SteamAPI_ISteamUGC_SetItemPreview": fn(*mut c_void, u64, *const c_char) -> bool;
    ugc_set_item_visibility = "SteamAPI_ISteamUGC_SetItemVisibility": fn(*mut c_void, u64, i32) -> bool;
    ugc_submit_item_update = "SteamAPI_ISteamUGC_SubmitItemUpdate": fn(*mut c_void, u64, *const c_char) -> u64;
    ugc_item_update_progress = "SteamAPI_ISteamUGC_GetItemUpdateProgress": fn(*mut c_void, u64, *mut u64, *mut u64) -> i32;
    ugc_subscribe_item = "SteamAPI_ISteamUGC_SubscribeItem": fn(*mut c_void, u64) -> u64;
    ugc_unsubscribe_item = "SteamAPI_ISteamUGC_UnsubscribeItem": fn(*mut c_void, u64) -> u64;
    ugc_set_user_item_vote = "SteamAPI_ISteamUGC_SetUserItemVote": fn(*mut c_void, u64, bool) -> u64;
    ugc_get_user_item_vote = "SteamAPI_ISteamUGC_GetUserItemVote": fn(*mut c_void, u64) -> u64;
    ugc_add_item_to_favorites = "SteamAPI_ISteamUGC_AddItemToFavorites": fn(*mut c_void, u32, u64) -> u64;
    ugc_remove_item_from_favorites = "SteamAPI_ISteamUGC_RemoveItemFromFavorites": fn(*mut c_void, u32, u64) -> u64;
    ugc_delete_item = "SteamAPI_ISteamUGC_DeleteItem": fn(*mut c_void, u64) -> u64;
    ugc_item_state = "SteamAPI_ISteamUGC_GetItemState": fn(*mut c_void, u64) -> u32;
    ugc_item_install_info = "SteamAPI_ISteamUGC_GetItemInstallInfo": fn(*mut c_void, u64, *mut u64, *mut c_char, u32, *mut u32) -> bool;
    ugc_item_download_info = "SteamAPI_ISteamUGC_GetItemDownloadInfo": fn(*mut c_void, u64, *mut u64, *mut u64) -> bool;
    ugc_download_item = "SteamAPI_ISteamUGC_DownloadItem": fn(*mut c_void, u64, bool) -> bool;
    ugc_num_subscribed_items = "SteamAPI_ISteamUGC_GetNumSubscribedItems": fn(*mut c_void) -> u32;
    ugc_subscribed_items = "SteamAPI_ISteamUGC_GetSubscribedItems": fn(*mut c_void, *mut u64, u32) -> u32;

    // ISteamInput
    input_init = "SteamAPI_ISteamInput_Init": fn(*mut c_void, bool) -> bool;
    input_shutdown = "SteamAPI_ISteamInput_Shutdown": fn(*mut c_void) -> bool;
    input_run_frame = "SteamAPI_ISteamInput_RunFrame": fn(*mut c_void, bool);
    input_connected_controllers = "SteamAPI_ISteamInput_GetConnectedControllers": fn(*mut c_void, *mut u64) -> i32;
    input_action_set_handle = "SteamAPI_ISteamInput_GetActionSetHandle": fn(*mut c_void, *const c_char) -> u64;
    input_activate_action_set = "SteamAPI_ISteamInput_ActivateActionSet": fn(*mut c_void, u64, u64);
    input_digital_action_handle = "SteamAPI_ISteamInput_GetDigitalActionHandle": fn(*mut c_void, *const c_char) -> u64;
    input_digital_action_data = "SteamAPI_ISteamInput_GetDigitalActionData": fn(*mut c_void, u64, u64) -> RawDigitalActionData;
    input_analog_action_handle = "SteamAPI_ISteamInput_GetAnalogActionHandle": fn(*mut c_void, *const c_char) -> u64;
    input_analog_action_data = "SteamAPI_ISteamInput_GetAnalogActionData": fn(*mut c_void, u64, u64) -> RawAnalogActionData;
    input_input_type_for_handle = "SteamAPI_ISteamInput_GetInputTypeForHandle": fn(*mut c_void, u64) -> i32;
    input_trigger_vibration = "SteamAPI_ISteamInput_TriggerVibration": fn(*mut c_void, u64, u16, u16);

    // ISteamScreenshots
    screenshots_trigger = "SteamAPI_ISteamScreenshots_TriggerScreenshot": fn(*mut c_void);
    screenshots_hook = "SteamAPI_ISteamScreenshots_HookScreenshots": fn(*mut c_void, bool);
    screenshots_is_hooked = "SteamAPI_ISteamScreenshots_IsScreenshotsHooked": fn(*mut c_void) -> bool;
    screenshots_add_to_library = "SteamAPI_ISteamScreenshots_AddScreenshotToLibrary": fn(*mut c_void, *const c_char, *const c_char, i32, i32) -> u32;
    screenshots_set_location = "SteamAPI_ISteamScreenshots_SetLocation": fn(*mut c_void, u32, *const c_char) -> bool;
    screenshots_tag_user = "SteamAPI_ISteamScreenshots_TagUser": fn(*mut c_void, u32, u64) -> bool;
    screenshots_tag_published_file = "SteamAPI_ISteamScreenshots_TagPublishedFile": fn(*mut c_void, u32, u64) -> bool;

    // ISteamNetworkingUtils / ISteamNetworkingSockets
    net_init_relay_network_access = "SteamAPI_ISteamNetworkingUtils_InitRelayNetworkAccess": fn(*mut c_void);
    net_set_status_changed_callback = "SteamAPI_ISteamNetworkingUtils_SetGlobalCallback_SteamNetConnectionStatusChanged": fn(*mut c_void, Option<ConnectionStatusFn>) -> bool;
    net_create_listen_socket_p2p = "SteamAPI_ISteamNetworkingSockets_CreateListenSocketP2P": fn(*mut c_void, i32, i32, *const c_void) -> u32;
    net_connect_p2p = "SteamAPI_ISteamNetworkingSockets_ConnectP2P": fn(*mut c_void, *const RawNetworkingIdentity, i32, i32, *const c_void) -> u32;
    net_accept_connection = "SteamAPI_ISteamNetworkingSockets_AcceptConnection": fn(*mut c_void, u32) -> i32;
    net_close_connection = "SteamAPI_ISteamNetworkingSockets_CloseConnection": fn(*mut c_void, u32, i32, *const c_char, bool) -> bool;
    net_close_listen_socket = "SteamAPI_ISteamNetworkingSockets_CloseListenSocket": fn(*mut c_void, u32) -> bool;
    net_send_message_to_connection = "SteamAPI_ISteamNetworkingSockets_SendMessageToConnection": fn(*mut c_void, u32, *const c_void, u32, i32, *mut i64) -> i32;
    net_receive_messages_on_connection = "SteamAPI_ISteamNetworkingSockets_ReceiveMessagesOnConnection": fn(*mut c_void, u32, *mut *mut RawNetworkingMessage, i32) -> i32;
    net_release_message = "SteamAPI_SteamNetworkingMessage_t_Release": fn(*mut RawNetworkingMessage);
}
