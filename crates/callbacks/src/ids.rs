//! Callback ids (`k_iCallback`) of every call result the managers collect.
//!
//! Ids are `k_iSteam*Callbacks` base + offset as declared in the SDK
//! headers.

use steambridge_native::CallbackId;

// ISteamUser (base 100)
pub const ENCRYPTED_APP_TICKET_RESPONSE: CallbackId = CallbackId(154);
pub const STORE_AUTH_URL_RESPONSE: CallbackId = CallbackId(165);
pub const MARKET_ELIGIBILITY_RESPONSE: CallbackId = CallbackId(166);
pub const DURATION_CONTROL: CallbackId = CallbackId(167);

// ISteamUserStats (base 1100)
pub const USER_STATS_RECEIVED: CallbackId = CallbackId(1101);
pub const LEADERBOARD_FIND_RESULT: CallbackId = CallbackId(1104);
pub const LEADERBOARD_SCORES_DOWNLOADED: CallbackId = CallbackId(1105);
pub const LEADERBOARD_SCORE_UPLOADED: CallbackId = CallbackId(1106);
pub const NUMBER_OF_CURRENT_PLAYERS: CallbackId = CallbackId(1107);
pub const GLOBAL_STATS_RECEIVED: CallbackId = CallbackId(1112);

// ISteamNetworkingSockets (base 1220)
pub const CONNECTION_STATUS_CHANGED: CallbackId = CallbackId(1221);

// ISteamRemoteStorage (base 1300)
pub const SUBSCRIBE_PUBLISHED_FILE_RESULT: CallbackId = CallbackId(1313);
pub const UNSUBSCRIBE_PUBLISHED_FILE_RESULT: CallbackId = CallbackId(1315);

// ISteamUGC (base 3400)
pub const CREATE_ITEM_RESULT: CallbackId = CallbackId(3403);
pub const SUBMIT_ITEM_UPDATE_RESULT: CallbackId = CallbackId(3404);
pub const USER_FAVORITE_ITEMS_LIST_CHANGED: CallbackId = CallbackId(3407);
pub const SET_USER_ITEM_VOTE_RESULT: CallbackId = CallbackId(3408);
pub const GET_USER_ITEM_VOTE_RESULT: CallbackId = CallbackId(3409);
pub const DELETE_ITEM_RESULT: CallbackId = CallbackId(3417);

/// Every id above.
pub const ALL: &[CallbackId] = &[
    ENCRYPTED_APP_TICKET_RESPONSE,
    STORE_AUTH_URL_RESPONSE,
    MARKET_ELIGIBILITY_RESPONSE,
    DURATION_CONTROL,
    USER_STATS_RECEIVED,
    LEADERBOARD_FIND_RESULT,
    LEADERBOARD_SCORES_DOWNLOADED,
    LEADERBOARD_SCORE_UPLOADED,
    NUMBER_OF_CURRENT_PLAYERS,
    GLOBAL_STATS_RECEIVED,
    CONNECTION_STATUS_CHANGED,
    SUBSCRIBE_PUBLISHED_FILE_RESULT,
    UNSUBSCRIBE_PUBLISHED_FILE_RESULT,
    CREATE_ITEM_RESULT,
    SUBMIT_ITEM_UPDATE_RESULT,
    USER_FAVORITE_ITEMS_LIST_CHANGED,
    SET_USER_ITEM_VOTE_RESULT,
    GET_USER_ITEM_VOTE_RESULT,
    DELETE_ITEM_RESULT,
];
