//! Byte layouts of every call result the managers collect.
//!
//! The packed tables are copied from the SDK headers for the targeted SDK
//! version (`#pragma pack` differs per struct, so each padding gap is
//! listed as observed, never derived). They must be re-checked against
//! the headers whenever the SDK is bumped.
//!
//! Aligned shapes follow default C alignment and are decoded generically.

use steambridge_native::CallbackId;

use crate::ids;
use crate::shape::{AlignedField, PackedField, Primitive, ResultShape};

/// `CreateItemResult_t`.
pub mod create_item {
    use super::*;

    pub const SIZE: usize = 16;
    pub const RESULT: usize = 0;
    pub const PUBLISHED_FILE_ID: usize = 4;
    pub const NEEDS_LEGAL_AGREEMENT: usize = 12;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
        PackedField::new(
            "m_bUserNeedsToAcceptWorkshopLegalAgreement",
            NEEDS_LEGAL_AGREEMENT,
            Primitive::Bool,
        ),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("CreateItemResult_t", SIZE, FIELDS);
}

/// `SubmitItemUpdateResult_t`.
pub mod submit_item_update {
    use super::*;

    pub const SIZE: usize = 16;
    pub const RESULT: usize = 0;
    pub const NEEDS_LEGAL_AGREEMENT: usize = 4;
    // Three bytes of padding follow the flag.
    pub const PUBLISHED_FILE_ID: usize = 8;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new(
            "m_bUserNeedsToAcceptWorkshopLegalAgreement",
            NEEDS_LEGAL_AGREEMENT,
            Primitive::Bool,
        ),
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("SubmitItemUpdateResult_t", SIZE, FIELDS);
}

/// `RemoteStorageSubscribePublishedFileResult_t`,
/// `RemoteStorageUnsubscribePublishedFileResult_t` and `DeleteItemResult_t`
/// share this layout.
pub mod published_file_result {
    use super::*;

    pub const SIZE: usize = 12;
    pub const RESULT: usize = 0;
    pub const PUBLISHED_FILE_ID: usize = 4;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
    ];

    pub static SUBSCRIBE_SHAPE: ResultShape =
        ResultShape::packed("RemoteStorageSubscribePublishedFileResult_t", SIZE, FIELDS);
    pub static UNSUBSCRIBE_SHAPE: ResultShape =
        ResultShape::packed("RemoteStorageUnsubscribePublishedFileResult_t", SIZE, FIELDS);
    pub static DELETE_SHAPE: ResultShape = ResultShape::packed("DeleteItemResult_t", SIZE, FIELDS);
}

/// `SetUserItemVoteResult_t`.
pub mod set_user_item_vote {
    use super::*;

    pub const SIZE: usize = 16;
    pub const PUBLISHED_FILE_ID: usize = 0;
    pub const RESULT: usize = 8;
    pub const VOTE_UP: usize = 12;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new("m_bVoteUp", VOTE_UP, Primitive::Bool),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("SetUserItemVoteResult_t", SIZE, FIELDS);
}

/// `GetUserItemVoteResult_t`.
pub mod get_user_item_vote {
    use super::*;

    pub const SIZE: usize = 16;
    pub const PUBLISHED_FILE_ID: usize = 0;
    pub const RESULT: usize = 8;
    pub const VOTED_UP: usize = 12;
    pub const VOTED_DOWN: usize = 13;
    pub const VOTE_SKIPPED: usize = 14;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new("m_bVotedUp", VOTED_UP, Primitive::Bool),
        PackedField::new("m_bVotedDown", VOTED_DOWN, Primitive::Bool),
        PackedField::new("m_bVoteSkipped", VOTE_SKIPPED, Primitive::Bool),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("GetUserItemVoteResult_t", SIZE, FIELDS);
}

/// `UserFavoriteItemsListChanged_t`.
pub mod favorite_items_changed {
    use super::*;

    pub const SIZE: usize = 16;
    pub const PUBLISHED_FILE_ID: usize = 0;
    pub const RESULT: usize = 8;
    pub const WAS_ADD_REQUEST: usize = 12;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_nPublishedFileId", PUBLISHED_FILE_ID, Primitive::U64),
        PackedField::new("m_eResult", RESULT, Primitive::I32),
        PackedField::new("m_bWasAddRequest", WAS_ADD_REQUEST, Primitive::Bool),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("UserFavoriteItemsListChanged_t", SIZE, FIELDS);
}

/// `SteamNetConnectionStatusChangedCallback_t`. Only the fields the
/// networking manager reports are listed; the rest of `m_info` is skipped.
pub mod connection_status_changed {
    use super::*;

    pub const SIZE: usize = 704;
    pub const CONN: usize = 0;
    // m_info.m_identityRemote
    pub const IDENTITY_TYPE: usize = 4;
    pub const IDENTITY_STEAM_ID: usize = 12;
    pub const USER_DATA: usize = 140;
    pub const LISTEN_SOCKET: usize = 148;
    pub const STATE: usize = 180;
    pub const END_REASON: usize = 184;
    pub const END_DEBUG: usize = 188;
    pub const END_DEBUG_LEN: usize = 128;
    pub const DESCRIPTION: usize = 316;
    pub const DESCRIPTION_LEN: usize = 128;
    pub const OLD_STATE: usize = 700;

    const FIELDS: &[PackedField] = &[
        PackedField::new("m_hConn", CONN, Primitive::U32),
        PackedField::new("m_info.m_identityRemote.m_eType", IDENTITY_TYPE, Primitive::I32),
        PackedField::new(
            "m_info.m_identityRemote.m_steamID64",
            IDENTITY_STEAM_ID,
            Primitive::U64,
        ),
        PackedField::new("m_info.m_nUserData", USER_DATA, Primitive::I64),
        PackedField::new("m_info.m_hListenSocket", LISTEN_SOCKET, Primitive::U32),
        PackedField::new("m_info.m_eState", STATE, Primitive::I32),
        PackedField::new("m_info.m_eEndReason", END_REASON, Primitive::I32),
        PackedField::new(
            "m_info.m_szEndDebug",
            END_DEBUG,
            Primitive::CStr(END_DEBUG_LEN),
        ),
        PackedField::new(
            "m_info.m_szConnectionDescription",
            DESCRIPTION,
            Primitive::CStr(DESCRIPTION_LEN),
        ),
        PackedField::new("m_eOldState", OLD_STATE, Primitive::I32),
    ];

    pub static SHAPE: ResultShape = ResultShape::packed("SteamNetConnectionStatusChangedCallback_t", SIZE, FIELDS);
}

const LEADERBOARD_FIND_RESULT_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_hSteamLeaderboard", Primitive::U64),
    AlignedField::new("m_bLeaderboardFound", Primitive::U8),
];

pub static LEADERBOARD_FIND_RESULT: ResultShape = ResultShape::aligned("LeaderboardFindResult_t", 16, LEADERBOARD_FIND_RESULT_FIELDS);

const LEADERBOARD_SCORES_DOWNLOADED_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_hSteamLeaderboard", Primitive::U64),
    AlignedField::new("m_hSteamLeaderboardEntries", Primitive::U64),
    AlignedField::new("m_cEntryCount", Primitive::I32),
];

pub static LEADERBOARD_SCORES_DOWNLOADED: ResultShape = ResultShape::aligned("LeaderboardScoresDownloaded_t", 24, LEADERBOARD_SCORES_DOWNLOADED_FIELDS);

const LEADERBOARD_SCORE_UPLOADED_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_bSuccess", Primitive::U8),
    AlignedField::new("m_hSteamLeaderboard", Primitive::U64),
    AlignedField::new("m_nScore", Primitive::I32),
    AlignedField::new("m_bScoreChanged", Primitive::U8),
    AlignedField::new("m_nGlobalRankNew", Primitive::I32),
    AlignedField::new("m_nGlobalRankPrevious", Primitive::I32),
];

pub static LEADERBOARD_SCORE_UPLOADED: ResultShape = ResultShape::aligned("LeaderboardScoreUploaded_t", 32, LEADERBOARD_SCORE_UPLOADED_FIELDS);

const NUMBER_OF_CURRENT_PLAYERS_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_bSuccess", Primitive::U8),
    AlignedField::new("m_cPlayers", Primitive::I32),
];

pub static NUMBER_OF_CURRENT_PLAYERS: ResultShape = ResultShape::aligned("NumberOfCurrentPlayers_t", 8, NUMBER_OF_CURRENT_PLAYERS_FIELDS);

const USER_STATS_RECEIVED_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_nGameID", Primitive::U64),
    AlignedField::new("m_eResult", Primitive::I32),
    AlignedField::new("m_steamIDUser", Primitive::U64),
];

pub static USER_STATS_RECEIVED: ResultShape = ResultShape::aligned("UserStatsReceived_t", 24, USER_STATS_RECEIVED_FIELDS);

const GLOBAL_STATS_RECEIVED_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_nGameID", Primitive::U64),
    AlignedField::new("m_eResult", Primitive::I32),
];

pub static GLOBAL_STATS_RECEIVED: ResultShape = ResultShape::aligned("GlobalStatsReceived_t", 16, GLOBAL_STATS_RECEIVED_FIELDS);

const ENCRYPTED_APP_TICKET_RESPONSE_FIELDS: &[AlignedField] = &[AlignedField::new("m_eResult", Primitive::I32)];

pub static ENCRYPTED_APP_TICKET_RESPONSE: ResultShape = ResultShape::aligned("EncryptedAppTicketResponse_t", 4, ENCRYPTED_APP_TICKET_RESPONSE_FIELDS);

const STORE_AUTH_URL_RESPONSE_FIELDS: &[AlignedField] = &[AlignedField::new("m_szURL", Primitive::CStr(512))];

pub static STORE_AUTH_URL_RESPONSE: ResultShape = ResultShape::aligned("StoreAuthURLResponse_t", 512, STORE_AUTH_URL_RESPONSE_FIELDS);

const MARKET_ELIGIBILITY_RESPONSE_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_bAllowed", Primitive::Bool),
    AlignedField::new("m_eNotAllowedReason", Primitive::I32),
    AlignedField::new("m_rtAllowedAtTime", Primitive::U32),
    AlignedField::new("m_cdaySteamGuardRequiredDays", Primitive::I32),
    AlignedField::new("m_cdayNewDeviceCooldown", Primitive::I32),
];

pub static MARKET_ELIGIBILITY_RESPONSE: ResultShape = ResultShape::aligned("MarketEligibilityResponse_t", 20, MARKET_ELIGIBILITY_RESPONSE_FIELDS);

const DURATION_CONTROL_FIELDS: &[AlignedField] = &[
    AlignedField::new("m_eResult", Primitive::I32),
    AlignedField::new("m_appid", Primitive::U32),
    AlignedField::new("m_bApplicable", Primitive::Bool),
    AlignedField::new("m_csecsLast5h", Primitive::I32),
    AlignedField::new("m_progress", Primitive::I32),
    AlignedField::new("m_notification", Primitive::I32),
    AlignedField::new("m_csecsToday", Primitive::I32),
    AlignedField::new("m_csecsRemaining", Primitive::I32),
];

pub static DURATION_CONTROL: ResultShape = ResultShape::aligned("DurationControl_t", 32, DURATION_CONTROL_FIELDS);

/// Shape registered for a callback id.
pub fn shape_for(callback: CallbackId) -> Option<&'static ResultShape> {
    let shape = match callback {
        ids::CREATE_ITEM_RESULT => &create_item::SHAPE,
        ids::SUBMIT_ITEM_UPDATE_RESULT => &submit_item_update::SHAPE,
        ids::SUBSCRIBE_PUBLISHED_FILE_RESULT => &published_file_result::SUBSCRIBE_SHAPE,
        ids::UNSUBSCRIBE_PUBLISHED_FILE_RESULT => &published_file_result::UNSUBSCRIBE_SHAPE,
        ids::DELETE_ITEM_RESULT => &published_file_result::DELETE_SHAPE,
        ids::SET_USER_ITEM_VOTE_RESULT => &set_user_item_vote::SHAPE,
        ids::GET_USER_ITEM_VOTE_RESULT => &get_user_item_vote::SHAPE,
        ids::USER_FAVORITE_ITEMS_LIST_CHANGED => &favorite_items_changed::SHAPE,
        ids::CONNECTION_STATUS_CHANGED => &connection_status_changed::SHAPE,
        ids::LEADERBOARD_FIND_RESULT => &LEADERBOARD_FIND_RESULT,
        ids::LEADERBOARD_SCORES_DOWNLOADED => &LEADERBOARD_SCORES_DOWNLOADED,
        ids::LEADERBOARD_SCORE_UPLOADED => &LEADERBOARD_SCORE_UPLOADED,
        ids::NUMBER_OF_CURRENT_PLAYERS => &NUMBER_OF_CURRENT_PLAYERS,
        ids::USER_STATS_RECEIVED => &USER_STATS_RECEIVED,
        ids::GLOBAL_STATS_RECEIVED => &GLOBAL_STATS_RECEIVED,
        ids::ENCRYPTED_APP_TICKET_RESPONSE => &ENCRYPTED_APP_TICKET_RESPONSE,
        ids::STORE_AUTH_URL_RESPONSE => &STORE_AUTH_URL_RESPONSE,
        ids::MARKET_ELIGIBILITY_RESPONSE => &MARKET_ELIGIBILITY_RESPONSE,
        ids::DURATION_CONTROL => &DURATION_CONTROL,
        _ => return None,
    };
    Some(shape)
}
