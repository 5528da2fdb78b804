//! Fixed-layout result decoder.
//!
//! Callbacks whose native structs use non-default packing are decoded by
//! hand from the offset tables in [`layouts`](crate::layouts). Every other
//! callback goes through [`decode_generic`], which walks the naturally
//! aligned shape field by field.

use serde::Serialize;
use steambridge_native::{CallbackId, EResult, PublishedFileId, SteamId};
use steambridge_native::ffi::IDENTITY_TYPE_STEAM_ID;

use crate::buffer::Reader;
use crate::error::DecodeError;
use crate::ids;
use crate::layouts::{
    connection_status_changed as status, create_item, favorite_items_changed, get_user_item_vote,
    published_file_result, set_user_item_vote, submit_item_update,
};
use crate::shape::ResultShape;
use crate::value::GenericResult;

/// `CreateItemResult_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemResult {
    pub result: EResult,
    pub published_file_id: PublishedFileId,
    pub needs_legal_agreement: bool,
}

/// `SubmitItemUpdateResult_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitItemUpdateResult {
    pub result: EResult,
    pub needs_legal_agreement: bool,
    pub published_file_id: PublishedFileId,
}

/// Result code plus item id, shared by subscribe, unsubscribe and delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedFileResult {
    pub result: EResult,
    pub published_file_id: PublishedFileId,
}

/// `SetUserItemVoteResult_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetItemVoteResult {
    pub published_file_id: PublishedFileId,
    pub result: EResult,
    pub vote_up: bool,
}

/// `GetUserItemVoteResult_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetItemVoteResult {
    pub published_file_id: PublishedFileId,
    pub result: EResult,
    pub voted_up: bool,
    pub voted_down: bool,
    pub vote_skipped: bool,
}

/// `UserFavoriteItemsListChanged_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItemsChanged {
    pub published_file_id: PublishedFileId,
    pub result: EResult,
    pub was_add_request: bool,
}

/// `ESteamNetworkingConnectionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    None,
    Connecting,
    FindingRoute,
    Connected,
    ClosedByPeer,
    ProblemDetectedLocally,
    Other(i32),
}

impl From<i32> for ConnectionState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::None,
            1 => Self::Connecting,
            2 => Self::FindingRoute,
            3 => Self::Connected,
            4 => Self::ClosedByPeer,
            5 => Self::ProblemDetectedLocally,
            other => Self::Other(other),
        }
    }
}

impl ConnectionState {
    /// Closed by either side; the connection handle must still be closed
    /// locally to free it.
    pub fn is_closed(self) -> bool {
        matches!(self, Self::ClosedByPeer | Self::ProblemDetectedLocally)
    }
}

/// `SteamNetConnectionStatusChangedCallback_t`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionStatusChanged {
    pub conn: u32,
    /// Remote peer, when identified by Steam ID.
    pub remote: Option<SteamId>,
    pub user_data: i64,
    pub listen_socket: u32,
    pub state: ConnectionState,
    pub old_state: ConnectionState,
    pub end_reason: i32,
    pub end_debug: String,
    pub description: String,
}

/// A decoded call result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum CallbackResult {
    ItemCreated(CreateItemResult),
    ItemUpdateSubmitted(SubmitItemUpdateResult),
    Subscribed(PublishedFileResult),
    Unsubscribed(PublishedFileResult),
    ItemDeleted(PublishedFileResult),
    ItemVoteSet(SetItemVoteResult),
    ItemVoteFetched(GetItemVoteResult),
    FavoritesChanged(FavoriteItemsChanged),
    ConnectionStatus(ConnectionStatusChanged),
    Generic(GenericResult),
}

impl CallbackResult {
    pub fn as_generic(&self) -> Option<&GenericResult> {
        match self {
            Self::Generic(g) => Some(g),
            _ => None,
        }
    }

    pub fn into_generic(self) -> Option<GenericResult> {
        match self {
            Self::Generic(g) => Some(g),
            _ => None,
        }
    }
}

/// Shape of a callback decoded by hand, or `None` for the generic path.
pub fn manual_shape(callback: CallbackId) -> Option<&'static ResultShape> {
    let shape = match callback {
        ids::CREATE_ITEM_RESULT => &create_item::SHAPE,
        ids::SUBMIT_ITEM_UPDATE_RESULT => &submit_item_update::SHAPE,
        ids::SUBSCRIBE_PUBLISHED_FILE_RESULT => &published_file_result::SUBSCRIBE_SHAPE,
        ids::UNSUBSCRIBE_PUBLISHED_FILE_RESULT => &published_file_result::UNSUBSCRIBE_SHAPE,
        ids::DELETE_ITEM_RESULT => &published_file_result::DELETE_SHAPE,
        ids::SET_USER_ITEM_VOTE_RESULT => &set_user_item_vote::SHAPE,
        ids::GET_USER_ITEM_VOTE_RESULT => &get_user_item_vote::SHAPE,
        ids::USER_FAVORITE_ITEMS_LIST_CHANGED => &favorite_items_changed::SHAPE,
        ids::CONNECTION_STATUS_CHANGED => &status::SHAPE,
        _ => return None,
    };
    Some(shape)
}

/// Decodes `buf` as the result of `callback`.
///
/// `buf` must hold at least `shape.size` bytes. For hand-decoded callbacks
/// `shape` must be the one registered for the id.
pub fn decode(
    callback: CallbackId,
    shape: &ResultShape,
    buf: &[u8],
) -> Result<CallbackResult, DecodeError> {
    if buf.len() < shape.size {
        return Err(DecodeError::Truncated {
            shape: shape.name,
            expected: shape.size,
            actual: buf.len(),
        });
    }

    let Some(expected) = manual_shape(callback) else {
        return Ok(CallbackResult::Generic(decode_generic(shape, buf)));
    };
    if expected.name != shape.name || expected.size != shape.size {
        return Err(DecodeError::ShapeMismatch {
            callback,
            expected: expected.name,
            actual: shape.name,
        });
    }

    let result = match callback {
        ids::CREATE_ITEM_RESULT => CallbackResult::ItemCreated(decode_create_item(buf)),
        ids::SUBMIT_ITEM_UPDATE_RESULT => {
            CallbackResult::ItemUpdateSubmitted(decode_submit_item_update(buf))
        }
        ids::SUBSCRIBE_PUBLISHED_FILE_RESULT => {
            CallbackResult::Subscribed(decode_published_file_result(buf))
        }
        ids::UNSUBSCRIBE_PUBLISHED_FILE_RESULT => {
            CallbackResult::Unsubscribed(decode_published_file_result(buf))
        }
        ids::DELETE_ITEM_RESULT => CallbackResult::ItemDeleted(decode_published_file_result(buf)),
        ids::SET_USER_ITEM_VOTE_RESULT => CallbackResult::ItemVoteSet(decode_set_item_vote(buf)),
        ids::GET_USER_ITEM_VOTE_RESULT => {
            CallbackResult::ItemVoteFetched(decode_get_item_vote(buf))
        }
        ids::USER_FAVORITE_ITEMS_LIST_CHANGED => {
            CallbackResult::FavoritesChanged(decode_favorite_items_changed(buf))
        }
        ids::CONNECTION_STATUS_CHANGED => {
            CallbackResult::ConnectionStatus(decode_connection_status(buf))
        }
        _ => CallbackResult::Generic(decode_generic(shape, buf)),
    };
    Ok(result)
}

/// Decodes every field of `shape` at its resolved offset.
pub fn decode_generic(shape: &ResultShape, buf: &[u8]) -> GenericResult {
    let r = Reader::new(buf);
    GenericResult {
        shape: shape.name,
        fields: shape
            .fields()
            .into_iter()
            .map(|f| (f.name, r.read(f.offset, f.kind)))
            .collect(),
    }
}

pub fn decode_create_item(buf: &[u8]) -> CreateItemResult {
    let r = Reader::new(buf);
    CreateItemResult {
        result: EResult(r.i32(create_item::RESULT)),
        published_file_id: r.u64(create_item::PUBLISHED_FILE_ID),
        needs_legal_agreement: r.bool(create_item::NEEDS_LEGAL_AGREEMENT),
    }
}

pub fn decode_submit_item_update(buf: &[u8]) -> SubmitItemUpdateResult {
    let r = Reader::new(buf);
    SubmitItemUpdateResult {
        result: EResult(r.i32(submit_item_update::RESULT)),
        needs_legal_agreement: r.bool(submit_item_update::NEEDS_LEGAL_AGREEMENT),
        published_file_id: r.u64(submit_item_update::PUBLISHED_FILE_ID),
    }
}

pub fn decode_published_file_result(buf: &[u8]) -> PublishedFileResult {
    let r = Reader::new(buf);
    PublishedFileResult {
        result: EResult(r.i32(published_file_result::RESULT)),
        published_file_id: r.u64(published_file_result::PUBLISHED_FILE_ID),
    }
}

pub fn decode_set_item_vote(buf: &[u8]) -> SetItemVoteResult {
    let r = Reader::new(buf);
    SetItemVoteResult {
        published_file_id: r.u64(set_user_item_vote::PUBLISHED_FILE_ID),
        result: EResult(r.i32(set_user_item_vote::RESULT)),
        vote_up: r.bool(set_user_item_vote::VOTE_UP),
    }
}

pub fn decode_get_item_vote(buf: &[u8]) -> GetItemVoteResult {
    let r = Reader::new(buf);
    GetItemVoteResult {
        published_file_id: r.u64(get_user_item_vote::PUBLISHED_FILE_ID),
        result: EResult(r.i32(get_user_item_vote::RESULT)),
        voted_up: r.bool(get_user_item_vote::VOTED_UP),
        voted_down: r.bool(get_user_item_vote::VOTED_DOWN),
        vote_skipped: r.bool(get_user_item_vote::VOTE_SKIPPED),
    }
}

pub fn decode_favorite_items_changed(buf: &[u8]) -> FavoriteItemsChanged {
    let r = Reader::new(buf);
    FavoriteItemsChanged {
        published_file_id: r.u64(favorite_items_changed::PUBLISHED_FILE_ID),
        result: EResult(r.i32(favorite_items_changed::RESULT)),
        was_add_request: r.bool(favorite_items_changed::WAS_ADD_REQUEST),
    }
}

pub fn decode_connection_status(buf: &[u8]) -> ConnectionStatusChanged {
    let r = Reader::new(buf);
    let remote = (r.i32(status::IDENTITY_TYPE) == IDENTITY_TYPE_STEAM_ID)
        .then(|| r.u64(status::IDENTITY_STEAM_ID));
    ConnectionStatusChanged {
        conn: r.u32(status::CONN),
        remote,
        user_data: r.i64(status::USER_DATA),
        listen_socket: r.u32(status::LISTEN_SOCKET),
        state: ConnectionState::from(r.i32(status::STATE)),
        old_state: ConnectionState::from(r.i32(status::OLD_STATE)),
        end_reason: r.i32(status::END_REASON),
        end_debug: r.c_str(status::END_DEBUG, status::END_DEBUG_LEN),
        description: r.c_str(status::DESCRIPTION, status::DESCRIPTION_LEN),
    }
}
