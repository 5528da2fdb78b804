//! Workshop items (`ISteamUGC`).
//!
//! Creating and submitting items go through the packed result layouts in
//! [`steambridge_callbacks::layouts`]; item creation gets a 300-check
//! budget since Steam can take well over the default five seconds.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use steambridge_callbacks::poller::ITEM_CREATION_MAX_RETRIES;
use steambridge_callbacks::{
    CallbackResult, CreateItemResult, FavoriteItemsChanged, GetItemVoteResult, PublishedFileResult,
    SetItemVoteResult, SubmitItemUpdateResult, ids, layouts,
};
use steambridge_native::api::{ItemInstallInfo, UpdateProgress};
use steambridge_native::{
    AppId, Interface, InterfaceSlot, NativeApi, PublishedFileId, UgcUpdateHandle,
};

use crate::shared::Shared;

/// `EWorkshopFileType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileType {
    #[default]
    Community,
    Microtransaction,
    Collection,
    Art,
    Video,
    Screenshot,
    WebGuide,
    IntegratedGuide,
    Merch,
    ControllerBinding,
    GameManagedItem,
}

impl FileType {
    fn code(self) -> i32 {
        match self {
            Self::Community => 0,
            Self::Microtransaction => 1,
            Self::Collection => 2,
            Self::Art => 3,
            Self::Video => 4,
            Self::Screenshot => 5,
            Self::WebGuide => 9,
            Self::IntegratedGuide => 10,
            Self::Merch => 11,
            Self::ControllerBinding => 12,
            Self::GameManagedItem => 15,
        }
    }
}

/// `ERemoteStoragePublishedFileVisibility`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Visibility {
    Public,
    FriendsOnly,
    Private,
    Unlisted,
}

impl Visibility {
    fn code(self) -> i32 {
        match self {
            Self::Public => 0,
            Self::FriendsOnly => 1,
            Self::Private => 2,
            Self::Unlisted => 3,
        }
    }
}

/// Fields to change in one item update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Folder whose contents become the item's content.
    pub content_folder: Option<String>,
    pub preview_file: Option<String>,
    pub visibility: Option<Visibility>,
    pub change_note: Option<String>,
}

/// `EItemState` bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct ItemState(pub u32);

impl ItemState {
    pub const NONE: u32 = 0;
    pub const SUBSCRIBED: u32 = 1;
    pub const LEGACY_ITEM: u32 = 2;
    pub const INSTALLED: u32 = 4;
    pub const NEEDS_UPDATE: u32 = 8;
    pub const DOWNLOADING: u32 = 16;
    pub const DOWNLOAD_PENDING: u32 = 32;
    pub const DISABLED_LOCALLY: u32 = 64;

    pub fn contains(self, flag: u32) -> bool {
        self.0 & flag == flag && flag != 0
    }

    pub fn is_subscribed(self) -> bool {
        self.contains(Self::SUBSCRIBED)
    }

    pub fn is_installed(self) -> bool {
        self.contains(Self::INSTALLED)
    }

    pub fn needs_update(self) -> bool {
        self.contains(Self::NEEDS_UPDATE)
    }

    pub fn is_downloading(self) -> bool {
        self.contains(Self::DOWNLOADING) || self.contains(Self::DOWNLOAD_PENDING)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadInfo {
    pub bytes_downloaded: u64,
    pub bytes_total: u64,
}

impl DownloadInfo {
    /// Completed fraction, 0.0 while the total is still unknown.
    pub fn progress(&self) -> f64 {
        if self.bytes_total == 0 {
            return 0.0;
        }
        self.bytes_downloaded as f64 / self.bytes_total as f64
    }
}

pub struct Workshop<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
    // Update handle of the last started item update, for progress queries.
    current_update: Mutex<Option<UgcUpdateHandle>>,
}

impl<N: NativeApi> Workshop<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Ugc),
            current_update: Mutex::new(None),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// Creates an empty item owned by the current user.
    pub async fn create_item(&self, app_id: AppId, file_type: FileType) -> Option<CreateItemResult> {
        let options = self.shared.poll.with_max_retries(ITEM_CREATION_MAX_RETRIES);
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.create_item",
                |n, p| n.create_item(p, app_id, file_type.code()),
                &layouts::create_item::SHAPE,
                ids::CREATE_ITEM_RESULT,
                options,
            )
            .await?
        {
            CallbackResult::ItemCreated(created) => {
                if created.needs_legal_agreement {
                    tracing::info!(item = created.published_file_id, "workshop legal agreement pending");
                }
                Some(created)
            }
            other => unexpected("workshop.create_item", &other),
        }
    }

    /// Applies `update` to `item` and submits it. Any setter Steam rejects
    /// aborts the update before submission.
    pub async fn update_item(
        &self,
        app_id: AppId,
        item: PublishedFileId,
        update: &ItemUpdate,
    ) -> Option<SubmitItemUpdateResult> {
        let handle: UgcUpdateHandle = self.shared.call(&self.slot, "workshop.start_item_update", |n, p| {
            n.start_item_update(p, app_id, item)
        });
        if handle == 0 {
            return None;
        }
        *self.current_update.lock().unwrap_or_else(PoisonError::into_inner) = Some(handle);

        let applied = self.shared.call(&self.slot, "workshop.set_item_fields", |n, p| {
            if let Some(title) = &update.title {
                if !n.set_item_title(p, handle, title)? {
                    tracing::warn!(item, "title rejected");
                    return Ok(false);
                }
            }
            if let Some(description) = &update.description {
                if !n.set_item_description(p, handle, description)? {
                    tracing::warn!(item, "description rejected");
                    return Ok(false);
                }
            }
            if let Some(folder) = &update.content_folder {
                if !n.set_item_content(p, handle, folder)? {
                    tracing::warn!(item, folder = %folder, "content folder rejected");
                    return Ok(false);
                }
            }
            if let Some(preview) = &update.preview_file {
                if !n.set_item_preview(p, handle, preview)? {
                    tracing::warn!(item, preview = %preview, "preview file rejected");
                    return Ok(false);
                }
            }
            if let Some(visibility) = update.visibility {
                if !n.set_item_visibility(p, handle, visibility.code())? {
                    tracing::warn!(item, ?visibility, "visibility rejected");
                    return Ok(false);
                }
            }
            Ok(true)
        });
        if !applied {
            return None;
        }

        let note = update.change_note.as_deref();
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.submit_item_update",
                |n, p| n.submit_item_update(p, handle, note),
                &layouts::submit_item_update::SHAPE,
                ids::SUBMIT_ITEM_UPDATE_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::ItemUpdateSubmitted(submitted) => Some(submitted),
            other => unexpected("workshop.submit_item_update", &other),
        }
    }

    /// Upload progress of the most recently started update.
    pub fn current_update_progress(&self) -> Option<UpdateProgress> {
        let handle = (*self.current_update.lock().unwrap_or_else(PoisonError::into_inner))?;
        Some(self.item_update_progress(handle))
    }

    pub fn item_update_progress(&self, update: UgcUpdateHandle) -> UpdateProgress {
        self.shared
            .call(&self.slot, "workshop.item_update_progress", |n, p| {
                n.item_update_progress(p, update)
            })
    }

    pub async fn subscribe(&self, item: PublishedFileId) -> Option<PublishedFileResult> {
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.subscribe",
                |n, p| n.subscribe_item(p, item),
                &layouts::published_file_result::SUBSCRIBE_SHAPE,
                ids::SUBSCRIBE_PUBLISHED_FILE_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::Subscribed(result) => Some(result),
            other => unexpected("workshop.subscribe", &other),
        }
    }

    pub async fn unsubscribe(&self, item: PublishedFileId) -> Option<PublishedFileResult> {
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.unsubscribe",
                |n, p| n.unsubscribe_item(p, item),
                &layouts::published_file_result::UNSUBSCRIBE_SHAPE,
                ids::UNSUBSCRIBE_PUBLISHED_FILE_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::Unsubscribed(result) => Some(result),
            other => unexpected("workshop.unsubscribe", &other),
        }
    }

    pub async fn delete_item(&self, item: PublishedFileId) -> Option<PublishedFileResult> {
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.delete_item",
                |n, p| n.delete_item(p, item),
                &layouts::published_file_result::DELETE_SHAPE,
                ids::DELETE_ITEM_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::ItemDeleted(result) => Some(result),
            other => unexpected("workshop.delete_item", &other),
        }
    }

    pub async fn set_user_item_vote(&self, item: PublishedFileId, vote_up: bool) -> Option<SetItemVoteResult> {
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.set_user_item_vote",
                |n, p| n.set_user_item_vote(p, item, vote_up),
                &layouts::set_user_item_vote::SHAPE,
                ids::SET_USER_ITEM_VOTE_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::ItemVoteSet(result) => Some(result),
            other => unexpected("workshop.set_user_item_vote", &other),
        }
    }

    pub async fn get_user_item_vote(&self, item: PublishedFileId) -> Option<GetItemVoteResult> {
        match self
            .shared
            .call_async(
                &self.slot,
                "workshop.get_user_item_vote",
                |n, p| n.get_user_item_vote(p, item),
                &layouts::get_user_item_vote::SHAPE,
                ids::GET_USER_ITEM_VOTE_RESULT,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::ItemVoteFetched(result) => Some(result),
            other => unexpected("workshop.get_user_item_vote", &other),
        }
    }

    pub async fn add_favorite(&self, app_id: AppId, item: PublishedFileId) -> Option<FavoriteItemsChanged> {
        self.favorite("workshop.add_favorite", app_id, item, true).await
    }

    pub async fn remove_favorite(&self, app_id: AppId, item: PublishedFileId) -> Option<FavoriteItemsChanged> {
        self.favorite("workshop.remove_favorite", app_id, item, false).await
    }

    async fn favorite(
        &self,
        op: &'static str,
        app_id: AppId,
        item: PublishedFileId,
        add: bool,
    ) -> Option<FavoriteItemsChanged> {
        match self
            .shared
            .call_async(
                &self.slot,
                op,
                |n, p| {
                    if add {
                        n.add_item_to_favorites(p, app_id, item)
                    } else {
                        n.remove_item_from_favorites(p, app_id, item)
                    }
                },
                &layouts::favorite_items_changed::SHAPE,
                ids::USER_FAVORITE_ITEMS_LIST_CHANGED,
                self.shared.poll,
            )
            .await?
        {
            CallbackResult::FavoritesChanged(result) => Some(result),
            other => unexpected(op, &other),
        }
    }

    pub fn item_state(&self, item: PublishedFileId) -> ItemState {
        ItemState(self.shared.call(&self.slot, "workshop.item_state", |n, p| {
            n.item_state(p, item)
        }))
    }

    /// Where an installed item lives, `None` when it is not installed.
    pub fn item_install_info(&self, item: PublishedFileId) -> Option<ItemInstallInfo> {
        self.shared
            .call(&self.slot, "workshop.item_install_info", |n, p| {
                n.item_install_info(p, item)
            })
    }

    pub fn item_download_info(&self, item: PublishedFileId) -> Option<DownloadInfo> {
        let (bytes_downloaded, bytes_total) =
            self.shared
                .call(&self.slot, "workshop.item_download_info", |n, p| {
                    n.item_download_info(p, item)
                })?;
        Some(DownloadInfo {
            bytes_downloaded,
            bytes_total,
        })
    }

    /// Queues a download (or update) of `item`. `high_priority` moves it to
    /// the front and pauses other downloads.
    pub fn download_item(&self, item: PublishedFileId, high_priority: bool) -> bool {
        self.shared.call(&self.slot, "workshop.download_item", |n, p| {
            n.download_item(p, item, high_priority)
        })
    }

    pub fn subscribed_items(&self) -> Vec<PublishedFileId> {
        self.shared
            .call(&self.slot, "workshop.subscribed_items", |n, p| n.subscribed_items(p))
    }
}

fn unexpected<T>(op: &'static str, result: &CallbackResult) -> Option<T> {
    tracing::error!(op, ?result, "unexpected call result kind");
    None
}
