use std::ffi::c_char;

use serde::Serialize;

use crate::error::NativeError;
use crate::library::{SteamLibrary, c_string, string_from_buf};
use crate::types::{AppId, CallHandle, InterfacePtr, PublishedFileId, UgcUpdateHandle};

/// Buffer size used for install folder queries.
const INSTALL_FOLDER_LEN: usize = 1024;

/// Where a subscribed item lives on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemInstallInfo {
    pub size_on_disk: u64,
    pub folder: String,
    pub timestamp: u32,
}

/// Upload state of a pending item update (`EItemUpdateStatus` + bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProgress {
    pub status: i32,
    pub bytes_processed: u64,
    pub bytes_total: u64,
}

/// `ISteamUGC` calls.
pub trait UgcApi {
    fn create_item(&self, ugc: InterfacePtr, app_id: AppId, file_type: i32) -> Result<CallHandle, NativeError>;
    fn start_item_update(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<UgcUpdateHandle, NativeError>;
    fn set_item_title(&self, ugc: InterfacePtr, update: UgcUpdateHandle, title: &str) -> Result<bool, NativeError>;
    fn set_item_description(&self, ugc: InterfacePtr, update: UgcUpdateHandle, description: &str) -> Result<bool, NativeError>;
    fn set_item_content(&self, ugc: InterfacePtr, update: UgcUpdateHandle, folder: &str) -> Result<bool, NativeError>;
    fn set_item_preview(&self, ugc: InterfacePtr, update: UgcUpdateHandle, file: &str) -> Result<bool, NativeError>;
    fn set_item_visibility(&self, ugc: InterfacePtr, update: UgcUpdateHandle, visibility: i32) -> Result<bool, NativeError>;
    fn submit_item_update(&self, ugc: InterfacePtr, update: UgcUpdateHandle, change_note: Option<&str>) -> Result<CallHandle, NativeError>;
    fn item_update_progress(&self, ugc: InterfacePtr, update: UgcUpdateHandle) -> Result<UpdateProgress, NativeError>;
    fn subscribe_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn unsubscribe_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn set_user_item_vote(&self, ugc: InterfacePtr, item: PublishedFileId, vote_up: bool) -> Result<CallHandle, NativeError>;
    fn get_user_item_vote(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn add_item_to_favorites(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn remove_item_from_favorites(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn delete_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError>;
    fn item_state(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<u32, NativeError>;
    fn item_install_info(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<Option<ItemInstallInfo>, NativeError>;
    /// Returns `(downloaded, total)` bytes.
    fn item_download_info(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<Option<(u64, u64)>, NativeError>;
    fn download_item(&self, ugc: InterfacePtr, item: PublishedFileId, high_priority: bool) -> Result<bool, NativeError>;
    fn subscribed_items(&self, ugc: InterfacePtr) -> Result<Vec<PublishedFileId>, NativeError>;
}

impl SteamLibrary {
    fn ugc_set_string(
        &self,
        f: unsafe extern "C" fn(*mut std::ffi::c_void, u64, *const c_char) -> bool,
        ugc: InterfacePtr,
        update: UgcUpdateHandle,
        value: &str,
    ) -> Result<bool, NativeError> {
        let value = c_string(value)?;
        Ok(unsafe { f(ugc.as_ptr(), update, value.as_ptr()) })
    }
}

impl UgcApi for SteamLibrary {
    fn create_item(&self, ugc: InterfacePtr, app_id: AppId, file_type: i32) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_create_item.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), app_id, file_type) }))
    }

    fn start_item_update(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<UgcUpdateHandle, NativeError> {
        let f = self.table.ugc_start_item_update.get()?;
        Ok(unsafe { f(ugc.as_ptr(), app_id, item) })
    }

    fn set_item_title(&self, ugc: InterfacePtr, update: UgcUpdateHandle, title: &str) -> Result<bool, NativeError> {
        self.ugc_set_string(self.table.ugc_set_item_title.get()?, ugc, update, title)
    }

    fn set_item_description(&self, ugc: InterfacePtr, update: UgcUpdateHandle, description: &str) -> Result<bool, NativeError> {
        self.ugc_set_string(self.table.ugc_set_item_description.get()?, ugc, update, description)
    }

    fn set_item_content(&self, ugc: InterfacePtr, update: UgcUpdateHandle, folder: &str) -> Result<bool, NativeError> {
        self.ugc_set_string(self.table.ugc_set_item_content.get()?, ugc, update, folder)
    }

    fn set_item_preview(&self, ugc: InterfacePtr, update: UgcUpdateHandle, file: &str) -> Result<bool, NativeError> {
        self.ugc_set_string(self.table.ugc_set_item_preview.get()?, ugc, update, file)
    }

    fn set_item_visibility(&self, ugc: InterfacePtr, update: UgcUpdateHandle, visibility: i32) -> Result<bool, NativeError> {
        let f = self.table.ugc_set_item_visibility.get()?;
        Ok(unsafe { f(ugc.as_ptr(), update, visibility) })
    }

    fn submit_item_update(&self, ugc: InterfacePtr, update: UgcUpdateHandle, change_note: Option<&str>) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_submit_item_update.get()?;
        let note = change_note.map(c_string).transpose()?;
        let ptr = note.as_ref().map_or(std::ptr::null(), |n| n.as_ptr());
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), update, ptr) }))
    }

    fn item_update_progress(&self, ugc: InterfacePtr, update: UgcUpdateHandle) -> Result<UpdateProgress, NativeError> {
        let f = self.table.ugc_item_update_progress.get()?;
        let mut processed = 0u64;
        let mut total = 0u64;
        let status = unsafe { f(ugc.as_ptr(), update, &mut processed, &mut total) };
        Ok(UpdateProgress {
            status,
            bytes_processed: processed,
            bytes_total: total,
        })
    }

    fn subscribe_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_subscribe_item.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), item) }))
    }

    fn unsubscribe_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_unsubscribe_item.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), item) }))
    }

    fn set_user_item_vote(&self, ugc: InterfacePtr, item: PublishedFileId, vote_up: bool) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_set_user_item_vote.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), item, vote_up) }))
    }

    fn get_user_item_vote(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_get_user_item_vote.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), item) }))
    }

    fn add_item_to_favorites(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_add_item_to_favorites.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), app_id, item) }))
    }

    fn remove_item_from_favorites(&self, ugc: InterfacePtr, app_id: AppId, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_remove_item_from_favorites.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), app_id, item) }))
    }

    fn delete_item(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<CallHandle, NativeError> {
        let f = self.table.ugc_delete_item.get()?;
        Ok(CallHandle(unsafe { f(ugc.as_ptr(), item) }))
    }

    fn item_state(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<u32, NativeError> {
        let f = self.table.ugc_item_state.get()?;
        Ok(unsafe { f(ugc.as_ptr(), item) })
    }

    fn item_install_info(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<Option<ItemInstallInfo>, NativeError> {
        let f = self.table.ugc_item_install_info.get()?;
        let mut size_on_disk = 0u64;
        let mut folder: [c_char; INSTALL_FOLDER_LEN] = [0; INSTALL_FOLDER_LEN];
        let mut timestamp = 0u32;
        let ok = unsafe {
            f(
                ugc.as_ptr(),
                item,
                &mut size_on_disk,
                folder.as_mut_ptr(),
                INSTALL_FOLDER_LEN as u32,
                &mut timestamp,
            )
        };
        if !ok {
            return Ok(None);
        }
        Ok(Some(ItemInstallInfo {
            size_on_disk,
            folder: string_from_buf(&folder),
            timestamp,
        }))
    }

    fn item_download_info(&self, ugc: InterfacePtr, item: PublishedFileId) -> Result<Option<(u64, u64)>, NativeError> {
        let f = self.table.ugc_item_download_info.get()?;
        let mut downloaded = 0u64;
        let mut total = 0u64;
        let ok = unsafe { f(ugc.as_ptr(), item, &mut downloaded, &mut total) };
        Ok(ok.then_some((downloaded, total)))
    }

    fn download_item(&self, ugc: InterfacePtr, item: PublishedFileId, high_priority: bool) -> Result<bool, NativeError> {
        let f = self.table.ugc_download_item.get()?;
        Ok(unsafe { f(ugc.as_ptr(), item, high_priority) })
    }

    fn subscribed_items(&self, ugc: InterfacePtr) -> Result<Vec<PublishedFileId>, NativeError> {
        let count = self.table.ugc_num_subscribed_items.get()?;
        let fill = self.table.ugc_subscribed_items.get()?;
        let expected = unsafe { count(ugc.as_ptr()) };
        if expected == 0 {
            return Ok(Vec::new());
        }
        let mut items = vec![0u64; expected as usize];
        let written = unsafe { fill(ugc.as_ptr(), items.as_mut_ptr(), expected) };
        items.truncate((written as usize).min(items.len()));
        Ok(items)
    }
}
