use std::ffi::c_char;

use crate::error::NativeError;
use crate::library::{SteamLibrary, string_from_buf, string_from_ptr};
use crate::types::{AppId, InterfacePtr, SteamId};

/// Buffer size used for install directory queries.
const INSTALL_DIR_LEN: usize = 1024;

/// `ISteamApps` queries.
pub trait AppsApi {
    fn is_subscribed(&self, apps: InterfacePtr) -> Result<bool, NativeError>;
    fn is_subscribed_app(&self, apps: InterfacePtr, app_id: AppId) -> Result<bool, NativeError>;
    fn is_dlc_installed(&self, apps: InterfacePtr, app_id: AppId) -> Result<bool, NativeError>;
    fn current_game_language(&self, apps: InterfacePtr) -> Result<String, NativeError>;
    fn available_game_languages(&self, apps: InterfacePtr) -> Result<String, NativeError>;
    fn app_build_id(&self, apps: InterfacePtr) -> Result<i32, NativeError>;
    fn app_owner(&self, apps: InterfacePtr) -> Result<SteamId, NativeError>;
    /// Returns `None` when the app is not installed.
    fn app_install_dir(&self, apps: InterfacePtr, app_id: AppId) -> Result<Option<String>, NativeError>;
    fn dlc_count(&self, apps: InterfacePtr) -> Result<i32, NativeError>;
    fn is_subscribed_from_family_sharing(&self, apps: InterfacePtr) -> Result<bool, NativeError>;
}

impl AppsApi for SteamLibrary {
    fn is_subscribed(&self, apps: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.apps_is_subscribed.get()?;
        Ok(unsafe { f(apps.as_ptr()) })
    }

    fn is_subscribed_app(&self, apps: InterfacePtr, app_id: AppId) -> Result<bool, NativeError> {
        let f = self.table.apps_is_subscribed_app.get()?;
        Ok(unsafe { f(apps.as_ptr(), app_id) })
    }

    fn is_dlc_installed(&self, apps: InterfacePtr, app_id: AppId) -> Result<bool, NativeError> {
        let f = self.table.apps_is_dlc_installed.get()?;
        Ok(unsafe { f(apps.as_ptr(), app_id) })
    }

    fn current_game_language(&self, apps: InterfacePtr) -> Result<String, NativeError> {
        let f = self.table.apps_current_game_language.get()?;
        Ok(unsafe { string_from_ptr(f(apps.as_ptr())) })
    }

    fn available_game_languages(&self, apps: InterfacePtr) -> Result<String, NativeError> {
        let f = self.table.apps_available_game_languages.get()?;
        Ok(unsafe { string_from_ptr(f(apps.as_ptr())) })
    }

    fn app_build_id(&self, apps: InterfacePtr) -> Result<i32, NativeError> {
        let f = self.table.apps_app_build_id.get()?;
        Ok(unsafe { f(apps.as_ptr()) })
    }

    fn app_owner(&self, apps: InterfacePtr) -> Result<SteamId, NativeError> {
        let f = self.table.apps_app_owner.get()?;
        Ok(unsafe { f(apps.as_ptr()) })
    }

    fn app_install_dir(&self, apps: InterfacePtr, app_id: AppId) -> Result<Option<String>, NativeError> {
        let f = self.table.apps_app_install_dir.get()?;
        let mut buf: [c_char; INSTALL_DIR_LEN] = [0; INSTALL_DIR_LEN];
        let written = unsafe { f(apps.as_ptr(), app_id, buf.as_mut_ptr(), INSTALL_DIR_LEN as u32) };
        if written == 0 {
            return Ok(None);
        }
        Ok(Some(string_from_buf(&buf)))
    }

    fn dlc_count(&self, apps: InterfacePtr) -> Result<i32, NativeError> {
        let f = self.table.apps_dlc_count.get()?;
        Ok(unsafe { f(apps.as_ptr()) })
    }

    fn is_subscribed_from_family_sharing(&self, apps: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.apps_is_subscribed_from_family_sharing.get()?;
        Ok(unsafe { f(apps.as_ptr()) })
    }
}
