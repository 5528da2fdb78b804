use crate::error::NativeError;
use crate::library::{SteamLibrary, string_from_ptr};
use crate::types::{AppId, InterfacePtr};

/// `ISteamUtils` queries.
pub trait UtilsApi {
    fn app_id(&self, utils: InterfacePtr) -> Result<AppId, NativeError>;
    fn seconds_since_app_active(&self, utils: InterfacePtr) -> Result<u32, NativeError>;
    fn current_battery_power(&self, utils: InterfacePtr) -> Result<u8, NativeError>;
    fn ip_country(&self, utils: InterfacePtr) -> Result<String, NativeError>;
    fn server_real_time(&self, utils: InterfacePtr) -> Result<u32, NativeError>;
    fn is_overlay_enabled(&self, utils: InterfacePtr) -> Result<bool, NativeError>;
    fn is_steam_running_on_steam_deck(&self, utils: InterfacePtr) -> Result<bool, NativeError>;
    fn steam_ui_language(&self, utils: InterfacePtr) -> Result<String, NativeError>;
    fn show_floating_gamepad_text_input(
        &self,
        utils: InterfacePtr,
        mode: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<bool, NativeError>;
}

impl UtilsApi for SteamLibrary {
    fn app_id(&self, utils: InterfacePtr) -> Result<AppId, NativeError> {
        let f = self.table.utils_app_id.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn seconds_since_app_active(&self, utils: InterfacePtr) -> Result<u32, NativeError> {
        let f = self.table.utils_seconds_since_app_active.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn current_battery_power(&self, utils: InterfacePtr) -> Result<u8, NativeError> {
        let f = self.table.utils_current_battery_power.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn ip_country(&self, utils: InterfacePtr) -> Result<String, NativeError> {
        let f = self.table.utils_ip_country.get()?;
        Ok(unsafe { string_from_ptr(f(utils.as_ptr())) })
    }

    fn server_real_time(&self, utils: InterfacePtr) -> Result<u32, NativeError> {
        let f = self.table.utils_server_real_time.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn is_overlay_enabled(&self, utils: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.utils_is_overlay_enabled.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn is_steam_running_on_steam_deck(&self, utils: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.utils_is_steam_running_on_steam_deck.get()?;
        Ok(unsafe { f(utils.as_ptr()) })
    }

    fn steam_ui_language(&self, utils: InterfacePtr) -> Result<String, NativeError> {
        let f = self.table.utils_steam_ui_language.get()?;
        Ok(unsafe { string_from_ptr(f(utils.as_ptr())) })
    }

    fn show_floating_gamepad_text_input(
        &self,
        utils: InterfacePtr,
        mode: i32,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> Result<bool, NativeError> {
        let f = self.table.utils_show_floating_gamepad_text_input.get()?;
        Ok(unsafe { f(utils.as_ptr(), mode, x, y, width, height) })
    }
}
