use crate::error::NativeError;
use crate::library::{SteamLibrary, c_string};
use crate::types::{InterfacePtr, PublishedFileId, SteamId};

/// `ISteamScreenshots` calls. Screenshot handles are `u32`, zero is
/// `INVALID_SCREENSHOT_HANDLE`.
pub trait ScreenshotsApi {
    fn trigger_screenshot(&self, screenshots: InterfacePtr) -> Result<(), NativeError>;
    fn hook_screenshots(&self, screenshots: InterfacePtr, hook: bool) -> Result<(), NativeError>;
    fn is_screenshots_hooked(&self, screenshots: InterfacePtr) -> Result<bool, NativeError>;
    fn add_screenshot_to_library(
        &self,
        screenshots: InterfacePtr,
        path: &str,
        thumbnail: Option<&str>,
        width: i32,
        height: i32,
    ) -> Result<u32, NativeError>;
    fn set_location(&self, screenshots: InterfacePtr, screenshot: u32, location: &str) -> Result<bool, NativeError>;
    fn tag_user(&self, screenshots: InterfacePtr, screenshot: u32, user: SteamId) -> Result<bool, NativeError>;
    fn tag_published_file(&self, screenshots: InterfacePtr, screenshot: u32, item: PublishedFileId) -> Result<bool, NativeError>;
}

impl ScreenshotsApi for SteamLibrary {
    fn trigger_screenshot(&self, screenshots: InterfacePtr) -> Result<(), NativeError> {
        let f = self.table.screenshots_trigger.get()?;
        unsafe { f(screenshots.as_ptr()) };
        Ok(())
    }

    fn hook_screenshots(&self, screenshots: InterfacePtr, hook: bool) -> Result<(), NativeError> {
        let f = self.table.screenshots_hook.get()?;
        unsafe { f(screenshots.as_ptr(), hook) };
        Ok(())
    }

    fn is_screenshots_hooked(&self, screenshots: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.screenshots_is_hooked.get()?;
        Ok(unsafe { f(screenshots.as_ptr()) })
    }

    fn add_screenshot_to_library(
        &self,
        screenshots: InterfacePtr,
        path: &str,
        thumbnail: Option<&str>,
        width: i32,
        height: i32,
    ) -> Result<u32, NativeError> {
        let f = self.table.screenshots_add_to_library.get()?;
        let path = c_string(path)?;
        let thumbnail = thumbnail.map(c_string).transpose()?;
        let thumb_ptr = thumbnail.as_ref().map_or(std::ptr::null(), |t| t.as_ptr());
        Ok(unsafe { f(screenshots.as_ptr(), path.as_ptr(), thumb_ptr, width, height) })
    }

    fn set_location(&self, screenshots: InterfacePtr, screenshot: u32, location: &str) -> Result<bool, NativeError> {
        let f = self.table.screenshots_set_location.get()?;
        let location = c_string(location)?;
        Ok(unsafe { f(screenshots.as_ptr(), screenshot, location.as_ptr()) })
    }

    fn tag_user(&self, screenshots: InterfacePtr, screenshot: u32, user: SteamId) -> Result<bool, NativeError> {
        let f = self.table.screenshots_tag_user.get()?;
        Ok(unsafe { f(screenshots.as_ptr(), screenshot, user) })
    }

    fn tag_published_file(&self, screenshots: InterfacePtr, screenshot: u32, item: PublishedFileId) -> Result<bool, NativeError> {
        let f = self.table.screenshots_tag_published_file.get()?;
        Ok(unsafe { f(screenshots.as_ptr(), screenshot, item) })
    }
}
