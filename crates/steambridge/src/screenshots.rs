//! Screenshot library (`ISteamScreenshots`).

use std::sync::Arc;

use steambridge_native::{Interface, InterfaceSlot, NativeApi, PublishedFileId, SteamId};

use crate::shared::Shared;

/// `ScreenshotHandle`; zero is invalid.
pub type ScreenshotHandle = u32;

pub struct Screenshots<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> Screenshots<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Screenshots),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// Captures the screen as if the user pressed the screenshot key.
    pub fn trigger(&self) -> bool {
        self.shared.call(&self.slot, "screenshots.trigger", |n, p| {
            n.trigger_screenshot(p).map(|()| true)
        })
    }

    /// When hooked, the screenshot key is routed to the game instead of
    /// Steam capturing the frame itself.
    pub fn hook(&self, hook: bool) -> bool {
        self.shared.call(&self.slot, "screenshots.hook", |n, p| {
            n.hook_screenshots(p, hook).map(|()| true)
        })
    }

    pub fn is_hooked(&self) -> bool {
        self.shared
            .call(&self.slot, "screenshots.is_hooked", |n, p| n.is_screenshots_hooked(p))
    }

    /// Adds a JPEG from disk. `None` when Steam rejected the file.
    pub fn add_to_library(
        &self,
        path: &str,
        thumbnail: Option<&str>,
        width: i32,
        height: i32,
    ) -> Option<ScreenshotHandle> {
        let handle: ScreenshotHandle =
            self.shared
                .call(&self.slot, "screenshots.add_to_library", |n, p| {
                    n.add_screenshot_to_library(p, path, thumbnail, width, height)
                });
        (handle != 0).then_some(handle)
    }

    pub fn set_location(&self, screenshot: ScreenshotHandle, location: &str) -> bool {
        self.shared.call(&self.slot, "screenshots.set_location", |n, p| {
            n.set_location(p, screenshot, location)
        })
    }

    pub fn tag_user(&self, screenshot: ScreenshotHandle, user: SteamId) -> bool {
        self.shared.call(&self.slot, "screenshots.tag_user", |n, p| {
            n.tag_user(p, screenshot, user)
        })
    }

    pub fn tag_published_file(&self, screenshot: ScreenshotHandle, item: PublishedFileId) -> bool {
        self.shared
            .call(&self.slot, "screenshots.tag_published_file", |n, p| {
                n.tag_published_file(p, screenshot, item)
            })
    }
}
