//! Steam overlay dialogs (`ISteamFriends::ActivateGameOverlay*`).

use std::sync::Arc;

use steambridge_native::{AppId, Interface, InterfaceSlot, NativeApi, SteamId};

use crate::shared::Shared;

/// Dialogs accepted by [`Overlay::activate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayDialog {
    Friends,
    Community,
    Players,
    Settings,
    OfficialGameGroup,
    Stats,
    Achievements,
}

impl OverlayDialog {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Friends => "friends",
            Self::Community => "community",
            Self::Players => "players",
            Self::Settings => "settings",
            Self::OfficialGameGroup => "officialgamegroup",
            Self::Stats => "stats",
            Self::Achievements => "achievements",
        }
    }
}

/// Dialogs accepted by [`Overlay::activate_to_user`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserDialog {
    SteamId,
    Chat,
    JoinTrade,
    Stats,
    Achievements,
    FriendAdd,
    FriendRemove,
    FriendRequestAccept,
    FriendRequestIgnore,
}

impl UserDialog {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SteamId => "steamid",
            Self::Chat => "chat",
            Self::JoinTrade => "jointrade",
            Self::Stats => "stats",
            Self::Achievements => "achievements",
            Self::FriendAdd => "friendadd",
            Self::FriendRemove => "friendremove",
            Self::FriendRequestAccept => "friendrequestaccept",
            Self::FriendRequestIgnore => "friendrequestignore",
        }
    }
}

/// `EOverlayToStoreFlag`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreFlag {
    #[default]
    None,
    AddToCart,
    AddToCartAndShow,
}

impl StoreFlag {
    fn code(self) -> i32 {
        match self {
            Self::None => 0,
            Self::AddToCart => 1,
            Self::AddToCartAndShow => 2,
        }
    }
}

/// `EActivateGameOverlayToWebPageMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WebPageMode {
    #[default]
    Default,
    /// Closes the browser when the page closes itself.
    Modal,
}

pub struct Overlay<N: NativeApi> {
    shared: Arc<Shared<N>>,
    friends: InterfaceSlot,
    utils: InterfaceSlot,
}

impl<N: NativeApi> Overlay<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            friends: InterfaceSlot::new(Interface::Friends),
            utils: InterfaceSlot::new(Interface::Utils),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.friends.reset();
        self.utils.reset();
    }

    pub fn activate(&self, dialog: OverlayDialog) -> bool {
        self.shared.call(&self.friends, "overlay.activate", |n, p| {
            n.activate_game_overlay(p, dialog.as_str()).map(|()| true)
        })
    }

    pub fn activate_to_user(&self, dialog: UserDialog, user: SteamId) -> bool {
        self.shared.call(&self.friends, "overlay.activate_to_user", |n, p| {
            n.activate_game_overlay_to_user(p, dialog.as_str(), user)
                .map(|()| true)
        })
    }

    pub fn activate_to_web_page(&self, url: &str, mode: WebPageMode) -> bool {
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            tracing::warn!(url, "overlay web page needs an http(s) url");
            return false;
        }
        let mode = match mode {
            WebPageMode::Default => 0,
            WebPageMode::Modal => 1,
        };
        self.shared
            .call(&self.friends, "overlay.activate_to_web_page", |n, p| {
                n.activate_game_overlay_to_web_page(p, url, mode)
                    .map(|()| true)
            })
    }

    pub fn activate_to_store(&self, app_id: AppId, flag: StoreFlag) -> bool {
        self.shared.call(&self.friends, "overlay.activate_to_store", |n, p| {
            n.activate_game_overlay_to_store(p, app_id, flag.code())
                .map(|()| true)
        })
    }

    pub fn activate_invite_dialog(&self, lobby: SteamId) -> bool {
        self.shared
            .call(&self.friends, "overlay.activate_invite_dialog", |n, p| {
                n.activate_game_overlay_invite_dialog(p, lobby).map(|()| true)
            })
    }

    /// Whether the overlay is injected and enabled for this process.
    pub fn is_enabled(&self) -> bool {
        self.shared
            .call(&self.utils, "overlay.is_enabled", |n, p| n.is_overlay_enabled(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FAKE_APP_ID, FAKE_STEAM_ID};

    #[test]
    fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let overlay = Overlay::new(shared);

        assert!(!overlay.activate(OverlayDialog::Friends));
        assert!(!overlay.activate_to_user(UserDialog::Chat, FAKE_STEAM_ID));
        assert!(!overlay.activate_to_web_page("https://store.steampowered.com", WebPageMode::Modal));
        assert!(!overlay.activate_to_store(FAKE_APP_ID, StoreFlag::AddToCart));
        assert!(!overlay.activate_invite_dialog(1));
        assert!(!overlay.is_enabled());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn activates_dialogs() {
        let (fake, shared) = testing::shared(true);
        let overlay = Overlay::new(shared);

        assert!(overlay.is_enabled());
        assert!(overlay.activate(OverlayDialog::Achievements));
        assert!(overlay.activate_to_user(UserDialog::FriendAdd, FAKE_STEAM_ID));
        assert!(overlay.activate_to_store(FAKE_APP_ID, StoreFlag::AddToCartAndShow));
        assert!(overlay.activate_to_web_page("https://example.com", WebPageMode::Default));
        assert_eq!(fake.count("activate_game_overlay"), 1);
        assert_eq!(fake.count("activate_game_overlay_to_store"), 1);
    }

    #[test]
    fn rejects_non_http_urls() {
        let (fake, shared) = testing::shared(true);
        let overlay = Overlay::new(shared);

        assert!(!overlay.activate_to_web_page("file:///etc/passwd", WebPageMode::Default));
        assert_eq!(fake.count("activate_game_overlay_to_web_page"), 0);
    }

    #[test]
    fn dialog_names() {
        assert_eq!(OverlayDialog::OfficialGameGroup.as_str(), "officialgamegroup");
        assert_eq!(UserDialog::FriendRequestAccept.as_str(), "friendrequestaccept");
        assert_eq!(StoreFlag::default().code(), 0);
    }
}
