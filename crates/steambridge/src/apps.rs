//! Ownership, DLC and language queries (`ISteamApps`).

use std::sync::Arc;

use steambridge_native::{AppId, Interface, InterfaceSlot, NativeApi, SteamId};

use crate::shared::Shared;

pub struct Apps<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> Apps<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Apps),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// Whether the current user owns the running app.
    pub fn is_subscribed(&self) -> bool {
        self.shared
            .call(&self.slot, "apps.is_subscribed", |n, p| n.is_subscribed(p))
    }

    pub fn is_subscribed_app(&self, app_id: AppId) -> bool {
        self.shared.call(&self.slot, "apps.is_subscribed_app", |n, p| {
            n.is_subscribed_app(p, app_id)
        })
    }

    pub fn is_dlc_installed(&self, app_id: AppId) -> bool {
        self.shared.call(&self.slot, "apps.is_dlc_installed", |n, p| {
            n.is_dlc_installed(p, app_id)
        })
    }

    pub fn current_game_language(&self) -> String {
        self.shared.call(&self.slot, "apps.current_game_language", |n, p| {
            n.current_game_language(p)
        })
    }

    /// Languages the app supports, split from Steam's comma list.
    pub fn available_game_languages(&self) -> Vec<String> {
        let raw: String = self
            .shared
            .call(&self.slot, "apps.available_game_languages", |n, p| {
                n.available_game_languages(p)
            });
        raw.split(',')
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_string)
            .collect()
    }

    pub fn build_id(&self) -> i32 {
        self.shared
            .call(&self.slot, "apps.build_id", |n, p| n.app_build_id(p))
    }

    /// Differs from the current user under Family Sharing.
    pub fn app_owner(&self) -> SteamId {
        self.shared
            .call(&self.slot, "apps.app_owner", |n, p| n.app_owner(p))
    }

    /// Install folder, or `None` when the app is not installed.
    pub fn app_install_dir(&self, app_id: AppId) -> Option<String> {
        self.shared.call(&self.slot, "apps.app_install_dir", |n, p| {
            n.app_install_dir(p, app_id)
        })
    }

    pub fn dlc_count(&self) -> i32 {
        self.shared
            .call(&self.slot, "apps.dlc_count", |n, p| n.dlc_count(p))
    }

    pub fn is_subscribed_from_family_sharing(&self) -> bool {
        self.shared
            .call(&self.slot, "apps.is_subscribed_from_family_sharing", |n, p| {
                n.is_subscribed_from_family_sharing(p)
            })
    }
}
