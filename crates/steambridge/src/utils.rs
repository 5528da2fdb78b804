//! Device and session information (`ISteamUtils`).

use std::sync::Arc;

use serde::Serialize;
use steambridge_native::{AppId, Interface, InterfacePtr, InterfaceSlot, NativeApi, NativeError};

use crate::shared::Shared;

/// Battery level reported when running on AC power.
pub const BATTERY_ON_AC: u8 = 255;

/// Keyboard style for [`Utils::show_floating_gamepad_text_input`]
/// (`EFloatingGamepadTextInputMode`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FloatingKeyboardMode {
    #[default]
    SingleLine,
    MultipleLines,
    Email,
    Numeric,
}

impl FloatingKeyboardMode {
    fn code(self) -> i32 {
        match self {
            Self::SingleLine => 0,
            Self::MultipleLines => 1,
            Self::Email => 2,
            Self::Numeric => 3,
        }
    }
}

/// Screen area the floating keyboard should avoid covering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextFieldRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

pub struct Utils<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> Utils<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Utils),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    fn call<T: Default>(
        &self,
        op: &'static str,
        f: impl FnOnce(&N, InterfacePtr) -> Result<T, NativeError>,
    ) -> T {
        self.shared.call(&self.slot, op, f)
    }

    pub fn app_id(&self) -> AppId {
        self.call("utils.app_id", |n, p| n.app_id(p))
    }

    pub fn seconds_since_app_active(&self) -> u32 {
        self.call("utils.seconds_since_app_active", |n, p| {
            n.seconds_since_app_active(p)
        })
    }

    /// Battery percentage, [`BATTERY_ON_AC`] on AC power.
    pub fn battery_power(&self) -> u8 {
        self.call("utils.battery_power", |n, p| n.current_battery_power(p))
    }

    /// Two-letter country code from the user's IP.
    pub fn ip_country(&self) -> String {
        self.call("utils.ip_country", |n, p| n.ip_country(p))
    }

    /// Steam server time, seconds since the Unix epoch.
    pub fn server_real_time(&self) -> u32 {
        self.call("utils.server_real_time", |n, p| n.server_real_time(p))
    }

    pub fn is_steam_running_on_steam_deck(&self) -> bool {
        self.call("utils.is_steam_running_on_steam_deck", |n, p| {
            n.is_steam_running_on_steam_deck(p)
        })
    }

    pub fn ui_language(&self) -> String {
        self.call("utils.ui_language", |n, p| n.steam_ui_language(p))
    }

    /// Opens the on-screen keyboard over a text field in Big Picture or on
    /// Steam Deck. Returns `false` when Steam refused to show it.
    pub fn show_floating_gamepad_text_input(
        &self,
        mode: FloatingKeyboardMode,
        field: TextFieldRect,
    ) -> bool {
        self.call("utils.show_floating_gamepad_text_input", |n, p| {
            n.show_floating_gamepad_text_input(
                p,
                mode.code(),
                field.x,
                field.y,
                field.width,
                field.height,
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FAKE_APP_ID};

    #[test]
    fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let utils = Utils::new(shared);

        assert_eq!(utils.app_id(), 0);
        assert_eq!(utils.seconds_since_app_active(), 0);
        assert_eq!(utils.battery_power(), 0);
        assert_eq!(utils.ip_country(), "");
        assert_eq!(utils.server_real_time(), 0);
        assert!(!utils.is_steam_running_on_steam_deck());
        assert_eq!(utils.ui_language(), "");
        assert!(!utils.show_floating_gamepad_text_input(
            FloatingKeyboardMode::Numeric,
            TextFieldRect::default()
        ));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn forwards_to_native() {
        let (_fake, shared) = testing::shared(true);
        let utils = Utils::new(shared);

        assert_eq!(utils.app_id(), FAKE_APP_ID);
        assert_eq!(utils.seconds_since_app_active(), 42);
        assert_eq!(utils.battery_power(), BATTERY_ON_AC);
        assert_eq!(utils.ip_country(), "AR");
        assert_eq!(utils.server_real_time(), 1_700_000_000);
        assert!(utils.is_steam_running_on_steam_deck());
        assert_eq!(utils.ui_language(), "english");
        assert!(utils.show_floating_gamepad_text_input(
            FloatingKeyboardMode::SingleLine,
            TextFieldRect {
                x: 0,
                y: 600,
                width: 1280,
                height: 200,
            }
        ));
    }

    #[test]
    fn keyboard_mode_codes() {
        assert_eq!(FloatingKeyboardMode::default().code(), 0);
        assert_eq!(FloatingKeyboardMode::Numeric.code(), 3);
    }
}
