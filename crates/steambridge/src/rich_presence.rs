//! Rich presence key/value pairs (`ISteamFriends`).

use std::sync::Arc;

use steambridge_native::{Interface, InterfaceSlot, NativeApi, SteamId};

use crate::shared::Shared;

/// `k_cchMaxRichPresenceKeyLength`, terminator included.
pub const MAX_KEY_LENGTH: usize = 64;
/// `k_cchMaxRichPresenceValueLength`, terminator included.
pub const MAX_VALUE_LENGTH: usize = 256;

pub struct RichPresence<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> RichPresence<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Friends),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// Sets `key` for the current user. An empty `value` deletes the key.
    /// Keys and values over the native limits are rejected locally.
    pub fn set(&self, key: &str, value: &str) -> bool {
        if key.is_empty() || key.len() >= MAX_KEY_LENGTH {
            tracing::warn!(key, "rich presence key empty or too long");
            return false;
        }
        if value.len() >= MAX_VALUE_LENGTH {
            tracing::warn!(key, len = value.len(), "rich presence value too long");
            return false;
        }
        self.shared.call(&self.slot, "rich_presence.set", |n, p| {
            n.set_rich_presence(p, key, value)
        })
    }

    /// Removes every key for the current user.
    pub fn clear(&self) -> bool {
        self.shared
            .call(&self.slot, "rich_presence.clear", |n, p| {
                n.clear_rich_presence(p).map(|()| true)
            })
    }

    /// Value of `key` for a friend, empty when unset.
    pub fn get(&self, friend: SteamId, key: &str) -> String {
        self.shared.call(&self.slot, "rich_presence.get", |n, p| {
            n.friend_rich_presence(p, friend, key)
        })
    }
}
