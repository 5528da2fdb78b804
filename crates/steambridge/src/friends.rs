//! Persona and friends list (`ISteamFriends`).

use std::sync::Arc;

use serde::Serialize;
use steambridge_native::{Interface, InterfaceSlot, NativeApi, SteamId};

use crate::shared::Shared;

/// `k_EFriendFlagImmediate`: regular friends.
pub const FRIEND_FLAG_IMMEDIATE: i32 = 0x04;

/// `EPersonaState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonaState {
    #[default]
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    Invisible,
    Unknown(i32),
}

impl From<i32> for PersonaState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Offline,
            1 => Self::Online,
            2 => Self::Busy,
            3 => Self::Away,
            4 => Self::Snooze,
            5 => Self::LookingToTrade,
            6 => Self::LookingToPlay,
            7 => Self::Invisible,
            other => Self::Unknown(other),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Friend {
    pub steam_id: SteamId,
    pub name: String,
}

pub struct Friends<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> Friends<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Friends),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    pub fn persona_name(&self) -> String {
        self.shared
            .call(&self.slot, "friends.persona_name", |n, p| n.persona_name(p))
    }

    pub fn persona_state(&self) -> PersonaState {
        let code: i32 = self
            .shared
            .call(&self.slot, "friends.persona_state", |n, p| n.persona_state(p));
        PersonaState::from(code)
    }

    pub fn friend_count(&self, flags: i32) -> i32 {
        self.shared.call(&self.slot, "friends.friend_count", |n, p| {
            n.friend_count(p, flags)
        })
    }

    /// Immediate friends with their persona names.
    pub fn friends(&self) -> Vec<Friend> {
        self.shared.call(&self.slot, "friends.friends", |n, p| {
            let count = n.friend_count(p, FRIEND_FLAG_IMMEDIATE)?;
            let mut friends = Vec::with_capacity(count.max(0) as usize);
            for index in 0..count {
                let steam_id = n.friend_by_index(p, index, FRIEND_FLAG_IMMEDIATE)?;
                if steam_id == 0 {
                    continue;
                }
                let name = n.friend_persona_name(p, steam_id)?;
                friends.push(Friend { steam_id, name });
            }
            Ok(friends)
        })
    }

    pub fn friend_persona_name(&self, friend: SteamId) -> String {
        self.shared.call(&self.slot, "friends.friend_persona_name", |n, p| {
            n.friend_persona_name(p, friend)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FAKE_STEAM_ID};

    #[test]
    fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let friends = Friends::new(shared);

        assert_eq!(friends.persona_name(), "");
        assert_eq!(friends.persona_state(), PersonaState::Offline);
        assert_eq!(friends.friend_count(FRIEND_FLAG_IMMEDIATE), 0);
        assert!(friends.friends().is_empty());
        assert_eq!(friends.friend_persona_name(FAKE_STEAM_ID), "");
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn lists_friends_with_names() {
        let (fake, shared) = testing::shared(true);
        let friends = Friends::new(shared);

        assert_eq!(friends.persona_name(), "capy");
        assert_eq!(friends.persona_state(), PersonaState::Online);
        assert_eq!(
            friends.friends(),
            vec![
                Friend {
                    steam_id: FAKE_STEAM_ID + 1,
                    name: "friend-1".into(),
                },
                Friend {
                    steam_id: FAKE_STEAM_ID + 2,
                    name: "friend-2".into(),
                },
            ]
        );
        assert_eq!(fake.count("friend_by_index"), 2);
    }

    #[test]
    fn persona_state_codes() {
        assert_eq!(PersonaState::from(3), PersonaState::Away);
        assert_eq!(PersonaState::from(42), PersonaState::Unknown(42));
    }
}
