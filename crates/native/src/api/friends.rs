use crate::error::NativeError;
use crate::library::{SteamLibrary, c_string, string_from_ptr};
use crate::types::{AppId, InterfacePtr, SteamId};

/// `ISteamFriends` calls, shared by the friends, rich presence and overlay
/// managers.
pub trait FriendsApi {
    fn persona_name(&self, friends: InterfacePtr) -> Result<String, NativeError>;
    fn persona_state(&self, friends: InterfacePtr) -> Result<i32, NativeError>;
    fn friend_count(&self, friends: InterfacePtr, flags: i32) -> Result<i32, NativeError>;
    fn friend_by_index(&self, friends: InterfacePtr, index: i32, flags: i32) -> Result<SteamId, NativeError>;
    fn friend_persona_name(&self, friends: InterfacePtr, friend: SteamId) -> Result<String, NativeError>;
    fn set_rich_presence(&self, friends: InterfacePtr, key: &str, value: &str) -> Result<bool, NativeError>;
    fn clear_rich_presence(&self, friends: InterfacePtr) -> Result<(), NativeError>;
    fn friend_rich_presence(&self, friends: InterfacePtr, friend: SteamId, key: &str) -> Result<String, NativeError>;
    fn activate_game_overlay(&self, friends: InterfacePtr, dialog: &str) -> Result<(), NativeError>;
    fn activate_game_overlay_to_user(&self, friends: InterfacePtr, dialog: &str, user: SteamId) -> Result<(), NativeError>;
    fn activate_game_overlay_to_web_page(&self, friends: InterfacePtr, url: &str, mode: i32) -> Result<(), NativeError>;
    fn activate_game_overlay_to_store(&self, friends: InterfacePtr, app_id: AppId, flag: i32) -> Result<(), NativeError>;
    fn activate_game_overlay_invite_dialog(&self, friends: InterfacePtr, lobby: SteamId) -> Result<(), NativeError>;
}

impl FriendsApi for SteamLibrary {
    fn persona_name(&self, friends: InterfacePtr) -> Result<String, NativeError> {
        let f = self.table.friends_persona_name.get()?;
        Ok(unsafe { string_from_ptr(f(friends.as_ptr())) })
    }

    fn persona_state(&self, friends: InterfacePtr) -> Result<i32, NativeError> {
        let f = self.table.friends_persona_state.get()?;
        Ok(unsafe { f(friends.as_ptr()) })
    }

    fn friend_count(&self, friends: InterfacePtr, flags: i32) -> Result<i32, NativeError> {
        let f = self.table.friends_friend_count.get()?;
        Ok(unsafe { f(friends.as_ptr(), flags) })
    }

    fn friend_by_index(&self, friends: InterfacePtr, index: i32, flags: i32) -> Result<SteamId, NativeError> {
        let f = self.table.friends_friend_by_index.get()?;
        Ok(unsafe { f(friends.as_ptr(), index, flags) })
    }

    fn friend_persona_name(&self, friends: InterfacePtr, friend: SteamId) -> Result<String, NativeError> {
        let f = self.table.friends_friend_persona_name.get()?;
        Ok(unsafe { string_from_ptr(f(friends.as_ptr(), friend)) })
    }

    fn set_rich_presence(&self, friends: InterfacePtr, key: &str, value: &str) -> Result<bool, NativeError> {
        let f = self.table.friends_set_rich_presence.get()?;
        let key = c_string(key)?;
        let value = c_string(value)?;
        Ok(unsafe { f(friends.as_ptr(), key.as_ptr(), value.as_ptr()) })
    }

    fn clear_rich_presence(&self, friends: InterfacePtr) -> Result<(), NativeError> {
        let f = self.table.friends_clear_rich_presence.get()?;
        unsafe { f(friends.as_ptr()) };
        Ok(())
    }

    fn friend_rich_presence(&self, friends: InterfacePtr, friend: SteamId, key: &str) -> Result<String, NativeError> {
        let f = self.table.friends_friend_rich_presence.get()?;
        let key = c_string(key)?;
        Ok(unsafe { string_from_ptr(f(friends.as_ptr(), friend, key.as_ptr())) })
    }

    fn activate_game_overlay(&self, friends: InterfacePtr, dialog: &str) -> Result<(), NativeError> {
        let f = self.table.friends_activate_game_overlay.get()?;
        let dialog = c_string(dialog)?;
        unsafe { f(friends.as_ptr(), dialog.as_ptr()) };
        Ok(())
    }

    fn activate_game_overlay_to_user(&self, friends: InterfacePtr, dialog: &str, user: SteamId) -> Result<(), NativeError> {
        let f = self.table.friends_activate_game_overlay_to_user.get()?;
        let dialog = c_string(dialog)?;
        unsafe { f(friends.as_ptr(), dialog.as_ptr(), user) };
        Ok(())
    }

    fn activate_game_overlay_to_web_page(&self, friends: InterfacePtr, url: &str, mode: i32) -> Result<(), NativeError> {
        let f = self.table.friends_activate_game_overlay_to_web_page.get()?;
        let url = c_string(url)?;
        unsafe { f(friends.as_ptr(), url.as_ptr(), mode) };
        Ok(())
    }

    fn activate_game_overlay_to_store(&self, friends: InterfacePtr, app_id: AppId, flag: i32) -> Result<(), NativeError> {
        let f = self.table.friends_activate_game_overlay_to_store.get()?;
        unsafe { f(friends.as_ptr(), app_id, flag) };
        Ok(())
    }

    fn activate_game_overlay_invite_dialog(&self, friends: InterfacePtr, lobby: SteamId) -> Result<(), NativeError> {
        let f = self.table.friends_activate_game_overlay_invite_dialog.get()?;
        unsafe { f(friends.as_ptr(), lobby) };
        Ok(())
    }
}
