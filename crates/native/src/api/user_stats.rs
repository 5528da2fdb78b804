use crate::error::NativeError;
use crate::ffi::RawLeaderboardEntry;
use crate::library::{SteamLibrary, c_string, string_from_ptr};
use crate::types::{CallHandle, InterfacePtr, LeaderboardHandle, SteamId};

/// One entry copied out of a downloaded leaderboard range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedEntry {
    pub steam_id: SteamId,
    pub global_rank: i32,
    pub score: i32,
    pub details: Vec<i32>,
    pub ugc: u64,
}

/// `ISteamUserStats` calls (stats, achievements and leaderboards).
pub trait UserStatsApi {
    fn get_stat_i32(&self, stats: InterfacePtr, name: &str) -> Result<Option<i32>, NativeError>;
    fn get_stat_f32(&self, stats: InterfacePtr, name: &str) -> Result<Option<f32>, NativeError>;
    fn set_stat_i32(&self, stats: InterfacePtr, name: &str, value: i32) -> Result<bool, NativeError>;
    fn set_stat_f32(&self, stats: InterfacePtr, name: &str, value: f32) -> Result<bool, NativeError>;
    fn store_stats(&self, stats: InterfacePtr) -> Result<bool, NativeError>;
    fn get_achievement(&self, stats: InterfacePtr, name: &str) -> Result<Option<bool>, NativeError>;
    fn set_achievement(&self, stats: InterfacePtr, name: &str) -> Result<bool, NativeError>;
    fn clear_achievement(&self, stats: InterfacePtr, name: &str) -> Result<bool, NativeError>;
    fn num_achievements(&self, stats: InterfacePtr) -> Result<u32, NativeError>;
    fn achievement_name(&self, stats: InterfacePtr, index: u32) -> Result<String, NativeError>;
    fn reset_all_stats(&self, stats: InterfacePtr, achievements_too: bool) -> Result<bool, NativeError>;
    fn request_user_stats(&self, stats: InterfacePtr, user: SteamId) -> Result<CallHandle, NativeError>;
    fn request_global_stats(&self, stats: InterfacePtr, history_days: i32) -> Result<CallHandle, NativeError>;
    fn number_of_current_players(&self, stats: InterfacePtr) -> Result<CallHandle, NativeError>;
    fn find_leaderboard(&self, stats: InterfacePtr, name: &str) -> Result<CallHandle, NativeError>;
    fn find_or_create_leaderboard(
        &self,
        stats: InterfacePtr,
        name: &str,
        sort_method: i32,
        display_type: i32,
    ) -> Result<CallHandle, NativeError>;
    fn leaderboard_name(&self, stats: InterfacePtr, board: LeaderboardHandle) -> Result<String, NativeError>;
    fn leaderboard_entry_count(&self, stats: InterfacePtr, board: LeaderboardHandle) -> Result<i32, NativeError>;
    fn upload_leaderboard_score(
        &self,
        stats: InterfacePtr,
        board: LeaderboardHandle,
        method: i32,
        score: i32,
        details: &[i32],
    ) -> Result<CallHandle, NativeError>;
    fn download_leaderboard_entries(
        &self,
        stats: InterfacePtr,
        board: LeaderboardHandle,
        request: i32,
        range_start: i32,
        range_end: i32,
    ) -> Result<CallHandle, NativeError>;
    fn downloaded_leaderboard_entry(
        &self,
        stats: InterfacePtr,
        entries: u64,
        index: i32,
        max_details: usize,
    ) -> Result<Option<DownloadedEntry>, NativeError>;
}

impl UserStatsApi for SteamLibrary {
    fn get_stat_i32(&self, stats: InterfacePtr, name: &str) -> Result<Option<i32>, NativeError> {
        let f = self.table.stats_get_stat_i32.get()?;
        let name = c_string(name)?;
        let mut value = 0;
        let ok = unsafe { f(stats.as_ptr(), name.as_ptr(), &mut value) };
        Ok(ok.then_some(value))
    }

    fn get_stat_f32(&self, stats: InterfacePtr, name: &str) -> Result<Option<f32>, NativeError> {
        let f = self.table.stats_get_stat_f32.get()?;
        let name = c_string(name)?;
        let mut value = 0.0;
        let ok = unsafe { f(stats.as_ptr(), name.as_ptr(), &mut value) };
        Ok(ok.then_some(value))
    }

    fn set_stat_i32(&self, stats: InterfacePtr, name: &str, value: i32) -> Result<bool, NativeError> {
        let f = self.table.stats_set_stat_i32.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(stats.as_ptr(), name.as_ptr(), value) })
    }

    fn set_stat_f32(&self, stats: InterfacePtr, name: &str, value: f32) -> Result<bool, NativeError> {
        let f = self.table.stats_set_stat_f32.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(stats.as_ptr(), name.as_ptr(), value) })
    }

    fn store_stats(&self, stats: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.stats_store_stats.get()?;
        Ok(unsafe { f(stats.as_ptr()) })
    }

    fn get_achievement(&self, stats: InterfacePtr, name: &str) -> Result<Option<bool>, NativeError> {
        let f = self.table.stats_get_achievement.get()?;
        let name = c_string(name)?;
        let mut achieved = false;
        let ok = unsafe { f(stats.as_ptr(), name.as_ptr(), &mut achieved) };
        Ok(ok.then_some(achieved))
    }

    fn set_achievement(&self, stats: InterfacePtr, name: &str) -> Result<bool, NativeError> {
        let f = self.table.stats_set_achievement.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(stats.as_ptr(), name.as_ptr()) })
    }

    fn clear_achievement(&self, stats: InterfacePtr, name: &str) -> Result<bool, NativeError> {
        let f = self.table.stats_clear_achievement.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(stats.as_ptr(), name.as_ptr()) })
    }

    fn num_achievements(&self, stats: InterfacePtr) -> Result<u32, NativeError> {
        let f = self.table.stats_num_achievements.get()?;
        Ok(unsafe { f(stats.as_ptr()) })
    }

    fn achievement_name(&self, stats: InterfacePtr, index: u32) -> Result<String, NativeError> {
        let f = self.table.stats_achievement_name.get()?;
        Ok(unsafe { string_from_ptr(f(stats.as_ptr(), index)) })
    }

    fn reset_all_stats(&self, stats: InterfacePtr, achievements_too: bool) -> Result<bool, NativeError> {
        let f = self.table.stats_reset_all_stats.get()?;
        Ok(unsafe { f(stats.as_ptr(), achievements_too) })
    }

    fn request_user_stats(&self, stats: InterfacePtr, user: SteamId) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_request_user_stats.get()?;
        Ok(CallHandle(unsafe { f(stats.as_ptr(), user) }))
    }

    fn request_global_stats(&self, stats: InterfacePtr, history_days: i32) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_request_global_stats.get()?;
        Ok(CallHandle(unsafe { f(stats.as_ptr(), history_days) }))
    }

    fn number_of_current_players(&self, stats: InterfacePtr) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_number_of_current_players.get()?;
        Ok(CallHandle(unsafe { f(stats.as_ptr()) }))
    }

    fn find_leaderboard(&self, stats: InterfacePtr, name: &str) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_find_leaderboard.get()?;
        let name = c_string(name)?;
        Ok(CallHandle(unsafe { f(stats.as_ptr(), name.as_ptr()) }))
    }

    fn find_or_create_leaderboard(
        &self,
        stats: InterfacePtr,
        name: &str,
        sort_method: i32,
        display_type: i32,
    ) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_find_or_create_leaderboard.get()?;
        let name = c_string(name)?;
        Ok(CallHandle(unsafe {
            f(stats.as_ptr(), name.as_ptr(), sort_method, display_type)
        }))
    }

    fn leaderboard_name(&self, stats: InterfacePtr, board: LeaderboardHandle) -> Result<String, NativeError> {
        let f = self.table.stats_leaderboard_name.get()?;
        Ok(unsafe { string_from_ptr(f(stats.as_ptr(), board)) })
    }

    fn leaderboard_entry_count(&self, stats: InterfacePtr, board: LeaderboardHandle) -> Result<i32, NativeError> {
        let f = self.table.stats_leaderboard_entry_count.get()?;
        Ok(unsafe { f(stats.as_ptr(), board) })
    }

    fn upload_leaderboard_score(
        &self,
        stats: InterfacePtr,
        board: LeaderboardHandle,
        method: i32,
        score: i32,
        details: &[i32],
    ) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_upload_leaderboard_score.get()?;
        let count = i32::try_from(details.len())
            .map_err(|_| NativeError::InvalidArgument(format!("too many score details: {}", details.len())))?;
        let ptr = if details.is_empty() {
            std::ptr::null()
        } else {
            details.as_ptr()
        };
        Ok(CallHandle(unsafe {
            f(stats.as_ptr(), board, method, score, ptr, count)
        }))
    }

    fn download_leaderboard_entries(
        &self,
        stats: InterfacePtr,
        board: LeaderboardHandle,
        request: i32,
        range_start: i32,
        range_end: i32,
    ) -> Result<CallHandle, NativeError> {
        let f = self.table.stats_download_leaderboard_entries.get()?;
        Ok(CallHandle(unsafe {
            f(stats.as_ptr(), board, request, range_start, range_end)
        }))
    }

    fn downloaded_leaderboard_entry(
        &self,
        stats: InterfacePtr,
        entries: u64,
        index: i32,
        max_details: usize,
    ) -> Result<Option<DownloadedEntry>, NativeError> {
        let f = self.table.stats_downloaded_leaderboard_entry.get()?;
        let mut raw = RawLeaderboardEntry::default();
        let mut details = vec![0i32; max_details];
        let ok = unsafe {
            f(
                stats.as_ptr(),
                entries,
                index,
                &mut raw,
                details.as_mut_ptr(),
                max_details as i32,
            )
        };
        if !ok {
            return Ok(None);
        }
        details.truncate((raw.details.max(0) as usize).min(max_details));
        Ok(Some(DownloadedEntry {
            steam_id: raw.steam_id_user,
            global_rank: raw.global_rank,
            score: raw.score,
            details,
            ugc: raw.ugc,
        }))
    }
}
