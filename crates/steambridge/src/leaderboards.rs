//! Leaderboards (`ISteamUserStats`).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use steambridge_callbacks::{CallbackResult, GenericResult, ids, layouts};
use steambridge_native::{Interface, InterfaceSlot, LeaderboardHandle, NativeApi, SteamId};

use crate::shared::Shared;

/// `k_cchLeaderboardNameMax`, terminator included.
pub const MAX_NAME_LENGTH: usize = 128;
/// `k_cLeaderboardDetailsMax`.
pub const MAX_DETAILS: usize = 64;

/// `ELeaderboardSortMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    Ascending,
    #[default]
    Descending,
}

/// `ELeaderboardDisplayType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayType {
    #[default]
    Numeric,
    TimeSeconds,
    TimeMilliseconds,
}

/// `ELeaderboardUploadScoreMethod`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMethod {
    /// Keeps the user's best score.
    #[default]
    KeepBest,
    ForceUpdate,
}

/// `ELeaderboardDataRequest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataRequest {
    /// Ranks `start..=end` of the global board.
    #[default]
    Global,
    /// Ranks relative to the current user, e.g. `-4..=5`.
    GlobalAroundUser,
    Friends,
}

impl SortMethod {
    fn code(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => 2,
        }
    }
}

impl DisplayType {
    fn code(self) -> i32 {
        match self {
            Self::Numeric => 1,
            Self::TimeSeconds => 2,
            Self::TimeMilliseconds => 3,
        }
    }
}

impl UploadMethod {
    fn code(self) -> i32 {
        match self {
            Self::KeepBest => 1,
            Self::ForceUpdate => 2,
        }
    }
}

impl DataRequest {
    fn code(self) -> i32 {
        match self {
            Self::Global => 0,
            Self::GlobalAroundUser => 1,
            Self::Friends => 2,
        }
    }
}

/// Outcome of [`Leaderboards::upload_score`] (`LeaderboardScoreUploaded_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreUploaded {
    pub success: bool,
    pub leaderboard: LeaderboardHandle,
    pub score: i32,
    pub score_changed: bool,
    pub global_rank_new: i32,
    pub global_rank_previous: i32,
}

impl ScoreUploaded {
    fn from_generic(result: &GenericResult) -> Self {
        Self {
            success: result.bool("m_bSuccess").unwrap_or(false),
            leaderboard: result.u64("m_hSteamLeaderboard").unwrap_or(0),
            score: result.i32("m_nScore").unwrap_or(0),
            score_changed: result.bool("m_bScoreChanged").unwrap_or(false),
            global_rank_new: result.i32("m_nGlobalRankNew").unwrap_or(0),
            global_rank_previous: result.i32("m_nGlobalRankPrevious").unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub steam_id: SteamId,
    pub global_rank: i32,
    pub score: i32,
    pub details: Vec<i32>,
    /// Attached UGC handle, zero when none.
    pub ugc: u64,
}

pub struct Leaderboards<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
    handles: Mutex<HashMap<String, LeaderboardHandle>>,
}

impl<N: NativeApi> Leaderboards<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::UserStats),
            handles: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    pub(crate) fn clear_handles(&self) {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn cached(&self, name: &str) -> Option<LeaderboardHandle> {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied()
    }

    fn remember(&self, name: &str, handle: LeaderboardHandle) {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string(), handle);
    }

    fn valid_name(name: &str) -> bool {
        if name.is_empty() || name.len() >= MAX_NAME_LENGTH {
            tracing::warn!(name, "leaderboard name empty or too long");
            return false;
        }
        true
    }

    /// Looks up an existing board. Found handles are remembered by name.
    pub async fn find(&self, name: &str) -> Option<LeaderboardHandle> {
        if !Self::valid_name(name) {
            return None;
        }
        if self.shared.is_initialized() {
            if let Some(handle) = self.cached(name) {
                return Some(handle);
            }
        }
        let result = self
            .shared
            .call_async(
                &self.slot,
                "leaderboards.find",
                |n, p| n.find_leaderboard(p, name),
                &layouts::LEADERBOARD_FIND_RESULT,
                ids::LEADERBOARD_FIND_RESULT,
                self.shared.poll,
            )
            .await;
        let handle = Self::found_handle(result)?;
        self.remember(name, handle);
        Some(handle)
    }

    /// Looks up a board, creating it with the given sort and display type
    /// when it does not exist yet.
    pub async fn find_or_create(
        &self,
        name: &str,
        sort: SortMethod,
        display: DisplayType,
    ) -> Option<LeaderboardHandle> {
        if !Self::valid_name(name) {
            return None;
        }
        let result = self
            .shared
            .call_async(
                &self.slot,
                "leaderboards.find_or_create",
                |n, p| n.find_or_create_leaderboard(p, name, sort.code(), display.code()),
                &layouts::LEADERBOARD_FIND_RESULT,
                ids::LEADERBOARD_FIND_RESULT,
                self.shared.poll,
            )
            .await;
        let handle = Self::found_handle(result)?;
        self.remember(name, handle);
        Some(handle)
    }

    fn found_handle(result: Option<CallbackResult>) -> Option<LeaderboardHandle> {
        let result = result?.into_generic()?;
        let handle = result.u64("m_hSteamLeaderboard").unwrap_or(0);
        let found = result.bool("m_bLeaderboardFound").unwrap_or(false);
        (found && handle != 0).then_some(handle)
    }

    pub fn name(&self, board: LeaderboardHandle) -> String {
        self.shared.call(&self.slot, "leaderboards.name", |n, p| {
            n.leaderboard_name(p, board)
        })
    }

    pub fn entry_count(&self, board: LeaderboardHandle) -> i32 {
        self.shared.call(&self.slot, "leaderboards.entry_count", |n, p| {
            n.leaderboard_entry_count(p, board)
        })
    }

    /// Uploads `score` with up to [`MAX_DETAILS`] detail values.
    pub async fn upload_score(
        &self,
        board: LeaderboardHandle,
        method: UploadMethod,
        score: i32,
        details: &[i32],
    ) -> Option<ScoreUploaded> {
        if details.len() > MAX_DETAILS {
            tracing::warn!(board, details = details.len(), "too many score details");
            return None;
        }
        let result = self
            .shared
            .call_async(
                &self.slot,
                "leaderboards.upload_score",
                |n, p| n.upload_leaderboard_score(p, board, method.code(), score, details),
                &layouts::LEADERBOARD_SCORE_UPLOADED,
                ids::LEADERBOARD_SCORE_UPLOADED,
                self.shared.poll,
            )
            .await?;
        result.as_generic().map(ScoreUploaded::from_generic)
    }

    /// Downloads a range of entries. Ranges are inclusive and 1-based for
    /// [`DataRequest::Global`].
    pub async fn download_scores(
        &self,
        board: LeaderboardHandle,
        request: DataRequest,
        range_start: i32,
        range_end: i32,
    ) -> Vec<LeaderboardEntry> {
        let result = self
            .shared
            .call_async(
                &self.slot,
                "leaderboards.download_scores",
                |n, p| n.download_leaderboard_entries(p, board, request.code(), range_start, range_end),
                &layouts::LEADERBOARD_SCORES_DOWNLOADED,
                ids::LEADERBOARD_SCORES_DOWNLOADED,
                self.shared.poll,
            )
            .await;
        let Some(downloaded) = result.and_then(CallbackResult::into_generic) else {
            return Vec::new();
        };
        let entries = downloaded.u64("m_hSteamLeaderboardEntries").unwrap_or(0);
        let count = downloaded.i32("m_cEntryCount").unwrap_or(0);
        if entries == 0 || count <= 0 {
            return Vec::new();
        }

        self.shared.call(&self.slot, "leaderboards.download_scores", |n, p| {
            let mut out = Vec::with_capacity(count as usize);
            for index in 0..count {
                let Some(entry) = n.downloaded_leaderboard_entry(p, entries, index, MAX_DETAILS)? else {
                    tracing::debug!(board, index, "leaderboard entry unavailable");
                    continue;
                };
                out.push(LeaderboardEntry {
                    steam_id: entry.steam_id,
                    global_rank: entry.global_rank,
                    score: entry.score,
                    details: entry.details,
                    ugc: entry.ugc,
                });
            }
            Ok(out)
        })
    }
}
