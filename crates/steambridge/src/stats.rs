//! Stats and achievements (`ISteamUserStats`).

use std::sync::Arc;

use serde::Serialize;
use steambridge_callbacks::{CallbackResult, GenericResult, ResultShape, ids, layouts};
use steambridge_native::{
    CallHandle, CallbackId, EResult, Interface, InterfacePtr, InterfaceSlot, NativeApi, NativeError,
    SteamId,
};

use crate::shared::Shared;

/// Days of history requested by [`Stats::request_global_stats`] is capped
/// at this by Steam.
pub const MAX_GLOBAL_HISTORY_DAYS: i32 = 60;

/// Outcome of a user or global stats request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReceived {
    pub game_id: u64,
    pub result: EResult,
    /// Whose stats arrived; `None` for global stats.
    pub user: Option<SteamId>,
}

impl StatsReceived {
    fn from_generic(result: &GenericResult) -> Self {
        Self {
            game_id: result.u64("m_nGameID").unwrap_or(0),
            result: EResult(result.i32("m_eResult").unwrap_or(0)),
            user: result.u64("m_steamIDUser"),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

pub struct Stats<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> Stats<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::UserStats),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// `None` when the stat is unknown or stats have not been received.
    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.shared
            .call(&self.slot, "stats.get_int", |n, p| n.get_stat_i32(p, name))
    }

    pub fn get_float(&self, name: &str) -> Option<f32> {
        self.shared
            .call(&self.slot, "stats.get_float", |n, p| n.get_stat_f32(p, name))
    }

    /// Changes are local until [`store`](Self::store).
    pub fn set_int(&self, name: &str, value: i32) -> bool {
        self.shared
            .call(&self.slot, "stats.set_int", |n, p| n.set_stat_i32(p, name, value))
    }

    pub fn set_float(&self, name: &str, value: f32) -> bool {
        if !value.is_finite() {
            tracing::warn!(name, "refusing non-finite stat value");
            return false;
        }
        self.shared
            .call(&self.slot, "stats.set_float", |n, p| n.set_stat_f32(p, name, value))
    }

    /// Uploads pending stat and achievement changes.
    pub fn store(&self) -> bool {
        self.shared
            .call(&self.slot, "stats.store", |n, p| n.store_stats(p))
    }

    pub fn get_achievement(&self, name: &str) -> Option<bool> {
        self.shared.call(&self.slot, "stats.get_achievement", |n, p| {
            n.get_achievement(p, name)
        })
    }

    pub fn set_achievement(&self, name: &str) -> bool {
        self.shared.call(&self.slot, "stats.set_achievement", |n, p| {
            n.set_achievement(p, name)
        })
    }

    pub fn clear_achievement(&self, name: &str) -> bool {
        self.shared.call(&self.slot, "stats.clear_achievement", |n, p| {
            n.clear_achievement(p, name)
        })
    }

    pub fn achievement_count(&self) -> u32 {
        self.shared
            .call(&self.slot, "stats.achievement_count", |n, p| n.num_achievements(p))
    }

    /// API name of the achievement at `index`.
    pub fn achievement_name(&self, index: u32) -> String {
        self.shared.call(&self.slot, "stats.achievement_name", |n, p| {
            n.achievement_name(p, index)
        })
    }

    /// Resets every stat, and achievements too when asked. Meant for
    /// testing builds.
    pub fn reset_all(&self, achievements_too: bool) -> bool {
        self.shared.call(&self.slot, "stats.reset_all", |n, p| {
            n.reset_all_stats(p, achievements_too)
        })
    }

    pub async fn request_user_stats(&self, user: SteamId) -> Option<StatsReceived> {
        self.received(
            "stats.request_user_stats",
            &layouts::USER_STATS_RECEIVED,
            ids::USER_STATS_RECEIVED,
            |n, p| n.request_user_stats(p, user),
        )
        .await
    }

    /// Global stats with up to `history_days` of daily history.
    pub async fn request_global_stats(&self, history_days: i32) -> Option<StatsReceived> {
        let days = history_days.clamp(0, MAX_GLOBAL_HISTORY_DAYS);
        self.received(
            "stats.request_global_stats",
            &layouts::GLOBAL_STATS_RECEIVED,
            ids::GLOBAL_STATS_RECEIVED,
            |n, p| n.request_global_stats(p, days),
        )
        .await
    }

    async fn received(
        &self,
        op: &'static str,
        shape: &ResultShape,
        callback: CallbackId,
        start: impl FnOnce(&N, InterfacePtr) -> Result<CallHandle, NativeError>,
    ) -> Option<StatsReceived> {
        let result = self
            .shared
            .call_async(&self.slot, op, start, shape, callback, self.shared.poll)
            .await?;
        result.as_generic().map(StatsReceived::from_generic)
    }

    /// Players currently in game, `None` when Steam could not tell.
    pub async fn number_of_current_players(&self) -> Option<i32> {
        let result = self
            .shared
            .call_async(
                &self.slot,
                "stats.number_of_current_players",
                |n, p| n.number_of_current_players(p),
                &layouts::NUMBER_OF_CURRENT_PLAYERS,
                ids::NUMBER_OF_CURRENT_PLAYERS,
                self.shared.poll,
            )
            .await
            .and_then(CallbackResult::into_generic)?;
        if !result.bool("m_bSuccess").unwrap_or(false) {
            return None;
        }
        result.i32("m_cPlayers")
    }
}
