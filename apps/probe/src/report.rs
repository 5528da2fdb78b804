//! Status report gathered from an initialised client.

use serde::Serialize;
use steambridge::friends::{FRIEND_FLAG_IMMEDIATE, PersonaState};
use steambridge::leaderboards::{DataRequest, LeaderboardEntry};
use steambridge::{AppId, Client, NativeApi, SteamId};

/// Entries sampled from the configured leaderboard.
const LEADERBOARD_SAMPLE: i32 = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub app_id: AppId,
    pub build_id: i32,
    pub steam_id: SteamId,
    pub logged_on: bool,
    pub persona_name: String,
    pub persona_state: PersonaState,
    pub steam_level: i32,
    pub friend_count: i32,
    pub game_language: String,
    pub available_languages: Vec<String>,
    pub ui_language: String,
    pub ip_country: String,
    pub steam_deck: bool,
    pub battery_power: u8,
    pub overlay_enabled: bool,
    pub current_players: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leaderboard: Option<LeaderboardReport>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardReport {
    pub name: String,
    pub found: bool,
    pub entry_count: i32,
    pub top: Vec<LeaderboardEntry>,
}

pub async fn collect<N: NativeApi>(client: &Client<N>, leaderboard: Option<&str>) -> Report {
    let current_players = client.stats().number_of_current_players().await;
    let leaderboard = match leaderboard {
        Some(name) => Some(sample_leaderboard(client, name).await),
        None => None,
    };

    Report {
        app_id: client.utils().app_id(),
        build_id: client.apps().build_id(),
        steam_id: client.user().steam_id(),
        logged_on: client.user().is_logged_on(),
        persona_name: client.friends().persona_name(),
        persona_state: client.friends().persona_state(),
        steam_level: client.user().level(),
        friend_count: client.friends().friend_count(FRIEND_FLAG_IMMEDIATE),
        game_language: client.apps().current_game_language(),
        available_languages: client.apps().available_game_languages(),
        ui_language: client.utils().ui_language(),
        ip_country: client.utils().ip_country(),
        steam_deck: client.utils().is_steam_running_on_steam_deck(),
        battery_power: client.utils().battery_power(),
        overlay_enabled: client.overlay().is_enabled(),
        current_players,
        leaderboard,
    }
}

async fn sample_leaderboard<N: NativeApi>(client: &Client<N>, name: &str) -> LeaderboardReport {
    let boards = client.leaderboards();
    let Some(handle) = boards.find(name).await else {
        tracing::warn!(name, "leaderboard not found");
        return LeaderboardReport {
            name: name.to_string(),
            found: false,
            entry_count: 0,
            top: Vec::new(),
        };
    };
    LeaderboardReport {
        name: boards.name(handle),
        found: true,
        entry_count: boards.entry_count(handle),
        top: boards
            .download_scores(handle, DataRequest::Global, 1, LEADERBOARD_SAMPLE)
            .await,
    }
}
