//! Current user, auth tickets and account checks (`ISteamUser`).

use std::sync::Arc;

use serde::Serialize;
use steambridge_callbacks::{CallbackResult, GenericResult, ids, layouts};
use steambridge_native::api::AuthTicket;
use steambridge_native::{AppId, EResult, Interface, InterfaceSlot, NativeApi, SteamId};

use crate::shared::Shared;

/// Upper bound on data embedded in an encrypted app ticket.
pub const MAX_TICKET_USER_DATA: usize = 1024;

/// `MarketEligibilityResponse_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketEligibility {
    pub allowed: bool,
    /// `EMarketNotAllowedReasonFlags`.
    pub not_allowed_reason: i32,
    /// When the user becomes eligible, Unix seconds.
    pub allowed_at_time: u32,
    pub steam_guard_required_days: i32,
    pub new_device_cooldown_days: i32,
}

impl MarketEligibility {
    fn from_generic(result: &GenericResult) -> Self {
        Self {
            allowed: result.bool("m_bAllowed").unwrap_or(false),
            not_allowed_reason: result.i32("m_eNotAllowedReason").unwrap_or(0),
            allowed_at_time: result.u32("m_rtAllowedAtTime").unwrap_or(0),
            steam_guard_required_days: result.i32("m_cdaySteamGuardRequiredDays").unwrap_or(0),
            new_device_cooldown_days: result.i32("m_cdayNewDeviceCooldown").unwrap_or(0),
        }
    }
}

/// `DurationControl_t`: playtime limits for the current account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationControl {
    pub result: EResult,
    pub app_id: AppId,
    pub applicable: bool,
    pub seconds_last_5h: i32,
    /// `EDurationControlProgress`.
    pub progress: i32,
    /// `EDurationControlNotification`.
    pub notification: i32,
    pub seconds_today: i32,
    pub seconds_remaining: i32,
}

impl DurationControl {
    fn from_generic(result: &GenericResult) -> Self {
        Self {
            result: EResult(result.i32("m_eResult").unwrap_or(0)),
            app_id: result.u32("m_appid").unwrap_or(0),
            applicable: result.bool("m_bApplicable").unwrap_or(false),
            seconds_last_5h: result.i32("m_csecsLast5h").unwrap_or(0),
            progress: result.i32("m_progress").unwrap_or(0),
            notification: result.i32("m_notification").unwrap_or(0),
            seconds_today: result.i32("m_csecsToday").unwrap_or(0),
            seconds_remaining: result.i32("m_csecsRemaining").unwrap_or(0),
        }
    }
}

pub struct User<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
}

impl<N: NativeApi> User<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::User),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    pub fn steam_id(&self) -> SteamId {
        self.shared
            .call(&self.slot, "user.steam_id", |n, p| n.steam_id(p))
    }

    pub fn is_logged_on(&self) -> bool {
        self.shared
            .call(&self.slot, "user.is_logged_on", |n, p| n.logged_on(p))
    }

    pub fn level(&self) -> i32 {
        self.shared
            .call(&self.slot, "user.level", |n, p| n.player_steam_level(p))
    }

    /// A session ticket for server-side verification. Cancel it with
    /// [`cancel_auth_ticket`](Self::cancel_auth_ticket) once the session
    /// ends.
    pub fn auth_session_ticket(&self) -> Option<AuthTicket> {
        self.shared
            .call(&self.slot, "user.auth_session_ticket", |n, p| {
                n.auth_session_ticket(p)
            })
    }

    pub fn cancel_auth_ticket(&self, handle: u32) -> bool {
        if handle == 0 {
            return false;
        }
        self.shared.call(&self.slot, "user.cancel_auth_ticket", |n, p| {
            n.cancel_auth_ticket(p, handle).map(|()| true)
        })
    }

    /// Requests an encrypted app ticket carrying `data` and returns the
    /// ticket bytes once Steam issued it.
    pub async fn request_encrypted_app_ticket(&self, data: &[u8]) -> Option<Vec<u8>> {
        if data.len() > MAX_TICKET_USER_DATA {
            tracing::warn!(len = data.len(), "encrypted ticket user data too large");
            return None;
        }
        let response = self
            .shared
            .call_async(
                &self.slot,
                "user.request_encrypted_app_ticket",
                |n, p| n.request_encrypted_app_ticket(p, data),
                &layouts::ENCRYPTED_APP_TICKET_RESPONSE,
                ids::ENCRYPTED_APP_TICKET_RESPONSE,
                self.shared.poll,
            )
            .await
            .and_then(CallbackResult::into_generic)?;
        let result = EResult(response.i32("m_eResult").unwrap_or(0));
        if !result.is_ok() {
            tracing::warn!(%result, "encrypted app ticket refused");
            return None;
        }
        self.shared
            .call(&self.slot, "user.encrypted_app_ticket", |n, p| {
                n.encrypted_app_ticket(p)
            })
    }

    /// A URL that logs the user into the Steam store in a browser, then
    /// redirects to `redirect_url`.
    pub async fn request_store_auth_url(&self, redirect_url: &str) -> Option<String> {
        let response = self
            .shared
            .call_async(
                &self.slot,
                "user.request_store_auth_url",
                |n, p| n.request_store_auth_url(p, redirect_url),
                &layouts::STORE_AUTH_URL_RESPONSE,
                ids::STORE_AUTH_URL_RESPONSE,
                self.shared.poll,
            )
            .await
            .and_then(CallbackResult::into_generic)?;
        response
            .str("m_szURL")
            .filter(|url| !url.is_empty())
            .map(str::to_string)
    }

    pub async fn market_eligibility(&self) -> Option<MarketEligibility> {
        let response = self
            .shared
            .call_async(
                &self.slot,
                "user.market_eligibility",
                |n, p| n.market_eligibility(p),
                &layouts::MARKET_ELIGIBILITY_RESPONSE,
                ids::MARKET_ELIGIBILITY_RESPONSE,
                self.shared.poll,
            )
            .await?;
        response.as_generic().map(MarketEligibility::from_generic)
    }

    pub async fn duration_control(&self) -> Option<DurationControl> {
        let response = self
            .shared
            .call_async(
                &self.slot,
                "user.duration_control",
                |n, p| n.duration_control(p),
                &layouts::DURATION_CONTROL,
                ids::DURATION_CONTROL,
                self.shared.poll,
            )
            .await?;
        response.as_generic().map(DurationControl::from_generic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{self, FAKE_APP_ID, FAKE_STEAM_ID, Payload};

    #[tokio::test(start_paused = true)]
    async fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let user = User::new(shared);

        assert_eq!(user.steam_id(), 0);
        assert!(!user.is_logged_on());
        assert_eq!(user.level(), 0);
        assert_eq!(user.auth_session_ticket(), None);
        assert!(!user.cancel_auth_ticket(7));
        assert_eq!(user.request_encrypted_app_ticket(b"hi").await, None);
        assert_eq!(user.request_store_auth_url("https://example.com").await, None);
        assert_eq!(user.market_eligibility().await, None);
        assert_eq!(user.duration_control().await, None);
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn identity_and_session_ticket() {
        let (fake, shared) = testing::shared(true);
        let user = User::new(shared);

        assert_eq!(user.steam_id(), FAKE_STEAM_ID);
        assert!(user.is_logged_on());
        assert_eq!(user.level(), 12);
        let ticket = user.auth_session_ticket().unwrap();
        assert_eq!(ticket.ticket, vec![0xCA, 0xFE]);
        assert!(user.cancel_auth_ticket(ticket.handle));
        assert!(!user.cancel_auth_ticket(0));
        assert_eq!(fake.count("cancel_auth_ticket"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn encrypted_ticket_fetched_after_ok() {
        let (fake, shared) = testing::shared(true);
        fake.script(
            ids::ENCRYPTED_APP_TICKET_RESPONSE,
            Payload::zeroed(4).i32(0, 1).build(),
        );
        let user = User::new(shared);

        assert_eq!(
            user.request_encrypted_app_ticket(b"nonce").await,
            Some(vec![1, 2, 3, 4])
        );
        assert_eq!(fake.count("encrypted_app_ticket"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn refused_encrypted_ticket_is_not_fetched() {
        let (fake, shared) = testing::shared(true);
        fake.script(
            ids::ENCRYPTED_APP_TICKET_RESPONSE,
            Payload::zeroed(4).i32(0, EResult::LIMIT_EXCEEDED.0).build(),
        );
        let user = User::new(shared);

        assert_eq!(user.request_encrypted_app_ticket(b"nonce").await, None);
        assert_eq!(fake.count("encrypted_app_ticket"), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn store_auth_url() {
        let (fake, shared) = testing::shared(true);
        let url = b"https://store.steampowered.com/login/?token=abc";
        fake.script(
            ids::STORE_AUTH_URL_RESPONSE,
            Payload::zeroed(512).bytes(0, url).build(),
        );
        let user = User::new(shared);

        assert_eq!(
            user.request_store_auth_url("https://example.com").await.as_deref(),
            Some("https://store.steampowered.com/login/?token=abc")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn market_eligibility_fields() {
        let (fake, shared) = testing::shared(true);
        fake.script(
            ids::MARKET_ELIGIBILITY_RESPONSE,
            Payload::zeroed(20)
                .u8(0, 0)
                .i32(4, 0x4)
                .u32(8, 1_700_000_000)
                .i32(12, 15)
                .i32(16, 7)
                .build(),
        );
        let user = User::new(shared);

        let eligibility = user.market_eligibility().await.unwrap();
        assert!(!eligibility.allowed);
        assert_eq!(eligibility.not_allowed_reason, 4);
        assert_eq!(eligibility.allowed_at_time, 1_700_000_000);
        assert_eq!(eligibility.steam_guard_required_days, 15);
        assert_eq!(eligibility.new_device_cooldown_days, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn duration_control_fields() {
        let (fake, shared) = testing::shared(true);
        fake.script(
            ids::DURATION_CONTROL,
            Payload::zeroed(32)
                .i32(0, 1)
                .u32(4, FAKE_APP_ID)
                .u8(8, 1)
                .i32(12, 3600)
                .i32(16, 1)
                .i32(20, 2)
                .i32(24, 7200)
                .i32(28, 600)
                .build(),
        );
        let user = User::new(shared);

        let control = user.duration_control().await.unwrap();
        assert!(control.result.is_ok());
        assert_eq!(control.app_id, FAKE_APP_ID);
        assert!(control.applicable);
        assert_eq!(control.seconds_last_5h, 3600);
        assert_eq!(control.seconds_today, 7200);
        assert_eq!(control.seconds_remaining, 600);
    }
}
