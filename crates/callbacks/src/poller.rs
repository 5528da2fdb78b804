//! Completion poller for asynchronous native calls.
//!
//! The native layer only advances call state when its callback queue is
//! pumped, so each poll iteration waits, pumps once, then asks whether the
//! call has completed. Pumping is global: one poller's pump can complete
//! another caller's pending call, which is expected.

use std::sync::{Arc, Mutex, PoisonError, TryLockError};
use std::time::Duration;

use steambridge_native::{
    CallHandle, CallResultApi, CallbackId, Interface, InterfaceSlot, SteamCore,
};

use crate::decode::{CallbackResult, decode};
use crate::shape::ResultShape;

/// Default number of completion checks.
pub const DEFAULT_MAX_RETRIES: u32 = 50;

/// Default wait before each completion check.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_millis(100);

/// Completion checks allowed for item creation, which waits on a
/// Workshop round trip.
pub const ITEM_CREATION_MAX_RETRIES: u32 = 300;

/// Retry budget for one poll. Worst-case wait is
/// `max_retries * retry_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollOptions {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

impl PollOptions {
    pub fn new(max_retries: u32, retry_delay: Duration) -> Self {
        Self {
            max_retries,
            retry_delay,
        }
    }

    /// 300 x 100 ms.
    pub fn item_creation() -> Self {
        Self {
            max_retries: ITEM_CREATION_MAX_RETRIES,
            ..Self::default()
        }
    }

    /// Same delay with a different retry count.
    pub fn with_max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    pub fn budget(&self) -> Duration {
        self.retry_delay.saturating_mul(self.max_retries)
    }
}

/// Collects call results through `ISteamUtils`.
pub struct Poller<N: ?Sized> {
    native: Arc<N>,
    utils: InterfaceSlot,
    // Serialises pump + completion check across concurrent polls.
    pump: Mutex<()>,
}

impl<N> Poller<N>
where
    N: SteamCore + CallResultApi + ?Sized,
{
    pub fn new(native: Arc<N>) -> Self {
        Self {
            native,
            utils: InterfaceSlot::new(Interface::Utils),
            pump: Mutex::new(()),
        }
    }

    pub fn native(&self) -> &Arc<N> {
        &self.native
    }

    /// Forgets the cached utils interface after an SDK shutdown.
    pub fn reset(&self) {
        self.utils.reset();
    }

    /// Pumps the native callback queue once.
    ///
    /// Skipped when a pump is already running, which is also the case when
    /// called from inside a native callback dispatched by that pump.
    pub fn pump(&self) {
        let _guard = match self.pump.try_lock() {
            Ok(guard) => guard,
            Err(TryLockError::Poisoned(e)) => e.into_inner(),
            Err(TryLockError::WouldBlock) => {
                tracing::debug!("pump already running, skipped");
                return;
            }
        };
        self.native.run_callbacks();
    }

    /// Waits for `call` to complete and decodes its result.
    ///
    /// Returns `None` when the utils interface is unavailable, the call
    /// failed, the result could not be fetched or decoded, or no completion
    /// was seen within `options.max_retries` checks.
    pub async fn poll(
        &self,
        call: CallHandle,
        shape: &ResultShape,
        callback: CallbackId,
        options: PollOptions,
    ) -> Option<CallbackResult> {
        if !call.is_valid() {
            tracing::warn!(%call, %callback, "refusing to poll an invalid call handle");
            return None;
        }
        let Some(utils) = self.utils.get_or_fetch(&*self.native) else {
            tracing::warn!(interface = %Interface::Utils, %call, "interface unavailable, cannot poll");
            return None;
        };

        for attempt in 1..=options.max_retries {
            tokio::time::sleep(options.retry_delay).await;

            let status = {
                let _guard = self.pump.lock().unwrap_or_else(PoisonError::into_inner);
                self.native.run_callbacks();
                self.native.is_api_call_completed(utils, call)
            };
            let status = match status {
                Ok(status) => status,
                Err(e) => {
                    tracing::error!(%call, %callback, "completion check failed: {e}");
                    return None;
                }
            };
            if !status.completed {
                continue;
            }

            let mut buf = vec![0u8; shape.size];
            let fetched = self
                .native
                .get_api_call_result(utils, call, &mut buf, callback);
            return match fetched {
                Ok(fetch) if fetch.fetched && !fetch.failed => {
                    match decode(callback, shape, &buf) {
                        Ok(result) => {
                            tracing::debug!(%call, %callback, attempts = attempt, shape = shape.name, "call result ready");
                            Some(result)
                        }
                        Err(e) => {
                            tracing::error!(%call, %callback, "failed to decode call result: {e}");
                            None
                        }
                    }
                }
                Ok(_) => {
                    let reason = match self.native.get_api_call_failure_reason(utils, call) {
                        Ok(failure) => failure.to_string(),
                        Err(e) => e.to_string(),
                    };
                    tracing::warn!(%call, %callback, attempts = attempt, %reason, "call result failed");
                    None
                }
                Err(e) => {
                    tracing::error!(%call, %callback, "result fetch failed: {e}");
                    None
                }
            };
        }

        tracing::warn!(
            %call,
            %callback,
            attempts = options.max_retries,
            budget = ?options.budget(),
            "call result timed out"
        );
        None
    }
}
