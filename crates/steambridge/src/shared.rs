//! State shared by the client and every manager.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use steambridge_callbacks::{CallbackResult, PollOptions, Poller, ResultShape};
use steambridge_native::{CallHandle, CallbackId, InterfacePtr, InterfaceSlot, NativeApi, NativeError};

pub(crate) struct Shared<N: NativeApi> {
    pub(crate) native: Arc<N>,
    pub(crate) poller: Poller<N>,
    pub(crate) poll: PollOptions,
    initialized: AtomicBool,
}

impl<N: NativeApi> Shared<N> {
    pub(crate) fn new(native: Arc<N>, poll: PollOptions) -> Self {
        Self {
            poller: Poller::new(Arc::clone(&native)),
            native,
            poll,
            initialized: AtomicBool::new(false),
        }
    }

    pub(crate) fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Returns the previous value.
    pub(crate) fn set_initialized(&self, value: bool) -> bool {
        self.initialized.swap(value, Ordering::AcqRel)
    }

    /// Checks that the SDK is up and `slot`'s interface can be fetched.
    pub(crate) fn gate(&self, slot: &InterfaceSlot, op: &'static str) -> Option<InterfacePtr> {
        if !self.is_initialized() {
            tracing::warn!(op, "steam API not initialized");
            return None;
        }
        let iface = slot.get_or_fetch(&*self.native);
        if iface.is_none() {
            tracing::warn!(op, interface = %slot.kind(), "interface unavailable");
        }
        iface
    }

    /// Like [`gate`](Self::gate) but reports why as an error.
    pub(crate) fn require(&self, slot: &InterfaceSlot) -> Result<InterfacePtr, NativeError> {
        if !self.is_initialized() {
            return Err(NativeError::NotInitialized);
        }
        slot.get_or_fetch(&*self.native)
            .ok_or(NativeError::InterfaceUnavailable(slot.kind()))
    }

    /// Runs one native call behind the gate. Unavailability and native
    /// errors both yield `T::default()`.
    pub(crate) fn call<T, F>(&self, slot: &InterfaceSlot, op: &'static str, f: F) -> T
    where
        T: Default,
        F: FnOnce(&N, InterfacePtr) -> Result<T, NativeError>,
    {
        let Some(iface) = self.gate(slot, op) else {
            return T::default();
        };
        match f(&self.native, iface) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(op, "native call failed: {e}");
                T::default()
            }
        }
    }

    /// Starts an async native call behind the gate and polls it.
    pub(crate) async fn call_async<F>(
        &self,
        slot: &InterfaceSlot,
        op: &'static str,
        start: F,
        shape: &ResultShape,
        callback: CallbackId,
        options: PollOptions,
    ) -> Option<CallbackResult>
    where
        F: FnOnce(&N, InterfacePtr) -> Result<CallHandle, NativeError>,
    {
        let iface = self.gate(slot, op)?;
        let call = match start(&self.native, iface) {
            Ok(call) => call,
            Err(e) => {
                tracing::error!(op, "native call failed: {e}");
                return None;
            }
        };
        if !call.is_valid() {
            tracing::error!(op, %callback, "native call returned an invalid handle");
            return None;
        }
        tracing::debug!(op, %call, %callback, "polling call result");
        self.poller.poll(call, shape, callback, options).await
    }
}
