//! P2P connections over Steam Datagram Relay (`ISteamNetworkingSockets`).
//!
//! The native status-changed hook is a bare function pointer with no user
//! data, so the handler lives in one process-wide slot. The manager that
//! registers it owns the slot until it unregisters; a second registration
//! fails instead of replacing the first.

use std::ffi::c_void;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use steambridge_callbacks::decode_connection_status;
use steambridge_callbacks::layouts::connection_status_changed;
use steambridge_native::api::{INVALID_CONNECTION, ReceivedMessage};
use steambridge_native::ffi::ConnectionStatusFn;
use steambridge_native::{Interface, InterfaceSlot, NativeApi, NativeError, SteamId};

pub use steambridge_callbacks::{ConnectionState, ConnectionStatusChanged};
pub use steambridge_native::api::MAX_RECEIVE_BATCH;

use crate::shared::Shared;

pub type ConnectionHandle = u32;
pub type ListenSocket = u32;

/// `k_nSteamNetworkingSend_*` flags.
pub mod send_flags {
    pub const UNRELIABLE: i32 = 0;
    pub const NO_NAGLE: i32 = 1;
    pub const UNRELIABLE_NO_NAGLE: i32 = UNRELIABLE | NO_NAGLE;
    pub const NO_DELAY: i32 = 4;
    pub const RELIABLE: i32 = 8;
    pub const RELIABLE_NO_NAGLE: i32 = RELIABLE | NO_NAGLE;
}

/// `k_ESteamNetConnectionEnd_App_Generic`.
pub const END_REASON_APP_GENERIC: i32 = 1000;

/// Largest single message Steam accepts (`k_cbMaxSteamNetworkingSocketsMessageSizeSend`).
pub const MAX_MESSAGE_SIZE: usize = 512 * 1024;

type StatusHandler = Arc<dyn Fn(ConnectionStatusChanged) + Send + Sync>;

struct Registration {
    owner: usize,
    handler: StatusHandler,
}

static STATUS_SLOT: Mutex<Option<Registration>> = Mutex::new(None);
static NEXT_OWNER: AtomicUsize = AtomicUsize::new(1);

/// Called by Steam from inside `SteamAPI_RunCallbacks`.
unsafe extern "C" fn status_trampoline(info: *mut c_void) {
    if info.is_null() {
        return;
    }
    // SAFETY: Steam passes a live SteamNetConnectionStatusChangedCallback_t,
    // valid for the duration of this call.
    let raw = unsafe {
        std::slice::from_raw_parts(info.cast::<u8>().cast_const(), connection_status_changed::SIZE)
    };
    let event = decode_connection_status(raw);

    let handler = STATUS_SLOT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .as_ref()
        .map(|r| Arc::clone(&r.handler));
    let Some(handler) = handler else {
        tracing::debug!(conn = event.conn, "connection status change with no handler");
        return;
    };
    // Unwinding across the native frame is undefined behaviour.
    if catch_unwind(AssertUnwindSafe(|| handler(event))).is_err() {
        tracing::error!("connection status handler panicked");
    }
}

pub struct Networking<N: NativeApi> {
    shared: Arc<Shared<N>>,
    sockets: InterfaceSlot,
    utils: InterfaceSlot,
    id: usize,
}

impl<N: NativeApi> Networking<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            sockets: InterfaceSlot::new(Interface::NetworkingSockets),
            utils: InterfaceSlot::new(Interface::NetworkingUtils),
            id: NEXT_OWNER.fetch_add(1, Ordering::Relaxed),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.sockets.reset();
        self.utils.reset();
    }

    /// Starts relay network setup early so the first connection is fast.
    pub fn init_relay_network_access(&self) -> bool {
        self.shared
            .call(&self.utils, "networking.init_relay_network_access", |n, p| {
                n.init_relay_network_access(p).map(|()| true)
            })
    }

    /// Routes connection state changes to `handler`.
    ///
    /// Fails with [`NativeError::AlreadyRegistered`] while any manager holds
    /// the slot. Events are delivered while callbacks are pumped.
    ///
    /// The handler runs inside the callback pump. A nested
    /// [`Client::run_callbacks`](crate::Client::run_callbacks) from the
    /// handler is skipped; hand longer work to another task.
    pub fn register_status_events<F>(&self, handler: F) -> Result<(), NativeError>
    where
        F: Fn(ConnectionStatusChanged) + Send + Sync + 'static,
    {
        let utils = self.shared.require(&self.utils)?;
        let mut slot = STATUS_SLOT.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_some() {
            return Err(NativeError::AlreadyRegistered("connection status handler"));
        }
        if !self
            .shared
            .native
            .set_connection_status_callback(utils, Some(status_trampoline as ConnectionStatusFn))?
        {
            return Err(NativeError::InvalidArgument(
                "steam rejected the connection status callback".into(),
            ));
        }
        *slot = Some(Registration {
            owner: self.id,
            handler: Arc::new(handler),
        });
        tracing::debug!(owner = self.id, "connection status handler registered");
        Ok(())
    }

    /// Releases the slot if this manager holds it. Returns whether it did.
    pub fn unregister_status_events(&self) -> bool {
        let mut slot = STATUS_SLOT.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().map(|r| r.owner) != Some(self.id) {
            return false;
        }
        *slot = None;
        if let Ok(utils) = self.shared.require(&self.utils) {
            if let Err(e) = self.shared.native.set_connection_status_callback(utils, None) {
                tracing::error!(op = "networking.unregister_status_events", "native call failed: {e}");
            }
        }
        tracing::debug!(owner = self.id, "connection status handler cleared");
        true
    }

    pub fn create_listen_socket_p2p(&self, virtual_port: i32) -> Option<ListenSocket> {
        let socket: ListenSocket = self
            .shared
            .call(&self.sockets, "networking.create_listen_socket_p2p", |n, p| {
                n.create_listen_socket_p2p(p, virtual_port)
            });
        (socket != INVALID_CONNECTION).then_some(socket)
    }

    pub fn connect_p2p(&self, remote: SteamId, virtual_port: i32) -> Option<ConnectionHandle> {
        let conn: ConnectionHandle = self.shared.call(&self.sockets, "networking.connect_p2p", |n, p| {
            n.connect_p2p(p, remote, virtual_port)
        });
        (conn != INVALID_CONNECTION).then_some(conn)
    }

    /// Accepts an incoming connection reported as `Connecting`.
    pub fn accept_connection(&self, conn: ConnectionHandle) -> bool {
        self.shared.call(&self.sockets, "networking.accept_connection", |n, p| {
            let result = n.accept_connection(p, conn)?;
            if !result.is_ok() {
                tracing::warn!(conn, %result, "accept refused");
            }
            Ok(result.is_ok())
        })
    }

    /// Closes `conn`. With `linger`, reliable data still queued is flushed
    /// first.
    pub fn close_connection(
        &self,
        conn: ConnectionHandle,
        reason: i32,
        debug: Option<&str>,
        linger: bool,
    ) -> bool {
        self.shared.call(&self.sockets, "networking.close_connection", |n, p| {
            n.close_connection(p, conn, reason, debug, linger)
        })
    }

    pub fn close_listen_socket(&self, socket: ListenSocket) -> bool {
        self.shared
            .call(&self.sockets, "networking.close_listen_socket", |n, p| {
                n.close_listen_socket(p, socket)
            })
    }

    /// Queues `data` on `conn`. Returns the message number on success.
    pub fn send_message(&self, conn: ConnectionHandle, data: &[u8], flags: i32) -> Option<i64> {
        if data.len() > MAX_MESSAGE_SIZE {
            tracing::warn!(conn, len = data.len(), "message too large");
            return None;
        }
        self.shared.call(&self.sockets, "networking.send_message", |n, p| {
            let (result, number) = n.send_message(p, conn, data, flags)?;
            if !result.is_ok() {
                tracing::warn!(conn, %result, "send failed");
                return Ok(None);
            }
            Ok(Some(number))
        })
    }

    /// Drains up to `max` pending messages from `conn`, at most
    /// [`MAX_RECEIVE_BATCH`] per call.
    pub fn receive_messages(&self, conn: ConnectionHandle, max: usize) -> Vec<ReceivedMessage> {
        if max == 0 {
            return Vec::new();
        }
        let max = max.min(MAX_RECEIVE_BATCH);
        self.shared.call(&self.sockets, "networking.receive_messages", |n, p| {
            n.receive_messages(p, conn, max)
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use steambridge_native::ffi::IDENTITY_TYPE_STEAM_ID;

    use super::*;
    use crate::testing::{self, FAKE_STEAM_ID, Payload};

    #[test]
    fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let net = Networking::new(shared);

        assert!(!net.init_relay_network_access());
        assert!(matches!(
            net.register_status_events(|_| {}),
            Err(NativeError::NotInitialized)
        ));
        assert!(!net.unregister_status_events());
        assert_eq!(net.create_listen_socket_p2p(0), None);
        assert_eq!(net.connect_p2p(FAKE_STEAM_ID, 0), None);
        assert!(!net.accept_connection(6));
        assert!(!net.close_connection(6, END_REASON_APP_GENERIC, None, false));
        assert!(!net.close_listen_socket(5));
        assert_eq!(net.send_message(6, b"hi", send_flags::RELIABLE), None);
        assert!(net.receive_messages(6, 8).is_empty());
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn connections_and_messages() {
        let (fake, shared) = testing::shared(true);
        let net = Networking::new(shared);

        assert!(net.init_relay_network_access());
        assert_eq!(net.create_listen_socket_p2p(0), Some(5));
        let conn = net.connect_p2p(FAKE_STEAM_ID, 0).unwrap();
        assert!(net.accept_connection(conn));
        assert!(!net.accept_connection(99));
        assert_eq!(net.send_message(conn, b"ping", send_flags::RELIABLE), Some(17));
        assert_eq!(net.send_message(99, b"ping", send_flags::RELIABLE), None);

        let messages = net.receive_messages(conn, 1);
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].data, b"ping");
        assert_eq!(messages[0].sender, Some(FAKE_STEAM_ID));
        assert!(net.receive_messages(conn, 0).is_empty());

        assert!(net.close_connection(conn, END_REASON_APP_GENERIC, Some("bye"), true));
        assert!(net.close_listen_socket(5));
        assert_eq!(fake.count("receive_messages"), 1);
    }

    #[test]
    fn receive_batch_is_clamped() {
        let (fake, shared) = testing::shared(true);
        let net = Networking::new(shared);

        assert_eq!(net.receive_messages(6, usize::MAX).len(), 2);
        assert_eq!(fake.last_receive_max(), Some(MAX_RECEIVE_BATCH));
        net.receive_messages(6, 3);
        assert_eq!(fake.last_receive_max(), Some(3));
    }

    #[test]
    fn oversized_message_is_rejected_locally() {
        let (fake, shared) = testing::shared(true);
        let net = Networking::new(shared);

        let big = vec![0u8; MAX_MESSAGE_SIZE + 1];
        assert_eq!(net.send_message(6, &big, send_flags::RELIABLE), None);
        assert_eq!(fake.count("send_message"), 0);
    }

    // The slot is process-wide, so every step touching it lives in this
    // one test.
    #[test]
    fn status_slot_lifecycle() {
        let (fake, shared) = testing::shared(true);
        let first = Networking::new(Arc::clone(&shared));
        let second = Networking::new(shared);

        let seen: Arc<Mutex<Vec<ConnectionStatusChanged>>> = Arc::default();
        let sink = Arc::clone(&seen);
        first
            .register_status_events(move |event| sink.lock().unwrap().push(event))
            .unwrap();
        let callback = fake.status_callback().expect("trampoline installed");

        // Slot is taken: neither manager can register again.
        assert!(matches!(
            second.register_status_events(|_| {}),
            Err(NativeError::AlreadyRegistered(_))
        ));
        assert!(matches!(
            first.register_status_events(|_| {}),
            Err(NativeError::AlreadyRegistered(_))
        ));
        // Only the owner can clear it.
        assert!(!second.unregister_status_events());

        let mut raw = Payload::zeroed(connection_status_changed::SIZE)
            .u32(connection_status_changed::CONN, 6)
            .i32(connection_status_changed::IDENTITY_TYPE, IDENTITY_TYPE_STEAM_ID)
            .u64(connection_status_changed::IDENTITY_STEAM_ID, FAKE_STEAM_ID)
            .i32(connection_status_changed::STATE, 3)
            .bytes(connection_status_changed::DESCRIPTION, b"#6 P2P steamid:1")
            .i32(connection_status_changed::OLD_STATE, 1)
            .build();
        unsafe { callback(raw.as_mut_ptr().cast()) };
        unsafe { callback(std::ptr::null_mut()) };

        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.len(), 1);
            assert_eq!(seen[0].conn, 6);
            assert_eq!(seen[0].remote, Some(FAKE_STEAM_ID));
            assert_eq!(seen[0].state, ConnectionState::Connected);
            assert_eq!(seen[0].old_state, ConnectionState::Connecting);
            assert_eq!(seen[0].description, "#6 P2P steamid:1");
        }

        assert!(first.unregister_status_events());
        assert!(fake.status_callback().is_none());
        assert!(!first.unregister_status_events());

        // A panicking handler is contained at the native boundary.
        second
            .register_status_events(|_| panic!("handler bug"))
            .unwrap();
        unsafe { callback(raw.as_mut_ptr().cast()) };
        assert!(second.unregister_status_events());
        assert_eq!(fake.count("set_connection_status_callback"), 4);
    }
}
