use std::ffi::c_void;

use crate::error::NativeError;
use crate::ffi::{ConnectionStatusFn, RawNetworkingIdentity, RawNetworkingMessage};
use crate::library::{SteamLibrary, c_string};
use crate::types::{EResult, InterfacePtr, SteamId};

/// `k_HSteamNetConnection_Invalid` / `k_HSteamListenSocket_Invalid`.
pub const INVALID_CONNECTION: u32 = 0;

/// Most messages taken from the receive queue in one call. Larger requests
/// are clamped.
pub const MAX_RECEIVE_BATCH: usize = 256;

const _: () = assert!(MAX_RECEIVE_BATCH <= i32::MAX as usize);

/// A message copied out of the native receive queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub conn: u32,
    /// Sender, when the peer identity is a Steam ID.
    pub sender: Option<SteamId>,
    pub data: Vec<u8>,
    pub message_number: i64,
    pub channel: i32,
}

/// `ISteamNetworkingSockets` and `ISteamNetworkingUtils` calls.
///
/// Methods taking `sockets` want the sockets interface, the others want
/// the networking utils interface.
pub trait NetworkingApi {
    fn init_relay_network_access(&self, utils: InterfacePtr) -> Result<(), NativeError>;
    /// Installs (or with `None` removes) the process-wide status callback.
    fn set_connection_status_callback(
        &self,
        utils: InterfacePtr,
        callback: Option<ConnectionStatusFn>,
    ) -> Result<bool, NativeError>;
    fn create_listen_socket_p2p(&self, sockets: InterfacePtr, virtual_port: i32) -> Result<u32, NativeError>;
    fn connect_p2p(&self, sockets: InterfacePtr, remote: SteamId, virtual_port: i32) -> Result<u32, NativeError>;
    fn accept_connection(&self, sockets: InterfacePtr, conn: u32) -> Result<EResult, NativeError>;
    fn close_connection(
        &self,
        sockets: InterfacePtr,
        conn: u32,
        reason: i32,
        debug: Option<&str>,
        linger: bool,
    ) -> Result<bool, NativeError>;
    fn close_listen_socket(&self, sockets: InterfacePtr, socket: u32) -> Result<bool, NativeError>;
    /// Returns the send result and the assigned message number.
    fn send_message(&self, sockets: InterfacePtr, conn: u32, data: &[u8], flags: i32) -> Result<(EResult, i64), NativeError>;
    fn receive_messages(&self, sockets: InterfacePtr, conn: u32, max: usize) -> Result<Vec<ReceivedMessage>, NativeError>;
}

impl NetworkingApi for SteamLibrary {
    fn init_relay_network_access(&self, utils: InterfacePtr) -> Result<(), NativeError> {
        let f = self.table.net_init_relay_network_access.get()?;
        unsafe { f(utils.as_ptr()) };
        Ok(())
    }

    fn set_connection_status_callback(
        &self,
        utils: InterfacePtr,
        callback: Option<ConnectionStatusFn>,
    ) -> Result<bool, NativeError> {
        let f = self.table.net_set_status_changed_callback.get()?;
        Ok(unsafe { f(utils.as_ptr(), callback) })
    }

    fn create_listen_socket_p2p(&self, sockets: InterfacePtr, virtual_port: i32) -> Result<u32, NativeError> {
        let f = self.table.net_create_listen_socket_p2p.get()?;
        Ok(unsafe { f(sockets.as_ptr(), virtual_port, 0, std::ptr::null()) })
    }

    fn connect_p2p(&self, sockets: InterfacePtr, remote: SteamId, virtual_port: i32) -> Result<u32, NativeError> {
        let f = self.table.net_connect_p2p.get()?;
        let identity = RawNetworkingIdentity::from_steam_id(remote);
        Ok(unsafe { f(sockets.as_ptr(), &identity, virtual_port, 0, std::ptr::null()) })
    }

    fn accept_connection(&self, sockets: InterfacePtr, conn: u32) -> Result<EResult, NativeError> {
        let f = self.table.net_accept_connection.get()?;
        Ok(EResult(unsafe { f(sockets.as_ptr(), conn) }))
    }

    fn close_connection(
        &self,
        sockets: InterfacePtr,
        conn: u32,
        reason: i32,
        debug: Option<&str>,
        linger: bool,
    ) -> Result<bool, NativeError> {
        let f = self.table.net_close_connection.get()?;
        let debug = debug.map(c_string).transpose()?;
        let ptr = debug.as_ref().map_or(std::ptr::null(), |d| d.as_ptr());
        Ok(unsafe { f(sockets.as_ptr(), conn, reason, ptr, linger) })
    }

    fn close_listen_socket(&self, sockets: InterfacePtr, socket: u32) -> Result<bool, NativeError> {
        let f = self.table.net_close_listen_socket.get()?;
        Ok(unsafe { f(sockets.as_ptr(), socket) })
    }

    fn send_message(&self, sockets: InterfacePtr, conn: u32, data: &[u8], flags: i32) -> Result<(EResult, i64), NativeError> {
        let f = self.table.net_send_message_to_connection.get()?;
        let len = u32::try_from(data.len())
            .map_err(|_| NativeError::InvalidArgument(format!("message too large: {}", data.len())))?;
        let mut number = 0i64;
        let result = unsafe {
            f(
                sockets.as_ptr(),
                conn,
                data.as_ptr().cast::<c_void>(),
                len,
                flags,
                &mut number,
            )
        };
        Ok((EResult(result), number))
    }

    fn receive_messages(&self, sockets: InterfacePtr, conn: u32, max: usize) -> Result<Vec<ReceivedMessage>, NativeError> {
        let receive = self.table.net_receive_messages_on_connection.get()?;
        let release = self.table.net_release_message.get()?;
        if max == 0 {
            return Ok(Vec::new());
        }
        let max = max.min(MAX_RECEIVE_BATCH);
        let mut raw: Vec<*mut RawNetworkingMessage> = vec![std::ptr::null_mut(); max];
        let count = unsafe { receive(sockets.as_ptr(), conn, raw.as_mut_ptr(), max as i32) };
        let count = (count.max(0) as usize).min(raw.len());

        let mut messages = Vec::with_capacity(count);
        for &msg in &raw[..count] {
            if msg.is_null() {
                continue;
            }
            // Copy everything out before handing the message back.
            let received = unsafe {
                let m = &*msg;
                let data = if m.data.is_null() || m.size <= 0 {
                    Vec::new()
                } else {
                    std::slice::from_raw_parts(m.data.cast::<u8>(), m.size as usize).to_vec()
                };
                ReceivedMessage {
                    conn: m.conn,
                    sender: m.identity_peer.steam_id(),
                    data,
                    message_number: m.message_number,
                    channel: m.channel,
                }
            };
            unsafe { release(msg) };
            messages.push(received);
        }
        Ok(messages)
    }
}
