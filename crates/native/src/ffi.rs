//! Raw structures exchanged with the flat API by pointer or by value.
//!
//! Only structures that cross the boundary directly are declared here.
//! Call result buffers are decoded by offset in `steambridge-callbacks`.

use std::ffi::c_void;

/// `LeaderboardEntry_t`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawLeaderboardEntry {
    pub steam_id_user: u64,
    pub global_rank: i32,
    pub score: i32,
    pub details: i32,
    pub ugc: u64,
}

/// `InputDigitalActionData_t` (declared under `pack(1)`).
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawDigitalActionData {
    pub state: bool,
    pub active: bool,
}

/// `InputAnalogActionData_t` (declared under `pack(1)`, 13 bytes).
#[repr(C, packed)]
#[derive(Debug, Clone, Copy, Default)]
pub struct RawAnalogActionData {
    pub mode: i32,
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// Size of `SteamNetworkingIdentity`.
pub const NETWORKING_IDENTITY_SIZE: usize = 136;

/// `k_ESteamNetworkingIdentityType_SteamID`.
pub const IDENTITY_TYPE_STEAM_ID: i32 = 16;

/// `SteamNetworkingIdentity`, kept as raw bytes.
///
/// Layout: `m_eType` (i32) at 0, `m_cbSize` (i32) at 4, payload union at 8.
#[repr(C, align(8))]
#[derive(Clone, Copy)]
pub struct RawNetworkingIdentity {
    pub bytes: [u8; NETWORKING_IDENTITY_SIZE],
}

impl RawNetworkingIdentity {
    pub fn from_steam_id(steam_id: u64) -> Self {
        let mut bytes = [0u8; NETWORKING_IDENTITY_SIZE];
        bytes[0..4].copy_from_slice(&IDENTITY_TYPE_STEAM_ID.to_le_bytes());
        bytes[4..8].copy_from_slice(&8i32.to_le_bytes());
        bytes[8..16].copy_from_slice(&steam_id.to_le_bytes());
        Self { bytes }
    }

    /// Returns the SteamID payload when the identity holds one.
    pub fn steam_id(&self) -> Option<u64> {
        let kind = i32::from_le_bytes([self.bytes[0], self.bytes[1], self.bytes[2], self.bytes[3]]);
        if kind != IDENTITY_TYPE_STEAM_ID {
            return None;
        }
        let mut id = [0u8; 8];
        id.copy_from_slice(&self.bytes[8..16]);
        Some(u64::from_le_bytes(id))
    }
}

/// Leading fields of `SteamNetworkingMessage_t` on 64-bit targets.
///
/// Messages are owned by the native library and must be handed back
/// through `SteamAPI_SteamNetworkingMessage_t_Release`.
#[repr(C)]
pub struct RawNetworkingMessage {
    pub data: *mut c_void,
    pub size: i32,
    pub conn: u32,
    pub identity_peer: RawNetworkingIdentity,
    pub conn_user_data: i64,
    pub usec_time_received: i64,
    pub message_number: i64,
    pub free_data: Option<unsafe extern "C" fn(*mut RawNetworkingMessage)>,
    pub release: Option<unsafe extern "C" fn(*mut RawNetworkingMessage)>,
    pub channel: i32,
    pub flags: i32,
}

/// `FnSteamNetConnectionStatusChanged`. Receives a pointer to a
/// `SteamNetConnectionStatusChangedCallback_t`.
pub type ConnectionStatusFn = unsafe extern "C" fn(*mut c_void);
