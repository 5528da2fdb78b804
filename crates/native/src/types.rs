//! Plain value types shared across the native boundary.

use std::fmt;
use std::num::NonZeroUsize;

use serde::{Deserialize, Serialize};

pub type AppId = u32;
pub type SteamId = u64;
pub type PublishedFileId = u64;
pub type LeaderboardHandle = u64;
pub type UgcUpdateHandle = u64;

/// Opaque handle for a pending asynchronous native operation
/// (`SteamAPICall_t`).
///
/// Zero means the operation failed to start. A handle is consumed by the
/// first successful result fetch and must not be reused afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallHandle(pub u64);

impl CallHandle {
    pub const INVALID: CallHandle = CallHandle(0);

    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for CallHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Identifies the layout of the result buffer for a call handle
/// (`k_iCallback`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(pub i32);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Steam result code (`EResult`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EResult(pub i32);

impl EResult {
    pub const NONE: EResult = EResult(0);
    pub const OK: EResult = EResult(1);
    pub const FAIL: EResult = EResult(2);
    pub const NO_CONNECTION: EResult = EResult(3);
    pub const INVALID_PARAM: EResult = EResult(8);
    pub const FILE_NOT_FOUND: EResult = EResult(9);
    pub const BUSY: EResult = EResult(10);
    pub const INVALID_STATE: EResult = EResult(11);
    pub const ACCESS_DENIED: EResult = EResult(15);
    pub const TIMEOUT: EResult = EResult(16);
    pub const BANNED: EResult = EResult(17);
    pub const SERVICE_UNAVAILABLE: EResult = EResult(20);
    pub const NOT_LOGGED_ON: EResult = EResult(21);
    pub const LIMIT_EXCEEDED: EResult = EResult(25);
    pub const INSUFFICIENT_PRIVILEGE: EResult = EResult(24);
    pub const DUPLICATE_REQUEST: EResult = EResult(29);
    pub const LOCKING_FAILED: EResult = EResult(33);
    pub const RATE_LIMIT_EXCEEDED: EResult = EResult(84);

    pub fn is_ok(self) -> bool {
        self == Self::OK
    }

    /// Short name of the code, or `None` for codes without a mapping.
    pub fn name(self) -> Option<&'static str> {
        Some(match self.0 {
            0 => "None",
            1 => "OK",
            2 => "Fail",
            3 => "NoConnection",
            8 => "InvalidParam",
            9 => "FileNotFound",
            10 => "Busy",
            11 => "InvalidState",
            15 => "AccessDenied",
            16 => "Timeout",
            17 => "Banned",
            20 => "ServiceUnavailable",
            21 => "NotLoggedOn",
            24 => "InsufficientPrivilege",
            25 => "LimitExceeded",
            29 => "DuplicateRequest",
            33 => "LockingFailed",
            84 => "RateLimitExceeded",
            _ => return None,
        })
    }
}

impl fmt::Display for EResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "EResult({})", self.0),
        }
    }
}

/// Non-null address of a native interface object (`ISteamUtils*` etc.).
///
/// Stored as an address so it can be cached and shared across threads;
/// the native side owns the object for the lifetime of the SDK session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InterfacePtr(NonZeroUsize);

impl InterfacePtr {
    pub fn from_raw(ptr: *mut std::ffi::c_void) -> Option<Self> {
        NonZeroUsize::new(ptr as usize).map(Self)
    }

    /// Builds a pointer from a plain address. Test doubles use this to hand
    /// out distinguishable interfaces.
    pub fn from_addr(addr: usize) -> Option<Self> {
        NonZeroUsize::new(addr).map(Self)
    }

    pub fn as_ptr(self) -> *mut std::ffi::c_void {
        self.0.get() as *mut std::ffi::c_void
    }

    pub fn addr(self) -> usize {
        self.0.get()
    }
}

/// Output of `ISteamUtils::IsAPICallCompleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallStatus {
    pub completed: bool,
    pub failed: bool,
}

/// Output of `ISteamUtils::GetAPICallResult`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FetchStatus {
    pub fetched: bool,
    pub failed: bool,
}

/// Reason a call result could not be delivered (`ESteamAPICallFailure`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallFailure {
    None,
    SteamGone,
    NetworkFailure,
    InvalidHandle,
    MismatchedCallback,
    Unknown(i32),
}

impl From<i32> for CallFailure {
    fn from(code: i32) -> Self {
        match code {
            -1 => Self::None,
            0 => Self::SteamGone,
            1 => Self::NetworkFailure,
            2 => Self::InvalidHandle,
            3 => Self::MismatchedCallback,
            other => Self::Unknown(other),
        }
    }
}

impl CallFailure {
    pub fn reason(self) -> &'static str {
        match self {
            Self::None => "no failure reported",
            Self::SteamGone => "the local Steam process has gone away",
            Self::NetworkFailure => "network connection to Steam was lost",
            Self::InvalidHandle => "the call handle is invalid or already consumed",
            Self::MismatchedCallback => "the callback id does not match the call",
            Self::Unknown(_) => "unknown failure",
        }
    }
}

impl fmt::Display for CallFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(code) => write!(f, "unknown failure ({code})"),
            other => f.write_str(other.reason()),
        }
    }
}
