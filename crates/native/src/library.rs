//! Dynamic loading of the Steamworks flat API library.

use std::collections::HashMap;
use std::ffi::{CStr, CString, c_char, c_void};
use std::path::{Path, PathBuf};

use libloading::Library;

use crate::api::{CallResultApi, SteamCore};
use crate::error::NativeError;
use crate::interface::Interface;
use crate::table::{NativeTable, lookup};
use crate::types::{AppId, CallFailure, CallHandle, CallStatus, CallbackId, FetchStatus, InterfacePtr};

/// Platform file name of the redistributable flat API library.
#[cfg(target_os = "linux")]
pub const DEFAULT_LIBRARY: &str = "libsteam_api.so";
#[cfg(target_os = "windows")]
pub const DEFAULT_LIBRARY: &str = "steam_api64.dll";
#[cfg(target_os = "macos")]
pub const DEFAULT_LIBRARY: &str = "libsteam_api.dylib";
#[cfg(not(any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub const DEFAULT_LIBRARY: &str = "libsteam_api.so";

/// Size of `SteamErrMsg`.
const INIT_ERROR_LEN: usize = 1024;

type AccessorFn = unsafe extern "C" fn() -> *mut c_void;

/// A loaded Steamworks library and its resolved entry points.
pub struct SteamLibrary {
    path: PathBuf,
    pub(crate) table: NativeTable,
    accessors: HashMap<Interface, AccessorFn>,
    // Keeps every pointer in `table` and `accessors` valid.
    _lib: Library,
}

impl SteamLibrary {
    /// Loads [`DEFAULT_LIBRARY`] through the platform search path.
    pub fn load_default() -> Result<Self, NativeError> {
        Self::load(DEFAULT_LIBRARY)
    }

    /// Loads the library at `path` and resolves the function table.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, NativeError> {
        let path = path.as_ref().to_path_buf();

        // SAFETY: loading runs the library's initialisers; the Steamworks
        // redistributable has no load-time side effects beyond symbol setup.
        let lib = unsafe { Library::new(&path) }.map_err(|e| NativeError::LibraryLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        // SAFETY: signatures in the table follow the flat API headers.
        let table = unsafe { NativeTable::resolve(&lib) };
        let missing = table.unresolved();
        if !missing.is_empty() {
            tracing::debug!(count = missing.len(), ?missing, "entry points not exported");
        }

        let mut accessors = HashMap::new();
        for &kind in Interface::all() {
            // SAFETY: every accessor takes no arguments and returns a pointer.
            match unsafe { lookup::<AccessorFn>(&lib, kind.accessor()) } {
                Some(f) => {
                    accessors.insert(kind, f);
                }
                None => tracing::debug!(accessor = kind.accessor(), "interface accessor not exported"),
            }
        }

        tracing::info!(
            path = %path.display(),
            resolved = NativeTable::ENTRY_POINTS.len() - missing.len(),
            interfaces = accessors.len(),
            "steam library loaded"
        );

        Ok(Self {
            path,
            table,
            accessors,
            _lib: lib,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn table(&self) -> &NativeTable {
        &self.table
    }
}

impl SteamCore for SteamLibrary {
    fn init(&self, app_id: Option<AppId>) -> Result<(), NativeError> {
        if let Some(app_id) = app_id {
            let value = app_id.to_string();
            // SAFETY: called during start-up before the SDK spawns threads
            // that read the environment.
            unsafe {
                std::env::set_var("SteamAppId", &value);
                std::env::set_var("SteamGameId", &value);
            }
        }

        let init = self.table.init_flat.get()?;
        let mut message: [c_char; INIT_ERROR_LEN] = [0; INIT_ERROR_LEN];
        let code = unsafe { init(message.as_mut_ptr()) };
        if code != 0 {
            return Err(NativeError::InitFailed {
                code,
                message: string_from_buf(&message),
            });
        }
        Ok(())
    }

    fn shutdown(&self) {
        match self.table.shutdown.get() {
            Ok(f) => unsafe { f() },
            Err(e) => tracing::debug!("skipping shutdown: {e}"),
        }
    }

    fn run_callbacks(&self) {
        match self.table.run_callbacks.get() {
            Ok(f) => unsafe { f() },
            Err(e) => tracing::debug!("skipping callback pump: {e}"),
        }
    }

    fn is_steam_running(&self) -> bool {
        self.table
            .is_steam_running
            .get()
            .map(|f| unsafe { f() })
            .unwrap_or(false)
    }

    fn restart_app_if_necessary(&self, app_id: AppId) -> Result<bool, NativeError> {
        let f = self.table.restart_app_if_necessary.get()?;
        Ok(unsafe { f(app_id) })
    }

    fn interface(&self, kind: Interface) -> Option<InterfacePtr> {
        let accessor = self.accessors.get(&kind)?;
        InterfacePtr::from_raw(unsafe { accessor() })
    }
}

impl CallResultApi for SteamLibrary {
    fn is_api_call_completed(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
    ) -> Result<CallStatus, NativeError> {
        let f = self.table.utils_is_api_call_completed.get()?;
        let mut failed = false;
        let completed = unsafe { f(utils.as_ptr(), call.0, &mut failed) };
        Ok(CallStatus { completed, failed })
    }

    fn get_api_call_result(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
        buf: &mut [u8],
        callback: CallbackId,
    ) -> Result<FetchStatus, NativeError> {
        let f = self.table.utils_get_api_call_result.get()?;
        let len = i32::try_from(buf.len())
            .map_err(|_| NativeError::InvalidArgument(format!("result buffer too large: {}", buf.len())))?;
        let mut failed = false;
        let fetched = unsafe {
            f(
                utils.as_ptr(),
                call.0,
                buf.as_mut_ptr().cast(),
                len,
                callback.0,
                &mut failed,
            )
        };
        Ok(FetchStatus { fetched, failed })
    }

    fn get_api_call_failure_reason(
        &self,
        utils: InterfacePtr,
        call: CallHandle,
    ) -> Result<CallFailure, NativeError> {
        let f = self.table.utils_get_api_call_failure_reason.get()?;
        Ok(CallFailure::from(unsafe { f(utils.as_ptr(), call.0) }))
    }
}

/// Converts an argument into a NUL-terminated string.
pub(crate) fn c_string(value: &str) -> Result<CString, NativeError> {
    CString::new(value)
        .map_err(|_| NativeError::InvalidArgument(format!("interior NUL byte in {value:?}")))
}

/// Copies a native string. A null pointer yields an empty string.
///
/// # Safety
/// `ptr` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub(crate) unsafe fn string_from_ptr(ptr: *const c_char) -> String {
    if ptr.is_null() {
        return String::new();
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Copies a string out of a fixed-size native buffer, stopping at the first
/// NUL or the end of the buffer.
pub(crate) fn string_from_buf(buf: &[c_char]) -> String {
    let bytes: Vec<u8> = buf
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_library_fails() {
        let result = SteamLibrary::load("/nonexistent/libsteam_api_missing.so");
        match result {
            Err(NativeError::LibraryLoad { path, .. }) => {
                assert!(path.contains("libsteam_api_missing"))
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected load failure"),
        }
    }

    #[test]
    fn c_string_rejects_interior_nul() {
        assert!(c_string("leaderboard").is_ok());
        assert!(matches!(
            c_string("bad\0name"),
            Err(NativeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn string_from_buf_stops_at_nul() {
        let mut buf: [c_char; 8] = [0; 8];
        for (i, b) in b"abc".iter().enumerate() {
            buf[i] = *b as c_char;
        }
        assert_eq!(string_from_buf(&buf), "abc");
    }

    #[test]
    fn string_from_buf_without_terminator() {
        let buf: [c_char; 3] = [b'x' as c_char, b'y' as c_char, b'z' as c_char];
        assert_eq!(string_from_buf(&buf), "xyz");
    }

    #[test]
    fn string_from_null_pointer() {
        assert_eq!(unsafe { string_from_ptr(std::ptr::null()) }, "");
    }
}
