use std::ffi::c_void;

use crate::error::NativeError;
use crate::library::{SteamLibrary, c_string};
use crate::types::{CallHandle, InterfacePtr, SteamId};

/// Maximum size of an auth session ticket.
const AUTH_TICKET_LEN: usize = 1024;

/// Maximum size of an encrypted app ticket.
const ENCRYPTED_TICKET_LEN: usize = 1024;

/// An auth session ticket and the handle used to cancel it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthTicket {
    pub handle: u32,
    pub ticket: Vec<u8>,
}

/// `ISteamUser` calls.
pub trait UserApi {
    fn steam_id(&self, user: InterfacePtr) -> Result<SteamId, NativeError>;
    fn logged_on(&self, user: InterfacePtr) -> Result<bool, NativeError>;
    fn player_steam_level(&self, user: InterfacePtr) -> Result<i32, NativeError>;
    /// Returns `None` when no ticket was issued (`k_HAuthTicketInvalid`).
    fn auth_session_ticket(&self, user: InterfacePtr) -> Result<Option<AuthTicket>, NativeError>;
    fn cancel_auth_ticket(&self, user: InterfacePtr, handle: u32) -> Result<(), NativeError>;
    fn request_encrypted_app_ticket(&self, user: InterfacePtr, data: &[u8]) -> Result<CallHandle, NativeError>;
    /// Reads the ticket produced by a completed encrypted ticket request.
    fn encrypted_app_ticket(&self, user: InterfacePtr) -> Result<Option<Vec<u8>>, NativeError>;
    fn request_store_auth_url(&self, user: InterfacePtr, redirect_url: &str) -> Result<CallHandle, NativeError>;
    fn market_eligibility(&self, user: InterfacePtr) -> Result<CallHandle, NativeError>;
    fn duration_control(&self, user: InterfacePtr) -> Result<CallHandle, NativeError>;
}

impl UserApi for SteamLibrary {
    fn steam_id(&self, user: InterfacePtr) -> Result<SteamId, NativeError> {
        let f = self.table.user_steam_id.get()?;
        Ok(unsafe { f(user.as_ptr()) })
    }

    fn logged_on(&self, user: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.user_logged_on.get()?;
        Ok(unsafe { f(user.as_ptr()) })
    }

    fn player_steam_level(&self, user: InterfacePtr) -> Result<i32, NativeError> {
        let f = self.table.user_player_steam_level.get()?;
        Ok(unsafe { f(user.as_ptr()) })
    }

    fn auth_session_ticket(&self, user: InterfacePtr) -> Result<Option<AuthTicket>, NativeError> {
        let f = self.table.user_auth_session_ticket.get()?;
        let mut buf = vec![0u8; AUTH_TICKET_LEN];
        let mut written: u32 = 0;
        let handle = unsafe {
            f(
                user.as_ptr(),
                buf.as_mut_ptr().cast::<c_void>(),
                AUTH_TICKET_LEN as i32,
                &mut written,
                std::ptr::null(),
            )
        };
        if handle == 0 {
            return Ok(None);
        }
        buf.truncate((written as usize).min(AUTH_TICKET_LEN));
        Ok(Some(AuthTicket {
            handle,
            ticket: buf,
        }))
    }

    fn cancel_auth_ticket(&self, user: InterfacePtr, handle: u32) -> Result<(), NativeError> {
        let f = self.table.user_cancel_auth_ticket.get()?;
        unsafe { f(user.as_ptr(), handle) };
        Ok(())
    }

    fn request_encrypted_app_ticket(&self, user: InterfacePtr, data: &[u8]) -> Result<CallHandle, NativeError> {
        let f = self.table.user_request_encrypted_app_ticket.get()?;
        let len = i32::try_from(data.len())
            .map_err(|_| NativeError::InvalidArgument(format!("ticket data too large: {}", data.len())))?;
        // The flat API takes a mutable pointer but only reads the data.
        let mut data = data.to_vec();
        let call = unsafe { f(user.as_ptr(), data.as_mut_ptr().cast::<c_void>(), len) };
        Ok(CallHandle(call))
    }

    fn encrypted_app_ticket(&self, user: InterfacePtr) -> Result<Option<Vec<u8>>, NativeError> {
        let f = self.table.user_encrypted_app_ticket.get()?;
        let mut buf = vec![0u8; ENCRYPTED_TICKET_LEN];
        let mut written: u32 = 0;
        let ok = unsafe {
            f(
                user.as_ptr(),
                buf.as_mut_ptr().cast::<c_void>(),
                ENCRYPTED_TICKET_LEN as i32,
                &mut written,
            )
        };
        if !ok {
            return Ok(None);
        }
        buf.truncate((written as usize).min(ENCRYPTED_TICKET_LEN));
        Ok(Some(buf))
    }

    fn request_store_auth_url(&self, user: InterfacePtr, redirect_url: &str) -> Result<CallHandle, NativeError> {
        let f = self.table.user_request_store_auth_url.get()?;
        let url = c_string(redirect_url)?;
        Ok(CallHandle(unsafe { f(user.as_ptr(), url.as_ptr()) }))
    }

    fn market_eligibility(&self, user: InterfacePtr) -> Result<CallHandle, NativeError> {
        let f = self.table.user_market_eligibility.get()?;
        Ok(CallHandle(unsafe { f(user.as_ptr()) }))
    }

    fn duration_control(&self, user: InterfacePtr) -> Result<CallHandle, NativeError> {
        let f = self.table.user_duration_control.get()?;
        Ok(CallHandle(unsafe { f(user.as_ptr()) }))
    }
}
