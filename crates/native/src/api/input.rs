use serde::Serialize;

use crate::error::NativeError;
use crate::library::{SteamLibrary, c_string};
use crate::types::InterfacePtr;

/// `STEAM_INPUT_MAX_COUNT`.
pub const MAX_CONTROLLERS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DigitalActionData {
    pub state: bool,
    pub active: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct AnalogActionData {
    pub mode: i32,
    pub x: f32,
    pub y: f32,
    pub active: bool,
}

/// `ISteamInput` calls.
pub trait InputApi {
    fn input_init(&self, input: InterfacePtr, explicitly_call_run_frame: bool) -> Result<bool, NativeError>;
    fn input_shutdown(&self, input: InterfacePtr) -> Result<bool, NativeError>;
    fn run_frame(&self, input: InterfacePtr) -> Result<(), NativeError>;
    fn connected_controllers(&self, input: InterfacePtr) -> Result<Vec<u64>, NativeError>;
    fn action_set_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError>;
    fn activate_action_set(&self, input: InterfacePtr, controller: u64, action_set: u64) -> Result<(), NativeError>;
    fn digital_action_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError>;
    fn digital_action_data(&self, input: InterfacePtr, controller: u64, action: u64) -> Result<DigitalActionData, NativeError>;
    fn analog_action_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError>;
    fn analog_action_data(&self, input: InterfacePtr, controller: u64, action: u64) -> Result<AnalogActionData, NativeError>;
    fn input_type_for_handle(&self, input: InterfacePtr, controller: u64) -> Result<i32, NativeError>;
    fn trigger_vibration(&self, input: InterfacePtr, controller: u64, left: u16, right: u16) -> Result<(), NativeError>;
}

impl InputApi for SteamLibrary {
    fn input_init(&self, input: InterfacePtr, explicitly_call_run_frame: bool) -> Result<bool, NativeError> {
        let f = self.table.input_init.get()?;
        Ok(unsafe { f(input.as_ptr(), explicitly_call_run_frame) })
    }

    fn input_shutdown(&self, input: InterfacePtr) -> Result<bool, NativeError> {
        let f = self.table.input_shutdown.get()?;
        Ok(unsafe { f(input.as_ptr()) })
    }

    fn run_frame(&self, input: InterfacePtr) -> Result<(), NativeError> {
        let f = self.table.input_run_frame.get()?;
        unsafe { f(input.as_ptr(), false) };
        Ok(())
    }

    fn connected_controllers(&self, input: InterfacePtr) -> Result<Vec<u64>, NativeError> {
        let f = self.table.input_connected_controllers.get()?;
        let mut handles = [0u64; MAX_CONTROLLERS];
        let count = unsafe { f(input.as_ptr(), handles.as_mut_ptr()) };
        let count = (count.max(0) as usize).min(MAX_CONTROLLERS);
        Ok(handles[..count].to_vec())
    }

    fn action_set_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError> {
        let f = self.table.input_action_set_handle.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(input.as_ptr(), name.as_ptr()) })
    }

    fn activate_action_set(&self, input: InterfacePtr, controller: u64, action_set: u64) -> Result<(), NativeError> {
        let f = self.table.input_activate_action_set.get()?;
        unsafe { f(input.as_ptr(), controller, action_set) };
        Ok(())
    }

    fn digital_action_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError> {
        let f = self.table.input_digital_action_handle.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(input.as_ptr(), name.as_ptr()) })
    }

    fn digital_action_data(&self, input: InterfacePtr, controller: u64, action: u64) -> Result<DigitalActionData, NativeError> {
        let f = self.table.input_digital_action_data.get()?;
        let raw = unsafe { f(input.as_ptr(), controller, action) };
        Ok(DigitalActionData {
            state: raw.state,
            active: raw.active,
        })
    }

    fn analog_action_handle(&self, input: InterfacePtr, name: &str) -> Result<u64, NativeError> {
        let f = self.table.input_analog_action_handle.get()?;
        let name = c_string(name)?;
        Ok(unsafe { f(input.as_ptr(), name.as_ptr()) })
    }

    fn analog_action_data(&self, input: InterfacePtr, controller: u64, action: u64) -> Result<AnalogActionData, NativeError> {
        let f = self.table.input_analog_action_data.get()?;
        let raw = unsafe { f(input.as_ptr(), controller, action) };
        // Copy out of the packed struct before use.
        let (mode, x, y, active) = (raw.mode, raw.x, raw.y, raw.active);
        Ok(AnalogActionData { mode, x, y, active })
    }

    fn input_type_for_handle(&self, input: InterfacePtr, controller: u64) -> Result<i32, NativeError> {
        let f = self.table.input_input_type_for_handle.get()?;
        Ok(unsafe { f(input.as_ptr(), controller) })
    }

    fn trigger_vibration(&self, input: InterfacePtr, controller: u64, left: u16, right: u16) -> Result<(), NativeError> {
        let f = self.table.input_trigger_vibration.get()?;
        unsafe { f(input.as_ptr(), controller, left, right) };
        Ok(())
    }
}
