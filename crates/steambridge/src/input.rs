//! Controller actions (`ISteamInput`).
//!
//! Action set and action handles are looked up by name once and memoised;
//! a zero handle (unknown name) is returned but never cached.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use steambridge_native::api::{AnalogActionData, DigitalActionData};
use steambridge_native::{Interface, InterfacePtr, InterfaceSlot, NativeApi, NativeError};

use crate::shared::Shared;

pub type ControllerHandle = u64;
pub type ActionSetHandle = u64;
pub type ActionHandle = u64;

/// `ESteamInputType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InputType {
    #[default]
    Unknown,
    SteamController,
    XBox360Controller,
    XBoxOneController,
    GenericGamepad,
    Ps4Controller,
    AppleMFiController,
    AndroidController,
    SwitchJoyConPair,
    SwitchJoyConSingle,
    SwitchProController,
    MobileTouch,
    Ps3Controller,
    Ps5Controller,
    SteamDeckController,
}

impl From<i32> for InputType {
    fn from(code: i32) -> Self {
        match code {
            1 => Self::SteamController,
            2 => Self::XBox360Controller,
            3 => Self::XBoxOneController,
            4 => Self::GenericGamepad,
            5 => Self::Ps4Controller,
            6 => Self::AppleMFiController,
            7 => Self::AndroidController,
            8 => Self::SwitchJoyConPair,
            9 => Self::SwitchJoyConSingle,
            10 => Self::SwitchProController,
            11 => Self::MobileTouch,
            12 => Self::Ps3Controller,
            13 => Self::Ps5Controller,
            14 => Self::SteamDeckController,
            _ => Self::Unknown,
        }
    }
}

#[derive(Default)]
struct HandleTables {
    action_sets: HashMap<String, ActionSetHandle>,
    digital: HashMap<String, ActionHandle>,
    analog: HashMap<String, ActionHandle>,
}

#[derive(Clone, Copy)]
enum Table {
    ActionSet,
    Digital,
    Analog,
}

pub struct Input<N: NativeApi> {
    shared: Arc<Shared<N>>,
    slot: InterfaceSlot,
    handles: Mutex<HandleTables>,
}

impl<N: NativeApi> Input<N> {
    pub(crate) fn new(shared: Arc<Shared<N>>) -> Self {
        Self {
            shared,
            slot: InterfaceSlot::new(Interface::Input),
            handles: Mutex::new(HandleTables::default()),
        }
    }

    pub(crate) fn reset_interfaces(&self) {
        self.slot.reset();
    }

    /// With `explicitly_call_run_frame` the caller drives [`run_frame`](Self::run_frame)
    /// itself instead of relying on callback pumping.
    pub fn init(&self, explicitly_call_run_frame: bool) -> bool {
        self.shared.call(&self.slot, "input.init", |n, p| {
            n.input_init(p, explicitly_call_run_frame)
        })
    }

    pub fn shutdown(&self) -> bool {
        let done = self
            .shared
            .call(&self.slot, "input.shutdown", |n, p| n.input_shutdown(p));
        self.clear_handles();
        done
    }

    /// Forgets every memoised handle.
    pub(crate) fn clear_handles(&self) {
        *self.handles.lock().unwrap_or_else(PoisonError::into_inner) = HandleTables::default();
    }

    /// Samples controller state. Needed once per frame when initialised
    /// with `explicitly_call_run_frame`.
    pub fn run_frame(&self) -> bool {
        self.shared.call(&self.slot, "input.run_frame", |n, p| {
            n.run_frame(p).map(|()| true)
        })
    }

    pub fn connected_controllers(&self) -> Vec<ControllerHandle> {
        self.shared
            .call(&self.slot, "input.connected_controllers", |n, p| {
                n.connected_controllers(p)
            })
    }

    pub fn action_set_handle(&self, name: &str) -> ActionSetHandle {
        self.lookup(Table::ActionSet, name, "input.action_set_handle", |n, p| {
            n.action_set_handle(p, name)
        })
    }

    pub fn digital_action_handle(&self, name: &str) -> ActionHandle {
        self.lookup(Table::Digital, name, "input.digital_action_handle", |n, p| {
            n.digital_action_handle(p, name)
        })
    }

    pub fn analog_action_handle(&self, name: &str) -> ActionHandle {
        self.lookup(Table::Analog, name, "input.analog_action_handle", |n, p| {
            n.analog_action_handle(p, name)
        })
    }

    fn lookup(
        &self,
        table: Table,
        name: &str,
        op: &'static str,
        fetch: impl FnOnce(&N, InterfacePtr) -> Result<u64, NativeError>,
    ) -> u64 {
        if !self.shared.is_initialized() {
            tracing::warn!(op, "steam API not initialized");
            return 0;
        }
        {
            let tables = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
            let cached = match table {
                Table::ActionSet => tables.action_sets.get(name),
                Table::Digital => tables.digital.get(name),
                Table::Analog => tables.analog.get(name),
            };
            if let Some(handle) = cached {
                return *handle;
            }
        }

        let handle = self.shared.call(&self.slot, op, fetch);
        if handle == 0 {
            tracing::debug!(op, name, "no handle for action name");
            return 0;
        }
        let mut tables = self.handles.lock().unwrap_or_else(PoisonError::into_inner);
        let map = match table {
            Table::ActionSet => &mut tables.action_sets,
            Table::Digital => &mut tables.digital,
            Table::Analog => &mut tables.analog,
        };
        map.insert(name.to_string(), handle);
        handle
    }

    pub fn activate_action_set(&self, controller: ControllerHandle, action_set: ActionSetHandle) -> bool {
        self.shared.call(&self.slot, "input.activate_action_set", |n, p| {
            n.activate_action_set(p, controller, action_set).map(|()| true)
        })
    }

    pub fn digital_action_data(&self, controller: ControllerHandle, action: ActionHandle) -> DigitalActionData {
        self.shared.call(&self.slot, "input.digital_action_data", |n, p| {
            n.digital_action_data(p, controller, action)
        })
    }

    pub fn analog_action_data(&self, controller: ControllerHandle, action: ActionHandle) -> AnalogActionData {
        self.shared.call(&self.slot, "input.analog_action_data", |n, p| {
            n.analog_action_data(p, controller, action)
        })
    }

    pub fn input_type(&self, controller: ControllerHandle) -> InputType {
        let code: i32 = self.shared.call(&self.slot, "input.input_type", |n, p| {
            n.input_type_for_handle(p, controller)
        });
        InputType::from(code)
    }

    /// Rumble speeds for the left and right motors, 0 to `u16::MAX`.
    pub fn trigger_vibration(&self, controller: ControllerHandle, left: u16, right: u16) -> bool {
        self.shared.call(&self.slot, "input.trigger_vibration", |n, p| {
            n.trigger_vibration(p, controller, left, right).map(|()| true)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn uninitialized_returns_sentinels_without_native_calls() {
        let (fake, shared) = testing::shared(false);
        let input = Input::new(shared);

        assert!(!input.init(false));
        assert!(!input.shutdown());
        assert!(!input.run_frame());
        assert!(input.connected_controllers().is_empty());
        assert_eq!(input.action_set_handle("menu"), 0);
        assert_eq!(input.digital_action_handle("jump"), 0);
        assert_eq!(input.analog_action_handle("move"), 0);
        assert!(!input.activate_action_set(100, 1));
        assert_eq!(input.digital_action_data(100, 2), DigitalActionData::default());
        assert_eq!(input.analog_action_data(100, 3), AnalogActionData::default());
        assert_eq!(input.input_type(100), InputType::Unknown);
        assert!(!input.trigger_vibration(100, 1, 1));
        assert_eq!(fake.call_count(), 0);
    }

    #[test]
    fn handles_are_memoised() {
        let (fake, shared) = testing::shared(true);
        let input = Input::new(shared);

        assert_eq!(input.action_set_handle("menu"), 1);
        assert_eq!(input.action_set_handle("menu"), 1);
        assert_eq!(input.digital_action_handle("jump"), 2);
        assert_eq!(input.digital_action_handle("jump"), 2);
        assert_eq!(input.analog_action_handle("move"), 3);
        assert_eq!(fake.count("action_set_handle"), 1);
        assert_eq!(fake.count("digital_action_handle"), 1);
        assert_eq!(fake.count("analog_action_handle"), 1);
    }

    #[test]
    fn unknown_names_are_not_cached() {
        let (fake, shared) = testing::shared(true);
        let input = Input::new(shared);

        assert_eq!(input.action_set_handle("missing"), 0);
        assert_eq!(input.action_set_handle("missing"), 0);
        assert_eq!(fake.count("action_set_handle"), 2);
    }

    #[test]
    fn shutdown_forgets_handles() {
        let (fake, shared) = testing::shared(true);
        let input = Input::new(shared);

        input.digital_action_handle("jump");
        assert!(input.shutdown());
        input.digital_action_handle("jump");
        assert_eq!(fake.count("digital_action_handle"), 2);
    }

    #[test]
    fn reads_action_data() {
        let (_fake, shared) = testing::shared(true);
        let input = Input::new(shared);

        assert!(input.init(false));
        assert!(input.run_frame());
        let controllers = input.connected_controllers();
        assert_eq!(controllers, vec![100]);
        assert!(input.activate_action_set(100, input.action_set_handle("menu")));
        assert!(input.digital_action_data(100, 2).state);
        let analog = input.analog_action_data(100, 3);
        assert!(analog.active);
        assert_eq!(analog.x, 0.5);
        assert_eq!(input.input_type(100), InputType::SteamDeckController);
        assert!(input.trigger_vibration(100, u16::MAX, 0));
    }
}
