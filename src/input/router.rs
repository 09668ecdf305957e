//! Input domain: the raw-event entry point and the listening gate.

use bevy::prelude::*;

use crate::input::actions::{Action, ActionContext, ActionMap};
use crate::input::bindings::{BindingPath, BindingTable, DeviceClass};
use crate::input::registry::ActionRegistry;

/// Owns the device abstraction, the named bindings, and the global
/// "is input currently accepted" gate.
#[derive(Resource, Debug)]
pub struct InputRouter {
    listening: bool,
    active_device: DeviceClass,
    bindings: BindingTable,
}

impl Default for InputRouter {
    fn default() -> Self {
        Self {
            listening: true,
            active_device: DeviceClass::Keyboard,
            bindings: BindingTable::default_bindings(),
        }
    }
}

impl InputRouter {
    pub fn set_listening(&mut self, listening: bool) {
        self.listening = listening;
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    /// Single raw-event entry point. Non-core actions are dropped here while
    /// the gate is closed, before they ever reach the registry.
    pub fn on_raw_action(
        &mut self,
        registry: &mut ActionRegistry,
        map: ActionMap,
        action: Action,
        ctx: ActionContext,
    ) {
        if !self.listening && !action.is_core() {
            return;
        }
        self.active_device = ctx.device;
        registry.dispatch(map, action, ctx);
    }

    /// Last device class that produced an event. Downstream prompt/icon
    /// selection reads this; the core never branches on it.
    pub fn active_device_class(&self) -> DeviceClass {
        self.active_device
    }

    pub fn binding(&self, map: ActionMap, action: Action, device: DeviceClass) -> &[BindingPath] {
        self.bindings.paths(map, action, device)
    }

    pub fn rebind(
        &mut self,
        map: ActionMap,
        action: Action,
        device: DeviceClass,
        old: BindingPath,
        new: BindingPath,
    ) -> bool {
        self.bindings.rebind(map, action, device, old, new)
    }

    pub fn bindings(&self) -> &BindingTable {
        &self.bindings
    }
}
