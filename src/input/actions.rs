//! Input domain: logical actions and the maps that group them.

use bevy::prelude::*;

use crate::input::bindings::DeviceClass;

/// A receiver kind and its action map share one identity: every logical
/// action routes under exactly one map, and a registered dispatcher fans
/// out to that kind's live receivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionMap {
    Player,
    Wheel,
    Game,
}

/// Logical input actions. The same action may appear on more than one map;
/// the `(ActionMap, Action)` pair is the routing key, so there is no global
/// action namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// 2-axis locomotion intent, routed every frame as a composite axis
    Move,
    Ability1,
    Ability2,
    Ability3,
    Meditate,
    Interact,
    SelectTerry,
    SelectFrog,
    SelectBulldozer,
    SelectBall,
    Pause,
}

impl Action {
    /// Core-tagged actions pass the router's listening gate unconditionally.
    pub fn is_core(self) -> bool {
        matches!(self, Action::Pause)
    }
}

/// Device-agnostic payload handed to receiver handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionContext {
    /// Axis value for axis-like actions, zero for buttons.
    pub axis: Vec2,
    /// True on the press edge, false on the release edge.
    pub pressed: bool,
    pub device: DeviceClass,
}

impl ActionContext {
    pub fn press(device: DeviceClass) -> Self {
        Self {
            axis: Vec2::ZERO,
            pressed: true,
            device,
        }
    }

    pub fn release(device: DeviceClass) -> Self {
        Self {
            axis: Vec2::ZERO,
            pressed: false,
            device,
        }
    }

    pub fn axis_value(axis: Vec2, device: DeviceClass) -> Self {
        Self {
            axis,
            pressed: false,
            device,
        }
    }
}
