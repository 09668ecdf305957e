//! Input domain: physical device bindings and remapping.

use bevy::prelude::*;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::input::actions::{Action, ActionMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DeviceClass {
    #[default]
    Keyboard,
    Gamepad,
    Mouse,
}

impl FromStr for DeviceClass {
    type Err = BindingError;

    /// Settings menus and config files hand device classes over as strings;
    /// an unrecognized name is a programmer/config error surfaced to the
    /// caller rather than swallowed.
    fn from_str(name: &str) -> Result<Self, BindingError> {
        if name.eq_ignore_ascii_case("keyboard") {
            Ok(DeviceClass::Keyboard)
        } else if name.eq_ignore_ascii_case("gamepad") {
            Ok(DeviceClass::Gamepad)
        } else if name.eq_ignore_ascii_case("mouse") {
            Ok(DeviceClass::Mouse)
        } else {
            Err(BindingError::UnknownDeviceClass(name.to_string()))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    UnknownDeviceClass(String),
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::UnknownDeviceClass(name) => {
                write!(f, "unknown device class '{}'", name)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// One physical control on a concrete device class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingPath {
    Key(KeyCode),
    PadButton(GamepadButton),
    MouseButton(MouseButton),
}

impl BindingPath {
    pub fn device_class(self) -> DeviceClass {
        match self {
            BindingPath::Key(_) => DeviceClass::Keyboard,
            BindingPath::PadButton(_) => DeviceClass::Gamepad,
            BindingPath::MouseButton(_) => DeviceClass::Mouse,
        }
    }
}

/// Button bindings keyed by `(map, action, device)`. The locomotion axis
/// composite (WASD/arrows, left stick) is sampled directly and is not
/// remappable through this table.
#[derive(Debug, Default)]
pub struct BindingTable {
    paths: HashMap<(ActionMap, Action, DeviceClass), Vec<BindingPath>>,
}

impl BindingTable {
    pub fn bind(&mut self, map: ActionMap, action: Action, path: BindingPath) {
        self.paths
            .entry((map, action, path.device_class()))
            .or_default()
            .push(path);
    }

    pub fn paths(&self, map: ActionMap, action: Action, device: DeviceClass) -> &[BindingPath] {
        self.paths
            .get(&(map, action, device))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Replace `old` with `new` for the given slot. Leaves the table
    /// untouched (with a warning) when no matching path exists; a `new`
    /// path on the wrong device class is likewise refused.
    pub fn rebind(
        &mut self,
        map: ActionMap,
        action: Action,
        device: DeviceClass,
        old: BindingPath,
        new: BindingPath,
    ) -> bool {
        if new.device_class() != device {
            warn!(
                "[INPUT] rebind of {:?}/{:?} refused: {:?} is not a {:?} path",
                map, action, new, device
            );
            return false;
        }
        let Some(paths) = self.paths.get_mut(&(map, action, device)) else {
            warn!(
                "[INPUT] rebind of {:?}/{:?} on {:?}: no bindings for that slot",
                map, action, device
            );
            return false;
        };
        let Some(slot) = paths.iter_mut().find(|path| **path == old) else {
            warn!(
                "[INPUT] rebind of {:?}/{:?}: {:?} is not currently bound",
                map, action, old
            );
            return false;
        };
        *slot = new;
        true
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (&(ActionMap, Action, DeviceClass), &Vec<BindingPath>)> {
        self.paths.iter()
    }

    /// The shipped layout.
    pub fn default_bindings() -> Self {
        use BindingPath::{Key, MouseButton as Mouse, PadButton};

        let mut table = Self::default();

        table.bind(ActionMap::Player, Action::Ability1, Key(KeyCode::Space));
        table.bind(
            ActionMap::Player,
            Action::Ability1,
            PadButton(GamepadButton::South),
        );
        table.bind(ActionMap::Player, Action::Ability2, Key(KeyCode::KeyJ));
        table.bind(
            ActionMap::Player,
            Action::Ability2,
            PadButton(GamepadButton::West),
        );
        table.bind(
            ActionMap::Player,
            Action::Ability2,
            Mouse(MouseButton::Left),
        );
        table.bind(ActionMap::Player, Action::Ability3, Key(KeyCode::KeyL));
        table.bind(
            ActionMap::Player,
            Action::Ability3,
            PadButton(GamepadButton::East),
        );
        table.bind(ActionMap::Player, Action::Interact, Key(KeyCode::KeyE));
        table.bind(
            ActionMap::Player,
            Action::Interact,
            PadButton(GamepadButton::North),
        );
        table.bind(ActionMap::Player, Action::Meditate, Key(KeyCode::KeyM));
        table.bind(
            ActionMap::Player,
            Action::Meditate,
            PadButton(GamepadButton::LeftTrigger),
        );

        table.bind(ActionMap::Wheel, Action::SelectTerry, Key(KeyCode::Digit1));
        table.bind(ActionMap::Wheel, Action::SelectFrog, Key(KeyCode::Digit2));
        table.bind(
            ActionMap::Wheel,
            Action::SelectBulldozer,
            Key(KeyCode::Digit3),
        );
        table.bind(ActionMap::Wheel, Action::SelectBall, Key(KeyCode::Digit4));
        table.bind(
            ActionMap::Wheel,
            Action::SelectTerry,
            PadButton(GamepadButton::DPadUp),
        );
        table.bind(
            ActionMap::Wheel,
            Action::SelectFrog,
            PadButton(GamepadButton::DPadLeft),
        );
        table.bind(
            ActionMap::Wheel,
            Action::SelectBulldozer,
            PadButton(GamepadButton::DPadRight),
        );
        table.bind(
            ActionMap::Wheel,
            Action::SelectBall,
            PadButton(GamepadButton::DPadDown),
        );

        table.bind(ActionMap::Game, Action::Pause, Key(KeyCode::Escape));
        table.bind(
            ActionMap::Game,
            Action::Pause,
            PadButton(GamepadButton::Start),
        );

        table
    }
}
