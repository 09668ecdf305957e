//! Input domain: per-frame device sampling feeding the router.

use bevy::prelude::*;

use crate::input::actions::{Action, ActionContext, ActionMap};
use crate::input::bindings::{BindingPath, DeviceClass};
use crate::input::registry::ActionRegistry;
use crate::input::router::InputRouter;

/// Samples every device class once per frame and pushes raw edges plus the
/// locomotion axis composite through the router. The binding table is read
/// first so rebinds take effect immediately.
pub(crate) fn sample_devices(
    keyboard: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    gamepads: Query<&Gamepad>,
    mut router: ResMut<InputRouter>,
    mut registry: ResMut<ActionRegistry>,
) {
    let mut raw: Vec<(ActionMap, Action, ActionContext)> = Vec::new();

    for (&(map, action, _device), paths) in router.bindings().iter() {
        for path in paths {
            match *path {
                BindingPath::Key(key) => {
                    if keyboard.just_pressed(key) {
                        raw.push((map, action, ActionContext::press(DeviceClass::Keyboard)));
                    }
                    if keyboard.just_released(key) {
                        raw.push((map, action, ActionContext::release(DeviceClass::Keyboard)));
                    }
                }
                BindingPath::PadButton(button) => {
                    for pad in &gamepads {
                        if pad.just_pressed(button) {
                            raw.push((map, action, ActionContext::press(DeviceClass::Gamepad)));
                        }
                        if pad.just_released(button) {
                            raw.push((map, action, ActionContext::release(DeviceClass::Gamepad)));
                        }
                    }
                }
                BindingPath::MouseButton(button) => {
                    if mouse.just_pressed(button) {
                        raw.push((map, action, ActionContext::press(DeviceClass::Mouse)));
                    }
                    if mouse.just_released(button) {
                        raw.push((map, action, ActionContext::release(DeviceClass::Mouse)));
                    }
                }
            }
        }
    }

    // Locomotion axis composite: keyboard WASD/arrows, else left stick.
    // Routed every frame, including zero, so released keys clear the intent.
    let mut axis = Vec2::ZERO;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis.x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis.x += 1.0;
    }
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        axis.y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        axis.y += 1.0;
    }

    let mut device = DeviceClass::Keyboard;
    if axis == Vec2::ZERO {
        for pad in &gamepads {
            let stick = pad.left_stick();
            if stick != Vec2::ZERO {
                axis = stick;
                device = DeviceClass::Gamepad;
                break;
            }
        }
    }
    raw.push((
        ActionMap::Player,
        Action::Move,
        ActionContext::axis_value(axis, device),
    ));

    for (map, action, ctx) in raw {
        router.on_raw_action(&mut registry, map, action, ctx);
    }
}
