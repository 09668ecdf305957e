//! Input domain: tests for the registry, roster, router, and bindings.

use bevy::prelude::*;

use super::{
    Action, ActionBinding, ActionContext, ActionMap, ActionRegistry, BindingPath, BindingTable,
    DeviceClass, InputRouter, KeyActionReceiver, ReceiverRoster,
};

#[derive(Component, Debug, Default)]
struct WheelProbe {
    frog_hits: u32,
}

fn on_select_frog(probe: &mut WheelProbe, _ctx: &ActionContext) {
    probe.frog_hits += 1;
}

impl KeyActionReceiver for WheelProbe {
    const MAP: ActionMap = ActionMap::Wheel;

    fn bindings() -> &'static [ActionBinding<Self>] {
        &[(Action::SelectFrog, on_select_frog)]
    }
}

// -----------------------------------------------------------------------------
// ActionRegistry tests
// -----------------------------------------------------------------------------

#[test]
fn test_registry_register_and_dispatch() {
    let mut registry = ActionRegistry::default();
    assert!(!registry.is_registered(ActionMap::Player));

    registry.register(ActionMap::Player);
    assert!(registry.is_registered(ActionMap::Player));

    registry.dispatch(
        ActionMap::Player,
        Action::Ability1,
        ActionContext::press(DeviceClass::Keyboard),
    );
    assert_eq!(registry.pending(ActionMap::Player), 1);
}

#[test]
fn test_registry_double_register_is_guarded() {
    let mut registry = ActionRegistry::default();
    registry.register(ActionMap::Player);
    registry.dispatch(
        ActionMap::Player,
        Action::Ability1,
        ActionContext::press(DeviceClass::Keyboard),
    );

    // A second registration must not clobber the existing slot.
    registry.register(ActionMap::Player);
    assert!(registry.is_registered(ActionMap::Player));
    assert_eq!(registry.pending(ActionMap::Player), 1);
}

#[test]
fn test_registry_dispatch_without_dispatcher_drops() {
    let mut registry = ActionRegistry::default();
    registry.dispatch(
        ActionMap::Wheel,
        Action::SelectBall,
        ActionContext::press(DeviceClass::Keyboard),
    );
    assert_eq!(registry.pending(ActionMap::Wheel), 0);
}

#[test]
fn test_registry_unregister_absent_is_noop() {
    let mut registry = ActionRegistry::default();
    registry.unregister(ActionMap::Game);
    assert!(!registry.is_registered(ActionMap::Game));
}

#[test]
fn test_registry_drain_empties_queue() {
    let mut registry = ActionRegistry::default();
    registry.register(ActionMap::Wheel);
    registry.dispatch(
        ActionMap::Wheel,
        Action::SelectFrog,
        ActionContext::press(DeviceClass::Keyboard),
    );
    registry.dispatch(
        ActionMap::Wheel,
        Action::SelectBall,
        ActionContext::press(DeviceClass::Gamepad),
    );

    let drained = registry.drain(ActionMap::Wheel);
    assert_eq!(drained.len(), 2);
    assert_eq!(drained[0].action, Action::SelectFrog);
    assert_eq!(drained[1].action, Action::SelectBall);
    assert_eq!(registry.pending(ActionMap::Wheel), 0);
}

// -----------------------------------------------------------------------------
// Roster tests: dispatcher registered iff live count > 0
// -----------------------------------------------------------------------------

#[test]
fn test_roster_registers_on_first_instance_only() {
    let mut registry = ActionRegistry::default();
    let mut roster = ReceiverRoster::<WheelProbe>::default();
    let first = Entity::from_bits(42);
    let second = Entity::from_bits(43);

    roster.note_enabled(first, &mut registry);
    assert!(registry.is_registered(ActionMap::Wheel));
    assert_eq!(roster.len(), 1);

    roster.note_enabled(second, &mut registry);
    assert_eq!(roster.len(), 2);

    // Disabling one of two leaves the dispatcher registered.
    roster.note_disabled(first, &mut registry);
    assert_eq!(roster.len(), 1);
    assert!(registry.is_registered(ActionMap::Wheel));

    // Disabling the last unregisters it.
    roster.note_disabled(second, &mut registry);
    assert!(roster.is_empty());
    assert!(!registry.is_registered(ActionMap::Wheel));
}

#[test]
fn test_roster_duplicate_enable_is_guarded() {
    let mut registry = ActionRegistry::default();
    let mut roster = ReceiverRoster::<WheelProbe>::default();
    let entity = Entity::from_bits(42);

    roster.note_enabled(entity, &mut registry);
    roster.note_enabled(entity, &mut registry);
    assert_eq!(roster.len(), 1);

    roster.note_disabled(entity, &mut registry);
    assert!(!registry.is_registered(ActionMap::Wheel));
}

#[test]
fn test_roster_preserves_registration_order() {
    let mut registry = ActionRegistry::default();
    let mut roster = ReceiverRoster::<WheelProbe>::default();
    let a = Entity::from_bits(42);
    let b = Entity::from_bits(43);
    let c = Entity::from_bits(44);

    roster.note_enabled(a, &mut registry);
    roster.note_enabled(b, &mut registry);
    roster.note_enabled(c, &mut registry);
    roster.note_disabled(b, &mut registry);

    assert_eq!(roster.live(), &[a, c]);
}

// -----------------------------------------------------------------------------
// Receiver handle tests
// -----------------------------------------------------------------------------

#[test]
fn test_handle_invokes_bound_handler() {
    let mut probe = WheelProbe::default();
    probe.handle(
        Action::SelectFrog,
        &ActionContext::press(DeviceClass::Keyboard),
    );
    assert_eq!(probe.frog_hits, 1);
}

#[test]
fn test_handle_ignores_unbound_action() {
    let mut probe = WheelProbe::default();
    probe.handle(
        Action::SelectBall,
        &ActionContext::press(DeviceClass::Keyboard),
    );
    assert_eq!(probe.frog_hits, 0);
}

// -----------------------------------------------------------------------------
// Router gate tests
// -----------------------------------------------------------------------------

#[test]
fn test_router_drops_non_core_while_not_listening() {
    let mut registry = ActionRegistry::default();
    registry.register(ActionMap::Player);

    let mut router = InputRouter::default();
    router.set_listening(false);
    router.on_raw_action(
        &mut registry,
        ActionMap::Player,
        Action::Move,
        ActionContext::axis_value(Vec2::new(0.6, 0.0), DeviceClass::Keyboard),
    );

    assert_eq!(registry.pending(ActionMap::Player), 0);
}

#[test]
fn test_router_passes_core_action_while_not_listening() {
    let mut registry = ActionRegistry::default();
    registry.register(ActionMap::Game);

    let mut router = InputRouter::default();
    router.set_listening(false);
    router.on_raw_action(
        &mut registry,
        ActionMap::Game,
        Action::Pause,
        ActionContext::press(DeviceClass::Gamepad),
    );

    assert_eq!(registry.pending(ActionMap::Game), 1);
    assert_eq!(router.active_device_class(), DeviceClass::Gamepad);
}

#[test]
fn test_router_listening_gate_round_trips() {
    let mut router = InputRouter::default();
    assert!(router.is_listening());

    router.set_listening(false);
    assert!(!router.is_listening());

    router.set_listening(true);
    assert!(router.is_listening());
}

#[test]
fn test_router_exposes_binding_introspection() {
    let mut router = InputRouter::default();

    let paths = router.binding(ActionMap::Game, Action::Pause, DeviceClass::Keyboard);
    assert_eq!(paths, &[BindingPath::Key(KeyCode::Escape)]);

    let replaced = router.rebind(
        ActionMap::Game,
        Action::Pause,
        DeviceClass::Keyboard,
        BindingPath::Key(KeyCode::Escape),
        BindingPath::Key(KeyCode::KeyP),
    );
    assert!(replaced);

    let paths = router.binding(ActionMap::Game, Action::Pause, DeviceClass::Keyboard);
    assert_eq!(paths, &[BindingPath::Key(KeyCode::KeyP)]);
}

#[test]
fn test_router_tracks_active_device() {
    let mut registry = ActionRegistry::default();
    registry.register(ActionMap::Player);

    let mut router = InputRouter::default();
    assert_eq!(router.active_device_class(), DeviceClass::Keyboard);

    router.on_raw_action(
        &mut registry,
        ActionMap::Player,
        Action::Ability1,
        ActionContext::press(DeviceClass::Mouse),
    );
    assert_eq!(router.active_device_class(), DeviceClass::Mouse);
}

// -----------------------------------------------------------------------------
// Binding table tests
// -----------------------------------------------------------------------------

#[test]
fn test_device_class_parsing() {
    assert_eq!("keyboard".parse::<DeviceClass>(), Ok(DeviceClass::Keyboard));
    assert_eq!("Gamepad".parse::<DeviceClass>(), Ok(DeviceClass::Gamepad));
    assert_eq!("MOUSE".parse::<DeviceClass>(), Ok(DeviceClass::Mouse));
    assert!("touchscreen".parse::<DeviceClass>().is_err());
}

#[test]
fn test_rebind_replaces_matching_path() {
    let mut table = BindingTable::default_bindings();
    let replaced = table.rebind(
        ActionMap::Player,
        Action::Ability1,
        DeviceClass::Keyboard,
        BindingPath::Key(KeyCode::Space),
        BindingPath::Key(KeyCode::KeyK),
    );

    assert!(replaced);
    let paths = table.paths(ActionMap::Player, Action::Ability1, DeviceClass::Keyboard);
    assert!(paths.contains(&BindingPath::Key(KeyCode::KeyK)));
    assert!(!paths.contains(&BindingPath::Key(KeyCode::Space)));
}

#[test]
fn test_rebind_without_matching_path_is_refused() {
    let mut table = BindingTable::default_bindings();
    let replaced = table.rebind(
        ActionMap::Player,
        Action::Ability1,
        DeviceClass::Keyboard,
        BindingPath::Key(KeyCode::KeyQ),
        BindingPath::Key(KeyCode::KeyK),
    );

    assert!(!replaced);
    let paths = table.paths(ActionMap::Player, Action::Ability1, DeviceClass::Keyboard);
    assert!(paths.contains(&BindingPath::Key(KeyCode::Space)));
}

#[test]
fn test_rebind_refuses_cross_device_path() {
    let mut table = BindingTable::default_bindings();
    let replaced = table.rebind(
        ActionMap::Player,
        Action::Ability1,
        DeviceClass::Keyboard,
        BindingPath::Key(KeyCode::Space),
        BindingPath::PadButton(GamepadButton::South),
    );

    assert!(!replaced);
}

#[test]
fn test_same_action_on_two_maps_is_distinct() {
    let mut table = BindingTable::default();
    table.bind(
        ActionMap::Player,
        Action::Interact,
        BindingPath::Key(KeyCode::KeyE),
    );
    table.bind(
        ActionMap::Wheel,
        Action::Interact,
        BindingPath::Key(KeyCode::Enter),
    );

    let player = table.paths(ActionMap::Player, Action::Interact, DeviceClass::Keyboard);
    let wheel = table.paths(ActionMap::Wheel, Action::Interact, DeviceClass::Keyboard);
    assert_eq!(player, &[BindingPath::Key(KeyCode::KeyE)]);
    assert_eq!(wheel, &[BindingPath::Key(KeyCode::Enter)]);
}
