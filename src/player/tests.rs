//! Player domain: tests for the swap state machine, grounded gating, and
//! facing heuristics.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{Facing, FormBinding, FormRig, PlayerState, SaveSnapshot, Transformation};
use crate::content::FormTuning;
use crate::forms::FormKit;
use crate::lockout::{DEFAULT_MAX_CHARGE, LockoutCharges};

fn test_rig(forms: &[Transformation]) -> FormRig {
    let tuning = FormTuning::fallback();
    let mut bindings = HashMap::new();
    for (index, &transformation) in forms.iter().enumerate() {
        let base = 42 + index as u64 * 3;
        bindings.insert(
            transformation,
            FormBinding {
                group: Entity::from_bits(base),
                sprite: Entity::from_bits(base + 1),
                animator: Entity::from_bits(base + 2),
                kit: FormKit::from_tuning(transformation, &tuning),
            },
        );
    }
    FormRig::new(bindings)
}

// -----------------------------------------------------------------------------
// Swap protocol
// -----------------------------------------------------------------------------

#[test]
fn test_swap_records_previous_and_current() {
    let mut rig = test_rig(&Transformation::ALL);
    let mut charges = LockoutCharges::default();

    let outcome = rig.begin_swap(Transformation::Frog);
    charges.subtract(Transformation::Frog);

    assert!(outcome.changed);
    assert!(!outcome.fell_back);
    assert_eq!(rig.current(), Transformation::Frog);
    assert_eq!(rig.previous(), Transformation::Terry);
    assert_eq!(
        charges.charge(Transformation::Frog).unwrap().current,
        DEFAULT_MAX_CHARGE - 1
    );

    // The active binding is the frog's
    let frog_group = rig.binding(Transformation::Frog).unwrap().group;
    assert_eq!(rig.active().unwrap().group, frog_group);
}

#[test]
fn test_swap_to_current_form_fires_no_cue() {
    let mut rig = test_rig(&Transformation::ALL);
    rig.begin_swap(Transformation::Ball);

    let outcome = rig.begin_swap(Transformation::Ball);

    assert!(!outcome.changed);
    assert_eq!(rig.current(), Transformation::Ball);
}

#[test]
fn test_swap_to_unbound_form_falls_back_to_terry() {
    let mut rig = test_rig(&[Transformation::Terry, Transformation::Frog]);
    rig.begin_swap(Transformation::Frog);

    let outcome = rig.begin_swap(Transformation::Ball);

    assert!(outcome.fell_back);
    assert_eq!(outcome.to, Transformation::Terry);
    assert_eq!(rig.current(), Transformation::Terry);
    assert_eq!(rig.previous(), Transformation::Frog);
}

#[test]
fn test_active_kit_matches_current_form() {
    let mut rig = test_rig(&Transformation::ALL);
    rig.begin_swap(Transformation::Bulldozer);

    let kit = rig.active_kit_mut().unwrap();
    assert_eq!(kit.transformation(), Transformation::Bulldozer);
}

// -----------------------------------------------------------------------------
// Grounded state and airborne grace
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_ignored_during_airborne_grace() {
    let mut state = PlayerState::default();
    state.set_grounded(true);

    state.register_airborne_impulse(0.15);
    assert!(!state.is_grounded());
    assert!(state.jumping);

    // Ground contact 0.1s in is discarded
    state.tick_grace(0.1);
    state.set_grounded(true);
    assert!(!state.is_grounded());
    assert!(state.jumping);

    // After the window has elapsed, landing sticks and clears jumping
    state.tick_grace(0.06);
    state.set_grounded(true);
    assert!(state.is_grounded());
    assert!(!state.jumping);
}

#[test]
fn test_repeat_impulse_extends_grace() {
    let mut state = PlayerState::default();
    state.register_airborne_impulse(0.05);
    state.tick_grace(0.03);
    state.register_airborne_impulse(0.15);

    assert!(state.airborne_grace() >= 0.15);
}

#[test]
fn test_landing_without_grace_clears_jumping() {
    let mut state = PlayerState::default();
    state.register_airborne_impulse(0.1);
    state.tick_grace(0.2);

    state.set_grounded(true);
    assert!(state.is_grounded());
    assert!(!state.jumping);
}

// -----------------------------------------------------------------------------
// Movement locks
// -----------------------------------------------------------------------------

#[test]
fn test_move_locks_stack_by_source() {
    let mut state = PlayerState::default();
    assert!(state.can_move());

    state.lock_movement("meditation");
    state.lock_movement("cutscene");
    assert!(!state.can_move());

    state.unlock_movement("meditation");
    assert!(!state.can_move());
    state.unlock_movement("cutscene");
    assert!(state.can_move());
}

// -----------------------------------------------------------------------------
// Facing heuristics
// -----------------------------------------------------------------------------

#[test]
fn test_facing_follows_dominant_axis() {
    let mut state = PlayerState::default();

    state.update_facing(Vec2::new(1.0, 0.0), 0.2);
    assert_eq!(state.facing, Facing::Right);

    state.update_facing(Vec2::new(-0.6, 0.1), 0.2);
    assert_eq!(state.facing, Facing::Left);

    state.update_facing(Vec2::new(0.1, 0.9), 0.2);
    assert_eq!(state.facing, Facing::Up);

    state.update_facing(Vec2::new(0.0, -0.8), 0.2);
    assert_eq!(state.facing, Facing::Down);
}

#[test]
fn test_facing_tie_goes_to_most_recently_crossed_axis() {
    let mut state = PlayerState::default();

    // Horizontal crosses first, then vertical crosses on the tie frame
    state.update_facing(Vec2::new(0.5, 0.0), 0.2);
    assert_eq!(state.facing, Facing::Right);

    state.update_facing(Vec2::new(0.5, 0.5), 0.2);
    assert_eq!(state.facing, Facing::Up);
}

#[test]
fn test_facing_unchanged_below_deadzone() {
    let mut state = PlayerState::default();
    state.update_facing(Vec2::new(-1.0, 0.0), 0.2);
    assert_eq!(state.facing, Facing::Left);

    state.update_facing(Vec2::new(0.1, 0.05), 0.2);
    assert_eq!(state.facing, Facing::Left);
}

#[test]
fn test_anim_facing_snaps_to_octants() {
    let mut state = PlayerState::default();

    state.update_facing(Vec2::new(1.0, 0.0), 0.2);
    assert_eq!(state.anim_facing, Vec2::new(1.0, 0.0));

    state.update_facing(Vec2::new(0.7, 0.7), 0.2);
    let diagonal = std::f32::consts::FRAC_1_SQRT_2;
    assert!((state.anim_facing.x - diagonal).abs() < 1e-5);
    assert!((state.anim_facing.y - diagonal).abs() < 1e-5);

    // Below deadzone the last snap sticks
    state.update_facing(Vec2::ZERO, 0.2);
    assert!((state.anim_facing.x - diagonal).abs() < 1e-5);
}

// -----------------------------------------------------------------------------
// Save snapshot
// -----------------------------------------------------------------------------

#[test]
fn test_save_snapshot_captures_form_and_position() {
    let mut rig = test_rig(&Transformation::ALL);
    rig.begin_swap(Transformation::Ball);
    let transform = Transform::from_xyz(3.0, 1.0, -2.0);

    let snapshot = SaveSnapshot::capture(&rig, &transform);

    assert_eq!(snapshot.transformation, Transformation::Ball);
    assert_eq!(snapshot.position, [3.0, 1.0, -2.0]);
    assert!(snapshot.to_json().unwrap().contains("Ball"));
}
