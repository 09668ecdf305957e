//! Forms domain: tests for kit ability logic.

use avian3d::prelude::*;
use bevy::prelude::*;

use super::{AbilityContext, BallKit, BulldozerKit, FormKit, FrogKit};
use crate::content::FormTuning;
use crate::player::{PlayerState, Transformation};

fn grounded_state() -> PlayerState {
    let mut state = PlayerState::default();
    state.set_grounded(true);
    state
}

macro_rules! ctx {
    ($state:expr, $velocity:expr, $cues:expr) => {
        AbilityContext {
            state: $state,
            velocity: $velocity,
            position: Vec3::ZERO,
            hook_target: None,
            cues: $cues,
        }
    };
}

// -----------------------------------------------------------------------------
// Frog tests
// -----------------------------------------------------------------------------

#[test]
fn test_frog_jump_when_grounded() {
    let mut kit = FrogKit {
        base_speed: 5.5,
        jump_speed: 8.0,
        hook_pull_speed: 12.0,
    };
    let mut state = grounded_state();
    let mut velocity = LinearVelocity(Vec3::new(1.0, -2.0, 0.0));
    let mut cues = Vec::new();

    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));

    // Vertical velocity is replaced, not added to
    assert_eq!(velocity.y, 8.0);
    assert_eq!(velocity.x, 1.0);
    assert!(!state.is_grounded());
    assert!(state.jumping);
    assert!(state.airborne_grace() > 0.0);
    assert_eq!(cues, vec!["frog_jump"]);
}

#[test]
fn test_frog_jump_ignored_when_airborne() {
    let mut kit = FrogKit {
        base_speed: 5.5,
        jump_speed: 8.0,
        hook_pull_speed: 12.0,
    };
    let mut state = PlayerState::default();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(velocity.y, 0.0);
    assert!(cues.is_empty());
}

#[test]
fn test_frog_tongue_hook_pulls_toward_target() {
    let mut kit = FrogKit {
        base_speed: 5.5,
        jump_speed: 8.0,
        hook_pull_speed: 10.0,
    };
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    let mut ctx = ctx!(&mut state, &mut velocity, &mut cues);
    ctx.hook_target = Some(Vec3::new(4.0, 3.0, 0.0));
    kit.tongue_hook(&mut ctx);

    assert_eq!(velocity.0, Vec3::new(8.0, 6.0, 0.0));
    assert_eq!(cues, vec!["frog_tongue"]);
}

#[test]
fn test_frog_tongue_hook_without_target_is_silent() {
    let mut kit = FrogKit {
        base_speed: 5.5,
        jump_speed: 8.0,
        hook_pull_speed: 10.0,
    };
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.tongue_hook(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(velocity.0, Vec3::ZERO);
    assert!(cues.is_empty());
}

// -----------------------------------------------------------------------------
// Bulldozer tests
// -----------------------------------------------------------------------------

#[test]
fn test_bulldozer_toggle_slows_and_restores_speed() {
    let mut kit = BulldozerKit {
        base_speed: 4.0,
        mass_factor: 4.0,
        pushing: false,
    };
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.toggle_pushing(&mut ctx!(&mut state, &mut velocity, &mut cues));
    assert!(kit.pushing);
    assert!(state.move_speed < 4.0);

    kit.toggle_pushing(&mut ctx!(&mut state, &mut velocity, &mut cues));
    assert!(!kit.pushing);
    assert_eq!(state.move_speed, 4.0);
    assert_eq!(cues, vec!["dozer_engage", "dozer_release"]);
}

// -----------------------------------------------------------------------------
// Ball tests
// -----------------------------------------------------------------------------

fn ball_kit() -> BallKit {
    BallKit::new(7.0, 7.5, 6.5, 0.35, 0.1)
}

#[test]
fn test_ball_double_jump_within_window() {
    let mut kit = ball_kit();
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));
    assert_eq!(kit.jumps_used(), 1);
    assert_eq!(velocity.y, 7.5);

    // 0.2s airborne, still inside the 0.35s window
    kit.tick(0.2, false);
    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));
    assert_eq!(kit.jumps_used(), 2);
    assert_eq!(velocity.y, 6.5);
    assert_eq!(cues, vec!["ball_jump", "ball_double_jump"]);
}

#[test]
fn test_ball_double_jump_expires_after_window() {
    let mut kit = ball_kit();
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));
    velocity.y = 0.0;

    kit.tick(0.5, false);
    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(kit.jumps_used(), 1);
    assert_eq!(velocity.y, 0.0);
}

#[test]
fn test_ball_forgiveness_allows_late_first_jump() {
    let mut kit = ball_kit();
    let mut state = PlayerState::default();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    // Rolled off an edge 0.05s ago, never jumped
    kit.tick(0.05, false);
    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(kit.jumps_used(), 1);
    assert_eq!(velocity.y, 7.5);
}

#[test]
fn test_ball_forgiveness_expires() {
    let mut kit = ball_kit();
    let mut state = PlayerState::default();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.tick(0.3, false);
    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(kit.jumps_used(), 0);
    assert_eq!(velocity.y, 0.0);
}

#[test]
fn test_ball_landing_resets_jumps() {
    let mut kit = ball_kit();
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.jump(&mut ctx!(&mut state, &mut velocity, &mut cues));
    kit.tick(0.2, false);
    kit.tick(0.016, true);

    assert_eq!(kit.jumps_used(), 0);
}

// -----------------------------------------------------------------------------
// FormKit dispatch tests
// -----------------------------------------------------------------------------

#[test]
fn test_kit_from_default_tuning() {
    let tuning = FormTuning::fallback();
    for transformation in Transformation::ALL {
        let kit = FormKit::from_tuning(transformation, &tuning);
        assert_eq!(kit.transformation(), transformation);
        assert!(kit.base_speed() > 0.0);
    }
}

#[test]
fn test_terry_abilities_are_inert() {
    let mut kit = FormKit::from_tuning(Transformation::Terry, &FormTuning::fallback());
    let mut state = grounded_state();
    let mut velocity = LinearVelocity::default();
    let mut cues = Vec::new();

    kit.ability1(&mut ctx!(&mut state, &mut velocity, &mut cues));
    kit.ability2(&mut ctx!(&mut state, &mut velocity, &mut cues));
    kit.ability3(&mut ctx!(&mut state, &mut velocity, &mut cues));

    assert_eq!(velocity.0, Vec3::ZERO);
    assert!(cues.is_empty());
}

#[test]
fn test_activation_resets_bulldozer_stance() {
    let mut kit = FormKit::Bulldozer(BulldozerKit {
        base_speed: 4.0,
        mass_factor: 4.0,
        pushing: true,
    });

    kit.on_activate();

    let FormKit::Bulldozer(inner) = &kit else {
        panic!("kit variant changed");
    };
    assert!(!inner.pushing);
    assert_eq!(kit.base_speed(), 4.0);
}
