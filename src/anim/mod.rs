//! Anim domain: animation state machine and the parameter surface the
//! gameplay core drives.
//!
//! Playback belongs to the engine; gameplay selects states and flips
//! parameters and never reads anything back for game logic. Facing for
//! dependent systems comes from the player state machine, not from
//! resolved clip names.


use bevy::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::core::GameState;
use crate::lockout::ActiveMeditation;
use crate::player::{Facing, FormRig, Player, PlayerState, TransformCue};

use avian3d::prelude::LinearVelocity;

/// Animation states for the player's forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimState {
    #[default]
    Idle,
    Walk,
    Jump,
    Fall,
    Morph,
    Meditate,
}

/// Component for animation playback on a form's animator root.
#[derive(Component, Debug)]
pub struct AnimationController {
    pub state: AnimState,
    pub previous_state: AnimState,
    /// Base name for animation clips (e.g. "terry.frog")
    pub animation_base: String,
    pub current_frame: u32,
    pub total_frames: u32,
    pub frame_timer: f32,
    pub frame_duration: f32,
    pub looping: bool,
    pub finished: bool,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            state: AnimState::Idle,
            previous_state: AnimState::Idle,
            animation_base: String::new(),
            current_frame: 0,
            total_frames: 4,
            frame_timer: 0.0,
            frame_duration: 0.15,
            looping: true,
            finished: false,
        }
    }
}

impl AnimationController {
    pub fn new(animation_base: &str) -> Self {
        Self {
            animation_base: animation_base.to_string(),
            ..default()
        }
    }

    /// Set the state, resetting playback if it changed.
    pub fn play(&mut self, state: AnimState) {
        if self.state == state {
            return;
        }
        self.previous_state = self.state;
        self.state = state;
        self.current_frame = 0;
        self.frame_timer = 0.0;
        self.finished = false;

        self.looping = matches!(
            state,
            AnimState::Idle | AnimState::Walk | AnimState::Meditate
        );

        self.total_frames = match state {
            AnimState::Idle => 4,
            AnimState::Walk => 6,
            AnimState::Jump => 2,
            AnimState::Fall => 2,
            AnimState::Morph => 3,
            AnimState::Meditate => 4,
        };

        self.frame_duration = match state {
            AnimState::Morph => 0.08,
            _ => 0.15,
        };
    }

    fn suffix(&self) -> &'static str {
        match self.state {
            AnimState::Idle => "idle",
            AnimState::Walk => "walk",
            AnimState::Jump => "jump",
            AnimState::Fall => "fall",
            AnimState::Morph => "morph",
            AnimState::Meditate => "meditate",
        }
    }

    /// Full clip key for the current frame (1-indexed for file naming).
    pub fn clip_name(&self) -> String {
        format!(
            "{}_{}_{}",
            self.animation_base,
            self.suffix(),
            self.current_frame + 1
        )
    }
}

/// Named parameter surface (bools, floats, triggers) for the playback
/// collaborator.
#[derive(Component, Debug, Default)]
pub struct AnimatorParams {
    bools: HashMap<String, bool>,
    floats: HashMap<String, f32>,
    triggers: HashSet<String>,
}

impl AnimatorParams {
    pub fn set_bool(&mut self, name: &str, value: bool) {
        self.bools.insert(name.to_string(), value);
    }

    pub fn bool_value(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.floats.insert(name.to_string(), value);
    }

    pub fn float_value(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    pub fn set_trigger(&mut self, name: &str) {
        self.triggers.insert(name.to_string());
    }

    /// Consumes the trigger, returning whether it was set.
    pub fn take_trigger(&mut self, name: &str) -> bool {
        self.triggers.remove(name)
    }
}

/// Advances frame playback on every controller.
pub(crate) fn update_animation_frames(
    time: Res<Time>,
    mut controllers: Query<&mut AnimationController>,
) {
    for mut controller in &mut controllers {
        if controller.finished {
            continue;
        }

        controller.frame_timer += time.delta_secs();
        if controller.frame_timer < controller.frame_duration {
            continue;
        }
        controller.frame_timer -= controller.frame_duration;
        controller.current_frame += 1;

        if controller.current_frame >= controller.total_frames {
            if controller.looping {
                controller.current_frame = 0;
            } else {
                controller.current_frame = controller.total_frames - 1;
                controller.finished = true;
            }
        }
    }
}

/// Kicks the morph clip on the newly active form's animator.
pub(crate) fn play_morph_cue(
    mut cues: MessageReader<TransformCue>,
    players: Query<&FormRig, With<Player>>,
    mut controllers: Query<(&mut AnimationController, Option<&mut AnimatorParams>)>,
) {
    for _cue in cues.read() {
        for rig in &players {
            // Animator may not be resolved yet; skip the visual, never
            // block the swap
            let Some(binding) = rig.active() else {
                continue;
            };
            let Ok((mut controller, params)) = controllers.get_mut(binding.animator) else {
                continue;
            };
            controller.play(AnimState::Morph);
            if let Some(mut params) = params {
                params.set_trigger("morph");
            }
        }
    }
}

/// Selects the active form's animation state from movement each frame and
/// refreshes the parameters the playback collaborator blends on.
pub(crate) fn drive_player_animation(
    meditation: Res<ActiveMeditation>,
    players: Query<(&FormRig, &PlayerState, &LinearVelocity), With<Player>>,
    mut controllers: Query<(&mut AnimationController, Option<&mut AnimatorParams>)>,
) {
    for (rig, state, velocity) in &players {
        let Some(binding) = rig.active() else {
            continue;
        };
        let Ok((mut controller, params)) = controllers.get_mut(binding.animator) else {
            continue;
        };

        if let Some(mut params) = params {
            params.set_bool("grounded", state.is_grounded());
            params.set_float("speed", Vec2::new(velocity.x, velocity.z).length());
        }

        // Let a running morph clip finish before movement takes over
        if controller.state == AnimState::Morph && !controller.finished {
            continue;
        }

        let next = if meditation.0.is_some() {
            AnimState::Meditate
        } else if !state.is_grounded() {
            if velocity.y > 0.0 {
                AnimState::Jump
            } else {
                AnimState::Fall
            }
        } else if state.move_intent != Vec2::ZERO {
            AnimState::Walk
        } else {
            AnimState::Idle
        };
        controller.play(next);
    }
}

/// Mirrors the active form's visual on horizontal facing.
pub(crate) fn flip_active_visual(
    players: Query<(&FormRig, &PlayerState), With<Player>>,
    mut visuals: Query<&mut Transform>,
) {
    for (rig, state) in &players {
        let Some(binding) = rig.active() else {
            continue;
        };
        let Ok(mut transform) = visuals.get_mut(binding.sprite) else {
            continue;
        };

        let flip = match state.facing {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
            Facing::Up | Facing::Down => transform.scale.x.signum(),
        };
        transform.scale.x = transform.scale.x.abs() * flip;
    }
}

pub struct AnimPlugin;

impl Plugin for AnimPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                play_morph_cue,
                drive_player_animation,
                update_animation_frames,
                flip_active_visual,
            )
                .chain()
                .run_if(in_state(GameState::InGame)),
        );
    }
}
