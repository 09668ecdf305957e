//! Forms domain: per-transformation ability kits and their plugin wiring.

mod ball;
mod bulldozer;
mod frog;
mod systems;
mod terry;

#[cfg(test)]
mod tests;

pub use ball::BallKit;
pub use bulldozer::BulldozerKit;
pub use frog::FrogKit;
pub use terry::TerryKit;

pub(crate) use systems::apply_form_abilities;

use avian3d::prelude::*;
use bevy::prelude::*;

use crate::content::FormTuning;
use crate::core::{GameState, gameplay_active};
use crate::input::InputSet;
use crate::player::{PlayerState, Transformation};

/// Grace window armed by every launch impulse.
pub(crate) const AIRBORNE_GRACE: f32 = 0.15;

/// What a kit may touch while an ability runs.
pub struct AbilityContext<'a> {
    pub state: &'a mut PlayerState,
    pub velocity: &'a mut LinearVelocity,
    pub position: Vec3,
    /// Nearest hookable inside the facing cone, resolved before dispatch
    pub hook_target: Option<Vec3>,
    /// One-shot cue ids collected for the audio collaborator
    pub cues: &'a mut Vec<&'static str>,
}

/// Replaces vertical velocity outright so a prior fall cannot eat into the
/// impulse, then arms the airborne grace window.
pub(crate) fn launch(ctx: &mut AbilityContext, vertical_speed: f32) {
    ctx.velocity.y = vertical_speed;
    ctx.state.register_airborne_impulse(AIRBORNE_GRACE);
}

/// The active form's ability script. Each kit owns its tuning plus any
/// runtime ability state.
#[derive(Debug, Clone, PartialEq)]
pub enum FormKit {
    Terry(TerryKit),
    Frog(FrogKit),
    Bulldozer(BulldozerKit),
    Ball(BallKit),
}

impl FormKit {
    pub fn transformation(&self) -> Transformation {
        match self {
            FormKit::Terry(_) => Transformation::Terry,
            FormKit::Frog(_) => Transformation::Frog,
            FormKit::Bulldozer(_) => Transformation::Bulldozer,
            FormKit::Ball(_) => Transformation::Ball,
        }
    }

    pub fn base_speed(&self) -> f32 {
        match self {
            FormKit::Terry(kit) => kit.base_speed,
            FormKit::Frog(kit) => kit.base_speed,
            FormKit::Bulldozer(kit) => kit.current_speed(),
            FormKit::Ball(kit) => kit.base_speed,
        }
    }

    pub fn activation_cue(&self) -> &'static str {
        match self {
            FormKit::Terry(_) => "form_terry",
            FormKit::Frog(_) => "form_frog",
            FormKit::Bulldozer(_) => "form_bulldozer",
            FormKit::Ball(_) => "form_ball",
        }
    }

    /// Activation resets per-form runtime state before the kit's speed is
    /// pushed up to the actor.
    pub fn on_activate(&mut self) {
        match self {
            FormKit::Bulldozer(kit) => kit.pushing = false,
            FormKit::Ball(kit) => kit.reset(),
            FormKit::Terry(_) | FormKit::Frog(_) => {}
        }
    }

    pub fn ability1(&mut self, ctx: &mut AbilityContext) {
        match self {
            FormKit::Terry(_) => {}
            FormKit::Frog(kit) => kit.jump(ctx),
            FormKit::Bulldozer(kit) => kit.toggle_pushing(ctx),
            FormKit::Ball(kit) => kit.jump(ctx),
        }
    }

    pub fn ability2(&mut self, ctx: &mut AbilityContext) {
        match self {
            FormKit::Frog(kit) => kit.tongue_hook(ctx),
            _ => {}
        }
    }

    pub fn ability3(&mut self, _ctx: &mut AbilityContext) {
        // No form maps a third ability yet; the slot stays routed so a new
        // kit can claim it without input changes.
    }

    pub fn tick(&mut self, dt: f32, grounded: bool) {
        if let FormKit::Ball(kit) = self {
            kit.tick(dt, grounded);
        }
    }

    /// Builds a kit from loaded tuning, falling back to compiled defaults
    /// for a missing definition or zeroed fields.
    pub fn from_tuning(transformation: Transformation, tuning: &FormTuning) -> Self {
        let def = tuning.def(transformation);
        let speed = |default: f32| tuned(def.map(|d| d.base_speed), default);

        match transformation {
            Transformation::Terry => FormKit::Terry(TerryKit {
                base_speed: speed(5.0),
            }),
            Transformation::Frog => FormKit::Frog(FrogKit {
                base_speed: speed(5.5),
                jump_speed: tuned(def.map(|d| d.jump_speed), 8.0),
                hook_pull_speed: tuned(def.map(|d| d.hook_pull_speed), 12.0),
            }),
            Transformation::Bulldozer => FormKit::Bulldozer(BulldozerKit {
                base_speed: speed(3.5),
                mass_factor: tuned(def.map(|d| d.mass_factor), 4.0),
                pushing: false,
            }),
            Transformation::Ball => FormKit::Ball(BallKit::new(
                speed(7.0),
                tuned(def.map(|d| d.jump_speed), 7.5),
                tuned(def.map(|d| d.double_jump_speed), 6.5),
                tuned(def.map(|d| d.double_window), 0.35),
                tuned(def.map(|d| d.forgiveness), 0.1),
            )),
        }
    }
}

fn tuned(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v > 0.0 => v,
        _ => default,
    }
}

pub struct FormsPlugin;

impl Plugin for FormsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                systems::tick_form_kits,
                systems::apply_form_abilities
                    .in_set(InputSet::Apply)
                    .after(crate::player::apply_transform_requests)
                    .run_if(gameplay_active),
                systems::sync_pushing_state,
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
